//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) and echo it on the response
//! - Decide whether a request carries a JSON body
//! - Read and decode that body into an explicit result
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Only `content-type: application/json` (exact) bodies are read at all
//! - Body reads are bounded by the configured limit; a decode failure is an
//!   error value, never a pending read

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Request},
};
use serde_json::Value;
use tower::Layer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestId, RequestId as HeaderRequestId, SetRequestId,
};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The only content type whose body is decoded.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Request ID as seen by handlers and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Read the ID set by [`RequestIdLayer`], or `"unknown"` if absent.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(X_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        Self(id.to_string())
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Convenience accessor on requests.
pub trait RequestIdExt {
    fn request_id(&self) -> RequestId;
}

impl<B> RequestIdExt for Request<B> {
    fn request_id(&self) -> RequestId {
        RequestId::from_headers(self.headers())
    }
}

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<HeaderRequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(HeaderRequestId::new(value))
    }
}

/// Sets `x-request-id` on requests lacking one and copies it to the response.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = SetRequestId<PropagateRequestId<S>, MakeRequestUuidV4>;

    fn layer(&self, inner: S) -> Self::Service {
        SetRequestId::x_request_id(PropagateRequestId::x_request_id(inner), MakeRequestUuidV4)
    }
}

/// Returns true if the request declares a JSON body.
pub fn has_json_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == JSON_MEDIA_TYPE)
        .unwrap_or(false)
}

/// Read and decode the request body.
///
/// Returns `Ok(None)` when the request does not declare a JSON body or the
/// body is empty.
pub async fn decode_json_body(
    headers: &HeaderMap,
    body: Body,
    limit: usize,
) -> Result<Option<Value>, ApiError> {
    if !has_json_body(headers) {
        return Ok(None);
    }

    let bytes = axum::body::to_bytes(body, limit)
        .await
        .map_err(ApiError::BodyRead)?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    Ok(Some(serde_json::from_slice(&bytes)?))
}
