//! Response normalization.
//!
//! # Responsibilities
//! - Define the single output contract every handler satisfies
//! - Write raw bodies byte-for-byte, without a content type
//! - Serialize JSON bodies with `application/json; charset=utf-8`
//! - Map request errors to their fixed status and text
//!
//! # Design Decisions
//! - Body is a tagged variant so the writer never inspects runtime types
//! - Serialization happens when the response is built, so a failure is an
//!   ordinary `ApiError` instead of a panic in the writer

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Content type written alongside JSON bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Body of a handler response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Written as-is.
    Raw(String),
    /// Serialized to JSON text.
    Json(Value),
}

/// A status code plus body, produced by every handler.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: StatusCode,
    body: ResponseBody,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: ResponseBody) -> Self {
        Self { status, body }
    }

    /// A plain-text response.
    pub fn raw(status: StatusCode, text: impl Into<String>) -> Self {
        Self::new(status, ResponseBody::Raw(text.into()))
    }

    /// A JSON response built from any serializable value.
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(value).map_err(ApiError::Serialize)?;
        Ok(Self::new(status, ResponseBody::Json(value)))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ResponseBody {
        &self.body
    }
}

impl From<ApiError> for ApiResponse {
    fn from(err: ApiError) -> Self {
        ApiResponse::raw(err.status(), err.message())
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.body {
            ResponseBody::Raw(text) => {
                let mut response = Response::new(Body::from(text));
                *response.status_mut() = self.status;
                response
            }
            ResponseBody::Json(value) => match serde_json::to_vec(&value) {
                Ok(bytes) => {
                    let mut response = Response::new(Body::from(bytes));
                    *response.status_mut() = self.status;
                    response.headers_mut().insert(
                        header::CONTENT_TYPE,
                        HeaderValue::from_static(JSON_CONTENT_TYPE),
                    );
                    response
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode JSON response");
                    ApiResponse::from(ApiError::Serialize(e)).into_response()
                }
            },
        }
    }
}
