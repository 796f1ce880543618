//! Error definitions for request handling and server startup.

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::loader::ConfigError;

/// Body text written for every 404.
pub const NOT_FOUND_MESSAGE: &str = "Not found.";

/// Body text written for every 400.
pub const ILL_FORMED_MESSAGE: &str = "Ill-formed request.";

/// Body text written when a post id is already taken.
pub const CONFLICT_MESSAGE: &str = "Already exists.";

/// Body text written when a response cannot be produced.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

/// Errors that terminate a single request.
///
/// Every variant maps to a fixed status code and a fixed plain-text body, so
/// clients never see internal details. The `Display` output is for logs only.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No route descriptor matched the method and path.
    #[error("No route for {method} {path}")]
    RouteNotFound { method: String, path: String },

    /// The route matched but the addressed post does not exist.
    #[error("Post not found")]
    NotFound,

    /// The request body is absent or lacks required fields.
    #[error("Missing or malformed request body")]
    IllFormed,

    /// The body was declared as JSON but did not parse.
    #[error("Request body is not valid JSON: {0}")]
    BodyDecode(#[from] serde_json::Error),

    /// The transport failed while the body was being read, or the body
    /// exceeded the configured limit.
    #[error("Failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    /// A post with the derived id already exists.
    #[error("Post `{0}` already exists")]
    Conflict(String),

    /// The handler result could not be serialized.
    #[error("Failed to serialize response body: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl ApiError {
    /// Status code written for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RouteNotFound { .. } | ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::IllFormed | ApiError::BodyDecode(_) | ApiError::BodyRead(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Serialize(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed body text written for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::RouteNotFound { .. } | ApiError::NotFound => NOT_FOUND_MESSAGE,
            ApiError::IllFormed | ApiError::BodyDecode(_) | ApiError::BodyRead(_) => {
                ILL_FORMED_MESSAGE
            }
            ApiError::Conflict(_) => CONFLICT_MESSAGE,
            ApiError::Serialize(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Errors that prevent the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid route pattern: {0}")]
    Route(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metrics exporter error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}
