//! Blog posts HTTP server library.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod posts;
pub mod routing;

pub use config::ServerConfig;
pub use error::{ApiError, ServerError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use posts::{Post, PostStore};
