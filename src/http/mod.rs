//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatcher)
//!     → request.rs (request ID, JSON body decoding)
//!     → routing (route table lookup)
//!     → posts handler
//!     → response.rs (status + raw or JSON body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use response::{ApiResponse, ResponseBody};
pub use server::HttpServer;
