//! Blog posts resource.
//!
//! # Data Flow
//! ```text
//! RouteTable (handlers.rs::routes)
//!     → handler (list / get / create)
//!     → store.rs (shared ordered list)
//!     → ApiResponse
//! ```

pub mod handlers;
pub mod model;
pub mod store;

pub use handlers::routes;
pub use model::{derive_id, seed_posts, NewPost, Post};
pub use store::{PostStore, StoreError};
