//! Post endpoints and the route table that declares them.

use axum::http::StatusCode;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::response::ApiResponse;
use crate::observability::metrics;
use crate::posts::model::{NewPost, Post};
use crate::posts::store::{PostStore, StoreError};
use crate::routing::{HandlerResult, PathCaptures, RouteDescriptor, RouteMethod, RouteTable};

/// `GET /posts`
pub const LIST_PATTERN: &str = r"^/posts$";

/// `GET /posts/{id}`
pub const BY_ID_PATTERN: &str = r"^/posts/([A-Za-z0-9_-]+)$";

/// `POST /posts`
pub const CREATE_PATTERN: &str = r"^/posts$";

/// Declare the post routes over `store`.
pub fn routes(store: &PostStore) -> Result<RouteTable, regex::Error> {
    let list_store = store.clone();
    let get_store = store.clone();
    let create_store = store.clone();

    Ok(RouteTable::new(vec![
        RouteDescriptor::new("list_posts", LIST_PATTERN, RouteMethod::Get, move |_, _| {
            list_posts(list_store.clone())
        })?,
        RouteDescriptor::new("get_post", BY_ID_PATTERN, RouteMethod::Get, move |captures, _| {
            get_post(get_store.clone(), captures)
        })?,
        RouteDescriptor::new("create_post", CREATE_PATTERN, RouteMethod::Post, move |_, body| {
            create_post(create_store.clone(), body)
        })?,
    ]))
}

/// Every post, in creation order.
pub async fn list_posts(store: PostStore) -> HandlerResult {
    ApiResponse::json(StatusCode::OK, &store.list().await)
}

/// The post named by the first capture.
pub async fn get_post(store: PostStore, captures: PathCaptures) -> HandlerResult {
    let id = captures.get(1).ok_or(ApiError::NotFound)?;
    let post = store.get(id).await.ok_or(ApiError::NotFound)?;
    ApiResponse::json(StatusCode::OK, &post)
}

/// Create a post from `{ "title": ..., "content": ... }`.
pub async fn create_post(store: PostStore, body: Option<Value>) -> HandlerResult {
    let body = body.ok_or(ApiError::IllFormed)?;
    let input: NewPost = serde_json::from_value(body).map_err(|_| ApiError::IllFormed)?;

    if input.title.trim().is_empty() {
        return Err(ApiError::IllFormed);
    }

    let post = store
        .insert(Post::new(input.title, input.content))
        .await
        .map_err(|e| match e {
            StoreError::DuplicateId(id) => ApiError::Conflict(id),
        })?;

    tracing::info!(id = %post.id, "Post created");
    metrics::record_post_created();

    ApiResponse::json(StatusCode::OK, &post)
}
