//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store route descriptors in declaration order
//! - Look up the first route matching a request's method and path
//! - Return the matched route with its captures, or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (shared via Arc without locks)
//! - O(n) scan in declaration order; first match wins
//! - Explicit None rather than a silent default route

use std::future::Future;
use std::sync::Arc;

use axum::http::Method;
use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::response::ApiResponse;
use crate::routing::matcher::{PathCaptures, PathPattern, RouteMethod};

/// Result every handler resolves to.
pub type HandlerResult = Result<ApiResponse, ApiError>;

/// A type-erased async route handler.
pub type HandlerFn =
    Arc<dyn Fn(PathCaptures, Option<Value>) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// A (pattern, method, handler) triple.
#[derive(Clone)]
pub struct RouteDescriptor {
    name: &'static str,
    pattern: PathPattern,
    method: RouteMethod,
    handler: HandlerFn,
}

impl RouteDescriptor {
    /// Create a route descriptor, compiling its path pattern.
    pub fn new<F, Fut>(
        name: &'static str,
        pattern: &str,
        method: RouteMethod,
        handler: F,
    ) -> Result<Self, regex::Error>
    where
        F: Fn(PathCaptures, Option<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        let erased: HandlerFn = Arc::new(move |captures: PathCaptures, body: Option<Value>| {
            Box::pin(handler(captures, body)) as BoxFuture<'static, HandlerResult>
        });
        Ok(Self {
            name,
            pattern: PathPattern::new(pattern)?,
            method,
            handler: erased,
        })
    }

    /// Route identifier for logging/metrics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn method(&self) -> RouteMethod {
        self.method
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Run the handler.
    pub async fn invoke(&self, captures: PathCaptures, body: Option<Value>) -> HandlerResult {
        (self.handler)(captures, body).await
    }

    fn try_match(&self, method: &Method, path: &str) -> Option<PathCaptures> {
        if !self.method.matches(method) {
            return None;
        }
        self.pattern.captures(path)
    }
}

impl std::fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .field("method", &self.method)
            .finish()
    }
}

/// A successful lookup: the route plus the captures from its match.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteDescriptor,
    pub captures: PathCaptures,
}

/// Ordered, immutable route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        Self { routes }
    }

    /// Find the first route whose method and pattern both match.
    pub fn match_request(&self, method: &Method, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| {
            route
                .try_match(method, path)
                .map(|captures| RouteMatch { route, captures })
        })
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn fixed(name: &'static str, pattern: &str, method: RouteMethod) -> RouteDescriptor {
        RouteDescriptor::new(name, pattern, method, move |_, _| async move {
            Ok::<_, ApiError>(ApiResponse::raw(StatusCode::OK, name))
        })
        .unwrap()
    }

    #[test]
    fn test_method_and_pattern_must_both_match() {
        let table = RouteTable::new(vec![
            fixed("list", r"^/posts$", RouteMethod::Get),
            fixed("create", r"^/posts$", RouteMethod::Post),
        ]);

        assert_eq!(
            table.match_request(&Method::GET, "/posts").unwrap().route.name(),
            "list"
        );
        assert_eq!(
            table.match_request(&Method::POST, "/posts").unwrap().route.name(),
            "create"
        );
        assert!(table.match_request(&Method::DELETE, "/posts").is_none());
        assert!(table.match_request(&Method::GET, "/users").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let table = RouteTable::new(vec![
            fixed("specific", r"^/posts/special$", RouteMethod::Get),
            fixed("generic", r"^/posts/([a-z]+)$", RouteMethod::Get),
        ]);

        let m = table.match_request(&Method::GET, "/posts/special").unwrap();
        assert_eq!(m.route.name(), "specific");

        let m = table.match_request(&Method::GET, "/posts/other").unwrap();
        assert_eq!(m.route.name(), "generic");
        assert_eq!(m.captures.get(1), Some("other"));
    }

    #[tokio::test]
    async fn test_invoke_passes_captures_and_body() {
        let route = RouteDescriptor::new(
            "echo",
            r"^/echo/([a-z]+)$",
            RouteMethod::Post,
            |captures: PathCaptures, body: Option<Value>| async move {
                let id = captures.get(1).ok_or(ApiError::NotFound)?.to_string();
                let body = body.ok_or(ApiError::IllFormed)?;
                ApiResponse::json(StatusCode::OK, &serde_json::json!({ "id": id, "body": body }))
            },
        )
        .unwrap();

        let table = RouteTable::new(vec![route]);
        let m = table.match_request(&Method::POST, "/echo/abc").unwrap();
        let response = m
            .route
            .invoke(m.captures, Some(serde_json::json!({ "k": 1 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let m = table.match_request(&Method::POST, "/echo/abc").unwrap();
        let err = m.route.invoke(m.captures, None).await.unwrap_err();
        assert!(matches!(err, ApiError::IllFormed));
    }
}
