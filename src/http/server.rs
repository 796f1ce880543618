//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single dispatching fallback handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Match each request against the route table
//! - Decode JSON bodies, invoke handlers, normalize responses
//! - Observability (logs, metrics, request IDs)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::{ApiError, ServerError};
use crate::http::request::{decode_json_body, RequestIdExt, RequestIdLayer};
use crate::http::response::ApiResponse;
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::posts::{self, PostStore};
use crate::routing::{HandlerResult, RouteTable};

/// Route label used when nothing matched.
const NO_ROUTE: &str = "none";

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub max_body_size: usize,
}

/// HTTP server for the posts API.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    store: PostStore,
}

impl HttpServer {
    /// Create a server with a store initialized per `config.store`.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let store = if config.store.seed {
            PostStore::seeded()
        } else {
            PostStore::default()
        };
        Self::with_store(config, store)
    }

    /// Create a server over an existing store.
    pub fn with_store(config: ServerConfig, store: PostStore) -> Result<Self, ServerError> {
        let routes = Arc::new(posts::routes(&store)?);

        let state = AppState {
            routes,
            max_body_size: config.limits.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            store,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown_rx` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "The server is listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown_rx))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The store the routes operate on.
    pub fn store(&self) -> &PostStore {
        &self.store
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// Dispatcher entry point for every request.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        "Dispatching request"
    );

    let (route, result) = dispatch(&state, request).await;

    let response = match result {
        Ok(response) => response,
        Err(err) => {
            match &err {
                ApiError::RouteNotFound { .. } => {
                    tracing::warn!(request_id = %request_id, method = %method, path = %path, "No route matched");
                }
                ApiError::Serialize(_) => {
                    tracing::error!(request_id = %request_id, route = route, error = %err, "Handler failed");
                }
                _ => {
                    tracing::debug!(request_id = %request_id, route = route, error = %err, "Request rejected");
                }
            }
            ApiResponse::from(err)
        }
    };

    let status = response.status();
    metrics::record_request(method.as_str(), status.as_u16(), route, start_time);

    tracing::debug!(
        request_id = %request_id,
        route = route,
        status = status.as_u16(),
        "Request completed"
    );

    response.into_response()
}

/// Match, decode, invoke. Returns the matched route's name with the result.
async fn dispatch(state: &AppState, request: Request<Body>) -> (&'static str, HandlerResult) {
    let (parts, body) = request.into_parts();

    let matched = match state.routes.match_request(&parts.method, parts.uri.path()) {
        Some(m) => m,
        None => {
            return (
                NO_ROUTE,
                Err(ApiError::RouteNotFound {
                    method: parts.method.to_string(),
                    path: parts.uri.path().to_string(),
                }),
            );
        }
    };
    let route = matched.route.name();

    let body = match decode_json_body(&parts.headers, body, state.max_body_size).await {
        Ok(body) => body,
        Err(err) => return (route, Err(err)),
    };

    (route, matched.route.invoke(matched.captures, body).await)
}
