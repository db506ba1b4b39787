//! HTTP routes for the function host.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! ANY  /.netlify/functions/getProducts  - Product feed (path the website calls)
//! ANY  /api/products                    - Product feed
//! ```
//!
//! The feed ignores method, query and body; any request triggers one
//! invocation.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware,
    routing::{any, get},
};
use tower_http::trace::TraceLayer;

use crate::handler::FunctionResponse;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Path the website fetches the feed from.
pub const FUNCTION_PATH: &str = "/.netlify/functions/getProducts";

/// Alternate path for the feed.
pub const API_PATH: &str = "/api/products";

/// Build the router with tracing and request-id middleware applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(FUNCTION_PATH, any(get_products))
        .route(API_PATH, any(get_products))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not contact Contentful.
async fn health() -> &'static str {
    "ok"
}

async fn get_products(State(state): State<AppState>) -> FunctionResponse {
    state.feed().invoke().await
}
