//! OpenAI-compatible forwarding API.
//!
//! Endpoints:
//! - GET / - Greeting
//! - GET /health - Health check
//! - GET /v1/models - Fixed model catalog
//! - POST /v1/chat/completions - Forward to the upstream, buffered or streamed
//! - OPTIONS * - CORS preflight

mod cors;
mod handlers;
mod stream;
mod types;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use reqwest::Client;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::http::{create_client, create_client_with_timeout};

pub use cors::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};
pub use types::*;

/// Application state shared across handlers.
///
/// Built once at startup; nothing in it changes while the server runs.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let client = match config.upstream.timeout() {
            Some(timeout) => create_client_with_timeout(timeout)?,
            None => create_client()?,
        };
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

/// Create the API router with the given state.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/v1/models", get(handlers::list_models))
        .route("/v1/chat/completions", post(handlers::chat_completions))
        .with_state(Arc::new(state))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn(cors::cors_stage))
        .layer(TraceLayer::new_for_http())
}
