//! Uniagent server library logic.

pub mod api;
pub mod config;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use uniagent_providers::Dispatcher;

/// Application state shared across all request handlers.
pub struct AppState {
    /// Provider adapter dispatcher, built once at startup with its API keys
    /// injected. Requests never touch the environment.
    pub dispatcher: Dispatcher,
}

/// Maximum request body size (1 MiB). Agent-creation payloads are small;
/// anything larger is a mistake or abuse.
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Handler for `GET /`.
async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Unified Agent API. Use /create-agent to create agents on Vapi or Retell."
    }))
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/create-agent", post(api::create_agent_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
