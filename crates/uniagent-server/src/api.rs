//! API handlers for the uniagent server.

use crate::AppState;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use thiserror::Error;
use uniagent_providers::{AgentEnvelope, ProviderError};
use uniagent_types::{CreateAgentRequest, ValidationError};

/// API error type mapping to HTTP status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Malformed inbound request: 400 with the violated field named.
            ApiError::Validation(err) => {
                let body = Json(serde_json::json!({ "error": err.to_string() }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }

            // Missing API key is a deployment problem, not a caller problem.
            ApiError::Provider(ProviderError::MissingApiKey(_)) => {
                let body = Json(serde_json::json!({
                    "error": self.to_string()
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }

            // Relay the upstream status code and raw body text unchanged.
            ApiError::Provider(ProviderError::Api { status, body, .. }) => {
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, body).into_response()
            }

            // Network failure reaching the provider: generic 502, details in
            // the server log only.
            ApiError::Provider(ProviderError::Transport(err)) => {
                tracing::error!("provider transport failure: {}", err);
                let body = Json(serde_json::json!({
                    "error": "failed to reach provider"
                }));
                (StatusCode::BAD_GATEWAY, body).into_response()
            }
        }
    }
}

/// Handler for `POST /create-agent`.
///
/// Validates the unified request, dispatches it to the selected provider's
/// adapter, and returns the `{provider, response, status}` envelope.
pub async fn create_agent_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<CreateAgentRequest>,
) -> Result<Json<AgentEnvelope>, ApiError> {
    let request = payload.validate()?;
    let envelope = state.dispatcher.dispatch(&request).await?;
    Ok(Json(envelope))
}
