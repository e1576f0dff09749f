//! Adapter for the Vapi assistant-creation API.

use crate::error::ProviderError;
use crate::merge_overrides;
use serde_json::{json, Map, Value};
use uniagent_types::{AgentRequest, Provider};

/// Model used when the request does not name one.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Voice sub-provider used when a `voice_id` is given. Overridable only via
/// `provider_specific_params`.
pub const DEFAULT_VOICE_PROVIDER: &str = "openai";

/// Translates unified requests into Vapi's assistant schema and posts them
/// to `{base_url}/assistants`.
#[derive(Debug, Clone)]
pub struct VapiAdapter {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl VapiAdapter {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }

    /// Builds the Vapi payload for a validated request.
    ///
    /// `name` and `model` are always present; everything else is attached
    /// only when the unified request set it. `provider_specific_params` is
    /// merged last and wins any top-level key collision.
    pub fn build_payload(request: &AgentRequest) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("name".to_string(), json!(request.name));
        payload.insert(
            "model".to_string(),
            json!(request.model.as_deref().unwrap_or(DEFAULT_MODEL)),
        );

        if let Some(description) = &request.description {
            payload.insert("description".to_string(), json!(description));
        }
        if let Some(instructions) = &request.instructions {
            payload.insert("instructions".to_string(), json!(instructions));
        }
        if let Some(voice_id) = &request.voice_id {
            payload.insert(
                "voice".to_string(),
                json!({
                    "provider": DEFAULT_VOICE_PROVIDER,
                    "voice_id": voice_id,
                }),
            );
        }
        if let Some(webhook_url) = &request.webhook_url {
            payload.insert("webhook_url".to_string(), json!(webhook_url));
        }
        if let Some(metadata) = &request.metadata {
            payload.insert("metadata".to_string(), Value::Object(metadata.clone()));
        }

        merge_overrides(&mut payload, request.provider_specific_params.as_ref());
        payload
    }

    /// Creates an assistant on Vapi, returning the raw provider JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Api`] with the upstream status and body when
    /// Vapi answers ≥ 400, or [`ProviderError::Transport`] on network failure.
    pub async fn create_agent(&self, request: &AgentRequest) -> Result<Value, ProviderError> {
        let payload = Self::build_payload(request);
        tracing::info!(
            provider = %Provider::Vapi,
            payload = %serde_json::Value::Object(payload.clone()),
            "creating vapi assistant"
        );

        let response = self
            .client
            .post(format!("{}/assistants", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await?;
            tracing::error!(status = status.as_u16(), body = %body, "vapi API error");
            return Err(ProviderError::Api {
                provider: Provider::Vapi,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
