//! Adapter for the Retell agent-creation API.

use crate::error::ProviderError;
use crate::merge_overrides;
use serde_json::{json, Map, Value};
use uniagent_types::{AgentRequest, Provider};

/// Voice engine used when a voice is requested without naming one.
pub const DEFAULT_VOICE_TYPE: &str = "eleven_labs";

/// Translates unified requests into Retell's agent schema and posts them
/// to `{base_url}/agents`.
#[derive(Debug, Clone)]
pub struct RetellAdapter {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl RetellAdapter {
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

    /// Builds the Retell payload for a validated request.
    ///
    /// Voice keys appear only when the request set `voice_type` or
    /// `voice_id`; `voice_id` is serialized as null when only `voice_type`
    /// was given, matching the provider contract. The `llm_webhook`
    /// sub-object is assembled separately and attached only if it ends up
    /// non-empty, so a request with none of `description`, `instructions`,
    /// `model` produces no `llm_webhook` key at all.
    pub fn build_payload(request: &AgentRequest) -> Map<String, Value> {
        let mut payload = Map::new();
        payload.insert("name".to_string(), json!(request.name));

        if request.voice_type.is_some() || request.voice_id.is_some() {
            payload.insert("voice_id".to_string(), json!(request.voice_id));
            payload.insert(
                "voice_type".to_string(),
                json!(request.voice_type.as_deref().unwrap_or(DEFAULT_VOICE_TYPE)),
            );
        }

        let mut llm_webhook = Map::new();
        if let Some(description) = &request.description {
            llm_webhook.insert("system_prompt".to_string(), json!(description));
        }
        if let Some(instructions) = &request.instructions {
            llm_webhook.insert("instructions".to_string(), json!(instructions));
        }
        if let Some(model) = &request.model {
            llm_webhook.insert("model".to_string(), json!(model));
        }
        if !llm_webhook.is_empty() {
            payload.insert("llm_webhook".to_string(), Value::Object(llm_webhook));
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

    /// Creates an agent on Retell, returning the raw provider JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Api`] with the upstream status and body when
    /// Retell answers ≥ 400, or [`ProviderError::Transport`] on network
    /// failure.
    pub async fn create_agent(&self, request: &AgentRequest) -> Result<Value, ProviderError> {
        let payload = Self::build_payload(request);
        tracing::info!(
            provider = %Provider::Retell,
            payload = %serde_json::Value::Object(payload.clone()),
            "creating retell agent"
        );

        let response = self
            .client
            .post(format!("{}/agents", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await?;
            tracing::error!(status = status.as_u16(), body = %body, "retell API error");
            return Err(ProviderError::Api {
                provider: Provider::Retell,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uniagent_types::CreateAgentRequest;

    fn request(body: Value) -> AgentRequest {
        serde_json::from_value::<CreateAgentRequest>(body)
            .unwrap()
            .validate()
            .unwrap()
    }

    #[test]
    fn minimal_request_yields_name_only() {
        let req = request(json!({"provider": "retell", "name": "Rohith"}));
        let payload = RetellAdapter::build_payload(&req);

        assert_eq!(Value::Object(payload), json!({"name": "Rohith"}));
    }

    #[test]
    fn no_llm_fields_means_no_llm_webhook() {
        let req = request(json!({
            "provider": "retell",
            "name": "Rohith",
            "voice_id": "11labs-Adrian"
        }));
        let payload = RetellAdapter::build_payload(&req);
        assert!(!payload.contains_key("llm_webhook"));
    }

    #[test]
    fn model_alone_produces_llm_webhook_with_only_model() {
        let req = request(json!({
            "provider": "retell",
            "name": "Rohith",
            "model": "gpt-4o"
        }));
        let payload = RetellAdapter::build_payload(&req);

        assert_eq!(
            Value::Object(payload),
            json!({"name": "Rohith", "llm_webhook": {"model": "gpt-4o"}})
        );
    }

    #[test]
    fn each_llm_field_maps_independently() {
        let req = request(json!({
            "provider": "retell",
            "name": "Rohith",
            "description": "support agent",
            "instructions": "be helpful"
        }));
        let payload = RetellAdapter::build_payload(&req);

        assert_eq!(
            payload["llm_webhook"],
            json!({"system_prompt": "support agent", "instructions": "be helpful"})
        );
    }

    #[test]
    fn voice_type_defaults_when_only_voice_id_given() {
        let req = request(json!({
            "provider": "retell",
            "name": "Rohith",
            "voice_id": "11labs-Adrian"
        }));
        let payload = RetellAdapter::build_payload(&req);

        assert_eq!(payload["voice_id"], json!("11labs-Adrian"));
        assert_eq!(payload["voice_type"], json!("eleven_labs"));
    }

    #[test]
    fn voice_type_alone_yields_null_voice_id() {
        let req = request(json!({
            "provider": "retell",
            "name": "Rohith",
            "voice_type": "openai"
        }));
        let payload = RetellAdapter::build_payload(&req);

        assert_eq!(payload["voice_id"], Value::Null);
        assert_eq!(payload["voice_type"], json!("openai"));
    }

    #[test]
    fn params_replace_adapter_built_llm_webhook_wholesale() {
        let req = request(json!({
            "provider": "retell",
            "name": "Rohith",
            "model": "gpt-4o",
            "provider_specific_params": {
                "llm_webhook": {"temperature": 0.3}
            }
        }));
        let payload = RetellAdapter::build_payload(&req);

        // Shallow merge: the caller's llm_webhook fully replaces the built one.
        assert_eq!(payload["llm_webhook"], json!({"temperature": 0.3}));
    }

    #[tokio::test]
    async fn create_agent_posts_payload_with_bearer_auth() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/agents")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::Json(json!({
                "name": "Rohith",
                "llm_webhook": {"model": "gpt-4o"}
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"agent_id": "agent_456"}"#)
            .create_async()
            .await;

        let adapter = RetellAdapter::new(reqwest::Client::new(), "test-key", server.url());
        let req = request(json!({
            "provider": "retell",
            "name": "Rohith",
            "model": "gpt-4o"
        }));

        let body = adapter.create_agent(&req).await.unwrap();
        assert_eq!(body["agent_id"], json!("agent_456"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn upstream_error_is_relayed_with_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/agents")
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let adapter = RetellAdapter::new(reqwest::Client::new(), "bad-key", server.url());
        let req = request(json!({"provider": "retell", "name": "Rohith"}));

        match adapter.create_agent(&req).await.unwrap_err() {
            ProviderError::Api {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, Provider::Retell);
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("expected Api error, got: {:?}", other),
        }
    }
}
