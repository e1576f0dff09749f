//! Routes validated requests to the adapter for their provider tag.

use crate::config::ProviderSettings;
use crate::error::ProviderError;
use crate::retell::RetellAdapter;
use crate::vapi::VapiAdapter;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use uniagent_types::{AgentRequest, Provider};

/// Uniform response envelope returned for every successful creation,
/// regardless of provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct AgentEnvelope {
    pub provider: Provider,
    /// The provider's response body, relayed unmodified.
    pub response: Value,
    pub status: String,
}

/// Holds one adapter per configured provider and dispatches on the request's
/// provider tag. Provider selection is total over the [`Provider`] enum;
/// unknown provider strings never get this far (they are rejected at
/// validation with a 400).
#[derive(Debug)]
pub struct Dispatcher {
    vapi: Option<VapiAdapter>,
    retell: Option<RetellAdapter>,
}

impl Dispatcher {
    /// Builds adapters for every provider whose API key is present in
    /// `settings`. The shared HTTP client carries the configured request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns the underlying `reqwest` error if the client cannot be built.
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            vapi: settings
                .vapi_api_key
                .as_ref()
                .map(|key| VapiAdapter::new(client.clone(), key, &settings.vapi_base_url)),
            retell: settings
                .retell_api_key
                .as_ref()
                .map(|key| RetellAdapter::new(client.clone(), key, &settings.retell_base_url)),
        })
    }

    /// Providers that have an adapter configured. Used for startup logging.
    pub fn configured_providers(&self) -> Vec<Provider> {
        let mut providers = Vec::new();
        if self.vapi.is_some() {
            providers.push(Provider::Vapi);
        }
        if self.retell.is_some() {
            providers.push(Provider::Retell);
        }
        providers
    }

    /// Dispatches the request to its provider's adapter and wraps the raw
    /// provider response in the uniform envelope.
    ///
    /// # Errors
    ///
    /// [`ProviderError::MissingApiKey`] when the selected provider has no
    /// adapter configured; otherwise whatever the adapter call produced.
    pub async fn dispatch(&self, request: &AgentRequest) -> Result<AgentEnvelope, ProviderError> {
        let response = match request.provider {
            Provider::Vapi => {
                self.vapi
                    .as_ref()
                    .ok_or(ProviderError::MissingApiKey(Provider::Vapi))?
                    .create_agent(request)
                    .await?
            }
            Provider::Retell => {
                self.retell
                    .as_ref()
                    .ok_or(ProviderError::MissingApiKey(Provider::Retell))?
                    .create_agent(request)
                    .await?
            }
        };

        Ok(AgentEnvelope {
            provider: request.provider,
            response,
            status: "success".to_string(),
        })
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
    fn adapters_exist_only_for_configured_keys() {
        let dispatcher = Dispatcher::from_settings(&ProviderSettings {
            vapi_api_key: Some("key".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(dispatcher.configured_providers(), vec![Provider::Vapi]);
    }

    #[tokio::test]
    async fn missing_key_fails_without_an_outbound_call() {
        let dispatcher = Dispatcher::from_settings(&ProviderSettings::default()).unwrap();
        let req = request(json!({"provider": "retell", "name": "Rohith"}));

        match dispatcher.dispatch(&req).await.unwrap_err() {
            ProviderError::MissingApiKey(provider) => assert_eq!(provider, Provider::Retell),
            other => panic!("expected MissingApiKey, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn successful_dispatch_wraps_response_in_envelope() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/assistants")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "asst_123"}"#)
            .create_async()
            .await;

        let dispatcher = Dispatcher::from_settings(&ProviderSettings {
            vapi_api_key: Some("test-key".to_string()),
            vapi_base_url: server.url(),
            ..Default::default()
        })
        .unwrap();

        let req = request(json!({"provider": "vapi", "name": "Rohith"}));
        let envelope = dispatcher.dispatch(&req).await.unwrap();

        assert_eq!(envelope.provider, Provider::Vapi);
        assert_eq!(envelope.status, "success");
        assert_eq!(envelope.response["id"], json!("asst_123"));
    }

    #[tokio::test]
    async fn envelope_serializes_with_lowercase_provider_tag() {
        let envelope = AgentEnvelope {
            provider: Provider::Retell,
            response: json!({"agent_id": "agent_456"}),
            status: "success".to_string(),
        };
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            value,
            json!({
                "provider": "retell",
                "response": {"agent_id": "agent_456"},
                "status": "success"
            })
        );
    }
}
