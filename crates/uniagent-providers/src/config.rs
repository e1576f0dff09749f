use serde::{Deserialize, Serialize};
use std::fmt;

fn default_vapi_base_url() -> String {
    "https://api.vapi.ai".to_string()
}

fn default_retell_base_url() -> String {
    "https://api.retellai.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

/// Settings for the outbound provider adapters.
///
/// An adapter is only constructed when its API key is present; a request for
/// an unconfigured provider fails with a 500, never a panic. Base URLs are
/// overridable so tests can point adapters at a local mock server.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Bearer token for the Vapi API.
    #[serde(default, skip_serializing)]
    pub vapi_api_key: Option<String>,

    /// Bearer token for the Retell API.
    #[serde(default, skip_serializing)]
    pub retell_api_key: Option<String>,

    #[serde(default = "default_vapi_base_url")]
    pub vapi_base_url: String,

    #[serde(default = "default_retell_base_url")]
    pub retell_base_url: String,

    /// Timeout for a single outbound provider call, in seconds.
    /// Default: 30.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            vapi_api_key: None,
            retell_api_key: None,
            vapi_base_url: default_vapi_base_url(),
            retell_base_url: default_retell_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("vapi_api_key", &self.vapi_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("retell_api_key", &self.retell_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("vapi_base_url", &self.vapi_base_url)
            .field("retell_base_url", &self.retell_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
