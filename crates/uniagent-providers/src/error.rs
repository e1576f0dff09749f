use thiserror::Error;
use uniagent_types::Provider;

/// Errors produced while dispatching a request to a provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The selected provider has no API key configured. A deployment
    /// problem, not a request problem.
    #[error("{0} API key is not configured")]
    MissingApiKey(Provider),

    /// The provider answered with a 4xx/5xx status. The upstream status and
    /// raw body are relayed to the caller verbatim.
    #[error("{provider} API error: {status}")]
    Api {
        provider: Provider,
        status: u16,
        body: String,
    },

    /// Network-level failure reaching the provider (connection refused,
    /// timeout, DNS) or an unreadable response body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
