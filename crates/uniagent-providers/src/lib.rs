//! Provider adapters for the uniagent platform.
//!
//! Each adapter translates a validated [`AgentRequest`](uniagent_types::AgentRequest)
//! into the payload shape its provider expects and issues a single outbound
//! POST to that provider's agent-creation endpoint. The [`Dispatcher`] selects
//! the adapter from the request's provider tag and wraps the raw provider
//! response in a uniform envelope.
//!
//! Adapters are constructed once at startup with their API key injected;
//! nothing here reads the environment or retries a failed call.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod retell;
pub mod vapi;

pub use config::ProviderSettings;
pub use dispatch::{AgentEnvelope, Dispatcher};
pub use error::ProviderError;
pub use retell::RetellAdapter;
pub use vapi::VapiAdapter;

use serde_json::{Map, Value};

/// Shallow-merges `overrides` over `payload` at the top level.
///
/// Last write wins: a key present in both maps ends up with the override's
/// value, including nested objects, which replace (not deep-merge) whatever
/// the adapter built.
pub(crate) fn merge_overrides(
    payload: &mut Map<String, Value>,
    overrides: Option<&Map<String, Value>>,
) {
    if let Some(params) = overrides {
        for (key, value) in params {
            payload.insert(key.clone(), value.clone());
        }
    }
}
