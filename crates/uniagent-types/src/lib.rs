//! Request models for the uniagent unified agent-creation API.
//!
//! The wire model ([`CreateAgentRequest`]) deserializes every field as
//! optional so malformed requests are rejected by [`CreateAgentRequest::validate`]
//! with a named field, not by a serde error deep inside the extractor. The
//! validated form ([`AgentRequest`]) is the only type provider adapters accept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two supported voice-agent providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Vapi,
    Retell,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Vapi => "vapi",
            Provider::Retell => "retell",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vapi" => Ok(Provider::Vapi),
            "retell" => Ok(Provider::Retell),
            other => Err(ValidationError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// Errors produced when validating an inbound create-agent request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field must not be empty: {0}")]
    EmptyField(&'static str),

    #[error("unsupported provider: {0}")]
    UnsupportedProvider(String),
}

/// Inbound request body for `POST /create-agent`.
///
/// All fields are optional at the deserialization level; presence and shape
/// of the required ones is enforced by [`validate`](Self::validate).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CreateAgentRequest {
    /// Which provider to create the agent on ("vapi" or "retell").
    pub provider: Option<String>,

    /// Human-readable agent name. Required, must be non-empty.
    pub name: Option<String>,

    pub description: Option<String>,
    pub instructions: Option<String>,
    pub model: Option<String>,

    pub voice_type: Option<String>,
    pub voice_id: Option<String>,

    pub webhook_url: Option<String>,

    /// Arbitrary metadata, passed through to the provider verbatim.
    pub metadata: Option<Map<String, Value>>,

    /// Provider-specific escape hatch: merged over the generated payload at
    /// the top level, last write wins. Contents are opaque to this layer.
    pub provider_specific_params: Option<Map<String, Value>>,
}

/// A validated create-agent request, ready for dispatch to an adapter.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    pub provider: Provider,
    pub name: String,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub model: Option<String>,
    pub voice_type: Option<String>,
    pub voice_id: Option<String>,
    pub webhook_url: Option<String>,
    pub metadata: Option<Map<String, Value>>,
    pub provider_specific_params: Option<Map<String, Value>>,
}

impl CreateAgentRequest {
    /// Validates the wire request and produces the normalized [`AgentRequest`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the violated field when `provider`
    /// is missing or unrecognized, or when `name` is missing or empty.
    pub fn validate(self) -> Result<AgentRequest, ValidationError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(ValidationError::MissingField("provider"))?
            .parse::<Provider>()?;

        let name = self.name.ok_or(ValidationError::MissingField("name"))?;
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name"));
        }

        Ok(AgentRequest {
            provider,
            name,
            description: self.description,
            instructions: self.instructions,
            model: self.model,
            voice_type: self.voice_type,
            voice_id: self.voice_id,
            webhook_url: self.webhook_url,
            metadata: self.metadata,
            provider_specific_params: self.provider_specific_params,
        })
    }
}
