//! Server configuration loading from file and environment variables.

use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;
use uniagent_providers::ProviderSettings;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Outbound provider settings (API keys, endpoints, timeout).
    #[serde(default)]
    pub providers: ProviderSettings,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "uniagent_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `UNIAGENT_HOST` overrides `server.host`
/// - `UNIAGENT_PORT` overrides `server.port`
/// - `UNIAGENT_LOG_LEVEL` overrides `logging.level`
/// - `UNIAGENT_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `VAPI_API_KEY` overrides `providers.vapi_api_key`
/// - `RETELL_API_KEY` overrides `providers.retell_api_key`
/// - `UNIAGENT_VAPI_BASE_URL` overrides `providers.vapi_base_url`
/// - `UNIAGENT_RETELL_BASE_URL` overrides `providers.retell_base_url`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    // Environment variable overrides
    if let Ok(host) = std::env::var("UNIAGENT_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Ok(port) = std::env::var("UNIAGENT_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Ok(level) = std::env::var("UNIAGENT_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Ok(json) = std::env::var("UNIAGENT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Ok(key) = std::env::var("VAPI_API_KEY") {
        if !key.is_empty() {
            config.providers.vapi_api_key = Some(key);
        }
    }
    if let Ok(key) = std::env::var("RETELL_API_KEY") {
        if !key.is_empty() {
            config.providers.retell_api_key = Some(key);
        }
    }
    if let Ok(url) = std::env::var("UNIAGENT_VAPI_BASE_URL") {
        config.providers.vapi_base_url = url;
    }
    if let Ok(url) = std::env::var("UNIAGENT_RETELL_BASE_URL") {
        config.providers.retell_base_url = url;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_no_file_given() {
        let config = load_config(None).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
        assert!(config.providers.vapi_api_key.is_none());
    }

    #[test]
    fn parses_provider_section() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000

            [providers]
            vapi_api_key = "sk-vapi"
            request_timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.providers.vapi_api_key.as_deref(), Some("sk-vapi"));
        assert_eq!(config.providers.request_timeout_secs, 10);
        assert_eq!(config.providers.retell_base_url, "https://api.retellai.com");
    }
}
