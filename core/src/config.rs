//! Client configuration.

use serde::Deserialize;

/// Route segment the management API is mounted under on every endpoint.
pub const DEFAULT_API_SEGMENT: &str = "api/management/v1";

/// Environment variable overriding [`DEFAULT_API_SEGMENT`].
pub const API_SEGMENT_ENV: &str = "MANAGEMENT_API_SEGMENT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Appended to a base route to form a client's request endpoint.
    #[serde(default = "default_api_segment")]
    pub api_segment: String,
}

fn default_api_segment() -> String {
    DEFAULT_API_SEGMENT.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_segment: default_api_segment(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_segment(api_segment: impl Into<String>) -> Self {
        Self {
            api_segment: api_segment.into(),
        }
    }

    /// Defaults, with the API segment taken from `MANAGEMENT_API_SEGMENT`
    /// when set and non-empty.
    pub fn from_env() -> Self {
        match std::env::var(API_SEGMENT_ENV) {
            Ok(segment) if !segment.trim().is_empty() => Self::with_api_segment(segment.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_segment_is_management_v1() {
        assert_eq!(ClientConfig::default().api_segment, "api/management/v1");
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ClientConfig::default());

        let config: ClientConfig = serde_json::from_str(r#"{"api_segment":"mgmt"}"#).unwrap();
        assert_eq!(config.api_segment, "mgmt");
    }

    #[test]
    fn from_env_overrides_segment() {
        std::env::set_var(API_SEGMENT_ENV, " engine/api ");
        assert_eq!(ClientConfig::from_env().api_segment, "engine/api");

        std::env::set_var(API_SEGMENT_ENV, "");
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());

        std::env::remove_var(API_SEGMENT_ENV);
        assert_eq!(ClientConfig::from_env(), ClientConfig::default());
    }
}
