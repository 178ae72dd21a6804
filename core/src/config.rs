//! Client configuration, fixed at construction time.
//!
//! Values come either from code or from `COMPANY_GRAPHQL_*` environment
//! variables. Nothing here is reloaded at runtime.

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://spacex-production.up.railway.app/";
pub const DEFAULT_API_KEY_HEADER: &str = "x-api-key";

pub const ENDPOINT_VAR: &str = "COMPANY_GRAPHQL_ENDPOINT";
pub const API_KEY_VAR: &str = "COMPANY_GRAPHQL_API_KEY";
pub const API_KEY_HEADER_VAR: &str = "COMPANY_GRAPHQL_API_KEY_HEADER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub api_key_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            api_key_header: DEFAULT_API_KEY_HEADER.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ConfigError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(Self {
            endpoint,
            ..Self::default()
        })
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Load from the process environment, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup. Empty values count as unset,
    /// except for the endpoint, which must not be blank when given.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let mut config = Self::new(endpoint)?;

        if let Some(key) = lookup(API_KEY_VAR).filter(|k| !k.is_empty()) {
            config.api_key = Some(key);
        }
        if let Some(header) = lookup(API_KEY_HEADER_VAR).filter(|h| !h.is_empty()) {
            if header.chars().any(|c| c.is_whitespace() || c == ':') {
                return Err(ConfigError::InvalidVar {
                    name: API_KEY_HEADER_VAR,
                    reason: format!("{header:?} is not a valid header name"),
                });
            }
            config.api_key_header = header;
        }
        Ok(config)
    }
}
