//! Configuration management for the Capacities MCP server
//!
//! Configuration comes from environment variables. The API key is deliberately
//! not part of [`ApiConfig`]: it is read through a [`CredentialSource`] on every
//! request so that it can be rotated, stubbed or removed between calls.

use crate::error::{CapacitiesError, Result};
use std::env;

/// Base origin of the Capacities REST API
pub const API_BASE_URL: &str = "https://api.capacities.io";

/// Environment variable holding the Capacities API bearer token
pub const API_KEY_ENV_VAR: &str = "CAPACITIES_API_KEY";

/// Prefix shared by all optional configuration variables
pub const ENV_PREFIX: &str = "CAPACITIES";

/// Load an environment variable with a string default
pub fn load_env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Builder for loading multiple environment variables with consistent prefix
#[derive(Debug)]
pub struct EnvLoader {
    prefix: String,
}

impl EnvLoader {
    /// Create a new environment loader with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    /// Full variable name for a suffix
    pub fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.prefix, suffix)
    }

    /// Load a string value with default
    pub fn load_string(&self, suffix: &str, default: &str) -> String {
        load_env_string(&self.key(suffix), default)
    }
}

/// Source of the bearer token sent with every API request
///
/// Implementations are consulted once per request and must not cache.
pub trait CredentialSource: Send + Sync {
    /// Return the API key, or a configuration error when none is available
    fn api_key(&self) -> Result<String>;
}

/// Reads the API key from an environment variable at call time
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    variable: String,
}

impl EnvCredentials {
    /// Read the key from `CAPACITIES_API_KEY`
    pub fn new() -> Self {
        Self::with_variable(API_KEY_ENV_VAR)
    }

    /// Read the key from a custom variable
    pub fn with_variable(variable: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
        }
    }

    /// Name of the variable this source reads
    pub fn variable(&self) -> &str {
        &self.variable
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Result<String> {
        match env::var(&self.variable) {
            Ok(key) if !key.is_empty() => Ok(key),
            _ => Err(CapacitiesError::Configuration {
                variable: self.variable.clone(),
            }),
        }
    }
}

/// A fixed credential, used when embedding the client or in tests
#[derive(Clone)]
pub struct StaticCredentials {
    key: Option<String>,
}

impl StaticCredentials {
    /// Always return `key`
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
        }
    }

    /// Behave like an unset `CAPACITIES_API_KEY`
    pub fn missing() -> Self {
        Self { key: None }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Result<String> {
        match &self.key {
            Some(key) if !key.is_empty() => Ok(key.clone()),
            _ => Err(CapacitiesError::Configuration {
                variable: API_KEY_ENV_VAR.to_string(),
            }),
        }
    }
}

/// Settings for the request executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origin every endpoint path is appended to (default: `https://api.capacities.io`)
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Load configuration from `CAPACITIES_*` environment variables, falling back to defaults
    pub fn from_env() -> Self {
        let loader = EnvLoader::new(ENV_PREFIX);
        let base_url = loader.load_string("API_BASE_URL", API_BASE_URL);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Use a different base origin, e.g. a local mock server
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Check that the base origin is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| CapacitiesError::validation("base_url", e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(CapacitiesError::validation(
                "base_url",
                format!("unsupported scheme '{other}'"),
            )),
        }
    }
}
