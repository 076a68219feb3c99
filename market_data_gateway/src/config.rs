//! Gateway configuration, loaded from a TOML file.
//!
//! Every field has a default, so an empty file (or no `[alpha_vantage]`
//! table at all) yields a working configuration as long as the API key
//! variable is set:
//!
//! ```toml
//! [alpha_vantage]
//! base_url = "https://www.alphavantage.co/query"
//! api_key_env = "ALPHAVANTAGE_API_KEY"
//! requests_per_minute = 75
//! timeout_secs = 30
//! entitlement = "delayed"
//! ```

use std::{fs, num::NonZeroU32, path::Path};

use nonzero_ext::nonzero;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const DEFAULT_API_KEY_ENV: &str = "ALPHAVANTAGE_API_KEY";
/// Premium entry tier.
pub const DEFAULT_REQUESTS_PER_MINUTE: NonZeroU32 = nonzero!(75u32);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    pub alpha_vantage: AlphaVantageConfig,
}

/// Settings for the HTTP data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlphaVantageConfig {
    /// Query endpoint; every operation is a GET against this URL.
    pub base_url: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Client-side throttle. Must be non-zero.
    pub requests_per_minute: u32,
    pub timeout_secs: u64,
    /// Sent as the `entitlement` parameter on every call when set
    /// (`"delayed"` or `"realtime"` on premium plans).
    pub entitlement: Option<String>,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            requests_per_minute: DEFAULT_REQUESTS_PER_MINUTE.get(),
            timeout_secs: 30,
            entitlement: None,
        }
    }
}

impl GatewayConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

pub fn read_config(config_path: impl AsRef<Path>) -> Result<GatewayConfig, ConfigError> {
    let path = config_path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| {
        error!(path = %path.display(), "Failed to read config file: {source}");
        ConfigError::Read {
            path: path.display().to_string(),
            source,
        }
    })?;

    GatewayConfig::from_toml_str(&content).inspect_err(|e| {
        error!(path = %path.display(), "Failed to parse config file: {e}");
    })
}
