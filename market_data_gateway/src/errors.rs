use thiserror::Error;

use crate::providers::ProviderError;

/// The unified error type for the `market_data_gateway` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// A discriminant parameter (interval, statement type, profile type) is
    /// outside its supported set. Raised before any upstream call.
    #[error("Unsupported {name}: {value:?}. Supported values: {}", supported.join(", "))]
    InvalidArgument {
        name: &'static str,
        value: String,
        supported: &'static [&'static str],
    },

    /// The data source answered, but a container the handler needs is missing.
    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamShape(String),

    /// Any failure reported by the data source. Propagated as-is.
    #[error(transparent)]
    Upstream(#[from] ProviderError),

    /// The caller's parameter object did not match the tool's parameters.
    #[error("Invalid tool parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),

    /// A handler result could not be rendered as JSON.
    #[error("Failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_argument(
        name: &'static str,
        value: impl Into<String>,
        supported: &'static [&'static str],
    ) -> Self {
        Self::InvalidArgument {
            name,
            value: value.into(),
            supported,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_names_value_and_supported_set() {
        let err = Error::invalid_argument("interval", "2min", &["daily", "weekly"]);
        let msg = err.to_string();
        assert!(msg.contains("interval"));
        assert!(msg.contains("\"2min\""));
        assert!(msg.contains("daily, weekly"));
    }
}
