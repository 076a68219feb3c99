//! Data source abstraction for the upstream market data API.
//!
//! This module defines the [`DataSource`] trait: one logical call per upstream
//! [`Operation`], taking named parameters and returning the raw payload the
//! upstream produced. Everything above this trait (routers, packs, bundles,
//! normalizers) is transport-agnostic; the concrete HTTP client lives in
//! [`alpha_vantage`].
//!
//! The trait is designed for async usage and supports dynamic dispatch
//! (`dyn DataSource`), so tests can swap in a scripted source.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use market_data_gateway::models::{operation::Operation, payload::RawPayload, query::Query};
//! use market_data_gateway::providers::{DataSource, ProviderError};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl DataSource for Canned {
//!     async fn call(&self, _op: Operation, _query: Query) -> Result<RawPayload, ProviderError> {
//!         Ok(RawPayload::Text("symbol,name\n".to_string()))
//!     }
//! }
//! ```

pub mod alpha_vantage;

use async_trait::async_trait;
use shared_utils::env::EnvError;
use snafu::{Backtrace, Snafu};

use crate::models::{operation::Operation, payload::RawPayload, query::Query};

/// One call per upstream operation.
///
/// Implementations own transport, authentication, throttling and any retry
/// policy. Errors are returned as [`ProviderError`] and are never translated by
/// the layers above.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Performs `operation` with the given named parameters.
    ///
    /// # Returns
    ///
    /// * `Ok(RawPayload)` - The upstream body: JSON, JSON-in-a-string, or CSV text.
    /// * `Err(ProviderError)` - Transport, authentication or upstream failure.
    async fn call(&self, operation: Operation, query: Query) -> Result<RawPayload, ProviderError>;
}

#[async_trait]
impl<T: DataSource + ?Sized> DataSource for std::sync::Arc<T> {
    async fn call(&self, operation: Operation, query: Query) -> Result<RawPayload, ProviderError> {
        (**self).call(operation, query).await
    }
}

#[async_trait]
impl<T: DataSource + ?Sized> DataSource for Box<T> {
    async fn call(&self, operation: Operation, query: Query) -> Result<RawPayload, ProviderError> {
        (**self).call(operation, query).await
    }
}

/// Errors that can occur during the creation of a provider instance
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// API key variable missing or blank.
    #[snafu(display("Cannot read API key: {source}"))]
    ApiKey {
        source: EnvError,
        backtrace: Backtrace,
    },

    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// Rate limit of zero requests per minute.
    #[snafu(display("requests_per_minute must be greater than zero"))]
    ZeroQuota { backtrace: Backtrace },
}

/// Errors that can occur within a `DataSource` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The upstream answered with a non-success HTTP status.
    #[snafu(display("{operation} returned HTTP {status}: {body}"))]
    Status {
        operation: Operation,
        status: u16,
        body: String,
        backtrace: Backtrace,
    },

    /// The provider's API returned an error document (invalid key, rate limit, bad symbol).
    #[snafu(display("API error from {operation}: {message}"))]
    Api {
        operation: Operation,
        message: String,
        backtrace: Backtrace,
    },

    /// An error during provider configuration or initialization.
    #[snafu(display("Provider initialization error: {source}"))]
    Init {
        #[snafu(backtrace)]
        source: ProviderInitError,
    },
}
