use std::{num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_env_var;
use snafu::{OptionExt, ResultExt};
use tracing::debug;

use crate::{
    config::AlphaVantageConfig,
    models::{operation::Operation, payload::RawPayload, query::Query},
    providers::{
        ApiKeySnafu, ClientBuildSnafu, DataSource, ProviderError, ProviderInitError, ReqwestSnafu,
        StatusSnafu, ZeroQuotaSnafu,
        alpha_vantage::{params::construct_params, response::interpret_body},
    },
};

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

pub struct AlphaVantageProvider {
    client: Client,
    base_url: String,
    api_key: SecretString,
    entitlement: Option<String>,
    limiter: Limiter,
}

impl AlphaVantageProvider {
    /// Creates a new Alpha Vantage provider.
    ///
    /// Reads the API key from the environment variable named by
    /// `config.api_key_env` (`ALPHAVANTAGE_API_KEY` by default).
    pub fn new(config: &AlphaVantageConfig) -> Result<Self, ProviderInitError> {
        let api_key = SecretString::from(get_env_var(&config.api_key_env).context(ApiKeySnafu)?);
        Self::with_api_key(config, api_key)
    }

    /// Creates a provider with an explicit key, bypassing the environment.
    pub fn with_api_key(
        config: &AlphaVantageConfig,
        api_key: SecretString,
    ) -> Result<Self, ProviderInitError> {
        let per_minute = NonZeroU32::new(config.requests_per_minute).context(ZeroQuotaSnafu)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            entitlement: config.entitlement.clone(),
            limiter: RateLimiter::direct(Quota::per_minute(per_minute)),
        })
    }
}

#[async_trait]
impl DataSource for AlphaVantageProvider {
    async fn call(&self, operation: Operation, query: Query) -> Result<RawPayload, ProviderError> {
        self.limiter.until_ready().await;

        let params = construct_params(operation, &query, self.entitlement.as_deref());
        debug!(%operation, params = ?params, "requesting upstream");

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .query(&[("apikey", self.api_key.expose_secret())])
            .send()
            .await
            .context(ReqwestSnafu)?;

        let status = response.status();
        let body = response.text().await.context(ReqwestSnafu)?;

        if !status.is_success() {
            return StatusSnafu {
                operation,
                status: status.as_u16(),
                body,
            }
            .fail();
        }

        debug!(%operation, bytes = body.len(), "upstream answered");
        interpret_body(operation, body)
    }
}
