//! Cryptocurrency quotes and series.
//!
//! The daily, weekly and monthly digital-currency endpoints deliver their
//! JSON document as a string; [`RawPayload::into_object`] decodes it.
//!
//! [`RawPayload::into_object`]: crate::models::payload::RawPayload::into_object

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;

use super::default_daily;
use crate::{
    errors::{Error, Result},
    models::{operation::Operation, query::Query},
    normalize::{
        keys::{CRYPTO_BAR, CRYPTO_QUOTE_METADATA, CRYPTO_SERIES_METADATA},
        series::{SERIES_MARKER, SeriesShape, find_container, normalize_series},
    },
    providers::DataSource,
    routing,
};

const CRYPTO_SERIES: SeriesShape = SeriesShape {
    metadata: CRYPTO_SERIES_METADATA,
    bar: CRYPTO_BAR,
    stringify_values: true,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CryptoQuoteParams {
    pub symbol: String,
    pub market: String,
}

/// The most recent daily bar plus the series header.
///
/// `symbol` and `market` fall back to the request when the header lacks
/// them; other missing header fields are left out.
pub async fn get_current_crypto_quote<S>(source: &S, params: CryptoQuoteParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with("symbol", &params.symbol)
        .with("market", &params.market);
    let document = source
        .call(Operation::DigitalCurrencyDaily, query)
        .await?
        .into_object()?;

    let Some((_, Value::Object(series))) = find_container(&document, &[SERIES_MARKER, "Digital Currency"])
    else {
        warn!(symbol = %params.symbol, "crypto answer has no digital currency series");
        return Err(Error::MalformedUpstreamShape(
            "time series data not found in response".to_string(),
        ));
    };
    let Some((latest_date, latest_bar)) = series.iter().max_by(|a, b| a.0.cmp(b.0)) else {
        return Err(Error::MalformedUpstreamShape(
            "no time series data available".to_string(),
        ));
    };

    let empty = Map::new();
    let metadata = document
        .get("Meta Data")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let mut quote = CRYPTO_QUOTE_METADATA.apply(metadata);
    for (key, fallback) in [("symbol", &params.symbol), ("market", &params.market)] {
        quote
            .entry(key)
            .or_insert_with(|| Value::String(fallback.clone()));
    }
    // Keep the header order stable regardless of which fields fell back.
    let quote: Map<String, Value> = CRYPTO_QUOTE_METADATA
        .canonical_keys()
        .filter_map(|k| quote.get(k).map(|v| (k.to_string(), v.clone())))
        .collect();

    let mut current = Map::new();
    current.insert("date".to_string(), Value::String(latest_date.clone()));
    if let Some(bar) = latest_bar.as_object() {
        current.extend(CRYPTO_BAR.apply(bar));
    }

    let mut out = quote;
    out.insert("current_quote".to_string(), Value::Object(current));
    Ok(Value::Object(out))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CryptoSeriesParams {
    pub symbol: String,
    pub market: String,
    #[serde(default = "default_daily")]
    pub interval: String,
    /// Forwarded to the intraday endpoint only.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Crypto history as `{metadata, items}` with every bar value as a string.
pub async fn get_crypto_time_series<S>(source: &S, params: CryptoSeriesParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let route = routing::crypto_series(
        &params.symbol,
        &params.market,
        &params.interval,
        &params.extra,
    )?;
    let document = source.call(route.operation, route.query).await?.into_object()?;
    Ok(Value::Object(normalize_series(&document, &CRYPTO_SERIES)))
}
