//! Currency exchange rates and FX series.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::default_daily;
use crate::{
    errors::Result,
    models::{operation::Operation, query::Query},
    normalize::{
        keys::{FX_BAR, FX_RATE, FX_SERIES_METADATA},
        series::{SeriesShape, normalize_series},
    },
    providers::DataSource,
    routing,
};

const FX_SERIES: SeriesShape = SeriesShape {
    metadata: FX_SERIES_METADATA,
    bar: FX_BAR,
    stringify_values: false,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FxRateParams {
    pub from_currency: String,
    pub to_currency: String,
}

/// Realtime rate with bid/ask, renamed to snake_case.
///
/// An answer without the rate block is returned unchanged.
pub async fn get_current_fx_rate<S>(source: &S, params: FxRateParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with("from_currency", params.from_currency)
        .with("to_currency", params.to_currency);
    let answer = source
        .call(Operation::CurrencyExchangeRate, query)
        .await?
        .into_value();

    match answer
        .get("Realtime Currency Exchange Rate")
        .and_then(Value::as_object)
    {
        Some(rate) => Ok(Value::Object(FX_RATE.apply(rate))),
        None => Ok(answer),
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FxSeriesParams {
    pub from_symbol: String,
    pub to_symbol: String,
    #[serde(default = "default_daily")]
    pub interval: String,
    /// Forwarded as-is (`outputsize`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// FX history as `{metadata, items}`.
pub async fn get_fx_time_series<S>(source: &S, params: FxSeriesParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let route = routing::fx_series(
        &params.from_symbol,
        &params.to_symbol,
        &params.interval,
        &params.extra,
    )?;
    let answer = source.call(route.operation, route.query).await?.into_value();

    match answer {
        Value::Object(document) => Ok(Value::Object(normalize_series(&document, &FX_SERIES))),
        other => Ok(other),
    }
}
