//! Quotes, stock time series, symbol search, market status and bulk quotes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use super::{SymbolParams, default_daily, passthrough, to_json};
use crate::{
    errors::Result,
    models::{operation::Operation, query::Query},
    normalize::{
        keys::{STOCK_BAR, STOCK_QUOTE, STOCK_SERIES_METADATA, SYMBOL_MATCH},
        series::{SeriesShape, normalize_series},
        tabular::split_header,
    },
    providers::DataSource,
    routing::{self, StockSeriesOptions},
};

const STOCK_SERIES: SeriesShape = SeriesShape {
    metadata: STOCK_SERIES_METADATA,
    bar: STOCK_BAR,
    stringify_values: false,
};

const CSV_FORMAT_INFO: &str = "CSV format uses comma separators, newline (\\n) for row separation";

/// Latest quote as `{quote: {...}}`.
///
/// An answer without a `Global Quote` block is returned unchanged.
pub async fn get_current_stock_quote<S>(source: &S, params: SymbolParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with("symbol", &params.symbol)
        .with("datatype", "json");
    let answer = source.call(Operation::GlobalQuote, query).await?.into_value();

    match answer.get("Global Quote").and_then(Value::as_object) {
        Some(quote) => Ok(json!({ "quote": STOCK_QUOTE.apply(quote) })),
        None => Ok(answer),
    }
}

fn default_outputsize() -> String {
    "compact".to_string()
}

fn default_extended_hours() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockSeriesParams {
    pub symbol: String,
    #[serde(default = "default_daily")]
    pub interval: String,
    #[serde(default)]
    pub adjusted: bool,
    #[serde(default = "default_outputsize")]
    pub outputsize: String,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default = "default_extended_hours")]
    pub extended_hours: bool,
}

/// Price history as `{metadata, items}`.
///
/// `metadata.interval` falls back to the requested interval when the
/// upstream does not report one.
pub async fn get_stock_time_series<S>(source: &S, params: StockSeriesParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let options = StockSeriesOptions {
        outputsize: params.outputsize,
        month: params.month,
        extended_hours: params.extended_hours,
    };
    let route = routing::stock_series(&params.symbol, &params.interval, params.adjusted, &options)?;
    let answer = source.call(route.operation, route.query).await?.into_value();

    let Value::Object(document) = answer else {
        return Ok(answer);
    };
    let mut normalized = normalize_series(&document, &STOCK_SERIES);
    if let Some(Value::Object(metadata)) = normalized.get_mut("metadata") {
        metadata
            .entry("interval")
            .or_insert_with(|| Value::String(params.interval.clone()));
    }
    Ok(Value::Object(normalized))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolSearchParams {
    pub keywords: String,
}

/// Best matches as `{keywords, total_matches, matches}`.
pub async fn lookup_stock_symbol<S>(source: &S, params: SymbolSearchParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with("keywords", &params.keywords)
        .with("datatype", "json");
    let answer = source.call(Operation::SymbolSearch, query).await?.into_value();

    let Some(best) = answer.get("bestMatches").and_then(Value::as_array) else {
        return Ok(answer);
    };
    let matches: Vec<Map<String, Value>> = best
        .iter()
        .filter_map(Value::as_object)
        .map(|m| SYMBOL_MATCH.apply(m))
        .collect();

    Ok(json!({
        "keywords": params.keywords,
        "total_matches": matches.len(),
        "matches": matches,
    }))
}

/// Open/closed status of the major trading venues, as the upstream reports it.
pub async fn get_global_markets_status<S>(source: &S) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    passthrough(source, Operation::MarketStatus, Query::new()).await
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BulkQuotesParams {
    pub symbols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkQuotes {
    pub symbols_requested: Vec<String>,
    pub total_symbols: usize,
    pub data_format: &'static str,
    pub csv_format_info: &'static str,
    pub csv_headers: String,
    pub csv_body: String,
}

/// Delayed quotes for several symbols, with the CSV split into header and body.
pub async fn get_bulk_quotes<S>(source: &S, params: BulkQuotesParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with_list("symbols", &params.symbols)
        .with("datatype", "csv")
        .with("entitlement", "delayed");
    let payload = source.call(Operation::RealtimeBulkQuotes, query).await?;

    let (csv_headers, csv_body) = if payload.is_text() {
        split_header(&payload.into_text())
    } else {
        debug!("bulk quotes answered with JSON instead of CSV");
        (String::new(), payload.into_text())
    };

    to_json(&BulkQuotes {
        total_symbols: params.symbols.len(),
        symbols_requested: params.symbols,
        data_format: "csv",
        csv_format_info: CSV_FORMAT_INFO,
        csv_headers,
        csv_body,
    })
}
