//! Options, market movers, news, insider trades and analytics.

use serde::Deserialize;
use serde_json::Value;

use super::{SymbolParams, passthrough};
use crate::{
    errors::Result,
    models::{operation::Operation, query::Query},
    providers::DataSource,
    routing::{self, AnalyticsRequest},
};

fn default_datatype() -> String {
    "json".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoricalOptionsParams {
    pub symbol: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    #[serde(default = "default_datatype")]
    pub datatype: String,
}

pub async fn get_historical_options<S>(source: &S, params: HistoricalOptionsParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with("symbol", params.symbol)
        .with("datatype", params.datatype)
        .with("date", params.date);
    passthrough(source, Operation::HistoricalOptions, query).await
}

pub async fn get_top_gainers_losers<S>(source: &S) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    passthrough(source, Operation::TopGainersLosers, Query::new()).await
}

fn default_sort() -> String {
    "LATEST".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewsSentimentParams {
    pub tickers: Vec<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    /// `YYYYMMDDTHHMM`.
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default = "default_sort")]
    pub sort: String,
}

/// News articles with sentiment scores. The time bounds are sent as
/// `time_from` / `time_to`.
pub async fn get_news_sentiment<S>(source: &S, params: NewsSentimentParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with_list("tickers", &params.tickers)
        .with_opt_list("topics", params.topics.as_deref())
        .with_opt("time_from", params.start_time)
        .with_opt("time_to", params.end_time)
        .with("sort", params.sort);
    passthrough(source, Operation::NewsSentiment, query).await
}

pub async fn get_stock_insider_transactions<S>(source: &S, params: SymbolParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new().with("symbol", params.symbol);
    passthrough(source, Operation::InsiderTransactions, query).await
}

/// Fixed- or sliding-window analytics, with the answer backfilled so it
/// always carries `window_type`, `symbols`, `results` and `metadata`.
pub async fn analyze_stocks<S>(source: &S, request: AnalyticsRequest) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let (kind, route) = routing::analytics(&request);
    let answer = source.call(route.operation, route.query).await?.into_value();
    Ok(routing::backfill_analytics(answer, kind, &request))
}
