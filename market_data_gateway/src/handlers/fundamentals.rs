//! Company fundamentals: overview, statements, earnings, corporate actions,
//! calendars and listings.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{SymbolParams, passthrough, to_json};
use crate::{
    bundles,
    errors::Result,
    models::{
        operation::Operation,
        query::Query,
        records::{Dividend, Split},
    },
    normalize::{
        keys::{ANNUAL_EARNINGS, QUARTERLY_EARNINGS},
        tabular::{self, EARNINGS_CALENDAR_HEADERS, Header, IPO_CALENDAR_HEADERS, LISTING_HEADERS, Row},
    },
    providers::DataSource,
    routing,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolOverviewParams {
    pub symbol: String,
    /// `company` or `etf`.
    pub profile_type: String,
}

pub async fn get_symbol_overview<S>(source: &S, params: SymbolOverviewParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let route = routing::symbol_profile(&params.symbol, &params.profile_type)?;
    passthrough(source, route.operation, route.query).await
}

fn default_statement_type() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FinancialStatementsParams {
    pub symbol: String,
    #[serde(default = "default_statement_type")]
    pub statement_type: String,
}

pub async fn get_financial_statements<S>(source: &S, params: FinancialStatementsParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    bundles::financial_statements(source, &params.symbol, &params.statement_type).await
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EarningsParams {
    pub symbol: String,
    /// `YYYY-Qn`; keeps only the matching quarterly entries.
    #[serde(default)]
    pub quarter: Option<String>,
}

/// Maps a fiscal period end (`YYYY-MM-DD`) to a calendar quarter label.
pub fn fiscal_quarter(fiscal_date: &str) -> String {
    match NaiveDate::parse_from_str(fiscal_date, "%Y-%m-%d") {
        Ok(date) => format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1),
        Err(_) => "Unknown".to_string(),
    }
}

/// `{symbol, annual_earnings?, quarterly_earnings?}` in snake_case.
///
/// Quarterly entries with a fiscal date gain a `quarter` label.
pub async fn get_earning_data<S>(source: &S, params: EarningsParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new().with("symbol", &params.symbol);
    let answer = source.call(Operation::Earnings, query).await?.into_value();

    let mut out = Map::new();
    let symbol = answer
        .get("symbol")
        .cloned()
        .unwrap_or_else(|| Value::String(params.symbol.clone()));
    out.insert("symbol".to_string(), symbol);

    if let Some(annual) = answer.get("annualEarnings").and_then(Value::as_array) {
        let entries: Vec<Value> = annual
            .iter()
            .filter_map(Value::as_object)
            .map(|e| Value::Object(ANNUAL_EARNINGS.apply(e)))
            .collect();
        out.insert("annual_earnings".to_string(), Value::Array(entries));
    }

    if let Some(quarterly) = answer.get("quarterlyEarnings").and_then(Value::as_array) {
        let entries: Vec<Value> = quarterly
            .iter()
            .filter_map(Value::as_object)
            .map(|e| {
                let mut entry = QUARTERLY_EARNINGS.apply(e);
                if let Some(fiscal) = e.get("fiscalDateEnding").and_then(Value::as_str) {
                    entry.insert("quarter".to_string(), Value::String(fiscal_quarter(fiscal)));
                }
                entry
            })
            .filter(|entry| match &params.quarter {
                Some(wanted) => entry.get("quarter").and_then(Value::as_str) == Some(wanted.as_str()),
                None => true,
            })
            .map(Value::Object)
            .collect();
        out.insert("quarterly_earnings".to_string(), Value::Array(entries));
    }

    Ok(Value::Object(out))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorporateActions {
    pub symbol: String,
    pub dividends: Vec<Dividend>,
    pub splits: Vec<Split>,
}

fn field(record: &Map<String, Value>, key: &str) -> Option<Value> {
    record.get(key).filter(|v| !v.is_null()).cloned()
}

fn data_records(answer: &Value) -> impl Iterator<Item = &Map<String, Value>> {
    answer
        .get("data")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
}

/// Dividend and split history, fetched concurrently.
pub async fn get_corporate_actions<S>(source: &S, params: SymbolParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new().with("symbol", &params.symbol);
    let (dividends, splits) = tokio::try_join!(
        source.call(Operation::Dividends, query.clone()),
        source.call(Operation::Splits, query),
    )?;
    let (dividends, splits) = (dividends.into_value(), splits.into_value());

    to_json(&CorporateActions {
        dividends: data_records(&dividends)
            .map(|d| Dividend {
                ex_dividend_date: field(d, "ex_dividend_date"),
                dividend_amount: field(d, "amount"),
                record_date: field(d, "record_date"),
                payment_date: field(d, "payment_date"),
                declaration_date: field(d, "declaration_date"),
            })
            .collect(),
        splits: data_records(&splits)
            .map(|s| Split {
                date: field(s, "effective_date"),
                split_coefficient: field(s, "split_factor"),
            })
            .collect(),
        symbol: params.symbol,
    })
}

fn default_horizon() -> String {
    "3month".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketCalendarParams {
    #[serde(default)]
    pub symbol: Option<String>,
    /// `3month`, `6month` or `12month`.
    #[serde(default = "default_horizon")]
    pub horizon: String,
    #[serde(default)]
    pub with_ipos: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarketCalendar {
    pub horizon: String,
    pub with_ipos: bool,
    pub earnings: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    /// Empty unless `with_ipos` was set.
    pub ipos: Vec<Row>,
}

/// Upcoming earnings, and IPOs when asked for.
///
/// An empty `symbol` counts as absent.
pub async fn get_market_calendar<S>(source: &S, params: MarketCalendarParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let symbol = params.symbol.filter(|s| !s.is_empty());
    let earnings_query = Query::new()
        .with_opt("symbol", symbol.as_deref())
        .with("horizon", &params.horizon);

    let (earnings, ipos) = if params.with_ipos {
        let (earnings, ipos) = tokio::try_join!(
            source.call(Operation::EarningsCalendar, earnings_query),
            source.call(Operation::IpoCalendar, Query::new()),
        )?;
        (earnings, Some(ipos))
    } else {
        (source.call(Operation::EarningsCalendar, earnings_query).await?, None)
    };

    to_json(&MarketCalendar {
        earnings: tabular::decode(&earnings.into_text(), Header::Fixed(EARNINGS_CALENDAR_HEADERS)),
        ipos: ipos
            .map(|p| tabular::decode(&p.into_text(), Header::Fixed(IPO_CALENDAR_HEADERS)))
            .unwrap_or_default(),
        horizon: params.horizon,
        with_ipos: params.with_ipos,
        symbol,
    })
}

fn default_state() -> String {
    "active".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListingStatusParams {
    /// `YYYY-MM-DD`; latest trading day when absent.
    #[serde(default)]
    pub date: Option<String>,
    /// `active` or `delisted`.
    #[serde(default = "default_state")]
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingStatus {
    pub state: String,
    pub listings: Vec<Row>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Listed (or delisted) securities, decoded from CSV.
///
/// An empty `date` counts as absent.
pub async fn get_listing_status<S>(source: &S, params: ListingStatusParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let date = params.date.filter(|d| !d.is_empty());
    let query = Query::new()
        .with_opt("date", date.as_deref())
        .with("state", &params.state);
    let payload = source.call(Operation::ListingStatus, query).await?;

    to_json(&ListingStatus {
        listings: tabular::decode(&payload.into_text(), Header::Fixed(LISTING_HEADERS)),
        state: params.state,
        date,
    })
}
