//! Bundle composers: several upstream calls assembled into one answer.
//!
//! Economic bundles report each series as a [`MetricEntry`] whose `raw_data`
//! is the upstream payload untouched. Caller-supplied extra parameters are
//! forwarded to every call of a bundle. Calls run concurrently and are merged
//! by position.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::{
    errors::Result,
    models::{operation::Operation, query::Query, records::MetricEntry},
    providers::DataSource,
    routing::StatementKind,
};

/// One call of a bundle and how its answer is labelled.
#[derive(Debug, Clone)]
struct MetricCall {
    operation: Operation,
    metric: String,
    kind: String,
    maturity: Option<String>,
    query: Query,
}

impl MetricCall {
    fn new(operation: Operation, metric: &str, kind: &str, extra: &Map<String, Value>) -> Self {
        Self {
            operation,
            metric: metric.to_string(),
            kind: kind.to_string(),
            maturity: None,
            query: Query::new().with_extra(extra),
        }
    }
}

async fn compose<S>(source: &S, calls: Vec<MetricCall>) -> Result<Vec<MetricEntry>>
where
    S: DataSource + ?Sized,
{
    debug!(calls = calls.len(), "fanning out bundle");
    let payloads = try_join_all(
        calls
            .iter()
            .map(|call| source.call(call.operation, call.query.clone())),
    )
    .await?;

    Ok(calls
        .into_iter()
        .zip(payloads)
        .map(|(call, payload)| MetricEntry {
            maturity: call.maturity,
            ..MetricEntry::new(call.metric, call.kind, payload.into_value())
        })
        .collect())
}

fn default_true() -> bool {
    true
}

fn default_quarterly() -> String {
    "quarterly".to_string()
}

fn default_monthly() -> String {
    "monthly".to_string()
}

fn default_yield_basis() -> String {
    "actual".to_string()
}

fn default_maturities() -> Vec<String> {
    vec!["10year".to_string()]
}

#[derive(Debug, Clone, Deserialize)]
pub struct GrowthRequest {
    #[serde(default = "default_quarterly")]
    pub frequency: String,
    #[serde(default = "default_true")]
    pub seasonally_adjusted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthReport {
    pub frequency: String,
    pub seasonally_adjusted: bool,
    pub data: Vec<MetricEntry>,
}

/// Real GDP and real GDP per capita.
pub async fn growth_metrics<S>(source: &S, request: GrowthRequest) -> Result<GrowthReport>
where
    S: DataSource + ?Sized,
{
    let calls = vec![
        MetricCall::new(Operation::RealGdp, "real_gdp", "Real GDP", &request.extra),
        MetricCall::new(
            Operation::RealGdpPerCapita,
            "real_gdp_per_capita",
            "Real GDP per capita",
            &request.extra,
        ),
    ];
    Ok(GrowthReport {
        frequency: request.frequency,
        seasonally_adjusted: request.seasonally_adjusted,
        data: compose(source, calls).await?,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct RatesRequest {
    #[serde(default = "default_maturities")]
    pub maturities: Vec<String>,
    #[serde(default = "default_yield_basis")]
    pub yield_basis: String,
    #[serde(default = "default_true")]
    pub include_target_range: bool,
    #[serde(default = "default_monthly")]
    pub frequency: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatesReport {
    pub frequency: String,
    pub yield_basis: String,
    pub maturities: Vec<String>,
    pub data: Vec<MetricEntry>,
}

/// Federal funds rate (optional) followed by one treasury yield per maturity.
pub async fn rates_yields<S>(source: &S, request: RatesRequest) -> Result<RatesReport>
where
    S: DataSource + ?Sized,
{
    let mut calls = Vec::with_capacity(request.maturities.len() + 1);
    if request.include_target_range {
        calls.push(MetricCall::new(
            Operation::FederalFundsRate,
            "federal_funds_rate",
            "Federal Funds Rate",
            &request.extra,
        ));
    }
    for maturity in &request.maturities {
        let mut call = MetricCall::new(
            Operation::TreasuryYield,
            &format!("treasury_yield_{maturity}"),
            &format!("Treasury Yield {maturity}"),
            &request.extra,
        );
        call.query = Query::new()
            .with("maturity", maturity)
            .with_extra(&request.extra);
        call.maturity = Some(maturity.clone());
        calls.push(call);
    }

    Ok(RatesReport {
        data: compose(source, calls).await?,
        frequency: request.frequency,
        yield_basis: request.yield_basis,
        maturities: request.maturities,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct PricesRequest {
    #[serde(default)]
    pub include_core: bool,
    #[serde(default)]
    pub annualized: bool,
    #[serde(default = "default_monthly")]
    pub frequency: String,
    #[serde(default = "default_true")]
    pub seasonally_adjusted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricesReport {
    pub frequency: String,
    pub seasonally_adjusted: bool,
    pub include_core: bool,
    pub annualized: bool,
    pub data: Vec<MetricEntry>,
}

/// CPI and inflation.
pub async fn prices_inflation<S>(source: &S, request: PricesRequest) -> Result<PricesReport>
where
    S: DataSource + ?Sized,
{
    let calls = vec![
        MetricCall::new(Operation::Cpi, "cpi", "Consumer Price Index", &request.extra),
        MetricCall::new(Operation::Inflation, "inflation", "Inflation Rate", &request.extra),
    ];
    Ok(PricesReport {
        data: compose(source, calls).await?,
        frequency: request.frequency,
        seasonally_adjusted: request.seasonally_adjusted,
        include_core: request.include_core,
        annualized: request.annualized,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct LaborRequest {
    #[serde(default)]
    pub include_demand: bool,
    #[serde(default = "default_monthly")]
    pub frequency: String,
    #[serde(default = "default_true")]
    pub seasonally_adjusted: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaborReport {
    pub frequency: String,
    pub seasonally_adjusted: bool,
    pub include_demand: bool,
    pub data: Vec<MetricEntry>,
}

/// Unemployment and payrolls, plus retail sales and durables on demand.
pub async fn labor_activity<S>(source: &S, request: LaborRequest) -> Result<LaborReport>
where
    S: DataSource + ?Sized,
{
    let extra = &request.extra;
    let mut calls = vec![
        MetricCall::new(Operation::Unemployment, "unemployment", "Unemployment Rate", extra),
        MetricCall::new(Operation::NonfarmPayroll, "nonfarm_payrolls", "Nonfarm Payrolls", extra),
    ];
    if request.include_demand {
        calls.push(MetricCall::new(Operation::RetailSales, "retail_sales", "Retail Sales", extra));
        calls.push(MetricCall::new(Operation::Durables, "durables", "Durable Goods Orders", extra));
    }

    Ok(LaborReport {
        data: compose(source, calls).await?,
        frequency: request.frequency,
        seasonally_adjusted: request.seasonally_adjusted,
        include_demand: request.include_demand,
    })
}

/// Income statement, balance sheet, cash flow, or all three.
///
/// `all` yields `{symbol, income_statement, balance_sheet, cash_flow}`;
/// a single statement is returned as the upstream sent it.
pub async fn financial_statements<S>(source: &S, symbol: &str, statement_type: &str) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let kind = StatementKind::parse(statement_type)?;
    let query = Query::new().with("symbol", symbol);

    match kind.operation() {
        Some(operation) => Ok(source.call(operation, query).await?.into_value()),
        None => {
            debug!(symbol, "fetching all three statements");
            let (income, balance, cash_flow) = tokio::try_join!(
                source.call(Operation::IncomeStatement, query.clone()),
                source.call(Operation::BalanceSheet, query.clone()),
                source.call(Operation::CashFlow, query),
            )?;
            Ok(json!({
                "symbol": symbol,
                "income_statement": income.into_value(),
                "balance_sheet": balance.into_value(),
                "cash_flow": cash_flow.into_value(),
            }))
        }
    }
}
