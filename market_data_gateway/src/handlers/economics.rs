//! Commodities and macroeconomic bundles.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::to_json;
use crate::{
    bundles::{self, GrowthRequest, LaborRequest, PricesRequest, RatesRequest},
    errors::Result,
    models::{operation::Operation, query::Query, records::CommodityPoint},
    providers::DataSource,
};

fn default_monthly() -> String {
    "monthly".to_string()
}

fn default_commodity() -> String {
    "all".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CommoditiesParams {
    #[serde(default = "default_monthly")]
    pub interval: String,
    /// Echoed back; the upstream index covers all commodities.
    #[serde(default = "default_commodity")]
    pub commodity: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commodities {
    pub interval: String,
    pub commodity: String,
    pub data: Vec<CommodityPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Global commodities index as a flat list of points.
///
/// An answer without a `data` array yields no points and an `error` note
/// instead of failing.
pub async fn get_commodities<S>(source: &S, params: CommoditiesParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let query = Query::new()
        .with("interval", &params.interval)
        .with_extra(&params.extra);
    let answer = source.call(Operation::AllCommodities, query).await?.into_value();

    let (data, error) = match answer.get("data").and_then(Value::as_array) {
        Some(points) => {
            let reported = |key: &str| answer.get(key).filter(|v| !v.is_null()).cloned();
            let interval = reported("interval").unwrap_or_else(|| Value::String(params.interval.clone()));
            let data = points
                .iter()
                .filter_map(Value::as_object)
                .map(|point| CommodityPoint {
                    name: reported("name"),
                    unit: reported("unit"),
                    interval: interval.clone(),
                    date: point.get("date").filter(|v| !v.is_null()).cloned(),
                    value: point.get("value").filter(|v| !v.is_null()).cloned(),
                })
                .collect();
            (data, None)
        }
        None => {
            warn!("commodities answer has no data array");
            (Vec::new(), Some("Unexpected data format from API".to_string()))
        }
    };

    to_json(&Commodities {
        interval: params.interval,
        commodity: params.commodity,
        data,
        error,
    })
}

pub async fn get_growth_metrics<S>(source: &S, request: GrowthRequest) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    to_json(&bundles::growth_metrics(source, request).await?)
}

pub async fn get_rates_yields<S>(source: &S, request: RatesRequest) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    to_json(&bundles::rates_yields(source, request).await?)
}

pub async fn get_prices_inflation<S>(source: &S, request: PricesRequest) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    to_json(&bundles::prices_inflation(source, request).await?)
}

pub async fn get_labor_activity<S>(source: &S, request: LaborRequest) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    to_json(&bundles::labor_activity(source, request).await?)
}
