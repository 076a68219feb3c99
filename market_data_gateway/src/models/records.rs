//! Canonical output records with a fixed schema.
//!
//! Records whose fields come from the upstream payload use `Option` and are
//! skipped when absent, so a missing source field never shows up as `null`.

use serde::Serialize;
use serde_json::Value;

/// One reading of one indicator component at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorObservation {
    /// `YYYY-MM-DD HH:MM:SS`.
    pub timestamp: String,
    /// Lower-case indicator name, e.g. `"macd"`.
    pub indicator: String,
    /// `"value"` for single-output indicators, otherwise the lower-cased
    /// upstream field (`"macd_signal"`, `"slowk"`, `"real upper band"`).
    pub component: String,
    pub value: Value,
}

/// Request echo attached to every pack result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackMetadata {
    pub symbol: String,
    pub interval: String,
    pub preset: String,
}

/// Output of an indicator pack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackReport {
    pub metadata: PackMetadata,
    pub items: Vec<IndicatorObservation>,
}

/// One entry of an economic bundle. `raw_data` is the untouched upstream payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricEntry {
    pub metric: String,
    pub raw_data: Value,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maturity: Option<String>,
}

impl MetricEntry {
    pub fn new(metric: impl Into<String>, kind: impl Into<String>, raw_data: Value) -> Self {
        Self {
            metric: metric.into(),
            raw_data,
            kind: kind.into(),
            maturity: None,
        }
    }
}

/// A dividend event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dividend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ex_dividend_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_amount: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration_date: Option<Value>,
}

/// A stock split event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Split {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_coefficient: Option<Value>,
}

/// One observation of a commodity price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommodityPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<Value>,
    pub interval: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}
