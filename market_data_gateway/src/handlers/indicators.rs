//! Technical indicator packs.

use serde::Deserialize;
use serde_json::Value;

use super::to_json;
use crate::{
    errors::Result,
    packs::{presets::Pack, run_pack},
    providers::DataSource,
};

fn default_preset() -> String {
    "standard".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndicatorPackParams {
    pub symbol: String,
    pub interval: String,
    /// `fast`, `standard` or `slow`; anything else runs `standard`.
    #[serde(default = "default_preset")]
    pub preset: String,
}

/// Runs `pack` and renders the report.
pub async fn get_indicator_pack<S>(source: &S, pack: Pack, params: IndicatorPackParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    let report = run_pack(source, pack, &params.symbol, &params.interval, &params.preset).await?;
    to_json(&report)
}

/// SMA, EMA, WMA and MACD.
pub async fn get_trend_indicators<S>(source: &S, params: IndicatorPackParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    get_indicator_pack(source, Pack::Trend, params).await
}

/// RSI, STOCH, CCI and MFI.
pub async fn get_momentum_indicators<S>(source: &S, params: IndicatorPackParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    get_indicator_pack(source, Pack::Momentum, params).await
}

/// BBANDS, ATR and SAR.
pub async fn get_volatility_indicators<S>(source: &S, params: IndicatorPackParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    get_indicator_pack(source, Pack::Volatility, params).await
}

/// OBV, AD and ADOSC.
pub async fn get_volume_indicators<S>(source: &S, params: IndicatorPackParams) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    get_indicator_pack(source, Pack::Volume, params).await
}
