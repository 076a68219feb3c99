//! Static tool table.
//!
//! Maps the external tool names agents call to handlers. Resolution is a
//! plain lookup; reporting an unknown name is left to the caller.
//!
//! ```rust,no_run
//! # async fn demo(source: &dyn market_data_gateway::providers::DataSource) {
//! use market_data_gateway::dispatch::{Tool, dispatch};
//! use serde_json::json;
//!
//! let tool = Tool::from_name("get_current_fx_rate").expect("known tool");
//! let _answer = dispatch(source, tool, json!({"from_currency": "USD", "to_currency": "EUR"})).await;
//! # }
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::info;

use crate::{
    errors::Result,
    handlers::{crypto, economics, forex, fundamentals, indicators, intelligence, market},
    providers::DataSource,
    routing::AnalyticsRequest,
};

/// Every tool the gateway exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    GetCurrentStockQuote,
    GetStockTimeSeries,
    LookupStockSymbol,
    GetGlobalMarketsStatus,
    GetBulkQuotes,
    GetHistoricalOptions,
    GetTopGainersLosers,
    GetNewsSentiment,
    GetStockInsiderTransactions,
    AnalyzeStocks,
    GetSymbolOverview,
    GetFinancialStatements,
    GetEarningData,
    GetCorporateActions,
    GetMarketCalendar,
    GetListingStatus,
    GetCurrentFxRate,
    GetFxTimeSeries,
    GetCurrentCryptoQuote,
    GetCryptoTimeSeries,
    GetCommodities,
    GetGrowthMetrics,
    GetRatesYields,
    GetPricesInflation,
    GetLaborActivity,
    GetTrendIndicators,
    GetMomentumIndicators,
    GetVolatilityIndicators,
    GetVolumeIndicators,
}

/// Tool names, in the order they are listed to agents.
pub const TOOLS: &[(&str, Tool)] = &[
    ("get_current_stock_quote", Tool::GetCurrentStockQuote),
    ("get_stock_time_series", Tool::GetStockTimeSeries),
    ("lookup_stock_symbol", Tool::LookupStockSymbol),
    ("get_global_markets_status", Tool::GetGlobalMarketsStatus),
    ("get_bulk_quotes", Tool::GetBulkQuotes),
    ("get_historical_options", Tool::GetHistoricalOptions),
    ("get_top_gainers_losers", Tool::GetTopGainersLosers),
    ("get_news_sentiment", Tool::GetNewsSentiment),
    ("get_stock_insider_transactions", Tool::GetStockInsiderTransactions),
    ("analyze_stocks", Tool::AnalyzeStocks),
    ("get_symbol_overview", Tool::GetSymbolOverview),
    ("get_financial_statements", Tool::GetFinancialStatements),
    ("get_earning_data", Tool::GetEarningData),
    ("get_corporate_actions", Tool::GetCorporateActions),
    ("get_market_calendar", Tool::GetMarketCalendar),
    ("get_listing_status", Tool::GetListingStatus),
    ("get_current_fx_rate", Tool::GetCurrentFxRate),
    ("get_fx_time_series", Tool::GetFxTimeSeries),
    ("get_current_crypto_quote", Tool::GetCurrentCryptoQuote),
    ("get_crypto_time_series", Tool::GetCryptoTimeSeries),
    ("get_commodities", Tool::GetCommodities),
    ("get_growth_metrics", Tool::GetGrowthMetrics),
    ("get_rates_yields", Tool::GetRatesYields),
    ("get_prices_inflation", Tool::GetPricesInflation),
    ("get_labor_activity", Tool::GetLaborActivity),
    ("get_trend_indicators", Tool::GetTrendIndicators),
    ("get_momentum_indicators", Tool::GetMomentumIndicators),
    ("get_volatility_indicators", Tool::GetVolatilityIndicators),
    ("get_volume_indicators", Tool::GetVolumeIndicators),
];

impl Tool {
    pub fn from_name(name: &str) -> Option<Self> {
        TOOLS.iter().find(|(n, _)| *n == name).map(|(_, tool)| *tool)
    }

    pub fn name(self) -> &'static str {
        TOOLS
            .iter()
            .find(|(_, tool)| *tool == self)
            .map_or("unknown", |(name, _)| *name)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn decode<T: DeserializeOwned>(params: Value) -> Result<T> {
    Ok(serde_json::from_value(params)?)
}

/// Decodes `params` for `tool` and runs its handler.
///
/// `null` parameters are treated as an empty object.
pub async fn dispatch<S>(source: &S, tool: Tool, params: Value) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    info!(%tool, "dispatching tool call");
    let params = match params {
        Value::Null => Value::Object(Map::new()),
        other => other,
    };

    match tool {
        Tool::GetCurrentStockQuote => market::get_current_stock_quote(source, decode(params)?).await,
        Tool::GetStockTimeSeries => market::get_stock_time_series(source, decode(params)?).await,
        Tool::LookupStockSymbol => market::lookup_stock_symbol(source, decode(params)?).await,
        Tool::GetGlobalMarketsStatus => market::get_global_markets_status(source).await,
        Tool::GetBulkQuotes => market::get_bulk_quotes(source, decode(params)?).await,
        Tool::GetHistoricalOptions => intelligence::get_historical_options(source, decode(params)?).await,
        Tool::GetTopGainersLosers => intelligence::get_top_gainers_losers(source).await,
        Tool::GetNewsSentiment => intelligence::get_news_sentiment(source, decode(params)?).await,
        Tool::GetStockInsiderTransactions => {
            intelligence::get_stock_insider_transactions(source, decode(params)?).await
        }
        Tool::AnalyzeStocks => {
            intelligence::analyze_stocks(source, decode::<AnalyticsRequest>(params)?).await
        }
        Tool::GetSymbolOverview => fundamentals::get_symbol_overview(source, decode(params)?).await,
        Tool::GetFinancialStatements => {
            fundamentals::get_financial_statements(source, decode(params)?).await
        }
        Tool::GetEarningData => fundamentals::get_earning_data(source, decode(params)?).await,
        Tool::GetCorporateActions => fundamentals::get_corporate_actions(source, decode(params)?).await,
        Tool::GetMarketCalendar => fundamentals::get_market_calendar(source, decode(params)?).await,
        Tool::GetListingStatus => fundamentals::get_listing_status(source, decode(params)?).await,
        Tool::GetCurrentFxRate => forex::get_current_fx_rate(source, decode(params)?).await,
        Tool::GetFxTimeSeries => forex::get_fx_time_series(source, decode(params)?).await,
        Tool::GetCurrentCryptoQuote => crypto::get_current_crypto_quote(source, decode(params)?).await,
        Tool::GetCryptoTimeSeries => crypto::get_crypto_time_series(source, decode(params)?).await,
        Tool::GetCommodities => economics::get_commodities(source, decode(params)?).await,
        Tool::GetGrowthMetrics => economics::get_growth_metrics(source, decode(params)?).await,
        Tool::GetRatesYields => economics::get_rates_yields(source, decode(params)?).await,
        Tool::GetPricesInflation => economics::get_prices_inflation(source, decode(params)?).await,
        Tool::GetLaborActivity => economics::get_labor_activity(source, decode(params)?).await,
        Tool::GetTrendIndicators => indicators::get_trend_indicators(source, decode(params)?).await,
        Tool::GetMomentumIndicators => indicators::get_momentum_indicators(source, decode(params)?).await,
        Tool::GetVolatilityIndicators => {
            indicators::get_volatility_indicators(source, decode(params)?).await
        }
        Tool::GetVolumeIndicators => indicators::get_volume_indicators(source, decode(params)?).await,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn names_resolve_both_ways() {
        assert_eq!(TOOLS.len(), 29);
        let names: HashSet<_> = TOOLS.iter().map(|(n, _)| *n).collect();
        let tools: HashSet<_> = TOOLS.iter().map(|(_, t)| *t).collect();
        assert_eq!(names.len(), TOOLS.len());
        assert_eq!(tools.len(), TOOLS.len());

        for (name, tool) in TOOLS {
            assert_eq!(Tool::from_name(name), Some(*tool));
            assert_eq!(tool.name(), *name);
        }
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(Tool::from_name("get_weather"), None);
        assert_eq!(Tool::from_name("GET_CURRENT_STOCK_QUOTE"), None);
        assert_eq!(Tool::from_name(""), None);
    }
}
