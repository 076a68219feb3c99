//! Request routers.
//!
//! Each router looks at one discriminant (interval, statement type, profile
//! type, window size) and picks exactly one upstream [`Operation`], building
//! the [`Query`] for it. An unsupported discriminant fails with
//! [`Error::InvalidArgument`] before anything is sent upstream.

use serde::Deserialize;
use serde_json::{Map, Number, Value, json};
use tracing::debug;

use crate::{
    errors::{Error, Result},
    models::{interval::Interval, operation::Operation, query::Query},
};

/// Window sizes at or above this use the sliding-window analytics endpoint.
///
/// Policy choice: the upstream accepts smaller sliding windows, but short
/// windows are answered with the fixed-window summary instead.
pub const SLIDING_WINDOW_THRESHOLD: u32 = 10;

/// Date used in placeholder analytics rows.
const PLACEHOLDER_DATE: &str = "2024-01-01";

/// The operation chosen for a request, with its parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub operation: Operation,
    pub query: Query,
}

impl Route {
    fn new(operation: Operation, query: Query) -> Self {
        debug!(%operation, "routed request");
        Self { operation, query }
    }
}

/// Options that only some stock series endpoints accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockSeriesOptions {
    /// `compact` or `full`; sent to intraday and daily only.
    pub outputsize: String,
    /// `YYYY-MM`, intraday only.
    pub month: Option<String>,
    pub extended_hours: bool,
}

impl Default for StockSeriesOptions {
    fn default() -> Self {
        Self {
            outputsize: "compact".to_string(),
            month: None,
            extended_hours: true,
        }
    }
}

/// Picks the stock time-series endpoint for `(interval, adjusted)`.
///
/// Intraday intervals always go to the intraday endpoint, which takes
/// `adjusted` as a parameter rather than being a separate function.
pub fn stock_series(
    symbol: &str,
    interval: &str,
    adjusted: bool,
    options: &StockSeriesOptions,
) -> Result<Route> {
    let interval = Interval::parse(interval)?;
    let base = Query::new().with("symbol", symbol);

    let route = match (interval, adjusted) {
        (
            Interval::Min1 | Interval::Min5 | Interval::Min15 | Interval::Min30 | Interval::Min60,
            _,
        ) => Route::new(
            Operation::TimeSeriesIntraday,
            base.with("interval", interval)
                .with("datatype", "json")
                .with("adjusted", adjusted)
                .with("extended_hours", options.extended_hours)
                .with("outputsize", &options.outputsize)
                .with_opt("month", options.month.as_deref()),
        ),
        (Interval::Daily, false) => Route::new(
            Operation::TimeSeriesDaily,
            base.with("datatype", "json")
                .with("outputsize", &options.outputsize),
        ),
        (Interval::Daily, true) => Route::new(
            Operation::TimeSeriesDailyAdjusted,
            base.with("datatype", "json")
                .with("outputsize", &options.outputsize),
        ),
        (Interval::Weekly, false) => {
            Route::new(Operation::TimeSeriesWeekly, base.with("datatype", "json"))
        }
        (Interval::Weekly, true) => Route::new(
            Operation::TimeSeriesWeeklyAdjusted,
            base.with("datatype", "json"),
        ),
        (Interval::Monthly, false) => {
            Route::new(Operation::TimeSeriesMonthly, base.with("datatype", "json"))
        }
        (Interval::Monthly, true) => Route::new(
            Operation::TimeSeriesMonthlyAdjusted,
            base.with("datatype", "json"),
        ),
    };
    Ok(route)
}

/// Picks the FX series endpoint. `extra` is forwarded to every endpoint.
pub fn fx_series(
    from_symbol: &str,
    to_symbol: &str,
    interval: &str,
    extra: &Map<String, Value>,
) -> Result<Route> {
    let interval = Interval::parse(interval)?;
    let base = Query::new()
        .with("from_symbol", from_symbol)
        .with("to_symbol", to_symbol);

    let route = match interval {
        Interval::Daily => Route::new(Operation::FxDaily, base.with_extra(extra)),
        Interval::Weekly => Route::new(Operation::FxWeekly, base.with_extra(extra)),
        Interval::Monthly => Route::new(Operation::FxMonthly, base.with_extra(extra)),
        intraday => Route::new(
            Operation::FxIntraday,
            base.with("interval", intraday).with_extra(extra),
        ),
    };
    Ok(route)
}

/// Picks the crypto series endpoint.
///
/// Only the intraday endpoint takes extra parameters; the daily, weekly
/// and monthly endpoints answer with a JSON document encoded as a string.
pub fn crypto_series(
    symbol: &str,
    market: &str,
    interval: &str,
    extra: &Map<String, Value>,
) -> Result<Route> {
    let interval = Interval::parse(interval)?;
    let base = Query::new().with("symbol", symbol).with("market", market);

    let route = match interval {
        Interval::Daily => Route::new(Operation::DigitalCurrencyDaily, base),
        Interval::Weekly => Route::new(Operation::DigitalCurrencyWeekly, base),
        Interval::Monthly => Route::new(Operation::DigitalCurrencyMonthly, base),
        intraday => Route::new(
            Operation::CryptoIntraday,
            base.with("interval", intraday).with_extra(extra),
        ),
    };
    Ok(route)
}

/// Which financial statement(s) to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Income,
    Balance,
    CashFlow,
    All,
}

impl StatementKind {
    pub const SUPPORTED: &'static [&'static str] = &["income", "balance", "cash_flow", "all"];

    /// Case-insensitive.
    pub fn parse(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "balance" => Ok(Self::Balance),
            "cash_flow" => Ok(Self::CashFlow),
            "all" => Ok(Self::All),
            _ => Err(Error::invalid_argument("statement_type", value, Self::SUPPORTED)),
        }
    }

    /// The single operation behind a one-statement request; `None` for `All`.
    pub const fn operation(self) -> Option<Operation> {
        match self {
            Self::Income => Some(Operation::IncomeStatement),
            Self::Balance => Some(Operation::BalanceSheet),
            Self::CashFlow => Some(Operation::CashFlow),
            Self::All => None,
        }
    }
}

/// Picks OVERVIEW or ETF_PROFILE. Case-sensitive.
pub fn symbol_profile(symbol: &str, profile_type: &str) -> Result<Route> {
    const SUPPORTED: &[&str] = &["company", "etf"];
    let operation = match profile_type {
        "company" => Operation::CompanyOverview,
        "etf" => Operation::EtfProfile,
        other => return Err(Error::invalid_argument("profile_type", other, SUPPORTED)),
    };
    Ok(Route::new(operation, Query::new().with("symbol", symbol)))
}

/// Parameters of an analytics request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AnalyticsRequest {
    pub symbols: Vec<String>,
    pub interval: String,
    pub calculations: Vec<String>,
    pub series_range: String,
    #[serde(default = "default_ohlc")]
    pub ohlc: String,
    /// Any JSON number; only values at or above [`SLIDING_WINDOW_THRESHOLD`]
    /// select the sliding window.
    #[serde(default)]
    pub window_size: Option<Number>,
}

fn default_ohlc() -> String {
    "close".to_string()
}

/// Fixed or sliding analytics window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Fixed,
    Sliding,
}

impl WindowKind {
    /// Negative, fractional and small sizes all stay on the fixed window.
    pub fn for_window_size(window_size: Option<&Number>) -> Self {
        match window_size.and_then(Number::as_f64) {
            Some(size) if size >= f64::from(SLIDING_WINDOW_THRESHOLD) => Self::Sliding,
            _ => Self::Fixed,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fixed => "fixed",
            Self::Sliding => "sliding",
        }
    }
}

/// Picks the analytics endpoint from the window size.
pub fn analytics(request: &AnalyticsRequest) -> (WindowKind, Route) {
    let kind = WindowKind::for_window_size(request.window_size.as_ref());
    let query = Query::new()
        .with_list("symbols", &request.symbols)
        .with("interval", &request.interval)
        .with_list("calculations", &request.calculations)
        .with("series_range", &request.series_range)
        .with("ohlc", &request.ohlc);

    let route = match (kind, &request.window_size) {
        (WindowKind::Sliding, Some(size)) => Route::new(
            Operation::AnalyticsSlidingWindow,
            query.with("window_size", size),
        ),
        _ => Route::new(Operation::AnalyticsFixedWindow, query),
    };
    (kind, route)
}

/// Fills the fields every analytics answer is expected to carry.
///
/// Sets `window_type` and `symbols`, adds a zero-valued placeholder row per
/// (symbol, calculation) when `results` is missing, and merges the request
/// echo into `metadata`. The fixed path also defaults `data_format`.
/// Non-object answers are returned unchanged.
pub fn backfill_analytics(answer: Value, kind: WindowKind, request: &AnalyticsRequest) -> Value {
    let Value::Object(mut doc) = answer else {
        return answer;
    };

    doc.insert("window_type".to_string(), json!(kind.as_str()));
    doc.insert("symbols".to_string(), json!(request.symbols));

    if kind == WindowKind::Fixed && !doc.contains_key("data_format") {
        doc.insert("data_format".to_string(), json!("json"));
    }

    if !doc.contains_key("results") {
        let placeholders: Vec<Value> = request
            .symbols
            .iter()
            .flat_map(|symbol| {
                request.calculations.iter().map(move |calculation| {
                    json!({
                        "symbol": symbol,
                        "calculation": calculation,
                        "value": 0.0,
                        "date": PLACEHOLDER_DATE,
                    })
                })
            })
            .collect();
        doc.insert("results".to_string(), Value::Array(placeholders));
    }

    let window_size = match kind {
        WindowKind::Sliding => json!(request.window_size),
        WindowKind::Fixed => Value::Null,
    };
    let echo = json!({
        "interval": request.interval,
        "series_range": request.series_range,
        "ohlc": request.ohlc,
        "window_size": window_size,
        "calculations": request.calculations,
    });

    let metadata = doc
        .entry("metadata")
        .or_insert_with(|| Value::Object(Map::new()));
    if !metadata.is_object() {
        *metadata = Value::Object(Map::new());
    }
    if let (Value::Object(metadata), Value::Object(echo)) = (metadata, echo) {
        metadata.extend(echo);
    }

    Value::Object(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> StockSeriesOptions {
        StockSeriesOptions::default()
    }

    #[test]
    fn every_stock_interval_and_adjustment_routes() {
        let expected = [
            ("1min", false, Operation::TimeSeriesIntraday),
            ("1min", true, Operation::TimeSeriesIntraday),
            ("5min", false, Operation::TimeSeriesIntraday),
            ("5min", true, Operation::TimeSeriesIntraday),
            ("15min", false, Operation::TimeSeriesIntraday),
            ("15min", true, Operation::TimeSeriesIntraday),
            ("30min", false, Operation::TimeSeriesIntraday),
            ("30min", true, Operation::TimeSeriesIntraday),
            ("60min", false, Operation::TimeSeriesIntraday),
            ("60min", true, Operation::TimeSeriesIntraday),
            ("daily", false, Operation::TimeSeriesDaily),
            ("daily", true, Operation::TimeSeriesDailyAdjusted),
            ("weekly", false, Operation::TimeSeriesWeekly),
            ("weekly", true, Operation::TimeSeriesWeeklyAdjusted),
            ("monthly", false, Operation::TimeSeriesMonthly),
            ("monthly", true, Operation::TimeSeriesMonthlyAdjusted),
        ];
        for (interval, adjusted, operation) in expected {
            let route = stock_series("IBM", interval, adjusted, &options()).unwrap();
            assert_eq!(route.operation, operation, "{interval} adjusted={adjusted}");
            assert_eq!(route.query.get("symbol"), Some("IBM"));
        }
    }

    #[test]
    fn unsupported_stock_interval_fails() {
        for interval in ["", "2min", "Daily", "quarterly", "intraday"] {
            let err = stock_series("IBM", interval, false, &options()).unwrap_err();
            match err {
                Error::InvalidArgument { name, value, supported } => {
                    assert_eq!(name, "interval");
                    assert_eq!(value, interval);
                    assert_eq!(supported, Interval::TAGS);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    #[test]
    fn outputsize_goes_to_intraday_and_daily_only() {
        let opts = StockSeriesOptions {
            outputsize: "full".to_string(),
            month: Some("2024-03".to_string()),
            extended_hours: false,
        };

        let intraday = stock_series("IBM", "5min", true, &opts).unwrap();
        assert_eq!(intraday.query.get("outputsize"), Some("full"));
        assert_eq!(intraday.query.get("month"), Some("2024-03"));
        assert_eq!(intraday.query.get("adjusted"), Some("true"));
        assert_eq!(intraday.query.get("extended_hours"), Some("false"));
        assert_eq!(intraday.query.get("interval"), Some("5min"));

        let daily = stock_series("IBM", "daily", false, &opts).unwrap();
        assert_eq!(daily.query.get("outputsize"), Some("full"));
        assert_eq!(daily.query.get("month"), None);

        for interval in ["weekly", "monthly"] {
            let route = stock_series("IBM", interval, true, &opts).unwrap();
            assert_eq!(route.query.get("outputsize"), None, "{interval}");
            assert_eq!(route.query.get("datatype"), Some("json"));
        }
    }

    #[test]
    fn fx_and_crypto_intervals_route() {
        let extra = Map::new();
        let cases = [
            ("1min", Operation::FxIntraday, Operation::CryptoIntraday),
            ("60min", Operation::FxIntraday, Operation::CryptoIntraday),
            ("daily", Operation::FxDaily, Operation::DigitalCurrencyDaily),
            ("weekly", Operation::FxWeekly, Operation::DigitalCurrencyWeekly),
            ("monthly", Operation::FxMonthly, Operation::DigitalCurrencyMonthly),
        ];
        for (interval, fx, crypto) in cases {
            assert_eq!(fx_series("EUR", "USD", interval, &extra).unwrap().operation, fx);
            assert_eq!(crypto_series("BTC", "USD", interval, &extra).unwrap().operation, crypto);
        }
        assert!(fx_series("EUR", "USD", "hourly", &extra).is_err());
        assert!(crypto_series("BTC", "USD", "yearly", &extra).is_err());
    }

    #[test]
    fn extras_reach_fx_but_not_crypto_daily() {
        let extra = json!({"outputsize": "full"});
        let extra = extra.as_object().unwrap();

        let fx = fx_series("EUR", "USD", "weekly", extra).unwrap();
        assert_eq!(fx.query.get("outputsize"), Some("full"));

        let crypto = crypto_series("BTC", "EUR", "daily", extra).unwrap();
        assert_eq!(crypto.query.get("outputsize"), None);

        let crypto = crypto_series("BTC", "EUR", "5min", extra).unwrap();
        assert_eq!(crypto.query.get("outputsize"), Some("full"));
        assert_eq!(crypto.query.get("interval"), Some("5min"));
    }

    #[test]
    fn statement_kinds_are_case_insensitive() {
        assert_eq!(StatementKind::parse("ALL").unwrap(), StatementKind::All);
        assert_eq!(StatementKind::parse("Cash_Flow").unwrap(), StatementKind::CashFlow);
        assert_eq!(
            StatementKind::parse("income").unwrap().operation(),
            Some(Operation::IncomeStatement)
        );
        assert!(matches!(
            StatementKind::parse("ratios"),
            Err(Error::InvalidArgument { name: "statement_type", .. })
        ));
    }

    #[test]
    fn profile_types() {
        assert_eq!(symbol_profile("IBM", "company").unwrap().operation, Operation::CompanyOverview);
        assert_eq!(symbol_profile("SPY", "etf").unwrap().operation, Operation::EtfProfile);
        assert!(symbol_profile("SPY", "fund").is_err());
    }

    fn analytics_request(window_size: Option<i64>) -> AnalyticsRequest {
        AnalyticsRequest {
            symbols: vec!["AAPL".to_string(), "MSFT".to_string()],
            interval: "DAILY".to_string(),
            calculations: vec!["MEAN".to_string(), "STDDEV".to_string(), "CORRELATION".to_string()],
            series_range: "1month".to_string(),
            ohlc: "close".to_string(),
            window_size: window_size.map(Number::from),
        }
    }

    #[test]
    fn window_size_selects_the_endpoint() {
        for (size, kind, operation) in [
            (None, WindowKind::Fixed, Operation::AnalyticsFixedWindow),
            (Some(5), WindowKind::Fixed, Operation::AnalyticsFixedWindow),
            (Some(9), WindowKind::Fixed, Operation::AnalyticsFixedWindow),
            (Some(0), WindowKind::Fixed, Operation::AnalyticsFixedWindow),
            (Some(-5), WindowKind::Fixed, Operation::AnalyticsFixedWindow),
            (Some(10), WindowKind::Sliding, Operation::AnalyticsSlidingWindow),
            (Some(250), WindowKind::Sliding, Operation::AnalyticsSlidingWindow),
        ] {
            let (chosen, route) = analytics(&analytics_request(size));
            assert_eq!(chosen, kind, "{size:?}");
            assert_eq!(route.operation, operation, "{size:?}");
        }

        let (_, fixed) = analytics(&analytics_request(Some(5)));
        assert_eq!(fixed.query.get("window_size"), None);
        assert_eq!(fixed.query.get("symbols"), Some("AAPL,MSFT"));

        let (_, sliding) = analytics(&analytics_request(Some(20)));
        assert_eq!(sliding.query.get("window_size"), Some("20"));
    }

    #[test]
    fn window_size_accepts_any_json_number() {
        let request: AnalyticsRequest = serde_json::from_value(json!({
            "symbols": ["AAPL"],
            "interval": "DAILY",
            "calculations": ["MEAN"],
            "series_range": "1month",
            "window_size": -5
        }))
        .unwrap();
        let (kind, route) = analytics(&request);
        assert_eq!(kind, WindowKind::Fixed);
        assert_eq!(route.operation, Operation::AnalyticsFixedWindow);
        assert_eq!(route.query.get("window_size"), None);

        let fractional = Number::from_f64(9.5);
        assert_eq!(WindowKind::for_window_size(fractional.as_ref()), WindowKind::Fixed);
        let fractional = Number::from_f64(12.5);
        assert_eq!(WindowKind::for_window_size(fractional.as_ref()), WindowKind::Sliding);
    }

    #[test]
    fn fixed_backfill_adds_placeholders_and_echo() {
        let request = analytics_request(None);
        let out = backfill_analytics(json!({"meta_data": {"x": 1}}), WindowKind::Fixed, &request);

        assert_eq!(out["window_type"], "fixed");
        assert_eq!(out["data_format"], "json");
        assert_eq!(out["symbols"], json!(["AAPL", "MSFT"]));
        assert_eq!(out["results"].as_array().unwrap().len(), 6);
        assert_eq!(
            out["results"][0],
            json!({"symbol": "AAPL", "calculation": "MEAN", "value": 0.0, "date": "2024-01-01"})
        );
        assert_eq!(out["metadata"]["window_size"], Value::Null);
        assert_eq!(out["metadata"]["series_range"], "1month");
        assert_eq!(out["meta_data"], json!({"x": 1}));
    }

    #[test]
    fn sliding_backfill_keeps_upstream_results() {
        let request = analytics_request(Some(20));
        let upstream = json!({
            "results": [{"symbol": "AAPL", "calculation": "MEAN", "value": 1.5}],
            "metadata": {"source": "upstream"},
        });
        let out = backfill_analytics(upstream, WindowKind::Sliding, &request);

        assert_eq!(out["window_type"], "sliding");
        assert!(out.get("data_format").is_none());
        assert_eq!(out["results"].as_array().unwrap().len(), 1);
        assert_eq!(out["metadata"]["source"], "upstream");
        assert_eq!(out["metadata"]["window_size"], 20);
        assert_eq!(out["metadata"]["calculations"], json!(["MEAN", "STDDEV", "CORRELATION"]));
    }

    #[test]
    fn non_object_answers_pass_through() {
        let request = analytics_request(None);
        let out = backfill_analytics(json!("date,value\n"), WindowKind::Fixed, &request);
        assert_eq!(out, json!("date,value\n"));
    }
}
