//! Closed key tables mapping upstream field names to canonical snake_case.
//!
//! Each table lists every canonical key a record kind can carry, together
//! with the upstream spelling(s) it is read from. Applying a table never
//! passes unknown keys through and never invents a key whose source is
//! missing or `null`. When a canonical key lists several upstream spellings,
//! the first one present wins (endpoint variants number the same field
//! differently, e.g. volume is `"5. volume"` on raw bars and `"6. volume"`
//! on adjusted ones).

use serde_json::{Map, Value};

/// One canonical key and the upstream keys it may be read from, by priority.
#[derive(Debug, Clone, Copy)]
pub struct KeyRule {
    pub canonical: &'static str,
    pub upstream: &'static [&'static str],
}

const fn rule(canonical: &'static str, upstream: &'static [&'static str]) -> KeyRule {
    KeyRule {
        canonical,
        upstream,
    }
}

/// An ordered, closed set of [`KeyRule`]s for one record kind.
#[derive(Debug, Clone, Copy)]
pub struct KeyMap {
    rules: &'static [KeyRule],
}

impl KeyMap {
    pub const fn new(rules: &'static [KeyRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [KeyRule] {
        self.rules
    }

    pub fn canonical_keys(&self) -> impl Iterator<Item = &'static str> {
        self.rules.iter().map(|r| r.canonical)
    }

    /// Builds the canonical record, in table order.
    pub fn apply(&self, source: &Map<String, Value>) -> Map<String, Value> {
        self.apply_with(source, Value::clone)
    }

    /// Like [`apply`](Self::apply), passing every kept value through `convert`.
    pub fn apply_with(
        &self,
        source: &Map<String, Value>,
        convert: impl Fn(&Value) -> Value,
    ) -> Map<String, Value> {
        let mut out = Map::new();
        for rule in self.rules {
            if let Some(value) = lookup(source, rule.upstream) {
                out.insert(rule.canonical.to_string(), convert(value));
            }
        }
        out
    }

    /// Reads a single canonical field straight from an upstream record.
    pub fn get<'a>(&self, source: &'a Map<String, Value>, canonical: &str) -> Option<&'a Value> {
        let rule = self.rules.iter().find(|r| r.canonical == canonical)?;
        lookup(source, rule.upstream)
    }
}

fn lookup<'a>(source: &'a Map<String, Value>, upstream: &[&str]) -> Option<&'a Value> {
    upstream
        .iter()
        .filter_map(|key| source.get(*key))
        .find(|v| !v.is_null())
}

/// Renders scalars as strings; used where the schema promises string values.
pub fn to_string_value(value: &Value) -> Value {
    match value {
        Value::String(_) => value.clone(),
        other => Value::String(other.to_string()),
    }
}

/// `"Global Quote"` block of GLOBAL_QUOTE.
pub const STOCK_QUOTE: KeyMap = KeyMap::new(&[
    rule("symbol", &["01. symbol"]),
    rule("open", &["02. open"]),
    rule("high", &["03. high"]),
    rule("low", &["04. low"]),
    rule("price", &["05. price"]),
    rule("volume", &["06. volume"]),
    rule("latest_trading_day", &["07. latest trading day"]),
    rule("previous_close", &["08. previous close"]),
    rule("change", &["09. change"]),
    rule("change_percent", &["10. change percent"]),
]);

/// `"Meta Data"` of the stock time-series endpoints.
///
/// Intraday numbers its fields one higher from `Interval` on; weekly and
/// monthly have no output size, so their time zone sits at 4.
pub const STOCK_SERIES_METADATA: KeyMap = KeyMap::new(&[
    rule("information", &["1. Information"]),
    rule("symbol", &["2. Symbol"]),
    rule("last_refreshed", &["3. Last Refreshed"]),
    rule("output_size", &["4. Output Size", "5. Output Size"]),
    rule("time_zone", &["5. Time Zone", "6. Time Zone", "4. Time Zone"]),
    rule("interval", &["4. Interval"]),
]);

/// One bar of a stock time series, raw or adjusted.
pub const STOCK_BAR: KeyMap = KeyMap::new(&[
    rule("open", &["1. open"]),
    rule("high", &["2. high"]),
    rule("low", &["3. low"]),
    rule("close", &["4. close"]),
    rule("adjusted_close", &["5. adjusted close"]),
    rule("volume", &["5. volume", "6. volume"]),
    rule("dividend_amount", &["7. dividend amount"]),
    rule("split_coefficient", &["8. split coefficient"]),
]);

/// One element of SYMBOL_SEARCH `bestMatches`.
pub const SYMBOL_MATCH: KeyMap = KeyMap::new(&[
    rule("symbol", &["1. symbol"]),
    rule("name", &["2. name"]),
    rule("type", &["3. type"]),
    rule("region", &["4. region"]),
    rule("market_open", &["5. marketOpen"]),
    rule("market_close", &["6. marketClose"]),
    rule("timezone", &["7. timezone"]),
    rule("currency", &["8. currency"]),
    rule("match_score", &["9. matchScore"]),
]);

/// `"Realtime Currency Exchange Rate"` block of CURRENCY_EXCHANGE_RATE.
pub const FX_RATE: KeyMap = KeyMap::new(&[
    rule("from_currency_code", &["1. From_Currency Code"]),
    rule("from_currency_name", &["2. From_Currency Name"]),
    rule("to_currency_code", &["3. To_Currency Code"]),
    rule("to_currency_name", &["4. To_Currency Name"]),
    rule("exchange_rate", &["5. Exchange Rate"]),
    rule("last_refreshed", &["6. Last Refreshed"]),
    rule("time_zone", &["7. Time Zone"]),
    rule("bid_price", &["8. Bid Price"]),
    rule("ask_price", &["9. Ask Price"]),
]);

pub const FX_SERIES_METADATA: KeyMap = KeyMap::new(&[
    rule("information", &["1. Information"]),
    rule("from_symbol", &["2. From Symbol"]),
    rule("to_symbol", &["3. To Symbol"]),
    rule("output_size", &["4. Output Size"]),
    rule("last_refreshed", &["5. Last Refreshed"]),
    rule("time_zone", &["6. Time Zone"]),
    rule("interval", &["7. Interval"]),
]);

pub const FX_BAR: KeyMap = KeyMap::new(&[
    rule("open", &["1. open"]),
    rule("high", &["2. high"]),
    rule("low", &["3. low"]),
    rule("close", &["4. close"]),
]);

pub const CRYPTO_SERIES_METADATA: KeyMap = KeyMap::new(&[
    rule("information", &["1. Information"]),
    rule("symbol", &["2. Digital Currency Code"]),
    rule("name", &["3. Digital Currency Name"]),
    rule("market", &["4. Market Code"]),
    rule("market_name", &["5. Market Name"]),
    rule("last_refreshed", &["6. Last Refreshed"]),
    rule("interval", &["7. Interval"]),
    rule("output_size", &["8. Output Size"]),
    rule("time_zone", &["9. Time Zone"]),
]);

/// Crypto quote header; the daily endpoint numbers these differently from
/// the series metadata (time zone is 7 here).
pub const CRYPTO_QUOTE_METADATA: KeyMap = KeyMap::new(&[
    rule("symbol", &["2. Digital Currency Code"]),
    rule("name", &["3. Digital Currency Name"]),
    rule("market", &["4. Market Code"]),
    rule("market_name", &["5. Market Name"]),
    rule("last_refreshed", &["6. Last Refreshed"]),
    rule("time_zone", &["7. Time Zone"]),
]);

pub const CRYPTO_BAR: KeyMap = KeyMap::new(&[
    rule("open", &["1. open"]),
    rule("high", &["2. high"]),
    rule("low", &["3. low"]),
    rule("close", &["4. close"]),
    rule("volume", &["5. volume"]),
]);

pub const ANNUAL_EARNINGS: KeyMap = KeyMap::new(&[
    rule("fiscal_date_ending", &["fiscalDateEnding"]),
    rule("reported_eps", &["reportedEPS"]),
]);

pub const QUARTERLY_EARNINGS: KeyMap = KeyMap::new(&[
    rule("fiscal_date_ending", &["fiscalDateEnding"]),
    rule("reported_date", &["reportedDate"]),
    rule("reported_eps", &["reportedEPS"]),
    rule("estimated_eps", &["estimatedEPS"]),
    rule("surprise", &["surprise"]),
    rule("surprise_percentage", &["surprisePercentage"]),
    rule("report_time", &["reportTime"]),
]);
