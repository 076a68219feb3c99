//! Upstream operations reachable through a [`DataSource`](crate::providers::DataSource).

use std::fmt;

/// One logical upstream endpoint.
///
/// Each variant corresponds to one value of the upstream `function` query
/// parameter; see [`Operation::function_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    // Core stock data
    GlobalQuote,
    TimeSeriesIntraday,
    TimeSeriesDaily,
    TimeSeriesDailyAdjusted,
    TimeSeriesWeekly,
    TimeSeriesWeeklyAdjusted,
    TimeSeriesMonthly,
    TimeSeriesMonthlyAdjusted,
    RealtimeBulkQuotes,
    SymbolSearch,
    MarketStatus,

    // Options and market intelligence
    HistoricalOptions,
    NewsSentiment,
    TopGainersLosers,
    InsiderTransactions,
    AnalyticsFixedWindow,
    AnalyticsSlidingWindow,

    // Fundamentals
    CompanyOverview,
    EtfProfile,
    IncomeStatement,
    BalanceSheet,
    CashFlow,
    Earnings,
    Dividends,
    Splits,
    ListingStatus,
    EarningsCalendar,
    IpoCalendar,

    // Forex
    CurrencyExchangeRate,
    FxIntraday,
    FxDaily,
    FxWeekly,
    FxMonthly,

    // Crypto
    CryptoIntraday,
    DigitalCurrencyDaily,
    DigitalCurrencyWeekly,
    DigitalCurrencyMonthly,

    // Commodities and economic indicators
    AllCommodities,
    RealGdp,
    RealGdpPerCapita,
    TreasuryYield,
    FederalFundsRate,
    Cpi,
    Inflation,
    RetailSales,
    Durables,
    Unemployment,
    NonfarmPayroll,

    // Technical indicators used by the packs
    Sma,
    Ema,
    Wma,
    Macd,
    Rsi,
    Stoch,
    Cci,
    Mfi,
    Bbands,
    Atr,
    Sar,
    Obv,
    Ad,
    Adosc,
}

impl Operation {
    /// The upstream `function` name for this operation.
    pub const fn function_name(self) -> &'static str {
        match self {
            Operation::GlobalQuote => "GLOBAL_QUOTE",
            Operation::TimeSeriesIntraday => "TIME_SERIES_INTRADAY",
            Operation::TimeSeriesDaily => "TIME_SERIES_DAILY",
            Operation::TimeSeriesDailyAdjusted => "TIME_SERIES_DAILY_ADJUSTED",
            Operation::TimeSeriesWeekly => "TIME_SERIES_WEEKLY",
            Operation::TimeSeriesWeeklyAdjusted => "TIME_SERIES_WEEKLY_ADJUSTED",
            Operation::TimeSeriesMonthly => "TIME_SERIES_MONTHLY",
            Operation::TimeSeriesMonthlyAdjusted => "TIME_SERIES_MONTHLY_ADJUSTED",
            Operation::RealtimeBulkQuotes => "REALTIME_BULK_QUOTES",
            Operation::SymbolSearch => "SYMBOL_SEARCH",
            Operation::MarketStatus => "MARKET_STATUS",
            Operation::HistoricalOptions => "HISTORICAL_OPTIONS",
            Operation::NewsSentiment => "NEWS_SENTIMENT",
            Operation::TopGainersLosers => "TOP_GAINERS_LOSERS",
            Operation::InsiderTransactions => "INSIDER_TRANSACTIONS",
            Operation::AnalyticsFixedWindow => "ANALYTICS_FIXED_WINDOW",
            Operation::AnalyticsSlidingWindow => "ANALYTICS_SLIDING_WINDOW",
            Operation::CompanyOverview => "OVERVIEW",
            Operation::EtfProfile => "ETF_PROFILE",
            Operation::IncomeStatement => "INCOME_STATEMENT",
            Operation::BalanceSheet => "BALANCE_SHEET",
            Operation::CashFlow => "CASH_FLOW",
            Operation::Earnings => "EARNINGS",
            Operation::Dividends => "DIVIDENDS",
            Operation::Splits => "SPLITS",
            Operation::ListingStatus => "LISTING_STATUS",
            Operation::EarningsCalendar => "EARNINGS_CALENDAR",
            Operation::IpoCalendar => "IPO_CALENDAR",
            Operation::CurrencyExchangeRate => "CURRENCY_EXCHANGE_RATE",
            Operation::FxIntraday => "FX_INTRADAY",
            Operation::FxDaily => "FX_DAILY",
            Operation::FxWeekly => "FX_WEEKLY",
            Operation::FxMonthly => "FX_MONTHLY",
            Operation::CryptoIntraday => "CRYPTO_INTRADAY",
            Operation::DigitalCurrencyDaily => "DIGITAL_CURRENCY_DAILY",
            Operation::DigitalCurrencyWeekly => "DIGITAL_CURRENCY_WEEKLY",
            Operation::DigitalCurrencyMonthly => "DIGITAL_CURRENCY_MONTHLY",
            Operation::AllCommodities => "ALL_COMMODITIES",
            Operation::RealGdp => "REAL_GDP",
            Operation::RealGdpPerCapita => "REAL_GDP_PER_CAPITA",
            Operation::TreasuryYield => "TREASURY_YIELD",
            Operation::FederalFundsRate => "FEDERAL_FUNDS_RATE",
            Operation::Cpi => "CPI",
            Operation::Inflation => "INFLATION",
            Operation::RetailSales => "RETAIL_SALES",
            Operation::Durables => "DURABLES",
            Operation::Unemployment => "UNEMPLOYMENT",
            Operation::NonfarmPayroll => "NONFARM_PAYROLL",
            Operation::Sma => "SMA",
            Operation::Ema => "EMA",
            Operation::Wma => "WMA",
            Operation::Macd => "MACD",
            Operation::Rsi => "RSI",
            Operation::Stoch => "STOCH",
            Operation::Cci => "CCI",
            Operation::Mfi => "MFI",
            Operation::Bbands => "BBANDS",
            Operation::Atr => "ATR",
            Operation::Sar => "SAR",
            Operation::Obv => "OBV",
            Operation::Ad => "AD",
            Operation::Adosc => "ADOSC",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}
