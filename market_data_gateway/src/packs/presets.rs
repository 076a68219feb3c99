//! Static indicator parameters per pack and preset.

use crate::models::operation::Operation;

/// Parameter tuning of a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Fast,
    Standard,
    Slow,
}

impl Preset {
    /// Unknown names fall back to [`Preset::Standard`].
    pub fn resolve(name: &str) -> Self {
        match name {
            "fast" => Self::Fast,
            "slow" => Self::Slow,
            _ => Self::Standard,
        }
    }
}

/// A named group of indicators fetched together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pack {
    Trend,
    Momentum,
    Volatility,
    Volume,
}

/// How an indicator's fields map to observation components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Components {
    /// Every field is reported as component `"value"`.
    Single,
    /// Each field is its own component, named by the lower-cased field.
    Multi,
}

/// One indicator call within a pack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorSpec {
    pub operation: Operation,
    pub components: Components,
    /// Sent in addition to `symbol` and `interval`.
    pub params: &'static [(&'static str, &'static str)],
}

const fn single(
    operation: Operation,
    params: &'static [(&'static str, &'static str)],
) -> IndicatorSpec {
    IndicatorSpec {
        operation,
        components: Components::Single,
        params,
    }
}

const fn multi(
    operation: Operation,
    params: &'static [(&'static str, &'static str)],
) -> IndicatorSpec {
    IndicatorSpec {
        operation,
        components: Components::Multi,
        params,
    }
}

const TREND_FAST: &[IndicatorSpec] = &[
    single(Operation::Sma, &[("time_period", "10"), ("series_type", "close")]),
    single(Operation::Ema, &[("time_period", "10"), ("series_type", "close")]),
    single(Operation::Wma, &[("time_period", "10"), ("series_type", "close")]),
    multi(
        Operation::Macd,
        &[("fastperiod", "8"), ("slowperiod", "17"), ("signalperiod", "5"), ("series_type", "close")],
    ),
];

const TREND_STANDARD: &[IndicatorSpec] = &[
    single(Operation::Sma, &[("time_period", "20"), ("series_type", "close")]),
    single(Operation::Ema, &[("time_period", "20"), ("series_type", "close")]),
    single(Operation::Wma, &[("time_period", "20"), ("series_type", "close")]),
    multi(
        Operation::Macd,
        &[("fastperiod", "12"), ("slowperiod", "26"), ("signalperiod", "9"), ("series_type", "close")],
    ),
];

const TREND_SLOW: &[IndicatorSpec] = &[
    single(Operation::Sma, &[("time_period", "50"), ("series_type", "close")]),
    single(Operation::Ema, &[("time_period", "50"), ("series_type", "close")]),
    single(Operation::Wma, &[("time_period", "50"), ("series_type", "close")]),
    multi(
        Operation::Macd,
        &[("fastperiod", "19"), ("slowperiod", "39"), ("signalperiod", "9"), ("series_type", "close")],
    ),
];

const MOMENTUM_FAST: &[IndicatorSpec] = &[
    single(Operation::Rsi, &[("time_period", "7"), ("series_type", "close")]),
    multi(
        Operation::Stoch,
        &[
            ("fastkperiod", "5"),
            ("slowkperiod", "3"),
            ("slowdperiod", "3"),
            ("slowkmatype", "0"),
            ("slowdmatype", "0"),
        ],
    ),
    single(Operation::Cci, &[("time_period", "10")]),
    single(Operation::Mfi, &[("time_period", "7")]),
];

const MOMENTUM_STANDARD: &[IndicatorSpec] = &[
    single(Operation::Rsi, &[("time_period", "14"), ("series_type", "close")]),
    multi(
        Operation::Stoch,
        &[
            ("fastkperiod", "14"),
            ("slowkperiod", "3"),
            ("slowdperiod", "3"),
            ("slowkmatype", "0"),
            ("slowdmatype", "0"),
        ],
    ),
    single(Operation::Cci, &[("time_period", "20")]),
    single(Operation::Mfi, &[("time_period", "14")]),
];

const MOMENTUM_SLOW: &[IndicatorSpec] = &[
    single(Operation::Rsi, &[("time_period", "21"), ("series_type", "close")]),
    multi(
        Operation::Stoch,
        &[
            ("fastkperiod", "21"),
            ("slowkperiod", "5"),
            ("slowdperiod", "5"),
            ("slowkmatype", "0"),
            ("slowdmatype", "0"),
        ],
    ),
    single(Operation::Cci, &[("time_period", "30")]),
    single(Operation::Mfi, &[("time_period", "21")]),
];

const VOLATILITY_FAST: &[IndicatorSpec] = &[
    multi(
        Operation::Bbands,
        &[
            ("time_period", "14"),
            ("nbdevup", "2"),
            ("nbdevdn", "2"),
            ("matype", "0"),
            ("series_type", "close"),
        ],
    ),
    single(Operation::Atr, &[("time_period", "7")]),
    single(Operation::Sar, &[("acceleration", "0.03"), ("maximum", "0.3")]),
];

const VOLATILITY_STANDARD: &[IndicatorSpec] = &[
    multi(
        Operation::Bbands,
        &[
            ("time_period", "20"),
            ("nbdevup", "2"),
            ("nbdevdn", "2"),
            ("matype", "0"),
            ("series_type", "close"),
        ],
    ),
    single(Operation::Atr, &[("time_period", "14")]),
    single(Operation::Sar, &[("acceleration", "0.02"), ("maximum", "0.2")]),
];

const VOLATILITY_SLOW: &[IndicatorSpec] = &[
    multi(
        Operation::Bbands,
        &[
            ("time_period", "30"),
            ("nbdevup", "2"),
            ("nbdevdn", "2"),
            ("matype", "0"),
            ("series_type", "close"),
        ],
    ),
    single(Operation::Atr, &[("time_period", "21")]),
    single(Operation::Sar, &[("acceleration", "0.01"), ("maximum", "0.1")]),
];

const VOLUME_FAST: &[IndicatorSpec] = &[
    single(Operation::Obv, &[]),
    single(Operation::Ad, &[]),
    single(Operation::Adosc, &[("fastperiod", "2"), ("slowperiod", "7")]),
];

const VOLUME_STANDARD: &[IndicatorSpec] = &[
    single(Operation::Obv, &[]),
    single(Operation::Ad, &[]),
    single(Operation::Adosc, &[("fastperiod", "3"), ("slowperiod", "10")]),
];

const VOLUME_SLOW: &[IndicatorSpec] = &[
    single(Operation::Obv, &[]),
    single(Operation::Ad, &[]),
    single(Operation::Adosc, &[("fastperiod", "5"), ("slowperiod", "20")]),
];

/// The indicator calls of `pack` under `preset`, in output order.
pub const fn indicators(pack: Pack, preset: Preset) -> &'static [IndicatorSpec] {
    match (pack, preset) {
        (Pack::Trend, Preset::Fast) => TREND_FAST,
        (Pack::Trend, Preset::Standard) => TREND_STANDARD,
        (Pack::Trend, Preset::Slow) => TREND_SLOW,
        (Pack::Momentum, Preset::Fast) => MOMENTUM_FAST,
        (Pack::Momentum, Preset::Standard) => MOMENTUM_STANDARD,
        (Pack::Momentum, Preset::Slow) => MOMENTUM_SLOW,
        (Pack::Volatility, Preset::Fast) => VOLATILITY_FAST,
        (Pack::Volatility, Preset::Standard) => VOLATILITY_STANDARD,
        (Pack::Volatility, Preset::Slow) => VOLATILITY_SLOW,
        (Pack::Volume, Preset::Fast) => VOLUME_FAST,
        (Pack::Volume, Preset::Standard) => VOLUME_STANDARD,
        (Pack::Volume, Preset::Slow) => VOLUME_SLOW,
    }
}
