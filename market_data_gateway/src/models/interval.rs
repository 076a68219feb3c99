//! Sampling intervals accepted by the series routers.
//!
//! The upstream API spells intervals as short tags (`"5min"`, `"daily"`).
//! [`Interval`] gives those tags a type so routers can match on them instead of
//! comparing strings, and so every router reports the same supported set.

use std::{fmt, str::FromStr};

use crate::errors::Error;

/// A bar interval understood by the time-series endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    /// Every supported tag, intraday first.
    pub const TAGS: &'static [&'static str] = &[
        "1min", "5min", "15min", "30min", "60min", "daily", "weekly", "monthly",
    ];

    /// The intraday tags only.
    pub const INTRADAY_TAGS: &'static [&'static str] = &["1min", "5min", "15min", "30min", "60min"];

    pub const fn as_str(self) -> &'static str {
        match self {
            Interval::Min1 => "1min",
            Interval::Min5 => "5min",
            Interval::Min15 => "15min",
            Interval::Min30 => "30min",
            Interval::Min60 => "60min",
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }

    pub const fn is_intraday(self) -> bool {
        matches!(
            self,
            Interval::Min1 | Interval::Min5 | Interval::Min15 | Interval::Min30 | Interval::Min60
        )
    }

    /// Parses a tag, failing with [`Error::InvalidArgument`] on anything else.
    pub fn parse(tag: &str) -> Result<Self, Error> {
        tag.parse()
    }

    /// True when `tag` names a date-only interval (daily, weekly, monthly).
    ///
    /// Unknown tags are treated as intraday-like; indicator endpoints accept
    /// the same tags, and callers only use this to shape timestamps.
    pub fn is_date_only_tag(tag: &str) -> bool {
        matches!(tag.parse::<Interval>(), Ok(i) if !i.is_intraday())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let interval = match s {
            "1min" => Interval::Min1,
            "5min" => Interval::Min5,
            "15min" => Interval::Min15,
            "30min" => Interval::Min30,
            "60min" => Interval::Min60,
            "daily" => Interval::Daily,
            "weekly" => Interval::Weekly,
            "monthly" => Interval::Monthly,
            _ => return Err(Error::invalid_argument("interval", s, Self::TAGS)),
        };
        Ok(interval)
    }
}
