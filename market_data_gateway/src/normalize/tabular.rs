//! Comma-delimited text into ordered records.
//!
//! The CSV endpoints (listing status, calendars, bulk quotes) never quote
//! fields, so quoting is switched off: a comma always separates fields.
//! Rows whose field count differs from the header are dropped.

use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;
use tracing::debug;

/// One decoded row, keyed by header name in header order.
pub type Row = IndexMap<String, String>;

/// Where column names come from.
#[derive(Debug, Clone, Copy)]
pub enum Header<'a> {
    /// Use the first line of the text.
    FromSource,
    /// Use these names; the first line is still consumed as the header.
    Fixed(&'a [&'a str]),
}

/// Header names of the listing-status CSV.
pub const LISTING_HEADERS: &[&str] = &[
    "symbol",
    "name",
    "exchange",
    "asset_type",
    "ipo_date",
    "delisting_date",
    "status",
];

/// Header names of the earnings-calendar CSV.
pub const EARNINGS_CALENDAR_HEADERS: &[&str] = &[
    "symbol",
    "name",
    "report_date",
    "fiscal_date_ending",
    "estimate",
    "currency",
];

/// Header names of the IPO-calendar CSV.
pub const IPO_CALENDAR_HEADERS: &[&str] = &[
    "symbol",
    "name",
    "ipo_date",
    "price_range_low",
    "price_range_high",
    "currency",
    "exchange",
];

/// Decodes `text` into rows.
///
/// Header-only and empty input decode to an empty vector.
pub fn decode(text: &str, header: Header<'_>) -> Vec<Row> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.trim().as_bytes());

    let mut records = reader.records();
    let source_header = match records.next() {
        Some(Ok(record)) => record,
        Some(Err(e)) => {
            debug!("unreadable header line: {e}");
            return Vec::new();
        }
        None => return Vec::new(),
    };

    let names: Vec<String> = match header {
        Header::FromSource => source_header.iter().map(clean).collect(),
        Header::Fixed(names) => names.iter().map(|n| n.to_string()).collect(),
    };

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in records {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!("skipping unreadable line: {e}");
                dropped += 1;
                continue;
            }
        };
        if record.len() != names.len() {
            dropped += 1;
            continue;
        }
        rows.push(
            names
                .iter()
                .cloned()
                .zip(record.iter().map(clean))
                .collect(),
        );
    }

    if dropped > 0 {
        debug!(kept = rows.len(), dropped, "dropped rows with a mismatched field count");
    }
    rows
}

/// Splits the text into its header line and the remaining body.
///
/// Used where the caller wants the CSV untouched (bulk quotes); only a
/// trailing `\r` is removed from the header line.
pub fn split_header(text: &str) -> (String, String) {
    let text = text.trim();
    let (first, rest) = text.split_once('\n').unwrap_or((text, ""));
    (first.trim_end_matches('\r').to_string(), rest.to_string())
}

fn clean(field: &str) -> String {
    field.trim().trim_end_matches('\r').to_string()
}
