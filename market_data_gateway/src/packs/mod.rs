//! Indicator packs.
//!
//! A pack fetches several indicators for one symbol and interval, then
//! flattens them into a single list of [`IndicatorObservation`]s. Indicator
//! values are computed upstream; this module only selects parameters,
//! fans out, caps and reshapes.

pub mod presets;

use futures::future::try_join_all;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    errors::Result,
    models::{
        interval::Interval,
        payload::RawPayload,
        query::Query,
        records::{IndicatorObservation, PackMetadata, PackReport},
    },
    normalize::series::find_container,
    providers::DataSource,
};
use presets::{Components, IndicatorSpec, Pack, Preset, indicators};

/// Most timestamps kept per indicator, counted before component expansion.
///
/// Keeps pack answers small.
pub const PACK_TIMESTAMP_CAP: usize = 20;

const ANALYSIS_MARKER: &str = "Technical Analysis";

/// Runs every indicator of `pack` concurrently and merges the results in
/// table order.
///
/// `preset` is echoed back as given, even when it fell back to `standard`.
pub async fn run_pack<S>(
    source: &S,
    pack: Pack,
    symbol: &str,
    interval: &str,
    preset: &str,
) -> Result<PackReport>
where
    S: DataSource + ?Sized,
{
    let specs = indicators(pack, Preset::resolve(preset));
    debug!(?pack, preset, calls = specs.len(), "fanning out indicator pack");

    let calls = specs.iter().map(|spec| {
        let query = spec
            .params
            .iter()
            .fold(
                Query::new().with("symbol", symbol).with("interval", interval),
                |q, (name, value)| q.with(name, value),
            );
        source.call(spec.operation, query)
    });
    let payloads = try_join_all(calls).await?;

    let mut items = Vec::new();
    for (spec, payload) in specs.iter().zip(payloads) {
        items.extend(observations(spec, payload, interval));
    }

    Ok(PackReport {
        metadata: PackMetadata {
            symbol: symbol.to_string(),
            interval: interval.to_string(),
            preset: preset.to_string(),
        },
        items,
    })
}

/// Flattens one indicator answer into observations.
///
/// Entries are read from `items` when present, otherwise from the first
/// `Technical Analysis` block. At most [`PACK_TIMESTAMP_CAP`] timestamps are
/// kept, in the order the upstream sent them.
pub fn observations(
    spec: &IndicatorSpec,
    payload: RawPayload,
    interval: &str,
) -> Vec<IndicatorObservation> {
    let Value::Object(document) = payload.into_value() else {
        debug!(operation = %spec.operation, "indicator answer is not an object");
        return Vec::new();
    };
    let Some(entries) = indicator_entries(&document) else {
        debug!(operation = %spec.operation, "no indicator entries in answer");
        return Vec::new();
    };

    let indicator = spec.operation.function_name().to_lowercase();
    let mut out = Vec::new();
    for (timestamp, fields) in entries.iter().take(PACK_TIMESTAMP_CAP) {
        let Some(fields) = fields.as_object() else {
            continue;
        };
        let timestamp = normalize_timestamp(timestamp, interval);
        for (field, value) in fields {
            let component = match spec.components {
                Components::Single => "value".to_string(),
                Components::Multi => field.to_lowercase(),
            };
            out.push(IndicatorObservation {
                timestamp: timestamp.clone(),
                indicator: indicator.clone(),
                component,
                value: value.clone(),
            });
        }
    }
    out
}

fn indicator_entries(document: &Map<String, Value>) -> Option<&Map<String, Value>> {
    if let Some(items) = document.get("items") {
        return items.as_object();
    }
    find_container(document, &[ANALYSIS_MARKER]).and_then(|(_, block)| block.as_object())
}

/// Brings a timestamp to `YYYY-MM-DD HH:MM:SS`.
///
/// For daily, weekly and monthly intervals only a bare date is extended.
/// For any other interval a `HH:MM` time gains seconds, a full timestamp is
/// kept and anything else is treated as a bare date.
pub fn normalize_timestamp(timestamp: &str, interval: &str) -> String {
    if Interval::is_date_only_tag(interval) {
        if timestamp.len() == 10 {
            format!("{timestamp} 00:00:00")
        } else {
            timestamp.to_string()
        }
    } else {
        match timestamp.len() {
            16 => format!("{timestamp}:00"),
            19 => timestamp.to_string(),
            _ => format!("{timestamp} 00:00:00"),
        }
    }
}
