//! Date-keyed series reshaping.
//!
//! Series endpoints return `{"Meta Data": {...}, "<something> Time Series
//! <something>": {"<date>": {<bar>}, ...}}`. The series block's exact name
//! varies by endpoint and interval, so it is located by substring.

use serde_json::{Map, Value};
use tracing::debug;

use super::keys::{KeyMap, to_string_value};

/// Substring every series container key carries.
pub const SERIES_MARKER: &str = "Time Series";

/// How one family of series endpoints is renamed.
#[derive(Debug, Clone, Copy)]
pub struct SeriesShape {
    pub metadata: KeyMap,
    pub bar: KeyMap,
    /// Render every bar value as a JSON string.
    pub stringify_values: bool,
}

/// First top-level key (in document order) containing every needle.
pub fn find_container<'a>(
    document: &'a Map<String, Value>,
    needles: &[&str],
) -> Option<(&'a str, &'a Value)> {
    document
        .iter()
        .find(|(key, _)| needles.iter().all(|n| key.contains(n)))
        .map(|(key, value)| (key.as_str(), value))
}

/// Turns a date-keyed object into records sorted ascending by date.
///
/// Each record starts with a `date` field followed by the renamed bar
/// fields. Entries that are not objects are skipped.
pub fn date_keyed_items(
    container: &Map<String, Value>,
    bar: &KeyMap,
    stringify_values: bool,
) -> Vec<Value> {
    let mut rows: Vec<(&String, &Map<String, Value>)> = container
        .iter()
        .filter_map(|(date, bar)| bar.as_object().map(|b| (date, b)))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    rows.into_iter()
        .map(|(date, fields)| {
            let mut item = Map::new();
            item.insert("date".to_string(), Value::String(date.clone()));
            let renamed = if stringify_values {
                bar.apply_with(fields, to_string_value)
            } else {
                bar.apply(fields)
            };
            item.extend(renamed);
            Value::Object(item)
        })
        .collect()
}

/// Renames a whole series document into `{metadata?, items?}`.
///
/// `metadata` is present when the document has a `"Meta Data"` object and
/// `items` when a series container is found; a document with neither yields
/// an empty object.
pub fn normalize_series(document: &Map<String, Value>, shape: &SeriesShape) -> Map<String, Value> {
    let mut out = Map::new();

    if let Some(meta) = document.get("Meta Data").and_then(Value::as_object) {
        out.insert("metadata".to_string(), Value::Object(shape.metadata.apply(meta)));
    }

    match find_container(document, &[SERIES_MARKER]) {
        Some((key, Value::Object(container))) => {
            let items = date_keyed_items(container, &shape.bar, shape.stringify_values);
            debug!(container = key, items = items.len(), "reshaped series");
            out.insert("items".to_string(), Value::Array(items));
        }
        Some((key, _)) => debug!(container = key, "series container is not an object"),
        None => debug!("no series container in payload"),
    }

    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::normalize::keys::{CRYPTO_BAR, CRYPTO_SERIES_METADATA, FX_BAR, FX_SERIES_METADATA};

    fn obj(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn container_is_first_match_in_document_order() {
        let doc = obj(json!({
            "Meta Data": {},
            "Time Series FX (Daily)": {"a": 1},
            "Time Series (Digital Currency Daily)": {"b": 2}
        }));
        let (key, _) = find_container(&doc, &["Time Series"]).unwrap();
        assert_eq!(key, "Time Series FX (Daily)");

        let (key, _) = find_container(&doc, &["Time Series", "Digital Currency"]).unwrap();
        assert_eq!(key, "Time Series (Digital Currency Daily)");

        assert!(find_container(&doc, &["Technical Analysis"]).is_none());
    }

    #[test]
    fn items_are_sorted_and_dated() {
        let container = obj(json!({
            "2024-01-03": {"1. open": "3", "4. close": "3.5"},
            "2024-01-01": {"1. open": "1", "4. close": "1.5"},
            "2024-01-02": "not a bar"
        }));
        let items = date_keyed_items(&container, &FX_BAR, false);
        assert_eq!(
            Value::Array(items),
            json!([
                {"date": "2024-01-01", "open": "1", "close": "1.5"},
                {"date": "2024-01-03", "open": "3", "close": "3.5"}
            ])
        );
    }

    #[test]
    fn fx_document_is_renamed() {
        let doc = obj(json!({
            "Meta Data": {
                "1. Information": "Forex Daily Prices",
                "2. From Symbol": "EUR",
                "3. To Symbol": "USD",
                "9. Unexpected": "dropped"
            },
            "Time Series FX (Daily)": {
                "2024-05-02": {"1. open": "1.07", "2. high": "1.08", "3. low": "1.06", "4. close": "1.07"}
            }
        }));
        let shape = SeriesShape {
            metadata: FX_SERIES_METADATA,
            bar: FX_BAR,
            stringify_values: false,
        };
        assert_eq!(
            Value::Object(normalize_series(&doc, &shape)),
            json!({
                "metadata": {"information": "Forex Daily Prices", "from_symbol": "EUR", "to_symbol": "USD"},
                "items": [{"date": "2024-05-02", "open": "1.07", "high": "1.08", "low": "1.06", "close": "1.07"}]
            })
        );
    }

    #[test]
    fn crypto_values_become_strings() {
        let doc = obj(json!({
            "Time Series (Digital Currency Monthly)": {
                "2024-04-30": {"1. open": 60000.5, "5. volume": 12}
            }
        }));
        let shape = SeriesShape {
            metadata: CRYPTO_SERIES_METADATA,
            bar: CRYPTO_BAR,
            stringify_values: true,
        };
        let out = normalize_series(&doc, &shape);
        assert!(out.get("metadata").is_none());
        assert_eq!(
            out["items"],
            json!([{"date": "2024-04-30", "open": "60000.5", "volume": "12"}])
        );
    }

    #[test]
    fn document_without_containers_is_empty() {
        let doc = obj(json!({"Information": "premium endpoint"}));
        let shape = SeriesShape {
            metadata: FX_SERIES_METADATA,
            bar: FX_BAR,
            stringify_values: false,
        };
        assert!(normalize_series(&doc, &shape).is_empty());
    }
}
