//! Named request parameters handed to a data source.

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Ordered set of named string parameters for one upstream call.
///
/// Lists are joined with commas and booleans render as `true`/`false`, the
/// way the upstream query string expects them. Insertion order is kept so
/// recorded calls compare deterministically in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: IndexMap<String, String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a parameter.
    pub fn with(mut self, name: &str, value: impl ToString) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }

    /// Adds a parameter only when a value is present.
    pub fn with_opt<T: ToString>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }

    /// Adds a comma-joined list parameter.
    pub fn with_list(self, name: &str, values: &[String]) -> Self {
        self.with(name, values.join(","))
    }

    /// Adds a comma-joined list parameter when the list is present and non-empty.
    pub fn with_opt_list(self, name: &str, values: Option<&[String]>) -> Self {
        match values {
            Some(v) if !v.is_empty() => self.with_list(name, v),
            _ => self,
        }
    }

    /// Forwards caller-supplied extra parameters.
    ///
    /// Strings pass through, numbers and booleans are rendered, arrays are
    /// comma-joined and `null` is skipped. Keys already set on the query win
    /// over extras.
    pub fn with_extra(mut self, extra: &Map<String, Value>) -> Self {
        for (name, value) in extra {
            if self.params.contains_key(name) {
                continue;
            }
            if let Some(rendered) = render_value(value) {
                self.params.insert(name.clone(), rendered);
            }
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(render_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
