use crate::models::{operation::Operation, query::Query};

/// Analytics endpoints take upper-case parameter names.
const ANALYTICS_RENAMES: &[(&str, &str)] = &[
    ("symbols", "SYMBOLS"),
    ("series_range", "RANGE"),
    ("interval", "INTERVAL"),
    ("ohlc", "OHLC"),
    ("calculations", "CALCULATIONS"),
    ("window_size", "WINDOW_SIZE"),
];

/// Builds the query string for one call, without the API key.
///
/// `function` always comes first. Parameter names are passed through except
/// for the analytics endpoints, which use their own spelling. A configured
/// `entitlement` is added unless the caller already set one.
pub fn construct_params(
    operation: Operation,
    query: &Query,
    entitlement: Option<&str>,
) -> Vec<(String, String)> {
    let mut params = vec![("function".to_string(), operation.function_name().to_string())];

    let is_analytics = matches!(
        operation,
        Operation::AnalyticsFixedWindow | Operation::AnalyticsSlidingWindow
    );

    for (name, value) in query.iter() {
        let name = if is_analytics {
            ANALYTICS_RENAMES
                .iter()
                .find(|(from, _)| *from == name)
                .map_or(name, |(_, to)| *to)
        } else {
            name
        };
        params.push((name.to_string(), value.to_string()));
    }

    if let Some(entitlement) = entitlement {
        if query.get("entitlement").is_none() {
            params.push(("entitlement".to_string(), entitlement.to_string()));
        }
    }

    params
}
