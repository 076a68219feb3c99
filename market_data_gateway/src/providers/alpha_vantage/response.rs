use serde_json::Value;

use crate::{
    models::{operation::Operation, payload::RawPayload},
    providers::{ApiSnafu, ProviderError},
};

/// Top-level keys the upstream uses for error and throttling notices.
const NOTICE_KEYS: &[&str] = &["Error Message", "Note", "Information"];

/// Turns a successful HTTP body into a payload.
///
/// JSON bodies become [`RawPayload::Json`]; anything else (CSV endpoints) is
/// kept as text. A JSON object whose only key is an upstream notice is an
/// error even though the HTTP status was 200.
pub fn interpret_body(operation: Operation, body: String) -> Result<RawPayload, ProviderError> {
    let trimmed = body.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Ok(RawPayload::Text(body));
    }

    let value: Value = match serde_json::from_str(trimmed) {
        Ok(v) => v,
        Err(_) => return Ok(RawPayload::Text(body)),
    };

    if let Some(message) = notice_message(&value) {
        return ApiSnafu { operation, message }.fail();
    }

    Ok(RawPayload::Json(value))
}

fn notice_message(value: &Value) -> Option<String> {
    let obj = value.as_object()?;
    if obj.len() != 1 {
        return None;
    }
    let (key, message) = obj.iter().next()?;
    if !NOTICE_KEYS.contains(&key.as_str()) {
        return None;
    }
    Some(match message {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn csv_body_is_text() {
        let body = "symbol,name\r\nIBM,International Business Machines\r\n".to_string();
        let payload = interpret_body(Operation::ListingStatus, body.clone()).unwrap();
        assert_eq!(payload, RawPayload::Text(body));
    }

    #[test]
    fn json_body_is_parsed() {
        let payload = interpret_body(
            Operation::GlobalQuote,
            r#"{"Global Quote": {"01. symbol": "IBM"}}"#.to_string(),
        )
        .unwrap();
        assert_eq!(payload, RawPayload::Json(json!({"Global Quote": {"01. symbol": "IBM"}})));
    }

    #[test]
    fn notices_are_errors() {
        let err = interpret_body(
            Operation::Sma,
            r#"{"Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."}"#
                .to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, ProviderError::Api { operation: Operation::Sma, .. }));
        assert!(err.to_string().contains("rate limit"));

        let err = interpret_body(
            Operation::GlobalQuote,
            r#"{"Error Message": "Invalid API call."}"#.to_string(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Invalid API call."));
    }

    #[test]
    fn information_alongside_data_is_not_an_error() {
        let payload = interpret_body(
            Operation::TopGainersLosers,
            r#"{"Information": "demo", "top_gainers": []}"#.to_string(),
        )
        .unwrap();
        assert!(matches!(payload, RawPayload::Json(_)));
    }
}
