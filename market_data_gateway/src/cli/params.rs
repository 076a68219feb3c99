use std::io::Read;
use std::{fs, io};

use serde_json::Value;
use thiserror::Error;

use super::commands::ParamSource;

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("Failed to read parameters: {0}")]
    Io(#[from] io::Error),

    #[error("Parameters are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parameters must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// Loads the tool parameter object from `source`.
pub fn read_params(source: ParamSource, input: &str) -> Result<Value, ParamsError> {
    let value = match source {
        ParamSource::Json => parse_params(input)?,
        ParamSource::File => parse_params(&fs::read_to_string(input)?)?,
        ParamSource::Stdin => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            parse_params(&buffer)?
        }
    };
    Ok(value)
}

pub fn parse_params(text: &str) -> Result<Value, ParamsError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    match serde_json::from_str(text)? {
        value @ (Value::Object(_) | Value::Null) => Ok(value),
        Value::Array(_) => Err(ParamsError::NotAnObject("an array")),
        Value::String(_) => Err(ParamsError::NotAnObject("a string")),
        Value::Number(_) => Err(ParamsError::NotAnObject("a number")),
        Value::Bool(_) => Err(ParamsError::NotAnObject("a boolean")),
    }
}
