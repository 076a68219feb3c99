//! One async function per tool.
//!
//! Every handler takes a [`DataSource`] and a typed parameter struct, and
//! returns the tool's JSON answer. Parameter structs derive `Deserialize`
//! so the dispatch table can decode them straight from the caller's JSON.

pub mod crypto;
pub mod economics;
pub mod forex;
pub mod fundamentals;
pub mod indicators;
pub mod intelligence;
pub mod market;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    errors::{Error, Result},
    models::{operation::Operation, query::Query},
    providers::DataSource,
};

/// Parameters of tools that only need a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SymbolParams {
    pub symbol: String,
}

/// Calls `operation` and returns whatever came back.
pub(crate) async fn passthrough<S>(source: &S, operation: Operation, query: Query) -> Result<Value>
where
    S: DataSource + ?Sized,
{
    Ok(source.call(operation, query).await?.into_value())
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(Error::Encode)
}

pub(crate) fn default_daily() -> String {
    "daily".to_string()
}
