#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use market_data_gateway::{
    models::{operation::Operation, payload::RawPayload, query::Query},
    providers::{ApiSnafu, DataSource, ProviderError},
};

/// Scripted data source: one canned payload per operation, every call recorded.
///
/// Operations without a script fail with an API error, so a test notices
/// calls it did not expect.
#[derive(Default)]
pub struct MockSource {
    scripts: HashMap<Operation, RawPayload>,
    calls: Mutex<Vec<(Operation, Query)>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, operation: Operation, payload: impl Into<RawPayload>) -> Self {
        self.scripts.insert(operation, payload.into());
        self
    }

    pub fn calls(&self) -> Vec<(Operation, Query)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn operations(&self) -> Vec<Operation> {
        self.calls().into_iter().map(|(op, _)| op).collect()
    }

    /// Query of the only call made for `operation`.
    pub fn query_for(&self, operation: Operation) -> Query {
        let matching: Vec<Query> = self
            .calls()
            .into_iter()
            .filter(|(op, _)| *op == operation)
            .map(|(_, q)| q)
            .collect();
        assert_eq!(matching.len(), 1, "expected one call to {operation}");
        matching.into_iter().next().unwrap()
    }
}

#[async_trait]
impl DataSource for MockSource {
    async fn call(&self, operation: Operation, query: Query) -> Result<RawPayload, ProviderError> {
        self.calls.lock().unwrap().push((operation, query));
        match self.scripts.get(&operation) {
            Some(payload) => Ok(payload.clone()),
            None => ApiSnafu {
                operation,
                message: "no scripted answer",
            }
            .fail(),
        }
    }
}
