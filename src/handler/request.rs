// Inbound job request and its validation.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AdapterError;

/// Job run ID echoed when the request carries none.
pub const DEFAULT_JOB_RUN_ID: &str = "1";

/// A job request as the oracle node sends it: `{ "id": ..., "data": { "hash": ... } }`.
///
/// `id` and `data` are kept as raw JSON so that a wrongly-typed field is
/// reported by validation with the node's expected message, and the real
/// job run ID is still echoed. Any JSON value decodes; a value that is not an
/// object carries no fields. JSON `null` counts as missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct AdapterRequest {
    /// Opaque job run ID, echoed back unchanged.
    pub id: Option<Value>,
    pub data: Option<Value>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    pub job_run_id: Value,
    pub hash: String,
}

impl From<Value> for AdapterRequest {
    fn from(value: Value) -> Self {
        let field = |name: &str| value.get(name).filter(|v| !v.is_null()).cloned();
        Self {
            id: field("id"),
            data: field("data"),
        }
    }
}

impl AdapterRequest {
    pub fn new(id: impl Into<Value>, hash: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            data: Some(json!({ "hash": hash.into() })),
        }
    }

    /// The job run ID to echo in the response envelope.
    pub fn job_run_id(&self) -> Value {
        self.id
            .clone()
            .unwrap_or_else(|| Value::from(DEFAULT_JOB_RUN_ID))
    }

    /// Check the request in order: data, then job run ID, then content hash.
    /// The first missing piece decides the error.
    ///
    /// Empty `data` (`false`, `0`, `""`) counts as no data. A `data` that is
    /// not an object has no hash. Numeric hashes are taken in decimal form.
    pub fn validate(self) -> Result<ValidatedRequest, AdapterError> {
        let data = self.data.filter(is_present).ok_or(AdapterError::NoData)?;
        let job_run_id = self.id.ok_or(AdapterError::MissingJobRunId)?;
        let hash = content_hash(&data).ok_or(AdapterError::MissingContentHash)?;
        Ok(ValidatedRequest { job_run_id, hash })
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn content_hash(data: &Value) -> Option<String> {
    match data.get("hash")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
