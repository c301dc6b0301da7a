//! Upstream request and response envelopes.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// A fixed, named query document understood by the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name, sent as `operationName`.
    pub name: &'static str,
    /// Full query text.
    pub document: &'static str,
}

/// JSON body posted to the upstream endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
    pub variables: &'a Value,
    #[serde(rename = "operationName")]
    pub operation_name: &'a str,
}

impl<'a> QueryRequest<'a> {
    pub fn new(operation: &'a Operation, variables: &'a Value) -> Self {
        Self {
            query: operation.document,
            variables,
            operation_name: operation.name,
        }
    }
}

/// A parsed upstream response: `{data}` and/or `{errors}`.
///
/// A document with a non-empty `errors` list is still a successful
/// transport result; interpreting it is up to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

impl Document {
    /// Whether the upstream reported application-level errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Deserialize `data.<name>`.
    ///
    /// Returns `Ok(None)` when `data` or the field is absent or null.
    pub fn field<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.data.as_ref().and_then(|d| d.get(name)) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => Ok(Some(T::deserialize(value)?)),
        }
    }

    /// Consume the document, returning `data` if it is a non-null object.
    pub fn into_data(self) -> Option<Value> {
        self.data.filter(|d| !d.is_null())
    }
}
