//! GraphQL envelopes and the company query's result shape.
//!
//! # Design
//! `GraphQlRequest` is the wire envelope sent to the endpoint.
//! `GraphQlResponse<T>` is generic over the caller's result shape, so a new
//! query only needs a new `T`, not a new client. Required-field enforcement
//! is left to serde: a missing non-optional field fails deserialization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A GraphQL operation as sent over the wire.
///
/// `variables` and `operation_name` are left out of the JSON body when unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl GraphQlRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    /// Add a single variable, creating the map on first use.
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}

/// Response envelope. `data` is `None` when the server sent `null` or left it
/// out, which is how GraphQL reports a failed operation alongside `errors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<GraphQlError>>,
}

impl<T> GraphQlResponse<T> {
    /// Messages from the `errors` array, empty when there were none.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .flatten()
            .map(|e| e.message.clone())
            .collect()
    }
}

/// One entry of the GraphQL `errors` array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

/// `data` payload of the company query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyData {
    #[serde(default)]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub ceo: String,
    pub summary: String,
    pub employees: u32,
}
