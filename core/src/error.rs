//! Error types for the GraphQL client.
//!
//! # Design
//! Transport, HTTP status and decode failures are kept apart so callers can
//! tell "the server was unreachable" from "the server answered 500" from
//! "the server answered something we cannot read". `MissingData` covers the
//! GraphQL case of a 200 whose `data` lacks the field that was asked for.

use thiserror::Error;

/// Errors returned by `GraphQlClient` and `CompanyService`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server returned a non-2xx status.
    #[error("HTTP {status}{}", format_body(.body))]
    Http { status: u16, body: String },

    /// The body is not JSON or does not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// The request envelope could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("query must not be empty")]
    EmptyQuery,

    /// The response decoded but the expected field was null or absent.
    #[error("missing {path} in response{}", format_server_errors(.errors))]
    MissingData { path: String, errors: Vec<String> },
}

impl ClientError {
    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_body(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(": {body}")
    }
}

fn format_server_errors(errors: &[String]) -> String {
    if errors.is_empty() {
        String::new()
    } else {
        format!(": {}", errors.join("; "))
    }
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("endpoint must not be empty")]
    EmptyEndpoint,

    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}
