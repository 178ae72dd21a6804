//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain owned data. `GraphQlClient` builds an
//! `HttpRequest` and parses an `HttpResponse`; something else moves the bytes.
//! That is either a `Transport` implementation or a host calling through the
//! C FFI, which is why nothing here borrows.

/// HTTP method for a request. GraphQL over HTTP only needs these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are still responses; interpreting them is the client's job.
/// The body is kept as raw bytes so invalid UTF-8 reaches the decoder intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
