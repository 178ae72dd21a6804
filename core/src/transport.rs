//! Executing `HttpRequest`s over the network.
//!
//! # Design
//! `Transport` is the seam between the pure client core and real I/O. The
//! default implementation uses one process-wide `reqwest::Client`, built on
//! first use and shared by every `ReqwestTransport` handle after that.
//! Non-2xx responses come back as `Ok`; only failures below HTTP are errors.

use std::future::Future;
use std::sync::OnceLock;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Sends one `HttpRequest` and returns its response.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, ClientError>> + Send;
}

static SHARED_CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

/// `Transport` backed by `reqwest`, using its default timeouts.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Handle to the lazily constructed process-wide client.
    pub fn shared() -> Self {
        let client = SHARED_CLIENT.get_or_init(|| {
            tracing::debug!("creating shared HTTP client");
            reqwest::Client::new()
        });
        Self {
            client: client.clone(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::shared()
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
