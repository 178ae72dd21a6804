//! Stateless GraphQL request builder and response parser.
//!
//! # Design
//! `GraphQlClient` holds the endpoint and static headers and nothing else.
//! `build_request` turns a `GraphQlRequest` into an `HttpRequest` and
//! `parse_response` turns an `HttpResponse` into a typed `GraphQlResponse<T>`.
//! `execute` chains the two around a `Transport` for callers that want the
//! round-trip done for them; hosts that do their own I/O skip it.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{GraphQlRequest, GraphQlResponse};

/// Client for a single GraphQL endpoint.
///
/// Configuration is read-only after construction, so one value can be
/// cloned or shared across tasks freely.
#[derive(Debug, Clone)]
pub struct GraphQlClient {
    endpoint: String,
    headers: Vec<(String, String)>,
}

impl GraphQlClient {
    /// Requests go to the root path of `endpoint`; a trailing `/` is dropped
    /// and added back when building the URL.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            headers: Vec::new(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let client = Self::new(&config.endpoint);
        match &config.api_key {
            Some(key) => client.with_header(&config.api_key_header, key),
            None => client,
        }
    }

    /// Add a header sent with every request, e.g. an API key.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into().to_ascii_lowercase(), value.into()));
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn build_request(&self, request: &GraphQlRequest) -> Result<HttpRequest, ClientError> {
        if request.query.trim().is_empty() {
            return Err(ClientError::EmptyQuery);
        }
        let body =
            serde_json::to_string(request).map_err(|e| ClientError::Serialization(e.to_string()))?;

        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        headers.extend(self.headers.iter().cloned());

        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/", self.endpoint),
            headers,
            body: Some(body),
        })
    }

    pub fn parse_response<T>(&self, response: HttpResponse) -> Result<GraphQlResponse<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        check_status(&response)?;
        serde_json::from_slice(&response.body).map_err(|e| {
            tracing::error!(error = %e, "failed to decode GraphQL response");
            ClientError::Decode(e.to_string())
        })
    }

    /// Build, send and parse in one go. Exactly one attempt is made.
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint, operation = ?request.operation_name))]
    pub async fn execute<T, Tr>(
        &self,
        transport: &Tr,
        request: &GraphQlRequest,
    ) -> Result<GraphQlResponse<T>, ClientError>
    where
        T: DeserializeOwned,
        Tr: Transport,
    {
        let http_request = self.build_request(request)?;
        let response = transport.send(http_request).await.map_err(|e| {
            tracing::warn!(error = %e, "request failed");
            e
        })?;
        tracing::debug!(status = response.status, "received response");
        self.parse_response(response)
    }
}

/// Map non-2xx status codes to `ClientError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ClientError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ClientError::Http {
        status: response.status,
        body: String::from_utf8_lossy(&response.body).into_owned(),
    })
}
