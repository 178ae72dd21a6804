use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub ceo: String,
    pub summary: String,
    pub employees: u32,
}

impl Default for Company {
    fn default() -> Self {
        Self {
            ceo: "Jane Doe".to_string(),
            summary: "A tech company.".to_string(),
            employees: 500,
        }
    }
}

/// How the endpoint answers a well-formed, authorized request.
#[derive(Clone, Debug)]
pub enum Scenario {
    /// `{"data":{"company":…}}` when the query selects `company`.
    Healthy(Company),
    /// 500 with an empty body.
    ServerError,
    /// 200 `{"data":null}`.
    NullData,
    /// 200 with a body that is not JSON.
    Malformed,
}

#[derive(Clone, Debug)]
pub struct MockConfig {
    pub scenario: Scenario,
    /// Header name and expected value; requests without it get 401.
    pub api_key: Option<(String, String)>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::Healthy(Company::default()),
            api_key: None,
        }
    }
}

impl MockConfig {
    pub fn with_scenario(scenario: Scenario) -> Self {
        Self {
            scenario,
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, header: &str, key: &str) -> Self {
        self.api_key = Some((header.to_ascii_lowercase(), key.to_string()));
        self
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Option<Value>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

pub fn app() -> Router {
    app_with(MockConfig::default())
}

pub fn app_with(config: MockConfig) -> Router {
    Router::new()
        .route("/", post(graphql))
        .with_state(Arc::new(config))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockConfig::default()).await
}

pub async fn run_with(listener: TcpListener, config: MockConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(config)).await
}

fn error_envelope(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "errors": [{ "message": message }] }))).into_response()
}

async fn graphql(
    State(config): State<Arc<MockConfig>>,
    headers: HeaderMap,
    Json(request): Json<GraphQlRequest>,
) -> Response {
    tracing::debug!(operation = ?request.operation_name, "graphql request");

    if let Some((name, expected)) = &config.api_key {
        let given = headers.get(name.as_str()).and_then(|v| v.to_str().ok());
        if given != Some(expected.as_str()) {
            return error_envelope(StatusCode::UNAUTHORIZED, "missing or invalid API key");
        }
    }

    if request.query.trim().is_empty() {
        return error_envelope(StatusCode::BAD_REQUEST, "query must not be empty");
    }

    match &config.scenario {
        Scenario::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        Scenario::NullData => Json(json!({ "data": null })).into_response(),
        Scenario::Malformed => (
            [(header::CONTENT_TYPE, "text/html")],
            "<html>upstream unavailable</html>",
        )
            .into_response(),
        Scenario::Healthy(company) if request.query.contains("company") => {
            Json(json!({ "data": { "company": company } })).into_response()
        }
        Scenario::Healthy(_) => Json(json!({
            "data": null,
            "errors": [{ "message": "query does not select `company`" }]
        }))
        .into_response(),
    }
}
