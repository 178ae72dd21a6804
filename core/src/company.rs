//! The company query: build it, run it, and turn the answer into labels.
//!
//! # Design
//! `CompanyService` is pure orchestration over `GraphQlClient`. A fetch
//! either yields a fully populated `CompanyInfo` or a `ClientError`; a
//! response without `data.company` is an error, never a half-filled success.
//! `FetchState` tracks one invocation for a UI that wants to show progress.

use std::fmt;

use tokio::sync::oneshot;

use crate::client::GraphQlClient;
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Company, CompanyData, GraphQlRequest, GraphQlResponse};

pub const COMPANY_OPERATION: &str = "ExampleQuery";

pub const COMPANY_QUERY: &str = "query ExampleQuery {
  company {
    ceo
    summary
    employees
  }
}";

/// Display-ready company fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyInfo {
    pub ceo: String,
    pub summary: String,
    pub employees: u32,
}

impl CompanyInfo {
    pub fn labels(&self) -> [String; 3] {
        [
            format!("CEO: {}", self.ceo),
            format!("Summary: {}", self.summary),
            format!("Employees: {}", self.employees),
        ]
    }
}

impl From<Company> for CompanyInfo {
    fn from(company: Company) -> Self {
        Self {
            ceo: company.ceo,
            summary: company.summary,
            employees: company.employees,
        }
    }
}

pub type FetchOutcome = Result<CompanyInfo, ClientError>;

/// Text to show in place of the labels: the three labels on success,
/// `Error: <message>` on failure.
pub fn render_outcome(outcome: &FetchOutcome) -> String {
    match outcome {
        Ok(info) => info.labels().join("\n"),
        Err(e) => format!("Error: {e}"),
    }
}

pub fn company_request() -> GraphQlRequest {
    GraphQlRequest::new(COMPANY_QUERY).with_operation_name(COMPANY_OPERATION)
}

/// Pull `data.company` out of a decoded response.
pub fn extract_company(response: GraphQlResponse<CompanyData>) -> FetchOutcome {
    let errors = response.error_messages();
    let Some(data) = response.data else {
        return Err(ClientError::MissingData {
            path: "data".to_string(),
            errors,
        });
    };
    data.company
        .map(CompanyInfo::from)
        .ok_or(ClientError::MissingData {
            path: "data.company".to_string(),
            errors,
        })
}

/// Runs the company query against one endpoint.
#[derive(Debug, Clone)]
pub struct CompanyService<Tr> {
    client: GraphQlClient,
    transport: Tr,
}

impl<Tr: Transport> CompanyService<Tr> {
    pub fn new(client: GraphQlClient, transport: Tr) -> Self {
        Self { client, transport }
    }

    /// Host-does-IO half one: the request to execute.
    pub fn build_request(&self) -> Result<HttpRequest, ClientError> {
        self.client.build_request(&company_request())
    }

    /// Host-does-IO half two: interpret the response.
    pub fn parse_response(&self, response: HttpResponse) -> FetchOutcome {
        let decoded = self.client.parse_response::<CompanyData>(response)?;
        extract_company(decoded)
    }

    pub async fn fetch_company_info(&self) -> FetchOutcome {
        let response = self
            .client
            .execute::<CompanyData, _>(&self.transport, &company_request())
            .await?;
        let outcome = extract_company(response);
        match &outcome {
            Ok(info) => tracing::info!(ceo = %info.ceo, employees = info.employees, "fetched company"),
            Err(e) => tracing::warn!(error = %e, "company missing from response"),
        }
        outcome
    }
}

impl<Tr> CompanyService<Tr>
where
    Tr: Transport + Clone + 'static,
{
    /// Start a fetch on the current tokio runtime and return immediately.
    /// The receiver yields exactly one outcome.
    pub fn spawn_fetch(&self) -> oneshot::Receiver<FetchOutcome> {
        let (tx, rx) = oneshot::channel();
        let service = self.clone();
        tokio::spawn(async move {
            let outcome = service.fetch_company_info().await;
            // The receiver may have been dropped; nobody is left to tell.
            let _ = tx.send(outcome);
        });
        rx
    }
}

/// Lifecycle of a single fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Pending,
    Succeeded(CompanyInfo),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateError {
    pub from: &'static str,
    pub action: &'static str,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot {} while {}", self.action, self.from)
    }
}

impl std::error::Error for StateError {}

impl FetchState {
    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Pending => "pending",
            FetchState::Succeeded(_) => "succeeded",
            FetchState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FetchState::Succeeded(_) | FetchState::Failed(_))
    }

    /// `Idle → Pending`.
    pub fn begin(&mut self) -> Result<(), StateError> {
        match self {
            FetchState::Idle => {
                *self = FetchState::Pending;
                Ok(())
            }
            other => Err(StateError {
                from: other.name(),
                action: "begin",
            }),
        }
    }

    /// `Pending → Succeeded | Failed`.
    pub fn complete(&mut self, outcome: FetchOutcome) -> Result<(), StateError> {
        if *self != FetchState::Pending {
            return Err(StateError {
                from: self.name(),
                action: "complete",
            });
        }
        *self = match outcome {
            Ok(info) => FetchState::Succeeded(info),
            Err(e) => FetchState::Failed(e.to_string()),
        };
        Ok(())
    }
}
