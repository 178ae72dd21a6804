//! Typed GraphQL client core and the company query built on it.
//!
//! # Overview
//! `GraphQlClient` builds `HttpRequest` values and parses `HttpResponse`
//! values into `GraphQlResponse<T>` for any serde result shape. Actual I/O
//! goes through a `Transport` (reqwest by default) or is done by the host,
//! for example through the C FFI crate.
//!
//! # Design
//! - `GraphQlClient` holds only read-only configuration: endpoint and
//!   static headers.
//! - Errors keep transport, HTTP status and decode failures apart, and none
//!   of them are retried.
//! - `CompanyService` is the single caller: it runs `COMPANY_QUERY` and
//!   yields `CompanyInfo` or an error, never a partially filled result.

pub mod client;
pub mod company;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::GraphQlClient;
pub use company::{
    company_request, extract_company, render_outcome, CompanyInfo, CompanyService, FetchOutcome,
    FetchState, COMPANY_QUERY,
};
pub use config::ClientConfig;
pub use error::{ClientError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Company, CompanyData, GraphQlError, GraphQlRequest, GraphQlResponse};
