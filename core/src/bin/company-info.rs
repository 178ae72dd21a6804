use std::process::ExitCode;

use company_core::{render_outcome, ClientConfig, CompanyService, GraphQlClient, ReqwestTransport};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(endpoint = %config.endpoint, "fetching company info");

    let service = CompanyService::new(GraphQlClient::from_config(&config), ReqwestTransport::shared());
    let outcome = service.fetch_company_info().await;
    println!("{}", render_outcome(&outcome));

    if outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
