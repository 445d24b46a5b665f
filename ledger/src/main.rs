// Budget ledger server entry point
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ledger::config::LedgerSettings;
use ledger::data::build_store;
use ledger::services::budget_service::MyBudgetLedger;
use ledger::services::BudgetLedgerServer;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ledger", about = "Budget ledger gRPC server backed by a spreadsheet")]
struct Args {
    /// JSON settings file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured listen host.
    #[arg(long)]
    host: Option<String>,

    /// Overrides the configured listen port.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    info!("Starting budget ledger...");

    let mut settings = LedgerSettings::load(args.config.as_deref()).context("loading settings")?;
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", settings.host, settings.port))?;
    info!(environment = ?settings.environment, "Ledger will listen on {}", addr);

    let store = build_store(&settings.store).context("initializing sheet store")?;
    let service = MyBudgetLedger::new(store, settings.environment.exposes_error_details());

    Server::builder()
        .add_service(BudgetLedgerServer::new(service))
        .serve(addr)
        .await?;

    Ok(())
}
