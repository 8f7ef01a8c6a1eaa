//! pkgpulse - Package dependency health monitor server
//!
//! Starts the HTTP server exposing:
//! - REST analysis endpoints (/analyze/python, /analyze/npm, /check-package)
//! - The A2A JSON-RPC endpoint (/a2a)

use clap::Parser;
use pkgpulse::cli::ServerArgs;
use pkgpulse::server;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = ServerArgs::parse();

    init_tracing(&args.log);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: ServerArgs) -> anyhow::Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %args.host,
        port = args.port,
        "starting pkgpulse"
    );

    server::run_server(args).await
}

/// Initialize tracing with the configured filter, falling back to `info`
fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive)
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_default();

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
