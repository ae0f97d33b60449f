//! Bank Ledger HTTP server
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --bind 0.0.0.0:8080 --accounts accounts.csv
//! RUST_LOG=debug cargo run -- --log-format json
//! ```
//!
//! Without `--accounts` the registry holds a single demo account (1001, John).
//!
//! # Exit Codes
//!
//! - 0: Clean shutdown (Ctrl-C)
//! - 1: Error (seed file unreadable or invalid, address in use, etc.)

use bank_ledger::core::SharedRegistry;
use bank_ledger::{api, cli, io, telemetry, LedgerError};
use std::process;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let args = cli::parse_args();
    telemetry::init(args.log_format);

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "server stopped");
        process::exit(1);
    }
}

async fn run(args: cli::CliArgs) -> Result<(), LedgerError> {
    let mut registry = SharedRegistry::new();
    match &args.accounts {
        Some(path) => {
            let count = io::load_seed_file(path, &mut registry)?;
            tracing::info!(path = %path.display(), count, "registry seeded");
        }
        None => {
            io::seed_demo(&mut registry)?;
            tracing::info!("registry seeded with demo account 1001");
        }
    }

    let app = api::router(Arc::new(registry));

    let listener = TcpListener::bind(args.bind).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
