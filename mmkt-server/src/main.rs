//! Money-market deal store API server
//!
//! Serves the deal entities read-only over HTTP, each with its bag
//! relationships loaded in one batch query per request.
//!
//! Usage:
//!   mmkt-server --database deals.db --port 8080

use anyhow::{Context, Result};
use clap::Parser;
use mmkt_loader::{LoaderConfig, MismatchPolicy};
use mmkt_server::{AppState, build_router};
use mmkt_storage::{SqliteStore, StoreConfig};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mmkt-server")]
#[command(about = "Read-only REST API for the money-market deal store")]
struct Args {
    /// SQLite database file, created and migrated when missing
    #[arg(short, long)]
    database: PathBuf,

    /// HTTP port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Largest accepted page size
    #[arg(long, default_value = "2000")]
    max_page_size: u32,

    /// Fail loads whose bag query returns rows for roots it was not asked for
    #[arg(long)]
    strict_reconcile: bool,

    /// Milliseconds to wait on a locked database
    #[arg(long, default_value = "5000")]
    busy_timeout_ms: u64,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn loader_config(&self) -> LoaderConfig {
        LoaderConfig {
            max_page_size: self.max_page_size,
            mismatch_policy: if self.strict_reconcile {
                MismatchPolicy::Fail
            } else {
                MismatchPolicy::Drop
            },
        }
    }

    fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: Some(self.database.clone()),
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    info!("mmkt-server starting...");
    let store = SqliteStore::open(&args.store_config()).context("Failed to open deal store")?;
    let state = AppState::new(store, args.loader_config());
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port))
        .await
        .with_context(|| format!("Failed to bind HTTP port {}", args.port))?;
    info!(port = args.port, database = %args.database.display(), "HTTP API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("mmkt-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            warn!("Cannot listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_is_required() {
        assert!(Args::try_parse_from(["mmkt-server"]).is_err());
        assert!(Args::try_parse_from(["mmkt-server", "--port", "9090"]).is_err());
    }

    #[test]
    fn database_path_reaches_store_config() {
        let args = Args::try_parse_from(["mmkt-server", "--database", "deals.db"]).unwrap();
        let config = args.store_config();
        assert_eq!(config.path, Some(PathBuf::from("deals.db")));
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(args.loader_config().mismatch_policy, MismatchPolicy::Drop);
    }

    #[test]
    fn strict_reconcile_fails_on_mismatch() {
        let args =
            Args::try_parse_from(["mmkt-server", "-d", "deals.db", "--strict-reconcile"]).unwrap();
        assert_eq!(args.loader_config().mismatch_policy, MismatchPolicy::Fail);
    }
}
