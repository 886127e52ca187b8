// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! bugtracker: REST service for tracking bugs.
//!
//! Opens the SQLite store (creating the schema if needed), wires up the
//! severity advisor, and serves the HTTP API until Ctrl-C or SIGTERM.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bt_core::Database;
use bugtracker::{router, BugService, ClaudeAdvisor, Config, Overrides};

/// bugtracker: Bug tracking REST service
#[derive(Parser, Debug)]
#[command(name = "bugtracker", version)]
#[command(about = "REST service for tracking bugs with AI-suggested severity")]
struct Args {
    /// Address to bind the server to [default: 0.0.0.0:8000]
    #[arg(short, long)]
    bind: Option<SocketAddr>,

    /// SQLite database file [default: ./bugtracker.db]
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Frontend origin allowed to make cross-origin requests
    #[arg(long)]
    allowed_origin: Option<String>,

    /// Model used for severity suggestions
    #[arg(long)]
    model: Option<String>,

    /// Seconds before a severity suggestion request is abandoned
    #[arg(long, value_name = "SECS")]
    advisor_timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    setup_logging(args.verbose);

    let config = Config::resolve(Overrides {
        bind: args.bind,
        database: args.database,
        allowed_origin: args.allowed_origin,
        model: args.model,
        advisor_timeout_secs: args.advisor_timeout,
    })?;

    info!("Starting bugtracker");
    info!("  Bind address: {}", config.bind);
    info!("  Database: {}", config.database.display());
    info!("  Allowed origin: {:?}", config.allowed_origin);

    let db = Database::open(&config.database)?;

    let advisor = ClaudeAdvisor::new(&config.advisor)?;
    if advisor.is_enabled() {
        info!("  Severity advisor: enabled ({})", config.advisor.model);
    } else {
        info!("  Severity advisor: disabled (no API key), suggestions default to Medium");
    }

    let service = BugService::new(db, Arc::new(advisor));
    let app = router(service, config.allowed_origin.clone());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("Listening on: {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("bugtracker stopped");
    Ok(())
}

fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        bugtracker::env::rust_log()
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
