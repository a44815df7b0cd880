//! CLI application entry point.
//!
//! Loads configuration from the environment (with `.env` support), opens
//! the shared store, and runs the ingestion supervisor and HTTP search
//! API side by side until a shutdown signal arrives.

use crate::commands::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use msgvault_api::{ApiConfig, ApiServer, ApiState};
use msgvault_core::{AccountRegistry, AppConfig};
use msgvault_ingest::{IngestionSupervisor, ListenerOptions};
use msgvault_store::Repository;
use msgvault_telegram::TelegramTransport;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Parse arguments and run the selected command.
pub fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let runtime = tokio::runtime::Runtime::new()?;
    match cli.command() {
        Commands::Run => runtime.block_on(run_pipeline()),
        Commands::CheckConfig => check_config(),
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` wins over `-v` flags.
fn setup_logging(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Validate the environment and print the resulting account set.
fn check_config() -> Result<()> {
    let config = AppConfig::from_env()?;
    let registry = AccountRegistry::from_env()?;

    println!("database_url: {}", config.database_url);
    println!("http_port: {}", config.http_port);
    println!("sync_history_on_start: {}", config.sync_history_on_start);
    println!("history_per_chat: {}", config.history_per_chat);
    println!("accounts:");
    for account in registry.accounts() {
        println!(
            "  {} (api_id {}, phone {}, session: {})",
            account.label,
            account.api_id,
            account.phone,
            if account.has_session() { "yes" } else { "no" }
        );
    }
    Ok(())
}

/// Run ingestion and the search API until Ctrl+C or SIGTERM.
async fn run_pipeline() -> Result<()> {
    let config = AppConfig::from_env()?;
    let registry = AccountRegistry::from_env()?;
    let account_count = registry.len();
    info!(accounts = account_count, "starting msgvault");

    let pool = msgvault_store::connect(&config.database_url, config.db_pool_size).await?;
    let repo = Arc::new(Repository::new(Arc::new(pool)));

    let shutdown = CancellationToken::new();

    let supervisor = IngestionSupervisor::new(
        Arc::new(TelegramTransport::new()),
        Arc::clone(&repo),
        ListenerOptions {
            sync_history_on_start: config.sync_history_on_start,
            history_per_chat: config.history_per_chat,
            print_session_string: config.print_session_string,
        },
    );
    let ingest_token = shutdown.clone();
    let ingest_task = tokio::spawn(async move {
        supervisor.run(registry.into_accounts(), ingest_token).await;
    });

    let server = ApiServer::new(
        ApiConfig::with_port(config.http_port),
        ApiState {
            repo,
            account_count,
        },
    );
    let server_token = shutdown.clone();
    let server_task =
        tokio::spawn(async move { server.run(server_token).await });

    shutdown_signal().await;
    info!("shutdown signal received");
    shutdown.cancel();

    ingest_task
        .await
        .map_err(|e| CliError::Ingest(e.to_string()))?;
    server_task
        .await
        .map_err(|e| CliError::Api(e.to_string()))?
        .map_err(|e| CliError::Api(e.to_string()))?;

    info!("msgvault stopped");
    Ok(())
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
