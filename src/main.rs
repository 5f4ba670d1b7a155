//! Hungr server: recipe storage and sharing.
//!
//! Main entry point that wires the crates together and starts the server.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt};

use hungr_api::AppState;
use hungr_core::config::AppConfig;
use hungr_database::Stores;
use hungr_storage::StorageManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("HUNGR_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &env).await {
        tracing::error!(error = %format!("{e:#}"), "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_current_span(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig, env: &str) -> anyhow::Result<()> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %env,
        backend = ?config.database.backend,
        "Starting Hungr"
    );

    let stores = Stores::from_config(&config.database)
        .await
        .context("database initialization failed")?;

    let storage = StorageManager::from_config(&config.storage)
        .await
        .context("storage initialization failed")?;
    tracing::info!(root = %config.storage.root_path, "Blob storage ready");

    let state = AppState::new(config, stores, Arc::new(storage))
        .context("service initialization failed")?;

    hungr_api::serve(state).await?;
    Ok(())
}
