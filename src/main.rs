//! petal-pos server binary
//!
//! ```text
//! petal-pos [--config petal.yaml]
//! PETAL_CONFIG=petal.yaml petal-pos
//! ```

use anyhow::Context;
use clap::Parser;
use petal::config::{AppConfig, Cli};
use petal::server::ServerBuilder;
use petal::storage::JsonStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    let store = JsonStore::open(&config.database_path)
        .await
        .with_context(|| format!("cannot open database {}", config.database_path.display()))?;

    info!(
        database = %store.path().display(),
        bind_address = config.bind_address.as_str(),
        "Starting petal-pos"
    );

    ServerBuilder::new()
        .with_store(Arc::new(store))
        .with_cors_permissive(config.cors_permissive)
        .serve(&config.bind_address)
        .await
}
