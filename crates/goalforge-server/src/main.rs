//! GoalForge server binary.
//!
//! Wires configuration, the domain store, and the REST API together.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `$GOALFORGE_CONFIG` (default `goalforge.yaml`)
//! 3. Build the domain store, loading the demo dataset unless disabled
//! 4. Serve the REST API until `Ctrl-C`

mod error;

use std::path::PathBuf;
use std::sync::Arc;

use goalforge_api::AppState;
use goalforge_core::{DomainStore, GoalForgeConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Environment variable naming the configuration file.
const CONFIG_ENV: &str = "GOALFORGE_CONFIG";

/// Configuration file used when [`CONFIG_ENV`] is unset.
const DEFAULT_CONFIG_PATH: &str = "goalforge.yaml";

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("goalforge-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        simulated_latency_ms = config.api.simulated_latency_ms,
        seed = ?config.store.seed,
        load_seed_data = config.store.load_seed_data,
        "Configuration loaded"
    );

    // 3. Build the store.
    let store = DomainStore::from_config(&config.store, config.rewards.clone());
    info!(
        users = store.tables().users.len(),
        tokens = store.tables().tokens.len(),
        "Domain store ready"
    );

    // 4. Serve.
    let state = Arc::new(AppState::new(store, &config.api));
    goalforge_api::start_server(&config.server, state).await?;

    info!("goalforge-server shutdown complete");
    Ok(())
}

/// Load configuration from the file named by `GOALFORGE_CONFIG`.
///
/// A missing file means defaults; `HOST` and `PORT` still apply.
fn load_config() -> Result<GoalForgeConfig, ServerError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from);

    if path.exists() {
        let config = GoalForgeConfig::from_file(&path)?;
        info!(path = %path.display(), "Config file loaded");
        Ok(config)
    } else {
        info!(path = %path.display(), "Config file not found, using defaults");
        let mut config = GoalForgeConfig::default();
        config.server.apply_env_overrides()?;
        Ok(config)
    }
}
