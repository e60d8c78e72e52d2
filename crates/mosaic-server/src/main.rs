//! Board server entry point.
//!
//! Initializes structured logging, loads the optional board configuration,
//! and serves the `WebSocket` + REST transport until the process is
//! terminated. All state is in-memory; a restart starts from an empty
//! board.

use std::sync::Arc;

use mosaic_core::BoardConfig;
use mosaic_server::server::{ServerConfig, start_server};
use mosaic_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the optional config file is unreadable or the
/// server fails to bind or serve.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    info!("mosaic-server starting");

    // An explicit config file must parse; absence of MOSAIC_CONFIG means
    // defaults (60 s cooldown, 1 s grouping window).
    let board_config = match std::env::var("MOSAIC_CONFIG") {
        Ok(path) => BoardConfig::load(&path)?,
        Err(_) => BoardConfig::default(),
    };
    info!(
        cooldown_ms = board_config.cooldown_ms,
        grouping_window_ms = board_config.grouping_window_ms,
        "board configuration loaded"
    );

    let state = Arc::new(AppState::new(board_config));
    let server_config = ServerConfig::from_env();

    start_server(&server_config, state).await?;

    Ok(())
}
