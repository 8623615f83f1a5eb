//! Session server startup helper for embedding in the engine binary.
//!
//! Provides [`spawn_server`] which launches the HTTP + `WebSocket` server
//! on a background Tokio task. The engine binary calls this during
//! startup so viewer sessions run concurrently with the tick loop.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::server::{ServerConfig, ServerError};
use crate::state::AppState;

/// Errors that can occur when spawning the session server.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// The server failed to bind or start.
    #[error("server start error: {0}")]
    Server(#[from] ServerError),
}

/// Spawn the session server on a background Tokio task.
///
/// Serves the status page and the `WebSocket` endpoint for viewer
/// sessions. Returns a [`JoinHandle`] so the caller can manage the
/// server's lifecycle alongside the tick loop. The server runs until the
/// Tokio runtime shuts down or the task is aborted.
///
/// # Errors
///
/// Returns [`StartupError::Server`] if the configured address cannot be
/// parsed. A bind failure surfaces asynchronously from the background
/// task and is logged there.
pub async fn spawn_server(
    config: ServerConfig,
    state: Arc<AppState>,
) -> Result<JoinHandle<()>, StartupError> {
    // Verify the address is parseable before spawning the background
    // task; the actual bind happens inside start_server.
    let addr_str = format!("{}:{}", config.host, config.port);
    let _: std::net::SocketAddr = addr_str.parse().map_err(|e| {
        StartupError::Server(ServerError::Bind(format!("invalid address {addr_str}: {e}")))
    })?;

    let handle = tokio::spawn(async move {
        if let Err(e) = crate::server::start_server(&config, state).await {
            tracing::error!(error = %e, "session server exited with error");
        }
    });

    tracing::info!(addr = %addr_str, "session server spawned on background task");

    Ok(handle)
}
