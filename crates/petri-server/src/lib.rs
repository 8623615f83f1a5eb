//! Viewer session server for the Petri simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) where each viewer session receives
//!   its assigned color and the full grid on connect, then the per-tick
//!   diff stream via [`tokio::sync::broadcast`], and may send `newCell`
//!   and `pattern` commands back
//! - **Minimal HTML status page** (`GET /`) showing the current tick,
//!   grid geometry, live cell count, and connected viewer count
//!
//! # Architecture
//!
//! The session layer shares the [`SimulationState`] with the tick loop
//! behind a read-write lock; the loop and the inbound command handlers
//! are the only two mutation paths. Outbound fan-out goes through a
//! broadcast channel with automatic lag handling, so one slow viewer
//! never delays the tick cycle or the other viewers.
//!
//! [`SimulationState`]: petri_core::tick::SimulationState

pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use startup::{StartupError, spawn_server};
pub use state::AppState;
