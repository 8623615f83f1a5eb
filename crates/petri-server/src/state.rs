//! Shared application state for the session server.
//!
//! [`AppState`] holds the broadcast channel that fans events out to every
//! connected viewer, the shared simulation state, and the pieces of
//! configuration the session layer needs (pixel-to-grid conversion and
//! pattern geometry). It implements the core's [`Broadcast`] capability
//! so the tick loop publishes through the same channel the sessions
//! subscribe to.

use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};

use petri_core::runner::Broadcast;
use petri_core::tick::SimulationState;
use petri_grid::pattern::InjectionConfig;
use petri_types::ServerEvent;

/// Capacity of the broadcast channel for outbound events.
///
/// If a viewer falls behind by more than this many messages it receives a
/// [`broadcast::error::RecvError::Lagged`] and skips to the newest event.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`] and injected via Axum's `State` extractor. The
/// broadcast sender pushes events to all connected viewers; the
/// simulation state is shared with the tick loop behind a read-write
/// lock.
#[derive(Debug)]
pub struct AppState {
    /// Broadcast sender for outbound events.
    tx: broadcast::Sender<ServerEvent>,
    /// The simulation state shared with the tick loop.
    pub sim: Arc<RwLock<SimulationState>>,
    /// Pixel size of one cell; divisor for click coordinates.
    pub square_size: u32,
    /// Pattern geometry for viewer-requested injection.
    pub injection: InjectionConfig,
    /// Board display name for the status page.
    pub world_name: String,
}

impl AppState {
    /// Create application state over a shared simulation state.
    pub fn new(
        sim: Arc<RwLock<SimulationState>>,
        square_size: u32,
        injection: InjectionConfig,
        world_name: String,
    ) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            tx,
            sim,
            square_size,
            injection,
            world_name,
        }
    }

    /// Subscribe to the outbound event stream.
    ///
    /// Returns a receiver that yields every [`ServerEvent`] published
    /// after the call.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.tx.subscribe()
    }

    /// Number of currently subscribed viewer sessions.
    pub fn viewer_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Publish an event to all connected viewers.
    ///
    /// Returns the number of receivers. Zero means no viewers are
    /// connected, which is not an error.
    pub fn broadcast(&self, event: ServerEvent) -> usize {
        // send returns Err only when there are zero receivers, which is
        // normal when no viewer is connected.
        self.tx.send(event).unwrap_or(0)
    }
}

impl Broadcast for AppState {
    fn publish(&self, event: ServerEvent) -> usize {
        self.broadcast(event)
    }
}
