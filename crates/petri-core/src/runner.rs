//! The simulation loop: one tick per fixed interval, forever.
//!
//! The loop is process-lifetime: there is no pause, stop, or watchdog.
//! Each cycle takes the state write lock, runs one tick, publishes the
//! diff and the tick counter, then sleeps the configured interval. The
//! next cycle is scheduled only after the previous cycle's broadcast
//! completes, so a slow broadcast delays but never skips a tick.
//!
//! The core never talks to the transport directly: it publishes through
//! the injected [`Broadcast`] capability, fire-and-forget.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use petri_grid::pattern::InjectionConfig;
use petri_types::ServerEvent;

use crate::tick::{self, SimulationState, TickError};

/// Errors that can occur during the simulation run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// A tick execution failed. Fatal: generation advancement stops for
    /// all viewers until process restart.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

/// The outbound fan-out capability injected into the tick loop.
///
/// Implementations publish an event to every connected session. Delivery
/// is fire-and-forget: the return value is the number of receivers, and
/// zero (nobody connected) is not an error. A failed or slow recipient
/// must never affect delivery to the others.
pub trait Broadcast: Send + Sync {
    /// Publish one event to all connected sessions.
    fn publish(&self, event: ServerEvent) -> usize;
}

/// A broadcaster that drops everything (testing).
pub struct NoOpBroadcast;

impl Broadcast for NoOpBroadcast {
    fn publish(&self, _event: ServerEvent) -> usize {
        0
    }
}

/// Shared handle to the simulation state.
///
/// The tick loop and the session command handlers are the only two
/// mutation paths; both take the write lock, so a full tick pass is
/// atomic with respect to inbound mutation.
pub type SharedState = Arc<RwLock<SimulationState>>;

/// Run the simulation loop forever.
///
/// Publishes `updates` (the changed-cells diff, even when empty) followed
/// by `ticks` after every generation, then sleeps `tick_interval`.
///
/// # Errors
///
/// Returns [`RunnerError`] only on a fatal tick failure; otherwise this
/// function never returns.
pub async fn run_simulation(
    state: &SharedState,
    broadcaster: &dyn Broadcast,
    injection: &InjectionConfig,
    tick_interval: Duration,
) -> Result<(), RunnerError> {
    info!(
        tick_interval_ms = u64::try_from(tick_interval.as_millis()).unwrap_or(u64::MAX),
        injection_interval = injection.interval_ticks,
        "simulation loop starting"
    );

    loop {
        // One full tick pass under the write lock: evaluation and apply
        // can never interleave with a session's grid mutation.
        let summary = {
            let mut guard = state.write().await;
            let mut rng = rand::rng();
            tick::run_tick(&mut guard, injection, &mut rng)?
        };

        // The diff goes out first, then the counter, matching what the
        // viewer applies in order on its connection.
        let _ = broadcaster.publish(ServerEvent::Updates {
            updated_cells: summary.updated_cells,
        });
        let _ = broadcaster.publish(ServerEvent::Ticks(summary.tick));

        tokio::time::sleep(tick_interval).await;
    }
}
