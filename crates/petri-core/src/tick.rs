//! The tick cycle: one generation of the shared board per pass.
//!
//! Each tick runs five phases:
//!
//! 1. **Seed** -- on the injection cadence, stamp fresh patterns in a
//!    random color so the board never settles into a static or empty
//!    state indefinitely.
//! 2. **Evaluate** -- full pass over every position against the
//!    generation-N grid, collecting only the cells whose status or color
//!    changes. Nothing is written during this phase.
//! 3. **Apply** -- write all collected cells back to the grid.
//! 4. **Advance** -- increment the tick counter.
//! 5. **Diff** -- assemble the changed-cells broadcast: the evaluation
//!    changes plus any out-of-band mutations recorded since the last
//!    broadcast, each compared against what viewers last saw.
//!
//! The caller holds exclusive access to the [`SimulationState`] for the
//! whole pass, so inbound session commands can never interleave with the
//! read-all-then-write-all step.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::info;

use petri_grid::pattern::InjectionConfig;
use petri_grid::{Grid, GridError, place_patterns};
use petri_types::{Cell, color};

use crate::clock::{ClockError, TickClock};
use crate::rule;

/// Errors that can occur during tick execution.
///
/// Any of these is fatal to the simulation: they indicate a bug in grid
/// geometry or an exhausted tick counter, and there is no supervisor to
/// recover from either.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// The clock could not advance.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A grid access failed during the pass.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number after this generation (first tick publishes 1).
    pub tick: u64,
    /// Cells that differ from what viewers last saw, in row-major order.
    pub updated_cells: Vec<Cell>,
    /// Whether this tick ran the periodic pattern injection.
    pub injected: bool,
    /// Live cells on the board after the apply phase.
    pub alive_cells: u32,
}

/// The single owned simulation state: clock, grid, and the out-of-band
/// mutation record.
///
/// Created once at startup and torn down with the process. `pending` maps
/// positions mutated between broadcasts (pattern stamps, from the tick
/// cadence or viewer commands) to their pre-mutation cells, so the next
/// diff is exact with respect to the viewers' copies of the grid.
#[derive(Debug)]
pub struct SimulationState {
    /// The tick clock.
    pub clock: TickClock,
    /// The authoritative grid.
    pub grid: Grid,
    /// Out-of-band pre-images since the last broadcast, keyed `(y, x)`.
    pending: BTreeMap<(usize, usize), Cell>,
}

impl SimulationState {
    /// Create simulation state at tick 0 over the given grid.
    pub const fn new(grid: Grid) -> Self {
        Self {
            clock: TickClock::new(),
            grid,
            pending: BTreeMap::new(),
        }
    }

    /// Record pre-images of out-of-band mutations, first write wins.
    ///
    /// A position already recorded keeps its older pre-image: viewers have
    /// not seen any intermediate value either.
    pub fn record_pre_images(&mut self, pre_images: BTreeMap<(usize, usize), Cell>) {
        for (position, prior) in pre_images {
            self.pending.entry(position).or_insert(prior);
        }
    }

    /// Drop all recorded pre-images.
    ///
    /// Called after a full-grid broadcast: once viewers hold the entire
    /// server grid, the pre-images no longer describe their view.
    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    /// Number of positions with recorded pre-images (testing/diagnostics).
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

/// Execute one complete tick of the simulation.
///
/// This is the engine's main entry point. The caller must hold the state
/// exclusively for the duration (the runner takes the write lock around
/// this call).
///
/// # Errors
///
/// Returns [`TickError`] on grid-geometry violations or clock overflow;
/// both are fatal upstream.
pub fn run_tick(
    state: &mut SimulationState,
    injection: &InjectionConfig,
    rng: &mut impl Rng,
) -> Result<TickSummary, TickError> {
    // --- Phase 1: Seed ---
    let injected = state
        .clock
        .tick()
        .checked_rem(injection.interval_ticks)
        .is_some_and(|rem| rem == 0);
    if injected {
        let seed_color = color::random_color(rng);
        let pre_images = place_patterns(&mut state.grid, &seed_color, injection, rng)?;
        state.record_pre_images(pre_images);
    }

    // --- Phase 2: Evaluate ---
    // All neighbor counts are computed against the generation-N grid in
    // full before any cell is overwritten.
    let (width, height) = state.grid.dimensions();
    let mut changes: BTreeMap<(usize, usize), Cell> = BTreeMap::new();
    for y in 0..height {
        for x in 0..width {
            let summary = rule::neighborhood(&state.grid, y, x);
            let cell = state.grid.get(x, y)?;
            if let Some(next) = rule::transition(cell, &summary) {
                changes.insert((y, x), next);
            }
        }
    }

    // --- Phase 3: Apply ---
    for cell in changes.values() {
        state.grid.set(cell.clone())?;
    }

    // --- Phase 4: Advance ---
    let tick = state.clock.advance()?;

    // --- Phase 5: Diff ---
    // Fold in the out-of-band mutations: a pending position is included
    // exactly when its post-apply value differs from the pre-image the
    // viewers still hold.
    let mut diff = changes;
    let pending = std::mem::take(&mut state.pending);
    for ((y, x), prior) in pending {
        let current = state.grid.get(x, y)?;
        if *current == prior {
            diff.remove(&(y, x));
        } else {
            diff.insert((y, x), current.clone());
        }
    }

    let updated_cells: Vec<Cell> = diff.into_values().collect();
    let alive_cells = state.grid.live_count();

    info!(
        tick,
        updated = updated_cells.len(),
        alive = alive_cells,
        injected,
        "tick complete"
    );

    Ok(TickSummary {
        tick,
        updated_cells,
        injected,
        alive_cells,
    })
}
