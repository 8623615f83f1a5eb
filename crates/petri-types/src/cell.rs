//! The cell entity: one position in the authoritative grid.
//!
//! A cell's identity is its `(x, y)` grid position; its color and status
//! change over its lifetime. Generation transitions replace cells rather
//! than mutating them in place, which keeps diff computation simple.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Whether a cell is alive or dead.
///
/// Serialized lowercase (`"alive"` / `"dead"`) to match the viewer protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CellStatus {
    /// The cell participates in neighbor counts and is rendered.
    Alive,
    /// The cell is empty; its color is retained for the next birth diff.
    Dead,
}

/// One position in the grid.
///
/// Every `(x, y)` in range holds exactly one cell at all times. The color
/// is always a 6-hex-digit string with a leading `#`; decoding still
/// degrades gracefully (see [`Rgb::from_hex`](crate::color::Rgb::from_hex))
/// so a single corrupt cell can never halt the tick cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// Column index (0-based, left to right).
    pub x: usize,
    /// Row index (0-based, top to bottom).
    pub y: usize,
    /// Display color as `#rrggbb`.
    pub color: String,
    /// Alive or dead.
    pub status: CellStatus,
}

impl Cell {
    /// Create a cell at `(x, y)` with the given color and status.
    pub const fn new(x: usize, y: usize, color: String, status: CellStatus) -> Self {
        Self {
            x,
            y,
            color,
            status,
        }
    }

    /// Create a dead cell at `(x, y)` carrying the given color.
    pub const fn dead(x: usize, y: usize, color: String) -> Self {
        Self::new(x, y, color, CellStatus::Dead)
    }

    /// Create a live cell at `(x, y)` in the given color.
    pub const fn alive(x: usize, y: usize, color: String) -> Self {
        Self::new(x, y, color, CellStatus::Alive)
    }

    /// Whether this cell is alive.
    pub fn is_alive(&self) -> bool {
        self.status == CellStatus::Alive
    }
}
