//! The neighbor rule engine: live-neighbor counting, color averaging, and
//! the Life transition table with color inheritance.
//!
//! The grid has an inert one-cell border, not wraparound: a scanned
//! position only counts as a neighbor when it lies strictly inside
//! `[1, dimension - 2]` on both axes. Border cells therefore never feed
//! births and never keep interior cells alive.
//!
//! The one deviation from classic Life: a newborn cell's color is the
//! floor-averaged RGB of its live neighbors at the moment of evaluation,
//! not inherited from a single parent.

use petri_grid::Grid;
use petri_types::{Cell, CellStatus, ColorAccumulator, Rgb};

/// The result of evaluating one cell's 3x3 neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborSummary {
    /// Number of live counted neighbors, 0 through 8.
    pub live_neighbors: u8,
    /// Floor-averaged color of the live neighbors. Meaningless (black)
    /// when `live_neighbors` is 0; only consulted on a birth, which
    /// requires exactly 3.
    pub average_color: Rgb,
}

/// Whether index `i` lies strictly inside the inert border of a dimension.
const fn interior(i: usize, dimension: usize) -> bool {
    i >= 1 && i <= dimension.saturating_sub(2)
}

/// Evaluate the 3x3 block centered on `(y, x)`, excluding the center.
///
/// Counts live neighbors strictly inside the border on both axes and
/// accumulates their RGB components for averaging. Malformed cell colors
/// contribute black rather than failing.
pub fn neighborhood(grid: &Grid, y: usize, x: usize) -> NeighborSummary {
    let (width, height) = grid.dimensions();
    let mut acc = ColorAccumulator::new();

    for i in y.saturating_sub(1)..=y.saturating_add(1) {
        for j in x.saturating_sub(1)..=x.saturating_add(1) {
            // The cell is not a neighbor of itself.
            if i == y && j == x {
                continue;
            }
            if !interior(i, height) || !interior(j, width) {
                continue;
            }
            if let Ok(cell) = grid.get(j, i) {
                if cell.is_alive() {
                    acc.add(Rgb::from_hex(&cell.color));
                }
            }
        }
    }

    NeighborSummary {
        live_neighbors: u8::try_from(acc.count()).unwrap_or(8),
        average_color: acc.average(),
    }
}

/// Apply the transition rule to one cell.
///
/// Returns `Some(next)` only when the cell's status or color changes this
/// generation, so the per-tick diff falls straight out of a full pass:
///
/// | current | live neighbors | next |
/// |---------|----------------|------|
/// | alive | < 2 | dead, color unchanged (underpopulation) |
/// | alive | 2 or 3 | unchanged, nothing emitted |
/// | alive | > 3 | dead, color unchanged (overpopulation) |
/// | dead | exactly 3 | alive, color averaged from the 3 parents |
/// | dead | anything else | unchanged, nothing emitted |
pub fn transition(cell: &Cell, summary: &NeighborSummary) -> Option<Cell> {
    match (cell.status, summary.live_neighbors) {
        (CellStatus::Alive, 2 | 3) | (CellStatus::Dead, 0..=2 | 4..) => None,
        (CellStatus::Alive, _) => Some(Cell::dead(cell.x, cell.y, cell.color.clone())),
        (CellStatus::Dead, _) => Some(Cell::alive(
            cell.x,
            cell.y,
            summary.average_color.to_hex(),
        )),
    }
}
