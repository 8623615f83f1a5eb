//! The pattern injector: stamps predefined multi-cell shapes onto random
//! grid locations in a given color.
//!
//! Two shapes are stamped per invocation: a "block pair" (a 2x2 block with
//! a second 2x2 block offset diagonally by two cells) and a vertical
//! 3-cell blinker. Anchors are uniform random interior positions bounded
//! away from the edge by a fixed margin so no stamp ever falls partially
//! out of bounds. Stamping overwrites unconditionally; there is no
//! collision detection against existing live cells.
//!
//! The injector returns the pre-image of every position it touched so the
//! tick engine can fold the stamps into its changed-cells-only diff.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use petri_types::Cell;

use crate::error::GridError;
use crate::grid::Grid;

/// The block-pair shape never extends more than this many cells from its
/// anchor, so the anchor margin must be at least this wide.
pub const MIN_MARGIN: usize = 4;

/// Configuration for pattern injection.
///
/// Also carries the tick cadence at which the engine seeds fresh activity;
/// the injector itself only uses the geometry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    /// The tick engine invokes the injector every this many ticks.
    pub interval_ticks: u64,
    /// Anchor positions stay at least this far from every grid edge.
    pub margin: usize,
    /// Number of block-pair shapes stamped per invocation.
    pub block_pairs: u32,
    /// Number of blinker shapes stamped per invocation.
    pub blinkers: u32,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            interval_ticks: 100,
            margin: 4,
            block_pairs: 5,
            blinkers: 5,
        }
    }
}

/// Stamp the configured number of block-pair and blinker shapes onto the
/// grid, alive in the given color, at independent random anchors.
///
/// Returns the pre-mutation cell for every stamped position, first write
/// wins, keyed `(y, x)`. Callers merge this into their pending-diff state
/// so viewers receive exactly the cells that changed.
///
/// # Errors
///
/// Returns [`GridError::OutOfBounds`] only if the margin is too small for
/// the shape geometry, which configuration validation rules out.
pub fn place_patterns(
    grid: &mut Grid,
    color: &str,
    config: &InjectionConfig,
    rng: &mut impl Rng,
) -> Result<BTreeMap<(usize, usize), Cell>, GridError> {
    let (width, height) = grid.dimensions();
    let margin = config.margin;

    let (Some(max_x), Some(max_y)) = (width.checked_sub(margin), height.checked_sub(margin))
    else {
        debug!(width, height, margin, "grid smaller than margin, skipping injection");
        return Ok(BTreeMap::new());
    };
    if max_x < margin || max_y < margin {
        debug!(width, height, margin, "grid too small for margin, skipping injection");
        return Ok(BTreeMap::new());
    }

    let mut pre_images = BTreeMap::new();

    // Block pairs: a 2x2 block at the anchor plus a second 2x2 block
    // offset by (2, 2).
    for _ in 0..config.block_pairs {
        let x = rng.random_range(margin..=max_x);
        let y = rng.random_range(margin..=max_y);
        for dy in 0..2 {
            for dx in 0..2 {
                stamp(grid, &mut pre_images, x.saturating_add(dx), y.saturating_add(dy), color)?;
                stamp(
                    grid,
                    &mut pre_images,
                    x.saturating_add(dx).saturating_add(2),
                    y.saturating_add(dy).saturating_add(2),
                    color,
                )?;
            }
        }
    }

    // Blinkers: three vertically adjacent cells.
    for _ in 0..config.blinkers {
        let x = rng.random_range(margin..=max_x);
        let y = rng.random_range(margin..=max_y);
        for dy in 0..3 {
            stamp(grid, &mut pre_images, x, y.saturating_add(dy), color)?;
        }
    }

    debug!(
        stamped = pre_images.len(),
        color, "patterns placed"
    );
    Ok(pre_images)
}

/// Overwrite one cell as alive in the given color, recording its prior
/// value if this is the first write at that position.
fn stamp(
    grid: &mut Grid,
    pre_images: &mut BTreeMap<(usize, usize), Cell>,
    x: usize,
    y: usize,
    color: &str,
) -> Result<(), GridError> {
    let prior = grid.get(x, y)?.clone();
    pre_images.entry((y, x)).or_insert(prior);
    grid.set(Cell::alive(x, y, color.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use petri_types::CellStatus;

    use super::*;

    const COLOR: &str = "#12ab34";

    fn make_grid(width: usize, height: usize) -> Grid {
        let mut rng = SmallRng::seed_from_u64(3);
        Grid::generate(width, height, &mut rng)
    }

    #[test]
    fn stamps_stay_inside_margin_bounds() {
        let mut grid = make_grid(50, 25);
        let config = InjectionConfig::default();
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..20 {
            place_patterns(&mut grid, COLOR, &config, &mut rng).unwrap();
        }
        // The block pair extends 3 cells past its anchor, the anchor is at
        // most dimension - margin, so nothing ever lands on the last
        // column or row. The first margin rows/columns stay untouched.
        for (y, row) in grid.rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if cell.status == CellStatus::Alive {
                    assert!(x >= config.margin && y >= config.margin, "stamp at ({x}, {y})");
                    assert!(x < 50 && y < 25);
                }
            }
        }
    }

    #[test]
    fn single_block_pair_has_expected_footprint() {
        let mut grid = make_grid(20, 20);
        let config = InjectionConfig {
            block_pairs: 1,
            blinkers: 0,
            ..InjectionConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(5);
        let pre = place_patterns(&mut grid, COLOR, &config, &mut rng).unwrap();
        // Two 2x2 blocks, 8 distinct cells.
        assert_eq!(pre.len(), 8);
        assert_eq!(grid.live_count(), 8);
        // Every stamped cell carries the injected color.
        for (y, x) in pre.keys() {
            assert_eq!(grid.get(*x, *y).unwrap().color, COLOR);
        }
    }

    #[test]
    fn single_blinker_is_three_vertical_cells() {
        let mut grid = make_grid(20, 20);
        let config = InjectionConfig {
            block_pairs: 0,
            blinkers: 1,
            ..InjectionConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(9);
        let pre = place_patterns(&mut grid, COLOR, &config, &mut rng).unwrap();
        assert_eq!(pre.len(), 3);
        let positions: Vec<(usize, usize)> = pre.keys().copied().collect();
        let (y0, x0) = positions.first().copied().unwrap();
        assert_eq!(positions, vec![(y0, x0), (y0 + 1, x0), (y0 + 2, x0)]);
    }

    #[test]
    fn stamping_overwrites_existing_live_cells() {
        let mut grid = make_grid(20, 20);
        // Paint the whole interior alive in a different color first.
        for y in 0..20 {
            for x in 0..20 {
                grid.set(Cell::alive(x, y, String::from("#000001"))).unwrap();
            }
        }
        let config = InjectionConfig {
            block_pairs: 1,
            blinkers: 0,
            ..InjectionConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(2);
        let pre = place_patterns(&mut grid, COLOR, &config, &mut rng).unwrap();
        assert!(!pre.is_empty());
        for ((y, x), prior) in &pre {
            assert_eq!(prior.color, "#000001");
            assert_eq!(grid.get(*x, *y).unwrap().color, COLOR);
        }
    }

    #[test]
    fn pre_image_keeps_first_write() {
        let mut grid = make_grid(30, 30);
        let config = InjectionConfig {
            block_pairs: 10,
            blinkers: 10,
            ..InjectionConfig::default()
        };
        let mut rng = SmallRng::seed_from_u64(4);
        let pre = place_patterns(&mut grid, COLOR, &config, &mut rng).unwrap();
        // Overlapping stamps still record the original (dead) cell, never
        // an intermediate stamped one.
        for prior in pre.values() {
            assert_eq!(prior.status, CellStatus::Dead);
        }
    }

    #[test]
    fn tiny_grid_skips_injection() {
        let mut grid = make_grid(6, 6);
        let config = InjectionConfig::default();
        let mut rng = SmallRng::seed_from_u64(8);
        let pre = place_patterns(&mut grid, COLOR, &config, &mut rng).unwrap();
        assert!(pre.is_empty());
        assert_eq!(grid.live_count(), 0);
    }
}
