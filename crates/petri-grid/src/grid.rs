//! The grid store: a fixed-size 2-D array of cells, the sole mutable
//! source of truth for the simulation.
//!
//! Internally the grid is row-major (`cells[y][x]`). Dimensions are set at
//! construction and never change. Mutation happens through exactly two
//! sanctioned paths: the tick engine's apply phase and external cell or
//! pattern insertion from the session layer.

use rand::Rng;

use petri_types::{Cell, CellStatus, color};

use crate::error::GridError;

/// The authoritative grid of cells.
///
/// Every `(y, x)` with `0 <= y < height` and `0 <= x < width` holds
/// exactly one [`Cell`]. Accessors are bounds-checked and return
/// [`GridError::OutOfBounds`] rather than panicking; callers that derive
/// coordinates from [`Self::dimensions`] never hit that path.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage (`cells[y][x]`).
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid with every position holding a dead cell of a random
    /// color.
    ///
    /// The random colors seed the visual texture of the board: a cell born
    /// later averages its parents' colors, but a dead cell's color is what
    /// the viewer renders faintly before any life reaches it.
    pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Self {
        let cells = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| Cell::dead(x, y, color::random_color(rng)))
                    .collect()
            })
            .collect();
        Self {
            width,
            height,
            cells,
        }
    }

    /// Rebuild a grid from row-major cell data (testing and state
    /// restoration).
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] if any row has a length other
    /// than `width` or any cell's recorded position disagrees with its
    /// slot.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::OutOfBounds {
                    x: row.len(),
                    y,
                    width,
                    height,
                });
            }
            for (x, cell) in row.iter().enumerate() {
                if cell.x != x || cell.y != y {
                    return Err(GridError::OutOfBounds {
                        x: cell.x,
                        y: cell.y,
                        width,
                        height,
                    });
                }
            }
        }
        Ok(Self {
            width,
            height,
            cells: rows,
        })
    }

    /// Grid dimensions as `(width, height)`.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of columns.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Immutable access to the cell at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell, GridError> {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
    }

    /// Replace the cell at the position recorded in `cell`.
    pub fn set(&mut self, cell: Cell) -> Result<(), GridError> {
        let (x, y) = (cell.x, cell.y);
        let slot = self
            .cells
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(GridError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })?;
        *slot = cell;
        Ok(())
    }

    /// Borrow the row-major cell storage.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    /// Clone the row-major cell storage for a wire payload.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.cells.clone()
    }

    /// Number of live cells on the board.
    pub fn live_count(&self) -> u32 {
        let count = self
            .cells
            .iter()
            .flatten()
            .filter(|cell| cell.status == CellStatus::Alive)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }
}
