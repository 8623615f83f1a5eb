//! The authoritative cell grid and pattern injector for the Petri simulation.
//!
//! This crate owns the physical state of the world: a fixed-size 2-D array
//! of cells, the sole mutable source of truth. Dimensions are set at
//! startup and never change; every `(y, x)` in range holds exactly one
//! cell at all times.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- The [`Grid`] store: bounds-checked access, random-color
//!   dead-cell initialization, row snapshots for the wire protocol.
//! - [`pattern`] -- The pattern injector: stamps block-pair and blinker
//!   shapes at random interior anchors.

pub mod error;
pub mod grid;
pub mod pattern;

// Re-export primary types at crate root.
pub use error::GridError;
pub use grid::Grid;
pub use pattern::{InjectionConfig, place_patterns};
