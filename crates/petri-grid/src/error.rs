//! Error types for the `petri-grid` crate.
//!
//! All fallible grid operations return [`GridError`]. Out-of-range access
//! is a caller bug, not a recoverable condition: grid geometry is fixed at
//! startup and every legitimate caller derives coordinates from it. The
//! session layer validates bounds before mutating; the tick engine treats
//! a bounds failure as fatal.

/// Errors that can occur during grid operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// A coordinate fell outside the fixed grid geometry.
    #[error("coordinate ({x}, {y}) outside grid ({width}x{height})")]
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
}
