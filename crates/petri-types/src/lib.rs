//! Shared type definitions for the Petri simulation.
//!
//! This crate is the single source of truth for the data model and the
//! wire protocol shared between the engine and its viewers. Types defined
//! here flow downstream to `TypeScript` via `ts-rs` for the canvas viewer.
//!
//! # Modules
//!
//! - [`cell`] -- The [`Cell`] entity and its [`CellStatus`]
//! - [`color`] -- RGB color math: hex decode/encode, floor averaging,
//!   random bright color generation
//! - [`protocol`] -- [`ServerEvent`] and [`ClientEvent`] JSON frames
//!   exchanged over each viewer's `WebSocket`

pub mod cell;
pub mod color;
pub mod protocol;

// Re-export all public types at crate root for convenience.
pub use cell::{Cell, CellStatus};
pub use color::{ColorAccumulator, Rgb, random_color};
pub use protocol::{ClientEvent, ServerEvent};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        let _ = crate::cell::Cell::export_all();
        let _ = crate::cell::CellStatus::export_all();
        let _ = crate::protocol::ServerEvent::export_all();
        let _ = crate::protocol::ClientEvent::export_all();
    }
}
