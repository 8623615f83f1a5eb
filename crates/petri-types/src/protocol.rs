//! Wire protocol: JSON frames exchanged over each viewer's `WebSocket`.
//!
//! Events are adjacently tagged as `{"event": ..., "data": ...}` with
//! camelCase names, matching what the canvas viewer listens for. The
//! transport guarantees ordered, reliable delivery per connection; there
//! is no ordering guarantee across connections.
//!
//! # Server to client
//!
//! | Event | Payload | When |
//! |-------|---------|------|
//! | `init` | full grid + assigned color | once, immediately on connect |
//! | `ticks` | tick counter | once per tick |
//! | `updates` | changed cells only | once per tick (empty list is valid) |
//! | `cells` | full grid | after a direct single-cell placement |
//!
//! # Client to server
//!
//! | Event | Payload | Meaning |
//! |-------|---------|---------|
//! | `newCell` | raw pixel coordinates | place one live cell in the session color |
//! | `pattern` | none | stamp random patterns in the session color |

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cell::Cell;

/// An event pushed from the server to every connected viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ServerEvent {
    /// Initial state push: the full grid plus the color assigned to this
    /// session. Sent exactly once, as the first frame after connect.
    Init {
        /// The full grid, row-major (`cells[y][x]`).
        cells: Vec<Vec<Cell>>,
        /// The session's assigned display color (`#rrggbb`).
        color: String,
    },

    /// The tick counter, published once per tick after it increments.
    Ticks(u64),

    /// The per-tick diff: only cells whose status or color changed this
    /// generation. An empty list is still sent so viewers observe every
    /// tick.
    #[serde(rename_all = "camelCase")]
    Updates {
        /// Cells that differ from the previous generation.
        updated_cells: Vec<Cell>,
    },

    /// Full-grid resend after a direct single-cell placement. Distinct
    /// from [`Self::Updates`]: this path retransmits everything.
    Cells {
        /// The full grid, row-major (`cells[y][x]`).
        cells: Vec<Vec<Cell>>,
    },
}

/// A command sent from a viewer to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum ClientEvent {
    /// Place one live cell in the session color at the clicked pixel.
    ///
    /// Coordinates are raw pixels; the server converts to grid indices by
    /// floor-dividing by the configured square size. Placements that land
    /// on the border (row or column zero) or outside the grid are
    /// silently dropped.
    NewCell {
        /// Horizontal pixel coordinate of the click.
        x: i64,
        /// Vertical pixel coordinate of the click.
        y: i64,
    },

    /// Stamp random patterns onto the grid in the session color.
    ///
    /// No payload. The handler does not broadcast; the stamps become
    /// visible through the next tick's diff.
    Pattern,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ticks_frame_shape() {
        let json = serde_json::to_string(&ServerEvent::Ticks(42)).unwrap();
        assert_eq!(json, r#"{"event":"ticks","data":42}"#);
    }

    #[test]
    fn updates_frame_uses_camel_case() {
        let event = ServerEvent::Updates {
            updated_cells: vec![Cell::alive(1, 2, String::from("#00ff00"))],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.starts_with(r#"{"event":"updates","data":{"updatedCells":"#));
        assert!(json.contains(r#""status":"alive""#));
    }

    #[test]
    fn init_frame_carries_grid_and_color() {
        let event = ServerEvent::Init {
            cells: vec![vec![Cell::dead(0, 0, String::from("#123456"))]],
            color: String::from("#abcdef"),
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value.get("event").unwrap(), "init");
        assert_eq!(
            value.pointer("/data/color").unwrap(),
            &serde_json::json!("#abcdef")
        );
        assert_eq!(
            value.pointer("/data/cells/0/0/x").unwrap(),
            &serde_json::json!(0)
        );
    }

    #[test]
    fn new_cell_parses_pixel_coordinates() {
        let frame = r#"{"event":"newCell","data":{"x":17,"y":17}}"#;
        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        assert_eq!(event, ClientEvent::NewCell { x: 17, y: 17 });
    }

    #[test]
    fn pattern_parses_without_payload() {
        let frame = r#"{"event":"pattern"}"#;
        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        assert_eq!(event, ClientEvent::Pattern);
    }

    #[test]
    fn server_events_round_trip() {
        let events = vec![
            ServerEvent::Ticks(0),
            ServerEvent::Updates {
                updated_cells: Vec::new(),
            },
            ServerEvent::Cells {
                cells: vec![vec![Cell::alive(0, 0, String::from("#ffffff"))]],
            },
        ];
        for event in events {
            let json = serde_json::to_string(&event).unwrap();
            let back: ServerEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event);
        }
    }
}
