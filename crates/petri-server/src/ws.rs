//! `WebSocket` handler: one viewer session per connection.
//!
//! On connect the session is assigned a random color (independent of the
//! grid) and receives an `init` frame with the full grid and that color.
//! Thereafter the handler forwards every broadcast event as a JSON text
//! frame and handles the two inbound commands:
//!
//! - `newCell` -- place one live cell in the session color at the clicked
//!   pixel; broadcasts the full grid to all sessions.
//! - `pattern` -- stamp random patterns in the session color; no
//!   broadcast from this handler, the next tick's diff carries the change
//!   (up to one tick interval of latency, by design of the protocol).
//!
//! If a viewer falls behind, lagged messages are silently skipped and the
//! viewer resumes from the most recent event. Disconnection needs no grid
//! cleanup; the session color simply goes away with the task.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use petri_grid::place_patterns;
use petri_types::{Cell, ClientEvent, ServerEvent, color};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin a
/// viewer session.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_sessions(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_session(socket, state))
}

/// Handle the session lifecycle: assign a color, push the initial state,
/// then interleave broadcast fan-out with inbound commands.
async fn handle_session(mut socket: WebSocket, state: Arc<AppState>) {
    let session_color = {
        let mut rng = rand::rng();
        color::random_color(&mut rng)
    };
    debug!(color = %session_color, "viewer connected");

    // Subscribe before snapshotting the grid so no event published after
    // the snapshot can be missed.
    let mut rx = state.subscribe();

    let init = {
        let sim = state.sim.read().await;
        ServerEvent::Init {
            cells: sim.grid.to_rows(),
            color: session_color.clone(),
        }
    };
    if send_event(&mut socket, &init).await.is_err() {
        debug!("viewer disconnected during init");
        return;
    }

    loop {
        tokio::select! {
            // Receive a broadcast event from the engine or another session.
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        if send_event(&mut socket, &event).await.is_err() {
                            debug!("viewer disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "viewer lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("broadcast channel closed, ending session");
                        return;
                    }
                }
            }
            // Handle an inbound frame from the viewer.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_command(text.as_str(), &session_color, &state).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(color = %session_color, "viewer disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!("viewer disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("websocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore binary and pong frames.
                    }
                }
            }
        }
    }
}

/// Serialize and send one event as a text frame.
async fn send_event(socket: &mut WebSocket, event: &ServerEvent) -> Result<(), ()> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            warn!("failed to serialize event: {e}");
            // Serialization failure is not a transport failure; keep the
            // session alive and skip the frame.
            return Ok(());
        }
    };
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_send_failed| ())
}

/// Parse and dispatch one inbound command frame.
async fn handle_command(text: &str, session_color: &str, state: &Arc<AppState>) {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "ignoring malformed command frame");
            return;
        }
    };
    match event {
        ClientEvent::NewCell { x, y } => place_cell(x, y, session_color, state).await,
        ClientEvent::Pattern => place_pattern(session_color, state).await,
    }
}

/// Place one live cell at the clicked pixel and broadcast the full grid.
///
/// Pixel coordinates convert to grid indices by floor division with the
/// square size. The zero row and column are border and rejected, as is
/// anything outside the grid; rejected placements are dropped silently.
async fn place_cell(pixel_x: i64, pixel_y: i64, session_color: &str, state: &Arc<AppState>) {
    let square = i64::from(state.square_size);
    let (Some(grid_x), Some(grid_y)) = (
        pixel_x.checked_div(square).and_then(|v| usize::try_from(v).ok()),
        pixel_y.checked_div(square).and_then(|v| usize::try_from(v).ok()),
    ) else {
        debug!(pixel_x, pixel_y, "dropping placement with negative coordinates");
        return;
    };

    let mut sim = state.sim.write().await;
    let (width, height) = sim.grid.dimensions();
    if grid_x == 0 || grid_x >= width || grid_y == 0 || grid_y >= height {
        debug!(grid_x, grid_y, "dropping out-of-bounds placement");
        return;
    }

    let cell = Cell::alive(grid_x, grid_y, session_color.to_owned());
    if let Err(e) = sim.grid.set(cell) {
        warn!(error = %e, "cell placement failed after bounds check");
        return;
    }

    // The full-grid resend puts the viewers' copies exactly in sync, so
    // earlier out-of-band pre-images no longer describe their view.
    sim.clear_pending();
    let cells = sim.grid.to_rows();
    // Publish before releasing the write lock: a tick finishing in
    // between could otherwise slot its diff ahead of this older snapshot.
    let receivers = state.broadcast(ServerEvent::Cells { cells });
    drop(sim);
    debug!(grid_x, grid_y, receivers, "cell placed");
}

/// Stamp random patterns in the session color.
///
/// No broadcast here: the stamps are recorded as out-of-band pre-images
/// and ride the next scheduled tick's diff.
async fn place_pattern(session_color: &str, state: &Arc<AppState>) {
    let mut sim = state.sim.write().await;
    let mut rng = rand::rng();
    match place_patterns(&mut sim.grid, session_color, &state.injection, &mut rng) {
        Ok(pre_images) => {
            debug!(stamped = pre_images.len(), color = %session_color, "viewer patterns placed");
            sim.record_pre_images(pre_images);
        }
        Err(e) => {
            warn!(error = %e, "viewer pattern placement failed");
        }
    }
}
