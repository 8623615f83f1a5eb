//! HTTP endpoint handlers for the session server.
//!
//! The only HTTP surface besides the `WebSocket` upgrade is a minimal
//! HTML status page; the canvas viewer itself is served separately and
//! talks to `/ws`.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::state::AppState;

/// Serve a minimal HTML page showing the board status.
///
/// # Route
///
/// `GET /`
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (tick, width, height, alive) = {
        let sim = state.sim.read().await;
        let (width, height) = sim.grid.dimensions();
        (sim.clock.tick(), width, height, sim.grid.live_count())
    };
    let viewers = state.viewer_count();
    let name = &state.world_name;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{name}</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
        .subtitle {{ color: #8b949e; margin-top: 0; }}
        .metric {{
            display: inline-block;
            background: #161b22;
            border: 1px solid #30363d;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8b949e; font-size: 0.85rem; }}
        .metric .value {{ color: #58a6ff; font-size: 1.5rem; font-weight: bold; }}
        .status {{ color: #3fb950; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>{name}</h1>
    <p class="subtitle">Shared Game of Life board</p>

    <p>Status: <span class="status">TICKING</span></p>

    <div>
        <div class="metric">
            <div class="label">Tick</div>
            <div class="value">{tick}</div>
        </div>
        <div class="metric">
            <div class="label">Grid</div>
            <div class="value">{width}&times;{height}</div>
        </div>
        <div class="metric">
            <div class="label">Live cells</div>
            <div class="value">{alive}</div>
        </div>
        <div class="metric">
            <div class="label">Viewers</div>
            <div class="value">{viewers}</div>
        </div>
    </div>

    <p>Connect a viewer to <code>/ws</code>.</p>
</body>
</html>"#
    ))
}
