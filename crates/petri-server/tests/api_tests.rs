//! Integration tests for the session server endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. This validates handler logic and routing
//! without needing a live network connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::RwLock;
use tower::ServiceExt;

use petri_core::tick::SimulationState;
use petri_grid::pattern::InjectionConfig;
use petri_grid::Grid;
use petri_server::router::build_router;
use petri_server::state::AppState;

fn make_test_state() -> Arc<AppState> {
    let mut rng = SmallRng::seed_from_u64(42);
    let sim = Arc::new(RwLock::new(SimulationState::new(Grid::generate(
        50, 25, &mut rng,
    ))));
    Arc::new(AppState::new(
        sim,
        16,
        InjectionConfig::default(),
        String::from("petri"),
    ))
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_index_returns_html_status_page() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.contains("text/html"));

    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("petri"));
    assert!(html.contains("50"));
    assert!(html.contains("25"));
}

#[tokio::test]
async fn test_index_reports_current_tick() {
    let state = make_test_state();

    {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut sim = state.sim.write().await;
        let _ = petri_core::tick::run_tick(&mut sim, &InjectionConfig::default(), &mut rng)
            .unwrap();
    }

    let router = build_router(state);
    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("1"));
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let state = make_test_state();
    let router = build_router(state);

    let response = router
        .oneshot(Request::get("/api/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ws_route_without_upgrade_headers_is_rejected() {
    let state = make_test_state();
    let router = build_router(state);

    // A plain GET to /ws lacks the upgrade handshake headers and must
    // not be served as a page.
    let response = router
        .oneshot(Request::get("/ws").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
