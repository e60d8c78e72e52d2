//! Axum router construction for the board server.
//!
//! Assembles all routes (`WebSocket` + REST) into a single [`Router`] with
//! CORS middleware enabled so the board frontend can connect from another
//! origin.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the board server.
///
/// The router includes:
/// - `GET /` -- minimal HTML status page
/// - `GET /ws` -- the `WebSocket` board protocol
/// - `GET /api/grid` -- current board
/// - `GET /api/players/count` -- connected player count
/// - `GET /api/history` -- batched history timeline
/// - `GET /api/history/range` -- first/last batch timestamps
/// - `GET /api/history/at/:timestamp` -- time-travel replay
/// - `GET /api/updates/recent` -- most recent updates
/// - `GET /api/updates/player/:id` -- one player's updates
///
/// CORS is configured to allow any origin for development. In production
/// this should be restricted to the frontend's origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Status page
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(ws::ws_board))
        // REST API
        .route("/api/grid", get(handlers::get_grid))
        .route("/api/players/count", get(handlers::get_player_count))
        .route("/api/history", get(handlers::get_history))
        .route("/api/history/range", get(handlers::get_time_range))
        .route("/api/history/at/{timestamp}", get(handlers::get_grid_at))
        .route("/api/updates/recent", get(handlers::get_recent_updates))
        .route("/api/updates/player/{id}", get(handlers::get_player_updates))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
