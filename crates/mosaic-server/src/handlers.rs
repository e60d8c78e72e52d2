//! REST endpoint handlers for the board server.
//!
//! All handlers are read-only: they lock the board, copy what they need,
//! and release it. Mutation happens exclusively over the `WebSocket`.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/grid` | The current board |
//! | `GET` | `/api/players/count` | Connected player count |
//! | `GET` | `/api/history` | The batched history timeline |
//! | `GET` | `/api/history/range` | First and last batch timestamps |
//! | `GET` | `/api/history/at/:timestamp` | Time-travel replay |
//! | `GET` | `/api/updates/recent` | The most recent updates |
//! | `GET` | `/api/updates/player/:id` | One player's updates |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use mosaic_types::{GridUpdate, HistoryEntry, PlayerId, TimeRange};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Updates returned by `GET /api/updates/recent` when no `limit` is given.
const DEFAULT_RECENT_LIMIT: usize = 10;

/// Query parameters for the `GET /api/updates/recent` endpoint.
#[derive(Debug, serde::Deserialize)]
pub struct RecentQuery {
    /// Maximum number of updates to return (default 10).
    pub limit: Option<usize>,
}

/// Serve a minimal HTML page showing board status and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (occupied, players, updates, batches) = {
        let board = state.board.lock().await;
        (
            board.current_grid().occupied_count(),
            board.player_count(),
            board.update_count(),
            board.history().len(),
        )
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Mosaic Board</title>
    <style>
        body {{
            background: #0d1117;
            color: #c9d1d9;
            font-family: 'Cascadia Code', 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 720px;
            margin: 0 auto;
        }}
        h1 {{ color: #58a6ff; margin-bottom: 0.25rem; }}
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
        a {{ color: #58a6ff; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li::before {{ content: "GET "; color: #7ee787; font-weight: bold; }}
    </style>
</head>
<body>
    <h1>Mosaic Board</h1>
    <div>
        <div class="metric"><div class="label">Players</div><div class="value">{players}</div></div>
        <div class="metric"><div class="label">Occupied cells</div><div class="value">{occupied}</div></div>
        <div class="metric"><div class="label">Updates</div><div class="value">{updates}</div></div>
        <div class="metric"><div class="label">History batches</div><div class="value">{batches}</div></div>
    </div>
    <ul>
        <li><a href="/api/grid">/api/grid</a></li>
        <li><a href="/api/players/count">/api/players/count</a></li>
        <li><a href="/api/history">/api/history</a></li>
        <li><a href="/api/history/range">/api/history/range</a></li>
        <li><a href="/api/updates/recent">/api/updates/recent</a></li>
    </ul>
    <p>Live board: connect a WebSocket to <code>/ws</code>.</p>
</body>
</html>"#
    ))
}

/// `GET /api/grid` — the current board as a 2-D cell array.
pub async fn get_grid(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let grid = state.board.lock().await.current_grid();
    Json(grid)
}

/// `GET /api/players/count` — number of connected players.
pub async fn get_player_count(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let count = state.board.lock().await.player_count();
    Json(serde_json::json!({ "count": count }))
}

/// `GET /api/history` — the batched history timeline.
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<HistoryEntry>> {
    let entries = state.board.lock().await.history().to_vec();
    Json(entries)
}

/// `GET /api/history/range` — first and last batch timestamps.
///
/// # Errors
///
/// `404` when nothing has been written yet.
pub async fn get_time_range(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TimeRange>, ApiError> {
    state
        .board
        .lock()
        .await
        .time_range()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(String::from("history is empty")))
}

/// `GET /api/history/at/:timestamp` — the board replayed as of a past
/// instant (epoch milliseconds).
pub async fn get_grid_at(
    State(state): State<Arc<AppState>>,
    Path(timestamp): Path<i64>,
) -> impl IntoResponse {
    let grid = state.board.lock().await.grid_at_time(timestamp);
    Json(serde_json::json!({ "timestamp": timestamp, "grid": grid }))
}

/// `GET /api/updates/recent?limit=N` — the last N updates (default 10).
pub async fn get_recent_updates(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<GridUpdate>> {
    let limit = query.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let updates = state.board.lock().await.recent_updates(limit).to_vec();
    Json(updates)
}

/// `GET /api/updates/player/:id` — all updates by one player, in recorded
/// order.
///
/// # Errors
///
/// `400` when the id is not a valid UUID.
pub async fn get_player_updates(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<GridUpdate>>, ApiError> {
    let player = id
        .parse::<Uuid>()
        .map(PlayerId::from)
        .map_err(|e| ApiError::InvalidPlayerId(format!("{id}: {e}")))?;
    let updates = state.board.lock().await.updates_by_player(player);
    Ok(Json(updates))
}
