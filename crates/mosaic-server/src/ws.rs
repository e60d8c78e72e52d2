//! `WebSocket` handler: one connection is one player.
//!
//! On upgrade the server mints a [`PlayerId`], joins the board, and sends
//! the connection its initial view (full grid, then history). From then on
//! the handler multiplexes two streams: the broadcast channel carrying
//! messages addressed to everyone, and the socket itself carrying this
//! player's commands. A disconnect — clean close or send failure — leaves
//! the board and announces the new player count; a write already applied
//! is never rolled back by the disconnect that follows it.
//!
//! If a client falls behind the broadcast stream, lagged messages are
//! silently skipped and the client resumes from the most recent one.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use mosaic_types::PlayerId;
use tracing::{debug, warn};

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and run the player
/// session.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_board(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Handle the full connection lifecycle: join, session loop, leave.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let player = PlayerId::new();
    debug!(%player, "WebSocket client connected");

    let snapshot = state.board.lock().await.join(player);
    let count = snapshot.player_count;

    let joined = send(&mut socket, &ServerMessage::InitialGrid { grid: snapshot.grid }).await
        && send(
            &mut socket,
            &ServerMessage::History {
                entries: snapshot.history,
            },
        )
        .await;
    state.broadcast(&ServerMessage::PlayerCount { count });

    if joined {
        run_session(&mut socket, &state, player).await;
    }

    let count = state.board.lock().await.leave(player);
    state.broadcast(&ServerMessage::PlayerCount { count });
    debug!(%player, "WebSocket client disconnected");
}

/// Forward broadcasts and dispatch inbound commands until the connection
/// ends.
async fn run_session(socket: &mut WebSocket, state: &Arc<AppState>, player: PlayerId) {
    let mut rx = state.subscribe();

    loop {
        tokio::select! {
            // A message addressed to every connection.
            result = rx.recv() => {
                match result {
                    Ok(message) => {
                        if !send(socket, &message).await {
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(%player, skipped = n, "client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("broadcast channel closed, shutting down session");
                        return;
                    }
                }
            }
            // A frame from this player.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_command(socket, state, player, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!(%player, "WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore binary and stray pong frames.
                    }
                }
            }
        }
    }
}

/// Parse and execute one command from the player.
async fn handle_command(socket: &mut WebSocket, state: &Arc<AppState>, player: PlayerId, text: &str) {
    let command: ClientMessage = match serde_json::from_str(text) {
        Ok(command) => command,
        Err(e) => {
            warn!(%player, "unparseable client message: {e}");
            return;
        }
    };

    match command {
        ClientMessage::UpdateCell { row, col, value } => {
            let (outcome, entries) = {
                let mut board = state.board.lock().await;
                let outcome = board.write_cell(player, row, col, &value);
                let entries = outcome.is_ok().then(|| board.history().to_vec());
                (outcome, entries)
            };

            match outcome {
                Ok(accepted) => {
                    // The writer gets the new grid and their cooldown notice
                    // directly; everyone (writer included) gets the applied
                    // cell and the refreshed timeline via broadcast.
                    let _ = send(socket, &ServerMessage::GridUpdated { grid: accepted.grid }).await;
                    let _ = send(
                        socket,
                        &ServerMessage::CooldownStarted {
                            duration: accepted.cooldown.duration_ms,
                            end_time: accepted.cooldown.end_time_ms,
                        },
                    )
                    .await;
                    state.broadcast(&ServerMessage::CellUpdated {
                        update: accepted.update,
                    });
                    state.broadcast(&ServerMessage::History {
                        entries: entries.unwrap_or_default(),
                    });
                }
                Err(error) => {
                    let _ = send(socket, &ServerMessage::write_rejected(&error)).await;
                }
            }
        }
        ClientMessage::RequestHistory => {
            let entries = state.board.lock().await.history().to_vec();
            let _ = send(socket, &ServerMessage::History { entries }).await;
        }
        ClientMessage::TimeTravel { timestamp } => {
            let grid = state.board.lock().await.grid_at_time(timestamp);
            let _ = send(socket, &ServerMessage::TimeTravelGrid { timestamp, grid }).await;
        }
    }
}

/// Serialize and send one message; `false` means the peer is gone.
async fn send(socket: &mut WebSocket, message: &ServerMessage) -> bool {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            warn!("failed to serialize server message: {e}");
            return true;
        }
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}
