//! Shared application state for the board server.
//!
//! [`AppState`] holds the board engine behind a single async mutex and the
//! broadcast channel that fans server messages out to every connected
//! `WebSocket`. The mutex is the concurrency model: commands from many
//! connections are handled strictly one at a time, which is what lets the
//! core validate and mutate without its own locking.

use mosaic_core::{Board, BoardConfig};
use tokio::sync::{Mutex, broadcast};

use crate::protocol::ServerMessage;

/// Capacity of the broadcast channel for server messages.
///
/// A subscriber that falls behind by more than this many messages receives
/// a [`broadcast::error::RecvError::Lagged`] and skips to the newest one.
const BROADCAST_CAPACITY: usize = 256;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
pub struct AppState {
    /// The board engine. Every command, read or write, locks this.
    pub board: Mutex<Board>,
    /// Broadcast sender fanning messages out to all connections.
    tx: broadcast::Sender<ServerMessage>,
}

impl AppState {
    /// Create application state around a fresh board.
    pub fn new(config: BoardConfig) -> Self {
        let (tx, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            board: Mutex::new(Board::new(config)),
            tx,
        }
    }

    /// Subscribe to the broadcast stream.
    pub fn subscribe(&self) -> broadcast::Receiver<ServerMessage> {
        self.tx.subscribe()
    }

    /// Push a message to every connected client.
    ///
    /// Returns the number of receivers it reached. Zero receivers is not
    /// an error — it simply means nobody is connected right now.
    pub fn broadcast(&self, message: &ServerMessage) -> usize {
        self.tx.send(message.clone()).unwrap_or(0)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}
