//! The JSON message protocol spoken over the `WebSocket`.
//!
//! Messages are tagged unions (`{"type": "updateCell", ...}`) with
//! camelCase fields, named after the events the original Socket.IO
//! frontend listens for. [`ClientMessage`] is what a connection may send;
//! [`ServerMessage`] is everything the server pushes, whether addressed to
//! one socket or broadcast to all.

use mosaic_core::WriteError;
use mosaic_types::{Grid, GridUpdate, HistoryEntry};
use serde::{Deserialize, Serialize};

/// Commands a connected client may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Write a single character into an empty cell.
    #[serde(rename_all = "camelCase")]
    UpdateCell {
        /// Target row.
        row: usize,
        /// Target column.
        col: usize,
        /// The character to write.
        value: String,
    },

    /// Ask for the full batched history timeline.
    RequestHistory,

    /// Ask for the board as it stood at a past instant.
    #[serde(rename_all = "camelCase")]
    TimeTravel {
        /// Target instant, epoch milliseconds.
        timestamp: i64,
    },
}

/// Coarse classification of a rejected command, for client-side handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// The writer is rate-limited; `remainingMs` says for how long.
    Cooldown,
    /// The write failed grid validation (bounds, occupancy, empty value).
    InvalidCell,
    /// The writer is not registered (write raced a disconnect).
    UnknownPlayer,
}

/// Everything the server pushes to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// The full board, sent to a connection right after it joins.
    InitialGrid {
        /// The current board.
        grid: Grid,
    },

    /// The batched history timeline.
    History {
        /// All timeline batches, oldest first.
        entries: Vec<HistoryEntry>,
    },

    /// The number of connected players changed.
    PlayerCount {
        /// Current player count.
        count: usize,
    },

    /// The full board after an applied write, sent to the writer.
    GridUpdated {
        /// The board including the new write.
        grid: Grid,
    },

    /// One applied write, broadcast to every connection.
    CellUpdated {
        /// The applied update.
        update: GridUpdate,
    },

    /// The writer's cooldown was armed by a successful write.
    #[serde(rename_all = "camelCase")]
    CooldownStarted {
        /// Cooldown length, milliseconds.
        duration: i64,
        /// When the cooldown ends, epoch milliseconds.
        end_time: i64,
    },

    /// Reply to a time-travel request.
    #[serde(rename_all = "camelCase")]
    TimeTravelGrid {
        /// The requested instant, epoch milliseconds.
        timestamp: i64,
        /// The board as it stood then.
        grid: Grid,
    },

    /// A command was rejected. Sent only to the originating connection.
    #[serde(rename_all = "camelCase")]
    Error {
        /// Coarse classification for the client.
        kind: ErrorKind,
        /// Fine-grained machine-readable reason.
        reason: String,
        /// Human-readable description.
        message: String,
        /// Milliseconds left on the cooldown, for `kind == cooldown`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        remaining_ms: Option<i64>,
    },
}

impl ServerMessage {
    /// Build the error message for a rejected write.
    pub fn write_rejected(error: &WriteError) -> Self {
        let (kind, remaining_ms) = match error {
            WriteError::Cooldown { remaining_ms } => (ErrorKind::Cooldown, Some(*remaining_ms)),
            WriteError::UnknownPlayer { .. } => (ErrorKind::UnknownPlayer, None),
            WriteError::OutOfBounds { .. }
            | WriteError::CellOccupied { .. }
            | WriteError::EmptyValue => (ErrorKind::InvalidCell, None),
        };
        Self::Error {
            kind,
            reason: error.kind().to_owned(),
            message: error.to_string(),
            remaining_ms,
        }
    }
}
