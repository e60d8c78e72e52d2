//! Rejection taxonomy for cell writes.
//!
//! Every way a write can be refused is a [`WriteError`] variant. All of
//! them are local, recoverable conditions reported back to the writer as a
//! value; none corrupts shared state and none is fatal to the process.
//! Retrying is the client's decision.

use mosaic_types::{GRID_SIZE, PlayerId};

/// Why a cell write was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    /// The target coordinates fall outside the board.
    #[error("cell ({row}, {col}) is outside the {GRID_SIZE}x{GRID_SIZE} board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The target cell already holds a value. First writer wins.
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// The submitted value has zero length.
    #[error("submitted value is empty")]
    EmptyValue,

    /// The writer is still cooling down from their previous write.
    #[error("cooling down for another {remaining_ms} ms")]
    Cooldown {
        /// Milliseconds until the writer may write again.
        remaining_ms: i64,
    },

    /// The writer is not registered (e.g. a write raced a disconnect).
    #[error("player {player} is not registered")]
    UnknownPlayer {
        /// The unregistered identity.
        player: PlayerId,
    },
}

impl WriteError {
    /// Stable machine-readable name for this rejection, as sent on the wire.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "outOfBounds",
            Self::CellOccupied { .. } => "cellOccupied",
            Self::EmptyValue => "emptyValue",
            Self::Cooldown { .. } => "cooldown",
            Self::UnknownPlayer { .. } => "unknownPlayer",
        }
    }
}
