//! The board engine: grid, registry, and history behind one write path.
//!
//! [`Board`] composes the three stores and implements the command flow the
//! transport drives: a join registers the player and returns everything a
//! fresh client renders; a write passes the cooldown gate, then the grid's
//! validation, and only a fully applied write reaches the history log and
//! re-arms the cooldown. A failed write changes nothing anywhere.
//!
//! The engine itself is synchronous and lock-free; the transport serializes
//! access to it (one command at a time), which is what makes the
//! check-then-write sequence in [`Board::write_cell`] race-free.

use mosaic_types::{Grid, GridUpdate, HistoryEntry, PlayerId, TimeRange};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::config::BoardConfig;
use crate::error::WriteError;
use crate::grid_store::GridStore;
use crate::history::HistoryLog;
use crate::players::PlayerRegistry;

/// Everything a freshly joined client needs to render.
#[derive(Debug, Clone)]
pub struct JoinSnapshot {
    /// The identity minted for the connection.
    pub player: PlayerId,
    /// The current board.
    pub grid: Grid,
    /// The batched history timeline.
    pub history: Vec<HistoryEntry>,
    /// Number of registered players, the joiner included.
    pub player_count: usize,
}

/// The cooldown armed by a successful write, as reported to the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownNotice {
    /// Length of the cooldown, milliseconds.
    pub duration_ms: i64,
    /// When the cooldown ends, epoch milliseconds.
    pub end_time_ms: i64,
}

/// The outcome of an accepted write.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteAccepted {
    /// The update that was applied and recorded.
    pub update: GridUpdate,
    /// The board after the write.
    pub grid: Grid,
    /// The cooldown now gating the writer.
    pub cooldown: CooldownNotice,
}

/// The shared-state core composed behind a single command interface.
#[derive(Debug, Clone)]
pub struct Board<C: Clock + Clone = SystemClock> {
    grid: GridStore,
    players: PlayerRegistry<C>,
    history: HistoryLog<C>,
    clock: C,
    cooldown_ms: i64,
}

impl Board<SystemClock> {
    /// Create a board on the system clock.
    pub fn new(config: BoardConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for Board<SystemClock> {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl<C: Clock + Clone> Board<C> {
    /// Create a board on the given clock.
    ///
    /// The registry and the history log share the same clock instance, so
    /// a [`ManualClock`](crate::clock::ManualClock) drives every temporal
    /// decision in a test from one place.
    pub fn with_clock(config: BoardConfig, clock: C) -> Self {
        Self {
            grid: GridStore::new(),
            players: PlayerRegistry::with_cooldown(clock.clone(), config.cooldown_ms),
            history: HistoryLog::with_window(clock.clone(), config.grouping_window_ms),
            clock,
            cooldown_ms: config.cooldown_ms,
        }
    }

    /// Register a connection and return its initial view of the board.
    pub fn join(&mut self, player: PlayerId) -> JoinSnapshot {
        self.players.register(player);
        info!(%player, count = self.players.count(), "player joined");
        JoinSnapshot {
            player,
            grid: self.grid.current_grid(),
            history: self.history.entries().to_vec(),
            player_count: self.players.count(),
        }
    }

    /// Unregister a connection. Returns the new player count.
    ///
    /// Independent of any in-flight write: a write already applied is not
    /// rolled back by the disconnect that follows it.
    pub fn leave(&mut self, player: PlayerId) -> usize {
        self.players.unregister(player);
        info!(%player, count = self.players.count(), "player left");
        self.players.count()
    }

    /// Attempt a single-cell write on behalf of `player`.
    ///
    /// The gates run in order: identity, cooldown, then the grid's own
    /// validation inside [`GridStore::apply`]. Only after the cell is
    /// applied does the write reach the history log and re-arm the
    /// writer's cooldown.
    ///
    /// # Errors
    ///
    /// - [`WriteError::UnknownPlayer`] when the identity is unregistered.
    /// - [`WriteError::Cooldown`] with the remaining milliseconds when the
    ///   writer is rate-limited.
    /// - [`WriteError::OutOfBounds`], [`WriteError::CellOccupied`], or
    ///   [`WriteError::EmptyValue`] from grid validation.
    pub fn write_cell(
        &mut self,
        player: PlayerId,
        row: usize,
        col: usize,
        value: &str,
    ) -> Result<WriteAccepted, WriteError> {
        if !self.players.is_registered(player) {
            return Err(WriteError::UnknownPlayer { player });
        }
        if !self.players.can_write(player) {
            let remaining_ms = self.players.remaining_cooldown(player);
            debug!(%player, remaining_ms, "write rejected: cooling down");
            return Err(WriteError::Cooldown { remaining_ms });
        }

        self.grid.apply(row, col, value, player)?;

        let now = self.clock.now_ms();
        let update = GridUpdate {
            row,
            col,
            value: value.to_owned(),
            player_id: player,
            timestamp: now,
        };
        self.history.record(update.clone());
        self.players.arm_cooldown(player);

        info!(%player, row, col, value, "cell written");
        Ok(WriteAccepted {
            update,
            grid: self.grid.current_grid(),
            cooldown: CooldownNotice {
                duration_ms: self.cooldown_ms,
                end_time_ms: now.saturating_add(self.cooldown_ms),
            },
        })
    }

    /// A full copy of the current board.
    pub fn current_grid(&self) -> Grid {
        self.grid.current_grid()
    }

    /// The batched history timeline.
    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    /// The board as it stood at `target` (epoch milliseconds).
    pub fn grid_at_time(&self, target: i64) -> Grid {
        self.history.grid_at_time(target)
    }

    /// Number of registered players.
    pub fn player_count(&self) -> usize {
        self.players.count()
    }

    /// Milliseconds until `player` may write again, clamped to zero.
    pub fn remaining_cooldown(&self, player: PlayerId) -> i64 {
        self.players.remaining_cooldown(player)
    }

    /// First and last batch timestamps, or `None` when the history is empty.
    pub fn time_range(&self) -> Option<TimeRange> {
        self.history.time_range()
    }

    /// Total number of recorded updates, ignoring batching.
    pub fn update_count(&self) -> usize {
        self.history.update_count()
    }

    /// The last `limit` updates, in recorded order.
    pub fn recent_updates(&self, limit: usize) -> &[GridUpdate] {
        self.history.recent_updates(limit)
    }

    /// All updates by `player`, in recorded order.
    pub fn updates_by_player(&self, player: PlayerId) -> Vec<GridUpdate> {
        self.history.updates_by_player(player)
    }

    /// Attach a board snapshot to the batch stamped exactly `timestamp`.
    pub fn snapshot_batch(&mut self, timestamp: i64) {
        let grid = self.grid.current_grid();
        self.history.snapshot_batch(&grid, timestamp);
    }

    /// Administrative reset: empty the board, drop the history, and clear
    /// every cooldown. Registered players stay connected.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.history.clear();
        self.players.reset_all_cooldowns();
        info!("board reset");
    }
}
