//! Time-ordered log of applied updates, batch grouping, and replay.
//!
//! [`HistoryLog`] exclusively owns two append-only lists: the flat sequence
//! of every [`GridUpdate`] ever applied, and the derived sequence of
//! [`HistoryEntry`] batches the frontend's timeline slider scrubs through.
//! Updates recorded within one [`GROUPING_WINDOW_MS`] of the previous
//! batch's timestamp collapse into that batch, so a burst of writes reads
//! as a single timeline event while spaced-out writes stay distinct.
//!
//! "Time travel" is [`HistoryLog::grid_at_time`]: a pure replay of every
//! update at or before the target instant onto a fresh board.

use mosaic_types::{Cell, Grid, GridUpdate, HistoryEntry, PlayerId, TimeRange};
use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Writes recorded within this window of the previous batch join it,
/// milliseconds.
pub const GROUPING_WINDOW_MS: i64 = 1_000;

/// Owner of the applied-update log and its batched timeline.
#[derive(Debug, Clone)]
pub struct HistoryLog<C = SystemClock> {
    updates: Vec<GridUpdate>,
    entries: Vec<HistoryEntry>,
    clock: C,
    window_ms: i64,
}

impl HistoryLog<SystemClock> {
    /// Create an empty log on the system clock with the default window.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for HistoryLog<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> HistoryLog<C> {
    /// Create an empty log on the given clock with the default window.
    pub fn with_clock(clock: C) -> Self {
        Self::with_window(clock, GROUPING_WINDOW_MS)
    }

    /// Create an empty log with an explicit grouping window.
    pub const fn with_window(clock: C, window_ms: i64) -> Self {
        Self {
            updates: Vec::new(),
            entries: Vec::new(),
            clock,
            window_ms,
        }
    }

    /// Append an applied update and fold it into the batched timeline.
    ///
    /// A new batch opens when there is no batch yet, or when wall-clock
    /// *now* is more than the grouping window past the last batch's
    /// timestamp. The new batch is stamped with the update's own
    /// `timestamp`. Note the asymmetry: the grouping decision compares
    /// *now* against the last batch, not the update's timestamp, so a
    /// caller recording stale updates can produce a batch whose contained
    /// timestamps stray outside the window. Past entries are never
    /// reordered to compensate.
    pub fn record(&mut self, update: GridUpdate) {
        self.updates.push(update.clone());

        let now = self.clock.now_ms();
        let open_new_batch = self
            .entries
            .last()
            .is_none_or(|last| now.saturating_sub(last.timestamp) > self.window_ms);

        if open_new_batch {
            debug!(timestamp = update.timestamp, "opening history batch");
            self.entries.push(HistoryEntry {
                timestamp: update.timestamp,
                updates: vec![update],
                grid_snapshot: None,
            });
        } else if let Some(last) = self.entries.last_mut() {
            last.updates.push(update);
        }
    }

    /// The batched timeline, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Rebuild the board as it stood at `target` (epoch milliseconds).
    ///
    /// Replays, in batch order then intra-batch append order, every update
    /// whose batch and own timestamps are at or before `target`. A later
    /// update to the same cell overwrites an earlier one by replay order.
    /// Pure and idempotent: the same `target` against the same history
    /// always yields an identical board.
    pub fn grid_at_time(&self, target: i64) -> Grid {
        let mut grid = Grid::new();
        for entry in &self.entries {
            if entry.timestamp > target {
                continue;
            }
            for update in &entry.updates {
                if update.timestamp <= target {
                    // Updates come from validated writes; an off-board
                    // record is skipped rather than panicking.
                    let _ = grid.set(
                        update.row,
                        update.col,
                        Cell::occupied(update.value.clone(), update.player_id),
                    );
                }
            }
        }
        grid
    }

    /// Total number of recorded updates, ignoring batching.
    pub fn update_count(&self) -> usize {
        self.updates.len()
    }

    /// First and last batch timestamps, or `None` when empty.
    pub fn time_range(&self) -> Option<TimeRange> {
        let start = self.entries.first()?.timestamp;
        let end = self.entries.last()?.timestamp;
        Some(TimeRange { start, end })
    }

    /// Drop every recorded update and batch.
    pub fn clear(&mut self) {
        self.updates.clear();
        self.entries.clear();
    }

    /// All updates by `player`, in recorded order.
    pub fn updates_by_player(&self, player: PlayerId) -> Vec<GridUpdate> {
        self.updates
            .iter()
            .filter(|update| update.player_id == player)
            .cloned()
            .collect()
    }

    /// The last `limit` updates from the flat list, in recorded order.
    pub fn recent_updates(&self, limit: usize) -> &[GridUpdate] {
        let start = self.updates.len().saturating_sub(limit);
        self.updates.get(start..).unwrap_or(&[])
    }

    /// Attach a deep copy of `grid` to the batch stamped exactly
    /// `timestamp`.
    ///
    /// Silently does nothing when no batch carries that exact timestamp;
    /// callers must use a timestamp already present as a batch boundary.
    pub fn snapshot_batch(&mut self, grid: &Grid, timestamp: i64) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.timestamp == timestamp)
        {
            entry.grid_snapshot = Some(grid.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn log_at(start_ms: i64) -> (HistoryLog<ManualClock>, ManualClock) {
        let clock = ManualClock::new(start_ms);
        (HistoryLog::with_clock(clock.clone()), clock)
    }

    fn update(row: usize, col: usize, value: &str, player: PlayerId, ts: i64) -> GridUpdate {
        GridUpdate {
            row,
            col,
            value: value.to_owned(),
            player_id: player,
            timestamp: ts,
        }
    }

    #[test]
    fn updates_within_the_window_share_a_batch() {
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();

        log.record(update(0, 0, "A", player, 0));
        clock.advance(500);
        log.record(update(0, 1, "B", player, 500));

        assert_eq!(log.entries().len(), 1);
        assert_eq!(log.entries().first().map(|e| e.updates.len()), Some(2));
        assert_eq!(log.entries().first().map(|e| e.timestamp), Some(0));
        assert_eq!(log.update_count(), 2);
    }

    #[test]
    fn a_gap_past_the_window_opens_a_new_batch() {
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();

        log.record(update(0, 0, "A", player, 0));
        clock.advance(500);
        log.record(update(0, 1, "B", player, 500));
        clock.advance(1_100);
        log.record(update(0, 2, "C", player, 1_600));

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries().last().map(|e| e.updates.len()), Some(1));
        assert_eq!(log.entries().last().map(|e| e.timestamp), Some(1_600));
    }

    #[test]
    fn a_gap_of_exactly_the_window_still_groups() {
        // The rule is strictly-greater-than: now - last == window joins the
        // existing batch.
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();

        log.record(update(0, 0, "A", player, 0));
        clock.advance(1_000);
        log.record(update(0, 1, "B", player, 1_000));

        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn grouping_compares_now_against_the_last_batch_not_the_update() {
        // A stale update recorded after the window has passed opens a new
        // batch stamped with its own (old) timestamp. The log preserves
        // this looseness rather than reordering past entries.
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();

        log.record(update(0, 0, "A", player, 0));
        clock.advance(2_000);
        log.record(update(0, 1, "B", player, 100));

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries().last().map(|e| e.timestamp), Some(100));
    }

    #[test]
    fn replay_is_deterministic_and_idempotent() {
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();

        log.record(update(0, 0, "A", player, 0));
        clock.advance(1_500);
        log.record(update(1, 1, "B", player, 1_500));

        let first = log.grid_at_time(1_500);
        let second = log.grid_at_time(1_500);
        assert_eq!(first, second);
    }

    #[test]
    fn replay_at_a_midpoint_excludes_later_updates() {
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();

        log.record(update(0, 0, "A", player, 0));
        clock.advance(1_500);
        log.record(update(1, 1, "B", player, 1_500));

        let grid = log.grid_at_time(700);
        assert_eq!(grid.get(0, 0).map(|c| c.value.as_str()), Some("A"));
        assert_eq!(grid.get(1, 1).map(Cell::is_empty), Some(true));
    }

    #[test]
    fn replay_past_the_last_update_matches_a_live_board() {
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();
        let mut live = Grid::new();

        for (i, ts) in [(0_usize, 0_i64), (1, 1_200), (2, 2_400)] {
            clock.set(ts);
            log.record(update(i, i, "X", player, ts));
            assert!(live.set(i, i, Cell::occupied("X", player)));
        }

        assert_eq!(log.grid_at_time(i64::MAX), live);
    }

    #[test]
    fn replay_applies_same_cell_updates_in_append_order() {
        // The log itself does not enforce first-writer-wins; if a caller
        // records two updates to one cell, the later one wins the replay.
        let (mut log, _) = log_at(0);
        let first = PlayerId::new();
        let second = PlayerId::new();

        log.record(update(4, 4, "A", first, 0));
        log.record(update(4, 4, "B", second, 0));

        let grid = log.grid_at_time(10);
        assert_eq!(grid.get(4, 4).map(|c| c.value.as_str()), Some("B"));
        assert_eq!(grid.get(4, 4).and_then(|c| c.player_id), Some(second));
    }

    #[test]
    fn time_range_spans_first_to_last_batch() {
        let (mut log, clock) = log_at(0);
        let player = PlayerId::new();
        assert_eq!(log.time_range(), None);

        log.record(update(0, 0, "A", player, 0));
        clock.advance(5_000);
        log.record(update(0, 1, "B", player, 5_000));

        assert_eq!(log.time_range(), Some(TimeRange { start: 0, end: 5_000 }));
    }

    #[test]
    fn updates_by_player_filters_the_flat_list_in_order() {
        let (mut log, _) = log_at(0);
        let alice = PlayerId::new();
        let bob = PlayerId::new();

        log.record(update(0, 0, "A", alice, 0));
        log.record(update(0, 1, "B", bob, 1));
        log.record(update(0, 2, "C", alice, 2));

        let mine = log.updates_by_player(alice);
        let values: Vec<&str> = mine.iter().map(|u| u.value.as_str()).collect();
        assert_eq!(values, vec!["A", "C"]);
    }

    #[test]
    fn recent_updates_returns_the_tail() {
        let (mut log, _) = log_at(0);
        let player = PlayerId::new();
        for i in 0..5_usize {
            log.record(update(0, i, "X", player, 0));
        }

        assert_eq!(log.recent_updates(2).len(), 2);
        assert_eq!(
            log.recent_updates(2).first().map(|u| u.col),
            Some(3)
        );
        // A limit past the length returns everything.
        assert_eq!(log.recent_updates(100).len(), 5);
    }

    #[test]
    fn snapshot_attaches_only_on_an_exact_batch_timestamp() {
        let (mut log, _) = log_at(0);
        let player = PlayerId::new();
        log.record(update(0, 0, "A", player, 0));

        let grid = log.grid_at_time(0);
        log.snapshot_batch(&grid, 999);
        assert!(
            log.entries()
                .first()
                .is_some_and(|e| e.grid_snapshot.is_none())
        );

        log.snapshot_batch(&grid, 0);
        assert!(
            log.entries()
                .first()
                .is_some_and(|e| e.grid_snapshot.is_some())
        );
    }

    #[test]
    fn clear_empties_both_lists() {
        let (mut log, _) = log_at(0);
        log.record(update(0, 0, "A", PlayerId::new(), 0));
        log.clear();
        assert_eq!(log.update_count(), 0);
        assert!(log.entries().is_empty());
        assert_eq!(log.time_range(), None);
    }
}
