//! The authoritative board state and its single write path.
//!
//! [`GridStore`] exclusively owns the [`Grid`]. Writes go through
//! [`GridStore::apply`], which re-runs validation immediately before
//! mutating, so there is no gap between the check and the write even when
//! a caller validated earlier. Reads hand out clones — callers never hold
//! a reference into the live board and never observe later in-place
//! mutation through a snapshot.

use mosaic_types::{Cell, Grid, PlayerId};
use tracing::debug;

use crate::error::WriteError;

/// Owner of the authoritative 10x10 grid.
#[derive(Debug, Clone, Default)]
pub struct GridStore {
    grid: Grid,
}

impl GridStore {
    /// Create a store with an all-empty board.
    pub fn new() -> Self {
        Self { grid: Grid::new() }
    }

    /// A full copy of the current board.
    pub fn current_grid(&self) -> Grid {
        self.grid.clone()
    }

    /// The cell at `(row, col)`, or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row, col)
    }

    /// Classify why a write would be rejected, or `Ok(())` if it would land.
    ///
    /// A write is rejected when the coordinates fall off the board, the
    /// target cell is already occupied, or the value is empty. There is no
    /// other constraint on the value's content: any non-empty string is
    /// accepted, and callers are trusted to submit a single display
    /// character.
    pub fn check(&self, row: usize, col: usize, value: &str) -> Result<(), WriteError> {
        let Some(cell) = self.grid.get(row, col) else {
            return Err(WriteError::OutOfBounds { row, col });
        };
        if !cell.is_empty() {
            return Err(WriteError::CellOccupied { row, col });
        }
        if value.is_empty() {
            return Err(WriteError::EmptyValue);
        }
        Ok(())
    }

    /// Whether a write to `(row, col)` with `value` would be accepted.
    pub fn validate(&self, row: usize, col: usize, value: &str) -> bool {
        self.check(row, col, value).is_ok()
    }

    /// Apply a single-cell write.
    ///
    /// Re-validates internally and only then mutates, so a failure changes
    /// nothing. This is the one write path; there are no partial writes and
    /// no retries.
    ///
    /// # Errors
    ///
    /// Returns the [`WriteError`] that [`check`](Self::check) produces for
    /// invalid writes.
    pub fn apply(
        &mut self,
        row: usize,
        col: usize,
        value: &str,
        player: PlayerId,
    ) -> Result<(), WriteError> {
        self.check(row, col, value)?;
        self.grid.set(row, col, Cell::occupied(value, player));
        debug!(row, col, %player, "cell applied");
        Ok(())
    }

    /// Return the board to the all-empty state.
    ///
    /// Administrative and test use only; ordinary players cannot reach this.
    pub fn reset(&mut self) {
        self.grid.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_occupies_the_target_cell() {
        let mut store = GridStore::new();
        let player = PlayerId::new();

        assert!(store.apply(0, 0, "★", player).is_ok());
        let cell = store.cell(0, 0);
        assert_eq!(cell.map(|c| c.value.as_str()), Some("★"));
        assert_eq!(cell.and_then(|c| c.player_id), Some(player));
    }

    #[test]
    fn occupied_cell_fails_validation_after_apply() {
        let mut store = GridStore::new();
        let player = PlayerId::new();

        assert!(store.validate(4, 4, "A"));
        assert!(store.apply(4, 4, "A", player).is_ok());
        // Idempotent occupancy: the same cell can never be written twice.
        assert!(!store.validate(4, 4, "B"));
    }

    #[test]
    fn second_writer_is_rejected_and_cell_unchanged() {
        let mut store = GridStore::new();
        let first = PlayerId::new();
        let second = PlayerId::new();

        assert!(store.apply(0, 0, "A", first).is_ok());
        assert_eq!(
            store.apply(0, 0, "B", second),
            Err(WriteError::CellOccupied { row: 0, col: 0 })
        );
        let cell = store.cell(0, 0);
        assert_eq!(cell.map(|c| c.value.as_str()), Some("A"));
        assert_eq!(cell.and_then(|c| c.player_id), Some(first));
    }

    #[test]
    fn out_of_bounds_write_is_rejected() {
        let mut store = GridStore::new();
        let player = PlayerId::new();

        assert_eq!(
            store.apply(10, 0, "A", player),
            Err(WriteError::OutOfBounds { row: 10, col: 0 })
        );
        assert_eq!(
            store.apply(0, 10, "A", player),
            Err(WriteError::OutOfBounds { row: 0, col: 10 })
        );
    }

    #[test]
    fn empty_value_is_rejected_without_side_effects() {
        let mut store = GridStore::new();
        let player = PlayerId::new();
        let before = store.current_grid();

        assert_eq!(store.apply(2, 2, "", player), Err(WriteError::EmptyValue));
        assert_eq!(store.current_grid(), before);
    }

    #[test]
    fn multi_unit_values_are_accepted() {
        // The store only checks non-emptiness; a multi-codepoint string is
        // the caller's problem, not a rejection.
        let mut store = GridStore::new();
        assert!(store.apply(1, 1, "🧱🧱", PlayerId::new()).is_ok());
    }

    #[test]
    fn snapshot_does_not_track_later_writes() {
        let mut store = GridStore::new();
        let snapshot = store.current_grid();
        assert!(store.apply(5, 5, "Z", PlayerId::new()).is_ok());
        assert_eq!(snapshot.get(5, 5).map(Cell::is_empty), Some(true));
    }

    #[test]
    fn reset_empties_the_board() {
        let mut store = GridStore::new();
        assert!(store.apply(3, 3, "A", PlayerId::new()).is_ok());
        store.reset();
        assert_eq!(store.current_grid(), Grid::new());
        assert!(store.validate(3, 3, "A"));
    }
}
