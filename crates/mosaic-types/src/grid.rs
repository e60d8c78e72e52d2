//! The shared character grid and its cells.
//!
//! The board is a fixed 10x10 row-major matrix of [`Cell`]. It is created
//! once at startup, mutated in place one cell at a time, and never resized.
//! [`Grid`] serializes transparently as a plain 2-D array, which is the
//! shape the frontend renders directly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PlayerId;

/// Side length of the board. The grid is always `GRID_SIZE` x `GRID_SIZE`.
pub const GRID_SIZE: usize = 10;

/// One cell of the board.
///
/// Invariant: `value.is_empty()` if and only if `player_id.is_none()`.
/// Use [`Cell::empty`] and [`Cell::occupied`] to construct cells so the
/// two fields never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Cell {
    /// The display character written into this cell, or `""` when empty.
    pub value: String,
    /// The player who wrote the current value, absent when the cell is empty.
    pub player_id: Option<PlayerId>,
}

impl Cell {
    /// An unoccupied cell.
    pub const fn empty() -> Self {
        Self {
            value: String::new(),
            player_id: None,
        }
    }

    /// A cell occupied by `player` with the given display value.
    pub fn occupied(value: impl Into<String>, player: PlayerId) -> Self {
        Self {
            value: value.into(),
            player_id: Some(player),
        }
    }

    /// Whether this cell is unoccupied.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::empty()
    }
}

/// The fixed 10x10 board, row-major.
///
/// A newtype over the cell matrix, so both serde and the generated
/// `TypeScript` binding see a bare 2-D array (`Array<Array<Cell>>` on the
/// wire). All access is bounds-checked; out-of-range coordinates read as
/// `None` and write as a rejected no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Grid(Vec<Vec<Cell>>);

impl Grid {
    /// Create an all-empty grid.
    pub fn new() -> Self {
        Self(vec![vec![Cell::empty(); GRID_SIZE]; GRID_SIZE])
    }

    /// Whether `(row, col)` lies on the board.
    pub const fn in_bounds(row: usize, col: usize) -> bool {
        row < GRID_SIZE && col < GRID_SIZE
    }

    /// The cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.0.get(row).and_then(|r| r.get(col))
    }

    /// Replace the cell at `(row, col)`.
    ///
    /// Returns `false` (and changes nothing) when the coordinates are out
    /// of bounds.
    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        match self.0.get_mut(row).and_then(|r| r.get_mut(col)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Iterate over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.0.iter().map(Vec::as_slice)
    }

    /// Return every cell to the empty state.
    pub fn reset(&mut self) {
        for row in &mut self.0 {
            for cell in row {
                *cell = Cell::empty();
            }
        }
    }

    /// Number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.0
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_empty() {
        let grid = Grid::new();
        assert_eq!(grid.rows().count(), GRID_SIZE);
        for row in grid.rows() {
            assert_eq!(row.len(), GRID_SIZE);
            assert!(row.iter().all(Cell::is_empty));
        }
        assert_eq!(grid.occupied_count(), 0);
    }

    #[test]
    fn cell_constructors_keep_value_and_occupant_in_agreement() {
        let empty = Cell::empty();
        assert!(empty.is_empty());
        assert!(empty.player_id.is_none());

        let player = PlayerId::new();
        let full = Cell::occupied("★", player);
        assert!(!full.is_empty());
        assert_eq!(full.player_id, Some(player));
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut grid = Grid::new();
        let player = PlayerId::new();
        assert!(grid.set(3, 7, Cell::occupied("A", player)));
        let cell = grid.get(3, 7);
        assert_eq!(cell.map(|c| c.value.as_str()), Some("A"));
        assert_eq!(cell.and_then(|c| c.player_id), Some(player));
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut grid = Grid::new();
        assert!(grid.get(GRID_SIZE, 0).is_none());
        assert!(grid.get(0, GRID_SIZE).is_none());
        assert!(!grid.set(GRID_SIZE, 0, Cell::empty()));
        assert!(!grid.set(0, usize::MAX, Cell::empty()));
    }

    #[test]
    fn reset_clears_every_cell() {
        let mut grid = Grid::new();
        let player = PlayerId::new();
        assert!(grid.set(0, 0, Cell::occupied("x", player)));
        assert!(grid.set(9, 9, Cell::occupied("y", player)));
        grid.reset();
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn grid_serializes_as_bare_two_dimensional_array() {
        let mut grid = Grid::new();
        let player = PlayerId::new();
        assert!(grid.set(0, 1, Cell::occupied("♥", player)));

        let json = serde_json::to_value(&grid).unwrap_or_default();
        let rows = json.as_array().map(Vec::len);
        assert_eq!(rows, Some(GRID_SIZE));

        let cell = json
            .pointer("/0/1")
            .cloned()
            .unwrap_or_default();
        assert_eq!(cell.get("value").and_then(serde_json::Value::as_str), Some("♥"));
        assert!(cell.get("playerId").is_some());
    }

    #[test]
    fn grid_binding_matches_the_wire_shape() {
        // The TypeScript binding must alias the bare 2-D array the wire
        // carries, not wrap it in an object.
        use ts_rs::TS;
        let decl = Grid::decl();
        assert!(decl.contains("Array<Array<Cell>>"), "unexpected binding: {decl}");
    }
}
