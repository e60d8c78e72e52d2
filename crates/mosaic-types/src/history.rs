//! Records of applied writes and their grouping into timeline batches.
//!
//! A [`GridUpdate`] is produced exactly once per successful write and never
//! mutated afterwards. The history log groups updates recorded within one
//! second into a single [`HistoryEntry`] so a burst of writes reads as one
//! timeline event on the frontend's history slider.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::grid::Grid;
use crate::ids::PlayerId;

/// Immutable record of one applied cell write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GridUpdate {
    /// Row of the written cell.
    pub row: usize,
    /// Column of the written cell.
    pub col: usize,
    /// The character written.
    pub value: String,
    /// The player who wrote it.
    pub player_id: PlayerId,
    /// When the write was applied, epoch milliseconds.
    pub timestamp: i64,
}

/// One batch on the history timeline.
///
/// Invariants: `updates` is never empty, and `timestamp` equals the
/// `timestamp` of the first contained update. Entries are append-only and
/// ordered ascending by `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HistoryEntry {
    /// Timestamp of the batch, epoch milliseconds.
    pub timestamp: i64,
    /// The updates grouped into this batch, in recorded order.
    pub updates: Vec<GridUpdate>,
    /// Optional full-board snapshot attached to this batch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub grid_snapshot: Option<Grid>,
}

/// The span of the recorded history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TimeRange {
    /// Timestamp of the first batch, epoch milliseconds.
    pub start: i64,
    /// Timestamp of the last batch, epoch milliseconds.
    pub end: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_with_camel_case_keys() {
        let update = GridUpdate {
            row: 2,
            col: 5,
            value: String::from("★"),
            player_id: PlayerId::new(),
            timestamp: 1_700_000_000_000,
        };
        let json = serde_json::to_value(&update).unwrap_or_default();
        assert!(json.get("playerId").is_some());
        assert!(json.get("timestamp").is_some());
        assert!(json.get("player_id").is_none());
    }

    #[test]
    fn entry_omits_absent_snapshot() {
        let entry = HistoryEntry {
            timestamp: 42,
            updates: vec![GridUpdate {
                row: 0,
                col: 0,
                value: String::from("A"),
                player_id: PlayerId::new(),
                timestamp: 42,
            }],
            grid_snapshot: None,
        };
        let json = serde_json::to_value(&entry).unwrap_or_default();
        assert!(json.get("gridSnapshot").is_none());
    }
}
