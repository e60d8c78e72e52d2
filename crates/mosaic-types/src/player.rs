//! Per-connection player records.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::PlayerId;

/// A connected player.
///
/// Created when the connection is established and dropped when it closes.
/// `cooldown_end_time` is set on a successful write and cleared lazily the
/// first time the registry observes that it has passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Player {
    /// Connection-scoped identity.
    pub id: PlayerId,
    /// When the active cooldown ends (epoch milliseconds), if one is armed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub cooldown_end_time: Option<i64>,
    /// When the player joined, epoch milliseconds.
    pub joined_at: i64,
}

impl Player {
    /// A freshly joined player with no cooldown.
    pub const fn joined(id: PlayerId, joined_at: i64) -> Self {
        Self {
            id,
            cooldown_end_time: None,
            joined_at,
        }
    }
}
