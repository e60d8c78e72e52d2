//! Per-connection player records and the write cooldown gate.
//!
//! [`PlayerRegistry`] exclusively owns the player map. Each player is a
//! two-state machine, `NoCooldown <-> CoolingDown`: the board arms the
//! cooldown after a successful write, and it clears lazily the first time
//! [`PlayerRegistry::can_write`] observes that the expiry has passed. There
//! is no background timer — expiry is observed, not pushed, so the gate is
//! a pure function of the clock and the stored expiry.

use std::collections::BTreeMap;

use mosaic_types::{Player, PlayerId};
use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Minimum interval between a player's successful writes, milliseconds.
pub const COOLDOWN_DURATION_MS: i64 = 60_000;

/// Owner of per-connection identity and cooldown state.
#[derive(Debug, Clone)]
pub struct PlayerRegistry<C = SystemClock> {
    players: BTreeMap<PlayerId, Player>,
    clock: C,
    cooldown_ms: i64,
}

impl PlayerRegistry<SystemClock> {
    /// Create a registry on the system clock with the default cooldown.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for PlayerRegistry<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> PlayerRegistry<C> {
    /// Create a registry on the given clock with the default cooldown.
    pub fn with_clock(clock: C) -> Self {
        Self::with_cooldown(clock, COOLDOWN_DURATION_MS)
    }

    /// Create a registry with an explicit cooldown duration.
    pub const fn with_cooldown(clock: C, cooldown_ms: i64) -> Self {
        Self {
            players: BTreeMap::new(),
            clock,
            cooldown_ms,
        }
    }

    /// Register a player as of now.
    ///
    /// Re-registering an existing identity overwrites its record: it is
    /// treated as a fresh join, which also drops any armed cooldown.
    pub fn register(&mut self, id: PlayerId) {
        let joined_at = self.clock.now_ms();
        self.players.insert(id, Player::joined(id, joined_at));
        debug!(player = %id, "player registered");
    }

    /// Remove a player. No-op if the identity is not registered.
    pub fn unregister(&mut self, id: PlayerId) {
        if self.players.remove(&id).is_some() {
            debug!(player = %id, "player unregistered");
        }
    }

    /// Number of currently registered players.
    pub fn count(&self) -> usize {
        self.players.len()
    }

    /// Whether the identity is currently registered.
    pub fn is_registered(&self, id: PlayerId) -> bool {
        self.players.contains_key(&id)
    }

    /// The record for `id`, if registered.
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(&id)
    }

    /// Iterate over all registered players in id order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    /// Whether `id` may write right now.
    ///
    /// Returns `false` for unregistered identities and for players whose
    /// cooldown has not yet expired. If the stored expiry has passed, this
    /// observation clears it (lazy, idempotent) and returns `true`.
    pub fn can_write(&mut self, id: PlayerId) -> bool {
        let now = self.clock.now_ms();
        let Some(player) = self.players.get_mut(&id) else {
            return false;
        };
        match player.cooldown_end_time {
            None => true,
            Some(end) if now >= end => {
                player.cooldown_end_time = None;
                true
            }
            Some(_) => false,
        }
    }

    /// Arm the write cooldown for `id` starting now.
    ///
    /// No-op if the identity is not registered.
    pub fn arm_cooldown(&mut self, id: PlayerId) {
        let end = self.clock.now_ms().saturating_add(self.cooldown_ms);
        if let Some(player) = self.players.get_mut(&id) {
            player.cooldown_end_time = Some(end);
        }
    }

    /// Milliseconds until `id` may write again, clamped to zero.
    ///
    /// Returns `0` for unregistered identities and idle players.
    pub fn remaining_cooldown(&self, id: PlayerId) -> i64 {
        let now = self.clock.now_ms();
        self.players
            .get(&id)
            .and_then(|player| player.cooldown_end_time)
            .map_or(0, |end| end.saturating_sub(now).max(0))
    }

    /// Clear every registered player's cooldown.
    ///
    /// Administrative and test use only.
    pub fn reset_all_cooldowns(&mut self) {
        for player in self.players.values_mut() {
            player.cooldown_end_time = None;
        }
    }
}
