//! Shared-state core for the Mosaic board.
//!
//! Three small in-memory state machines, composed by the [`Board`] engine:
//!
//! - [`GridStore`] owns the authoritative 10x10 grid and validates and
//!   applies single-cell writes.
//! - [`PlayerRegistry`] owns per-connection identity and the per-player
//!   write cooldown.
//! - [`HistoryLog`] owns the time-ordered sequence of applied updates,
//!   grouped into timestamped batches, and answers "grid as of time T"
//!   replay queries.
//!
//! The registry and the grid store have no dependency on each other; the
//! history log depends only on the shared cell and update shapes from
//! `mosaic-types`. Cross-component communication is by value — no component
//! hands out references into another's state.
//!
//! # Concurrency
//!
//! Nothing in this crate blocks, suspends, or spawns. The transport layer
//! serializes all access to a [`Board`] behind one async mutex, so every
//! command runs to completion before the next starts and validation happens
//! inside the same critical section as the mutation it guards. Cooldown
//! expiry and batch grouping read the [`Clock`] at call time; there are no
//! background timers.

pub mod board;
pub mod clock;
pub mod config;
pub mod error;
pub mod grid_store;
pub mod history;
pub mod players;

// Re-export primary types for convenience.
pub use board::{Board, CooldownNotice, JoinSnapshot, WriteAccepted};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BoardConfig, ConfigError};
pub use error::WriteError;
pub use grid_store::GridStore;
pub use history::{GROUPING_WINDOW_MS, HistoryLog};
pub use players::{COOLDOWN_DURATION_MS, PlayerRegistry};
