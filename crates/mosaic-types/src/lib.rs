//! Shared type definitions for the Mosaic board.
//!
//! This crate is the single source of truth for the data shapes that cross
//! the wire between the Mosaic server and its clients. Types defined here
//! flow downstream to `TypeScript` via `ts-rs` for the board frontend.
//!
//! All wire-facing structs serialize with camelCase field names, matching
//! what the frontend consumes. Timestamps are epoch milliseconds (`i64`),
//! the same representation the browser's `Date.now()` produces.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrapper for player identifiers
//! - [`grid`] -- [`Cell`] and the fixed 10x10 [`Grid`]
//! - [`history`] -- [`GridUpdate`], [`HistoryEntry`], [`TimeRange`]
//! - [`player`] -- [`Player`] connection records

pub mod grid;
pub mod history;
pub mod ids;
pub mod player;

// Re-export all public types at crate root for convenience.
pub use grid::{Cell, GRID_SIZE, Grid};
pub use history::{GridUpdate, HistoryEntry, TimeRange};
pub use ids::PlayerId;
pub use player::Player;
