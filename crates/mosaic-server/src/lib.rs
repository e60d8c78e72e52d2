//! Real-time transport for the Mosaic board.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) carrying the board protocol: each
//!   connection is one player; applied writes fan out to every connection
//!   via [`tokio::sync::broadcast`]
//! - **REST endpoints** for read-only queries (current grid, history
//!   timeline, time-travel replay, recent updates, player count)
//! - **Minimal HTML status page** (`GET /`) showing board occupancy and
//!   API links
//!
//! # Architecture
//!
//! All mutation goes through the [`mosaic_core::Board`] behind a single
//! async mutex in [`AppState`], so commands from concurrent connections
//! are handled one at a time — the core's validation always runs in the
//! same critical section as the write it guards. Broadcast delivery is
//! fire-and-forget: a lagging client skips ahead to the newest message.
//!
//! [`AppState`]: state::AppState

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
