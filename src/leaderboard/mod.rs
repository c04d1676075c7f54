//! Local high-score tables.
//!
//! - `KeyValueStore`: durable string storage supplied by the host
//! - `Leaderboard`: top-N fastest times per edition on top of a store

pub mod board;
pub mod store;

pub use board::{Leaderboard, LeaderboardEntry, KEY_PREFIX};
pub use store::{KeyValueStore, MemoryStore, StoreError};
