//! # rap-memory
//!
//! Core of a memory-matching card game played with themed rapper-trivia
//! editions. The player flips tiles two at a time looking for pairs; the game
//! keeps time, rewards quick consecutive matches with combos, and stores the
//! fastest finishes per edition.
//!
//! ## Design Principles
//!
//! 1. **Host-driven**: No timers, threads or I/O of its own. The host passes
//!    the current time into `flip`/`advance` and supplies the edition source,
//!    storage, audio backend and presentation through traits.
//!
//! 2. **Owned state**: Each game start builds a new `MatchSession` that owns
//!    its scheduled work. Nothing from a previous session can fire into the next.
//!
//! 3. **Closed catalog**: Editions are an enum; per-edition data lives in
//!    `EditionMap` tables rather than string-keyed maps.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, scheduler
//! - `cards`: Card definitions and the edition catalog
//! - `loader`: Edition sources and the memoizing loader
//! - `deck`: Shuffled, doubled decks
//! - `session`: The flip/match/combo/win state machine
//! - `leaderboard`: Per-edition top times over a key-value store
//! - `audio`: Effects, background loops, win sounds, fades
//! - `game`: The controller tying it all together, and the presentation seam
//! - `web`: Browser backends (feature = "web")

pub mod core;
pub mod cards;
pub mod loader;
pub mod deck;
pub mod session;
pub mod leaderboard;
pub mod audio;
pub mod game;

#[cfg(feature = "web")]
pub mod web;

// Re-export commonly used types
pub use crate::core::{GameConfig, GameRng, Scheduler, TaskId};

pub use crate::cards::{
    CardDefinition, CardId, Edition, EditionError, EditionId, EditionMap, EditionRecord,
};

pub use crate::loader::{DirSource, EditionLoader, EditionSource, LoadError, MemorySource};

pub use crate::deck::{Deck, TileId};

pub use crate::session::{MatchSession, SessionEvent, TileState};

pub use crate::leaderboard::{
    KeyValueStore, Leaderboard, LeaderboardEntry, MemoryStore, StoreError,
};

pub use crate::audio::{
    AudioBackend, AudioChannel, AudioDirector, EffectKind, MemoryBackend, MemoryChannel,
    PlaybackError,
};

pub use crate::game::{Game, NullPresentation, Presentation};
