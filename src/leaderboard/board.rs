//! Per-edition top times.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::EditionId;
use crate::core::GameConfig;

use super::store::KeyValueStore;

/// Storage key prefix; the edition display name follows.
pub const KEY_PREFIX: &str = "leaderboard_";

/// One finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// Player name.
    pub name: String,

    /// Completion time in seconds.
    pub time: u32,
}

impl LeaderboardEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, time: u32) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }
}

/// Fastest completion times per edition, persisted in a `KeyValueStore`.
///
/// Each edition's board is a JSON array of `{name, time}` records, ascending
/// by time, at most `size` long. Unreadable stored data counts as an empty
/// board; failed writes are logged and dropped.
///
/// ## Example
///
/// ```
/// use rap_memory::cards::EditionId;
/// use rap_memory::leaderboard::{Leaderboard, LeaderboardEntry, MemoryStore};
///
/// let mut board = Leaderboard::new(MemoryStore::new());
/// board.record(EditionId::Nineties, 42, "Alice");
/// board.record(EditionId::Nineties, 10, "Bob");
///
/// assert_eq!(
///     board.top_entries(EditionId::Nineties),
///     vec![LeaderboardEntry::new("Bob", 10), LeaderboardEntry::new("Alice", 42)]
/// );
/// assert_eq!(board.best_time(EditionId::Nineties), Some(10));
/// ```
#[derive(Debug)]
pub struct Leaderboard<K> {
    store: K,
    size: usize,
    default_name: String,
}

impl<K: KeyValueStore> Leaderboard<K> {
    /// Create a leaderboard with the default size and default player name.
    pub fn new(store: K) -> Self {
        Self::with_config(store, &GameConfig::default())
    }

    /// Create a leaderboard using the size and default name from `config`.
    pub fn with_config(store: K, config: &GameConfig) -> Self {
        Self {
            store,
            size: config.leaderboard_size,
            default_name: config.default_player_name.clone(),
        }
    }

    /// Storage key for an edition.
    #[must_use]
    pub fn key(edition: EditionId) -> String {
        format!("{KEY_PREFIX}{}", edition.display_name())
    }

    /// Add a result and keep the fastest entries.
    ///
    /// Blank names become the default name. Ties keep the earlier entry first.
    /// Returns the board as it now stands, whether or not the write succeeded.
    pub fn record(&mut self, edition: EditionId, time: u32, name: &str) -> Vec<LeaderboardEntry> {
        let name = match name.trim() {
            "" => self.default_name.as_str(),
            trimmed => trimmed,
        };

        let mut entries = self.top_entries(edition);
        entries.push(LeaderboardEntry::new(name, time));
        entries.sort_by_key(|e| e.time);
        entries.truncate(self.size);

        let key = Self::key(edition);
        match serde_json::to_string(&entries) {
            Ok(json) => {
                if let Err(e) = self.store.set(&key, &json) {
                    warn!(%edition, error = %e, "leaderboard not persisted");
                }
            }
            Err(e) => warn!(%edition, error = %e, "leaderboard not serializable"),
        }

        entries
    }

    /// Stored entries, fastest first. Empty when nothing (readable) is stored.
    #[must_use]
    pub fn top_entries(&self, edition: EditionId) -> Vec<LeaderboardEntry> {
        let key = Self::key(edition);
        let Some(raw) = self.store.get(&key) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
            Ok(mut entries) => {
                entries.truncate(self.size);
                entries
            }
            Err(e) => {
                debug!(%edition, error = %e, "ignoring unreadable leaderboard");
                Vec::new()
            }
        }
    }

    /// Fastest stored time.
    #[must_use]
    pub fn best_time(&self, edition: EditionId) -> Option<u32> {
        self.top_entries(edition).iter().map(|e| e.time).min()
    }

    /// Maximum entries kept per edition.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Mutable access to the underlying store.
    pub fn store_mut(&mut self) -> &mut K {
        &mut self.store
    }
}
