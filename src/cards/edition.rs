//! Editions: themed card sets and their catalog entries.
//!
//! ## EditionId
//!
//! The closed set of editions the game ships. Everything keyed by edition
//! (data file, background loop, win sound, decorative symbols, leaderboard)
//! hangs off this enum instead of free-text names.
//!
//! ## EditionMap
//!
//! Array-backed per-edition storage with O(1) access, indexed by `EditionId`.
//!
//! ## Edition
//!
//! A loaded card set. Immutable once built from its `EditionRecord`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use thiserror::Error;

use super::definition::{CardDefinition, CardId};

/// Win sound shared by every edition.
const WIN_SOUND: &str = "sounds/win.mp3";

/// Themed edition identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EditionId {
    Eighties,
    Nineties,
    TwoThousands,
    TwentyTens,
    Producers,
    FemaleRappers,
    UndergroundLegends,
}

impl EditionId {
    /// Number of editions.
    pub const COUNT: usize = 7;

    /// All editions in menu order.
    pub const ALL: [EditionId; Self::COUNT] = [
        EditionId::Eighties,
        EditionId::Nineties,
        EditionId::TwoThousands,
        EditionId::TwentyTens,
        EditionId::Producers,
        EditionId::FemaleRappers,
        EditionId::UndergroundLegends,
    ];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Name shown in the edition picker. Also the leaderboard key suffix.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            EditionId::Eighties => "80s Rappers",
            EditionId::Nineties => "90s Rappers",
            EditionId::TwoThousands => "2000s Rappers",
            EditionId::TwentyTens => "2010s Rappers",
            EditionId::Producers => "Producers",
            EditionId::FemaleRappers => "Female Rappers",
            EditionId::UndergroundLegends => "Underground Legends",
        }
    }

    /// Reference handed to the edition source.
    #[must_use]
    pub const fn data_ref(self) -> &'static str {
        match self {
            EditionId::Eighties => "data/cards-80s.json",
            EditionId::Nineties => "data/cards-90s.json",
            EditionId::TwoThousands => "data/cards-2000s.json",
            EditionId::TwentyTens => "data/cards-2010s.json",
            EditionId::Producers => "data/cards-producers.json",
            EditionId::FemaleRappers => "data/cards-femalerappers.json",
            EditionId::UndergroundLegends => "data/cards-underground.json",
        }
    }

    /// Background loop for this edition.
    #[must_use]
    pub const fn loop_ref(self) -> &'static str {
        match self {
            EditionId::Eighties => "sounds/loops/80s.mp3",
            EditionId::Nineties => "sounds/loops/90s.mp3",
            EditionId::TwoThousands => "sounds/loops/2000s.mp3",
            EditionId::TwentyTens => "sounds/loops/2010s.mp3",
            EditionId::Producers => "sounds/loops/producers.mp3",
            EditionId::FemaleRappers => "sounds/loops/femalerappers.mp3",
            EditionId::UndergroundLegends => "sounds/loops/underground.mp3",
        }
    }

    /// Win sound for this edition.
    #[must_use]
    pub const fn win_ref(self) -> &'static str {
        WIN_SOUND
    }

    /// Decorative symbols thrown on a win.
    #[must_use]
    pub const fn symbols(self) -> [&'static str; 4] {
        match self {
            EditionId::Eighties => ["🎤", "📼", "🕶️", "🎧"],
            EditionId::Nineties => ["🔥", "🎶", "🎧", "💿"],
            EditionId::TwoThousands => ["💥", "🎧", "📱", "🎵"],
            EditionId::TwentyTens => ["✨", "🎧", "📸", "🎤"],
            EditionId::Producers => ["🎛️", "🎚️", "🎧", "🔊"],
            EditionId::FemaleRappers => ["💅", "🎤", "👑", "💖"],
            EditionId::UndergroundLegends => ["🧠", "🎧", "🕶️", "💣"],
        }
    }

    /// Look up an edition by its display name.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.display_name() == name)
    }

    /// Look up an edition by its data reference.
    #[must_use]
    pub fn from_data_ref(reference: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.data_ref() == reference)
    }
}

impl Default for EditionId {
    fn default() -> Self {
        EditionId::Nineties
    }
}

impl std::fmt::Display for EditionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Per-edition storage with O(1) access.
///
/// ## Example
///
/// ```
/// use rap_memory::cards::{EditionId, EditionMap};
///
/// let mut plays: EditionMap<u32> = EditionMap::with_default();
/// plays[EditionId::Producers] += 1;
/// assert_eq!(plays[EditionId::Producers], 1);
/// assert_eq!(plays[EditionId::Nineties], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditionMap<T> {
    data: [T; EditionId::COUNT],
}

impl<T> EditionMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl FnMut(EditionId) -> T) -> Self {
        Self {
            data: EditionId::ALL.map(factory),
        }
    }

    /// Create a map with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    /// Get a reference to an edition's entry.
    #[must_use]
    pub fn get(&self, id: EditionId) -> &T {
        &self.data[id.index()]
    }

    /// Get a mutable reference to an edition's entry.
    pub fn get_mut(&mut self, id: EditionId) -> &mut T {
        &mut self.data[id.index()]
    }

    /// Iterate over (EditionId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (EditionId, &T)> {
        EditionId::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (EditionId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EditionId, &mut T)> {
        EditionId::ALL.into_iter().zip(self.data.iter_mut())
    }

    /// Iterate over the values.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate mutably over the values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }
}

impl<T> Index<EditionId> for EditionMap<T> {
    type Output = T;

    fn index(&self, id: EditionId) -> &Self::Output {
        self.get(id)
    }
}

impl<T> IndexMut<EditionId> for EditionMap<T> {
    fn index_mut(&mut self, id: EditionId) -> &mut Self::Output {
        self.get_mut(id)
    }
}

/// Edition file contents as published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditionRecord {
    /// Title shown above the board.
    pub edition: String,

    /// Card set, each card distinct.
    pub cards: Vec<CardDefinition>,
}

/// Why an edition record cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditionError {
    #[error("edition has no cards")]
    NoCards,

    #[error("card id '{0}' appears more than once")]
    DuplicateCard(CardId),

    #[error("edition has {count} cards, at most {max} fit on a board")]
    TooManyCards { count: usize, max: usize },
}

/// A loaded, playable edition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edition {
    /// Catalog entry.
    pub id: EditionId,

    /// Title from the edition file.
    pub title: String,

    /// Distinct cards, in file order.
    pub cards: Vec<CardDefinition>,
}

impl Edition {
    /// Most cards an edition may hold; every tile of the doubled deck must be
    /// addressable by a `TileId`.
    pub const MAX_CARDS: usize = u16::MAX as usize / 2;

    /// Build an edition from its published record.
    ///
    /// Rejects empty card sets, oversized card sets and duplicate card IDs.
    pub fn from_record(id: EditionId, record: EditionRecord) -> Result<Self, EditionError> {
        if record.cards.is_empty() {
            return Err(EditionError::NoCards);
        }
        if record.cards.len() > Self::MAX_CARDS {
            return Err(EditionError::TooManyCards {
                count: record.cards.len(),
                max: Self::MAX_CARDS,
            });
        }

        let mut seen = rustc_hash::FxHashSet::default();
        for card in &record.cards {
            if !seen.insert(&card.id) {
                return Err(EditionError::DuplicateCard(card.id.clone()));
            }
        }

        Ok(Self {
            id,
            title: record.edition,
            cards: record.cards,
        })
    }

    /// Number of distinct cards (pairs on the board).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len()
    }

    /// Find a card by ID.
    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&CardDefinition> {
        self.cards.iter().find(|c| &c.id == id)
    }

    #[must_use]
    pub fn background_loop(&self) -> &'static str {
        self.id.loop_ref()
    }

    #[must_use]
    pub fn win_sound(&self) -> &'static str {
        self.id.win_ref()
    }

    #[must_use]
    pub fn symbols(&self) -> [&'static str; 4] {
        self.id.symbols()
    }
}
