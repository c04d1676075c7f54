//! Deck building: every card twice, shuffled.
//!
//! A `Deck` is the ordered tile layout for one session. Positions are
//! addressed by `TileId`; the deck itself never changes after it is built.

use serde::{Deserialize, Serialize};

use crate::cards::{CardDefinition, CardId, Edition};
use crate::core::GameRng;

/// A deck position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u16);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Position in the deck (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Shuffled play sequence for one session.
///
/// Invariant: every card ID appears exactly twice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<CardDefinition>,
}

impl Deck {
    /// Lay out `cards` twice, in order, without shuffling.
    ///
    /// Tile `i` and tile `i + cards.len()` hold the same card. Useful for
    /// deterministic tests; games use [`build`]. `cards` holds at most
    /// `Edition::MAX_CARDS` entries, as every validated edition does.
    #[must_use]
    pub fn unshuffled(cards: &[CardDefinition]) -> Self {
        debug_assert!(cards.len() <= Edition::MAX_CARDS);
        let mut doubled = Vec::with_capacity(cards.len() * 2);
        doubled.extend_from_slice(cards);
        doubled.extend_from_slice(cards);
        Self { cards: doubled }
    }

    /// Number of tiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck has no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs (half the tile count).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.cards.len() / 2
    }

    /// Card at a tile.
    #[must_use]
    pub fn card(&self, tile: TileId) -> Option<&CardDefinition> {
        self.cards.get(tile.index())
    }

    /// Card ID at a tile.
    #[must_use]
    pub fn card_id(&self, tile: TileId) -> Option<&CardId> {
        self.card(tile).map(|c| &c.id)
    }

    /// Iterate over (TileId, &CardDefinition) pairs in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &CardDefinition)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(i, c)| (TileId(i as u16), c))
    }

    /// All tile IDs in layout order.
    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> {
        (0..self.cards.len() as u16).map(TileId)
    }

    /// The two tiles holding `card`.
    #[must_use]
    pub fn tiles_of(&self, card: &CardId) -> Vec<TileId> {
        self.iter()
            .filter(|(_, c)| &c.id == card)
            .map(|(tile, _)| tile)
            .collect()
    }

    /// The cards in layout order.
    #[must_use]
    pub fn cards(&self) -> &[CardDefinition] {
        &self.cards
    }
}

/// Build a shuffled deck for `edition`.
///
/// Duplicates every card, then applies a Fisher–Yates permutation drawn from
/// `rng`. Pure function of the edition and the random stream.
///
/// ```
/// use rap_memory::cards::{CardDefinition, Edition, EditionId, EditionRecord};
/// use rap_memory::core::GameRng;
/// use rap_memory::deck;
///
/// let record = EditionRecord {
///     edition: "Producers".into(),
///     cards: vec![
///         CardDefinition::new("dre", "Dr. Dre", "img/dre.jpg"),
///         CardDefinition::new("dilla", "J Dilla", "img/dilla.jpg"),
///     ],
/// };
/// let edition = Edition::from_record(EditionId::Producers, record).unwrap();
///
/// let deck = deck::build(&edition, &mut GameRng::new(1));
/// assert_eq!(deck.len(), 4);
/// ```
#[must_use]
pub fn build(edition: &Edition, rng: &mut GameRng) -> Deck {
    let mut deck = Deck::unshuffled(&edition.cards);
    rng.shuffle(&mut deck.cards);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{EditionId, EditionRecord};
    use rustc_hash::FxHashMap;

    fn edition(n: usize) -> Edition {
        let cards = (0..n)
            .map(|i| CardDefinition::new(format!("c{i}"), format!("Card {i}"), format!("img/{i}.jpg")))
            .collect();
        Edition::from_record(
            EditionId::Nineties,
            EditionRecord {
                edition: "Test".into(),
                cards,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_build_doubles_every_card() {
        let edition = edition(8);
        let deck = build(&edition, &mut GameRng::new(42));

        assert_eq!(deck.len(), 16);
        assert_eq!(deck.pair_count(), 8);

        let mut counts: FxHashMap<&CardId, usize> = FxHashMap::default();
        for (_, card) in deck.iter() {
            *counts.entry(&card.id).or_default() += 1;
        }
        assert_eq!(counts.len(), 8);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn test_build_is_deterministic_for_seed() {
        let edition = edition(6);
        let a = build(&edition, &mut GameRng::new(7));
        let b = build(&edition, &mut GameRng::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unshuffled_layout() {
        let edition = edition(3);
        let deck = Deck::unshuffled(&edition.cards);

        assert_eq!(deck.card_id(TileId::new(0)), deck.card_id(TileId::new(3)));
        assert_eq!(deck.tiles_of(&CardId::new("c1")), vec![TileId::new(1), TileId::new(4)]);
        assert!(deck.card(TileId::new(6)).is_none());
    }

    #[test]
    fn test_tile_ids() {
        let deck = Deck::unshuffled(&edition(2).cards);
        let ids: Vec<_> = deck.tile_ids().collect();
        assert_eq!(ids, vec![TileId(0), TileId(1), TileId(2), TileId(3)]);
        assert_eq!(format!("{}", TileId(2)), "Tile(2)");
    }
}
