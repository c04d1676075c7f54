//! Card definitions - static card data.
//!
//! A `CardDefinition` is one entry of an edition file: an identifier, the name
//! shown to the player, and the image to put on the tile face. A deck holds two
//! copies of every definition.

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within an edition.
///
/// Two tiles match when their card IDs are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use rap_memory::cards::{CardDefinition, CardId};
///
/// let card = CardDefinition::new("nas", "Nas", "images/90s/nas.jpg");
/// assert_eq!(card.id, CardId::new("nas"));
/// assert_eq!(card.label(), "Card: Nas");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier within the edition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Image reference for the tile face.
    pub image: String,
}

impl CardDefinition {
    /// Create a new card definition.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            image: image.into(),
        }
    }

    /// Accessible label for the tile.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Card: {}", self.name)
    }
}
