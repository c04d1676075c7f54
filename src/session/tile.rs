//! Tile states.

use serde::{Deserialize, Serialize};

/// State of one deck position.
///
/// `Down -> Up -> Matched` is the only path to `Matched`, and `Matched` is
/// terminal. `Up -> Down` happens when a mismatched pair flips back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Down,
    Up,
    Matched,
}

impl TileState {
    /// Whether the face is visible (up or matched).
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        matches!(self, TileState::Up | TileState::Matched)
    }
}
