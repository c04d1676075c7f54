//! Events a match session reports to its host.
//!
//! Every session operation returns the events it produced, in order. The host
//! routes them to presentation (class toggles, banners, timer text), to audio,
//! and to the leaderboard prompt.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::deck::TileId;

/// Something that happened in a match session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A tile was turned face-up.
    Flipped(TileId),

    /// Two face-up tiles share a card; both are now matched.
    MatchFound {
        card: CardId,
        name: String,
        tiles: [TileId; 2],
    },

    /// Two face-up tiles differ; they flip back after the mismatch delay.
    Mismatch { tiles: [TileId; 2] },

    /// A mismatched pair turned face-down again.
    Reverted { tiles: [TileId; 2] },

    /// Consecutive matches inside the combo window (count >= 2).
    Combo(u32),

    /// Every pair is matched. Fires once per session.
    Win { elapsed_secs: u32 },

    /// One more second elapsed.
    Tick { elapsed_secs: u32 },
}

impl SessionEvent {
    /// Check if this is the win event.
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, SessionEvent::Win { .. })
    }
}
