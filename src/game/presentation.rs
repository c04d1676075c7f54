//! The presentation seam.
//!
//! Rendering, CSS classes, confetti and the name prompt live outside the
//! crate. The game calls these hooks and never reads anything back.

use crate::cards::{Edition, EditionId};
use crate::deck::Deck;
use crate::leaderboard::LeaderboardEntry;
use crate::session::SessionEvent;

/// Hooks the game calls on its host. Every method defaults to doing nothing.
pub trait Presentation {
    /// A new board: one tile per deck position, face-down.
    fn render_deck(&mut self, _edition: &Edition, _deck: &Deck) {}

    /// Every session event, in order.
    fn show_event(&mut self, _event: &SessionEvent) {}

    /// Leaderboard and best time for the edition being played.
    fn show_leaderboard(
        &mut self,
        _edition: EditionId,
        _entries: &[LeaderboardEntry],
        _best_time: Option<u32>,
    ) {
    }

    /// Combo banner and burst.
    fn combo_effect(&mut self, _count: u32) {}

    /// Win celebration using the edition's symbols.
    fn celebrate(&mut self, _symbols: &[&'static str]) {}

    /// Ask the player for a name to record with `elapsed_secs`.
    fn request_player_name(&mut self, _elapsed_secs: u32) {}
}

/// Presentation that shows nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {}
