//! Match sessions: flips, pairs, combos, the win.
//!
//! ## Rules
//!
//! - A tile can be flipped only while fewer than two tiles are face-up
//! - Two face-up tiles with the same card become matched at once
//! - Two different tiles flip back after the mismatch delay
//! - Matches within the combo window of the previous match extend the combo;
//!   a `Combo` event fires from the second consecutive match on
//! - Matching the last pair fires `Win` and stops the elapsed-time counter

#[allow(clippy::module_inception)]
mod session;

pub mod event;
pub mod tile;

pub use event::SessionEvent;
pub use session::MatchSession;
pub use tile::TileState;
