//! The game as a host sees it.
//!
//! `Game` owns loader, RNG, audio, leaderboard and the current session, and
//! drives a `Presentation` supplied by the host.

pub mod controller;
pub mod presentation;

pub use controller::Game;
pub use presentation::{NullPresentation, Presentation};
