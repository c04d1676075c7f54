//! Core building blocks: RNG, configuration, scheduling.
//!
//! Nothing here knows about cards or editions; the game modules are built on top.

pub mod config;
pub mod rng;
pub mod scheduler;

pub use config::{clamp_volume, GameConfig};
pub use rng::GameRng;
pub use scheduler::{Scheduler, TaskId};
