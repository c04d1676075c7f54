//! Game audio.
//!
//! - `AudioChannel` / `AudioBackend`: the platform seam (one sound, and how to open one)
//! - `AudioDirector`: volume, mute, edition loops, win sound fades
//! - `MemoryBackend`: recording backend for headless hosts and tests

pub mod channel;
pub mod director;
pub mod memory;

pub use channel::{AudioBackend, AudioChannel, EffectKind, PlaybackError};
pub use director::AudioDirector;
pub use memory::{MemoryBackend, MemoryChannel};
