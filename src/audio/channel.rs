//! Playback channel abstraction.
//!
//! A channel is one playable sound: an HTML audio element in the browser, an
//! in-memory recorder in tests. The director only talks to this trait.

use thiserror::Error;

/// Why a channel did not start playing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The platform refused to start audio, typically before the first user gesture.
    #[error("playback refused: {0}")]
    Refused(String),

    /// The sound could not be opened or decoded.
    #[error("playback unavailable: {0}")]
    Unavailable(String),
}

/// One playable sound.
pub trait AudioChannel {
    /// Start or resume playback from the current position.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pause, keeping the position.
    fn pause(&mut self);

    /// Seek to the start.
    fn rewind(&mut self);

    /// Playback position in seconds.
    fn position_secs(&self) -> f64;

    /// Whether the channel is paused (or was never started).
    fn is_paused(&self) -> bool;

    /// Current volume (0.0–1.0).
    fn volume(&self) -> f32;

    /// Set the volume (0.0–1.0).
    fn set_volume(&mut self, volume: f32);

    /// Silence or unsilence without affecting playback.
    fn set_muted(&mut self, muted: bool);

    /// Restart from the beginning when the end is reached.
    fn set_looping(&mut self, looping: bool);
}

/// Opens channels for sound references.
pub trait AudioBackend {
    /// Open a channel for `source`. Every call returns an independent channel.
    fn open(&mut self, source: &str) -> Box<dyn AudioChannel>;
}

/// One-shot effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Flip,
    Match,
    Combo,
}

impl EffectKind {
    /// All effect kinds.
    pub const ALL: [EffectKind; 3] = [EffectKind::Flip, EffectKind::Match, EffectKind::Combo];

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sound reference for this effect.
    #[must_use]
    pub const fn source(self) -> &'static str {
        match self {
            EffectKind::Flip => "sounds/flip.mp3",
            EffectKind::Match => "sounds/match.mp3",
            EffectKind::Combo => "sounds/combo.mp3",
        }
    }
}
