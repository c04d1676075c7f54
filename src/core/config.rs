//! Game configuration.
//!
//! Every timing and volume constant the game uses lives here, so hosts can tune
//! them (or tests can shrink them) without touching the rules.

use serde::{Deserialize, Serialize};

/// Tunable game parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Two matches this close together (inclusive) extend a combo.
    pub combo_window_ms: u64,

    /// How long a mismatched pair stays face-up before flipping back.
    pub mismatch_delay_ms: u64,

    /// Elapsed-time resolution.
    pub tick_interval_ms: u64,

    /// Entries kept per edition leaderboard.
    pub leaderboard_size: usize,

    /// Background loops play at this fraction of the effect volume.
    pub loop_volume_ratio: f32,

    /// Win sound fade-out length when switching editions mid-playback.
    pub fade_duration_ms: u64,

    /// Interval between fade-out volume steps.
    pub fade_step_ms: u64,

    /// Name recorded when the player leaves the name blank.
    pub default_player_name: String,

    /// Volume level at startup (0.0–1.0).
    pub initial_volume: f32,

    /// Deck shuffle seed. `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            combo_window_ms: 10_000,
            mismatch_delay_ms: 1_000,
            tick_interval_ms: 1_000,
            leaderboard_size: 5,
            loop_volume_ratio: 0.3,
            fade_duration_ms: 1_000,
            fade_step_ms: 50,
            default_player_name: "Anonymous".to_string(),
            initial_volume: 1.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Use a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the combo window.
    #[must_use]
    pub fn with_combo_window(mut self, ms: u64) -> Self {
        self.combo_window_ms = ms;
        self
    }

    /// Set the mismatch revert delay.
    #[must_use]
    pub fn with_mismatch_delay(mut self, ms: u64) -> Self {
        self.mismatch_delay_ms = ms;
        self
    }

    /// Set the leaderboard length.
    #[must_use]
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    /// Set the startup volume, clamped to 0.0–1.0.
    #[must_use]
    pub fn with_initial_volume(mut self, volume: f32) -> Self {
        self.initial_volume = clamp_volume(volume);
        self
    }

    /// Set the fade-out length and step.
    #[must_use]
    pub fn with_fade(mut self, duration_ms: u64, step_ms: u64) -> Self {
        self.fade_duration_ms = duration_ms;
        self.fade_step_ms = step_ms;
        self
    }

    /// Number of volume steps in a fade-out (at least one).
    #[must_use]
    pub fn fade_steps(&self) -> u64 {
        (self.fade_duration_ms / self.fade_step_ms.max(1)).max(1)
    }
}

/// Clamp a volume level into 0.0–1.0. NaN becomes silence.
#[must_use]
pub fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}
