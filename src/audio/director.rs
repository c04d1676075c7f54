//! Layered game audio: effects, per-edition loops, win sounds.

use tracing::{debug, info};

use crate::cards::{EditionId, EditionMap};
use crate::core::{clamp_volume, GameConfig, Scheduler, TaskId};

use super::channel::{AudioBackend, AudioChannel, EffectKind};

/// An in-progress win sound fade-out.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Fade {
    /// Volume restored once the fade completes.
    original: f32,
    /// Steps left before the sound stops.
    remaining: u64,
    /// Next scheduled step.
    task: TaskId,
}

/// Owns every game sound and applies the global volume and mute settings.
///
/// ## Layers
///
/// - One-shot effects (flip, match, combo) at the global volume
/// - One looping background track per edition at `loop_volume_ratio` of the
///   global volume; only the selected edition's loop plays
/// - One win sound per edition at the global volume
///
/// Playback refusals from the platform are logged and otherwise ignored.
/// Fade-outs are stepped by `advance(now)`.
pub struct AudioDirector {
    effects: [Box<dyn AudioChannel>; 3],
    loops: EditionMap<Box<dyn AudioChannel>>,
    wins: EditionMap<Box<dyn AudioChannel>>,
    current: Option<EditionId>,
    volume: f32,
    muted: bool,
    loop_ratio: f32,
    fade_steps: u64,
    fade_step_ms: u64,
    fading: EditionMap<Option<Fade>>,
    fades: Scheduler<EditionId>,
}

impl AudioDirector {
    /// Open every channel through `backend` and apply the initial volume.
    pub fn new(backend: &mut dyn AudioBackend, config: &GameConfig) -> Self {
        let effects = EffectKind::ALL.map(|kind| backend.open(kind.source()));
        let loops = EditionMap::new(|id| backend.open(id.loop_ref()));
        let wins = EditionMap::new(|id| backend.open(id.win_ref()));

        let mut director = Self {
            effects,
            loops,
            wins,
            current: None,
            volume: clamp_volume(config.initial_volume),
            muted: false,
            loop_ratio: config.loop_volume_ratio,
            fade_steps: config.fade_steps(),
            fade_step_ms: config.fade_step_ms.max(1),
            fading: EditionMap::with_default(),
            fades: Scheduler::new(),
        };

        let loop_volume = director.loop_volume();
        for channel in director.loops.values_mut() {
            channel.set_looping(true);
            channel.set_volume(loop_volume);
        }
        let volume = director.volume;
        for channel in director.effects.iter_mut().chain(director.wins.values_mut()) {
            channel.set_volume(volume);
        }

        director
    }

    /// Set the global volume.
    ///
    /// Effects and win sounds take the level directly, the selected edition's
    /// loop takes the loop share of it. Other loops pick it up when selected.
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_volume(volume);

        for channel in self.effects.iter_mut() {
            channel.set_volume(self.volume);
        }
        for (id, channel) in self.wins.iter_mut() {
            match self.fading.get_mut(id) {
                // Restored at the end of the fade instead.
                Some(fade) => fade.original = self.volume,
                None => channel.set_volume(self.volume),
            }
        }
        if let Some(current) = self.current {
            let loop_volume = self.loop_volume();
            self.loops[current].set_volume(loop_volume);
        }
    }

    /// Silence or unsilence every channel. Playback state is untouched.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        for channel in self.all_channels_mut() {
            channel.set_muted(muted);
        }
    }

    /// Flip the mute flag, returning the new state.
    pub fn toggle_muted(&mut self) -> bool {
        self.set_muted(!self.muted);
        self.muted
    }

    /// Play a one-shot effect from the start. Does nothing while muted.
    pub fn play_effect(&mut self, kind: EffectKind) {
        if self.muted {
            return;
        }
        let channel = &mut self.effects[kind.index()];
        channel.rewind();
        start(channel.as_mut(), kind.source());
    }

    /// Select an edition's audio.
    ///
    /// Pauses every loop and starts the edition's loop from the top (unless
    /// muted). A win sound still playing from an earlier game fades out over
    /// the configured duration; idle win sounds are rewound.
    pub fn switch_edition(&mut self, edition: EditionId, now_ms: u64) {
        for channel in self.loops.values_mut() {
            channel.pause();
        }

        self.current = Some(edition);
        let loop_volume = self.loop_volume();
        if !self.muted {
            let channel = &mut self.loops[edition];
            channel.rewind();
            channel.set_volume(loop_volume);
            start(channel.as_mut(), edition.loop_ref());
        }

        for id in EditionId::ALL {
            if self.fading[id].is_some() {
                continue;
            }
            let channel = &mut self.wins[id];
            if !channel.is_paused() && channel.position_secs() > 0.0 {
                let task = self.fades.schedule(now_ms + self.fade_step_ms, id);
                self.fading[id] = Some(Fade {
                    original: channel.volume(),
                    remaining: self.fade_steps,
                    task,
                });
                debug!(edition = %id, "fading out win sound");
            } else {
                channel.pause();
                channel.rewind();
            }
        }

        info!(%edition, muted = self.muted, "edition audio selected");
    }

    /// Play an edition's win sound from the start. Does nothing while muted.
    pub fn play_win(&mut self, edition: EditionId) {
        if self.muted {
            return;
        }
        if let Some(fade) = self.fading[edition].take() {
            self.fades.cancel(fade.task);
            self.wins[edition].set_volume(fade.original);
        }
        let channel = &mut self.wins[edition];
        channel.rewind();
        start(channel.as_mut(), edition.win_ref());
    }

    /// Pause every background loop.
    pub fn pause_loops(&mut self) {
        for channel in self.loops.values_mut() {
            channel.pause();
        }
    }

    /// Step any fades due at or before `now_ms`.
    pub fn advance(&mut self, now_ms: u64) {
        while let Some((due, id)) = self.fades.pop_due(now_ms) {
            let Some(fade) = self.fading[id].as_mut() else {
                continue;
            };

            let channel = &mut self.wins[id];
            fade.remaining = fade.remaining.saturating_sub(1);
            if fade.remaining > 0 {
                let share = fade.remaining as f32 / self.fade_steps as f32;
                channel.set_volume(fade.original * share);
                fade.task = self.fades.schedule(due + self.fade_step_ms, id);
            } else {
                channel.pause();
                channel.rewind();
                channel.set_volume(fade.original);
                self.fading[id] = None;
                debug!(edition = %id, "win sound faded out");
            }
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Edition whose loop is selected.
    #[must_use]
    pub fn current_edition(&self) -> Option<EditionId> {
        self.current
    }

    /// Whether an edition's win sound is fading out.
    #[must_use]
    pub fn is_fading(&self, edition: EditionId) -> bool {
        self.fading[edition].is_some()
    }

    /// Volume background loops play at.
    #[must_use]
    pub fn loop_volume(&self) -> f32 {
        self.volume * self.loop_ratio
    }

    fn all_channels_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn AudioChannel>> {
        self.effects
            .iter_mut()
            .chain(self.loops.values_mut())
            .chain(self.wins.values_mut())
    }
}

impl std::fmt::Debug for AudioDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioDirector")
            .field("current", &self.current)
            .field("volume", &self.volume)
            .field("muted", &self.muted)
            .field("pending_fades", &self.fades.len())
            .finish()
    }
}

/// Start a channel, swallowing refusals.
fn start(channel: &mut dyn AudioChannel, source: &str) {
    if let Err(e) = channel.play() {
        debug!(source, error = %e, "playback ignored");
    }
}
