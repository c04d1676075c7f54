//! In-memory audio backend.
//!
//! Channels record what was asked of them instead of making sound. Handles are
//! cheap clones sharing one state, so a host (or test) can keep a handle and
//! inspect a channel after handing it to the director.

use std::cell::RefCell;
use std::rc::Rc;

use super::channel::{AudioBackend, AudioChannel, PlaybackError};

#[derive(Clone, Debug)]
struct ChannelState {
    source: String,
    paused: bool,
    position_secs: f64,
    volume: f32,
    muted: bool,
    looping: bool,
    plays: usize,
    refuse: bool,
}

/// Recording channel. Clones share state.
#[derive(Clone, Debug)]
pub struct MemoryChannel {
    state: Rc<RefCell<ChannelState>>,
}

impl MemoryChannel {
    /// Create a paused channel at full volume.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(ChannelState {
                source: source.into(),
                paused: true,
                position_secs: 0.0,
                volume: 1.0,
                muted: false,
                looping: false,
                plays: 0,
                refuse: false,
            })),
        }
    }

    /// Sound reference this channel was opened for.
    #[must_use]
    pub fn source(&self) -> String {
        self.state.borrow().source.clone()
    }

    /// Playing, not muted, and not at zero volume.
    #[must_use]
    pub fn is_audible(&self) -> bool {
        let s = self.state.borrow();
        !s.paused && !s.muted && s.volume > 0.0
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.state.borrow().muted
    }

    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.state.borrow().looping
    }

    /// Number of accepted `play` calls.
    #[must_use]
    pub fn play_count(&self) -> usize {
        self.state.borrow().plays
    }

    /// Move the playhead, as if playback had progressed.
    pub fn set_position(&self, secs: f64) {
        self.state.borrow_mut().position_secs = secs;
    }

    /// Make `play` fail with `Refused`, like a browser before any user gesture.
    pub fn set_refuse_playback(&self, refuse: bool) {
        self.state.borrow_mut().refuse = refuse;
    }
}

impl AudioChannel for MemoryChannel {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let mut s = self.state.borrow_mut();
        if s.refuse {
            return Err(PlaybackError::Refused(format!(
                "autoplay blocked for {}",
                s.source
            )));
        }
        s.paused = false;
        s.plays += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.state.borrow_mut().paused = true;
    }

    fn rewind(&mut self) {
        self.state.borrow_mut().position_secs = 0.0;
    }

    fn position_secs(&self) -> f64 {
        self.state.borrow().position_secs
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn volume(&self) -> f32 {
        self.state.borrow().volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.state.borrow_mut().volume = volume;
    }

    fn set_muted(&mut self, muted: bool) {
        self.state.borrow_mut().muted = muted;
    }

    fn set_looping(&mut self, looping: bool) {
        self.state.borrow_mut().looping = looping;
    }
}

/// Backend handing out `MemoryChannel`s and remembering every one it opened.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    opened: Vec<MemoryChannel>,
    refuse_playback: bool,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Channels opened from now on refuse playback until `unlock`.
    #[must_use]
    pub fn refusing_playback() -> Self {
        Self {
            opened: Vec::new(),
            refuse_playback: true,
        }
    }

    /// Allow playback on every channel, as after the first user interaction.
    pub fn unlock(&mut self) {
        self.refuse_playback = false;
        for channel in &self.opened {
            channel.set_refuse_playback(false);
        }
    }

    /// Every channel opened for `source`, in open order.
    #[must_use]
    pub fn channels_for(&self, source: &str) -> Vec<MemoryChannel> {
        self.opened
            .iter()
            .filter(|c| c.state.borrow().source == source)
            .cloned()
            .collect()
    }

    /// First channel opened for `source`.
    #[must_use]
    pub fn channel(&self, source: &str) -> Option<MemoryChannel> {
        self.channels_for(source).into_iter().next()
    }

    /// Every channel opened so far.
    #[must_use]
    pub fn opened(&self) -> &[MemoryChannel] {
        &self.opened
    }
}

impl AudioBackend for MemoryBackend {
    fn open(&mut self, source: &str) -> Box<dyn AudioChannel> {
        let channel = MemoryChannel::new(source);
        channel.set_refuse_playback(self.refuse_playback);
        self.opened.push(channel.clone());
        Box::new(channel)
    }
}
