//! Browser backends (feature = "web").
//!
//! - `HtmlAudioBackend`: one `HTMLAudioElement` per channel
//! - `LocalStorage`: `window.localStorage` as a `KeyValueStore`

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlAudioElement, Storage};

use crate::audio::{AudioBackend, AudioChannel, MemoryChannel, PlaybackError};
use crate::leaderboard::{KeyValueStore, StoreError};

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Channel backed by an HTML audio element.
pub struct HtmlAudioChannel {
    element: HtmlAudioElement,
}

impl HtmlAudioChannel {
    /// Create an element for `src`.
    pub fn new(src: &str) -> Result<Self, PlaybackError> {
        let element = HtmlAudioElement::new_with_src(src)
            .map_err(|e| PlaybackError::Unavailable(describe(&e)))?;
        Ok(Self { element })
    }
}

impl AudioChannel for HtmlAudioChannel {
    fn play(&mut self) -> Result<(), PlaybackError> {
        let promise = self
            .element
            .play()
            .map_err(|e| PlaybackError::Refused(describe(&e)))?;

        // Autoplay refusals reject the promise later; handle them so they never
        // surface as unhandled rejections.
        let source = self.element.src();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                tracing::debug!(source = %source, error = %describe(&e), "playback refused");
            }
        });
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(e) = self.element.pause() {
            tracing::debug!(error = %describe(&e), "pause failed");
        }
    }

    fn rewind(&mut self) {
        self.element.set_current_time(0.0);
    }

    fn position_secs(&self) -> f64 {
        self.element.current_time()
    }

    fn is_paused(&self) -> bool {
        self.element.paused()
    }

    fn volume(&self) -> f32 {
        self.element.volume() as f32
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(f64::from(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.element.set_muted(muted);
    }

    fn set_looping(&mut self, looping: bool) {
        self.element.set_loop(looping);
    }
}

/// Opens `HtmlAudioChannel`s. Sounds that cannot be created fall back to a
/// silent in-memory channel so the rest of the game keeps working.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlAudioBackend;

impl AudioBackend for HtmlAudioBackend {
    fn open(&mut self, source: &str) -> Box<dyn AudioChannel> {
        match HtmlAudioChannel::new(source) {
            Ok(channel) => Box::new(channel),
            Err(e) => {
                tracing::warn!(source, error = %e, "audio element unavailable");
                Box::new(MemoryChannel::new(source))
            }
        }
    }
}

/// `window.localStorage`.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// The page's local storage, if the browser grants it.
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage.set_item(key, value).map_err(|e| StoreError {
            key: key.to_string(),
            reason: describe(&e),
        })
    }
}
