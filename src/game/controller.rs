//! Game controller: wires loader, deck, session, audio and leaderboard together.

use tracing::{debug, info};

use crate::audio::{AudioBackend, AudioDirector, EffectKind};
use crate::cards::EditionId;
use crate::core::{GameConfig, GameRng};
use crate::deck::{self, TileId};
use crate::leaderboard::{KeyValueStore, Leaderboard, LeaderboardEntry};
use crate::loader::{EditionLoader, EditionSource, LoadError};
use crate::session::{MatchSession, SessionEvent};

use super::presentation::Presentation;

/// The whole game for one page: owns every component and the current session.
///
/// Each `start_game` builds a fresh `MatchSession`; the previous one is
/// cancelled and dropped, never reused.
///
/// ## Example
///
/// ```
/// use rap_memory::audio::MemoryBackend;
/// use rap_memory::cards::EditionId;
/// use rap_memory::core::GameConfig;
/// use rap_memory::game::{Game, NullPresentation};
/// use rap_memory::leaderboard::MemoryStore;
/// use rap_memory::loader::DirSource;
///
/// let mut backend = MemoryBackend::new();
/// let mut game = Game::new(
///     GameConfig::default().with_seed(1),
///     DirSource::new(env!("CARGO_MANIFEST_DIR")),
///     MemoryStore::new(),
///     &mut backend,
///     NullPresentation,
/// );
///
/// game.start_game(EditionId::Nineties, 0).unwrap();
/// assert_eq!(game.session().unwrap().deck().len(), 16);
/// ```
#[derive(Debug)]
pub struct Game<S, K, P> {
    config: GameConfig,
    loader: EditionLoader<S>,
    leaderboard: Leaderboard<K>,
    audio: AudioDirector,
    presentation: P,
    rng: GameRng,
    session: Option<MatchSession>,
    score_saved: bool,
}

impl<S, K, P> Game<S, K, P>
where
    S: EditionSource,
    K: KeyValueStore,
    P: Presentation,
{
    /// Create a game. No session runs until `start_game`.
    pub fn new(
        config: GameConfig,
        source: S,
        store: K,
        backend: &mut dyn AudioBackend,
        presentation: P,
    ) -> Self {
        Self {
            loader: EditionLoader::new(source),
            leaderboard: Leaderboard::with_config(store, &config),
            audio: AudioDirector::new(backend, &config),
            rng: GameRng::from_seed_option(config.seed),
            presentation,
            session: None,
            score_saved: false,
            config,
        }
    }

    /// Load an edition and start a new session on a fresh deck.
    ///
    /// On a load failure nothing changes: the previous session (if any) keeps
    /// running and the caller may try again.
    pub fn start_game(&mut self, edition: EditionId, now_ms: u64) -> Result<(), LoadError> {
        let loaded = self.loader.load(edition)?;
        let deck = deck::build(&loaded, &mut self.rng);

        if let Some(mut previous) = self.session.take() {
            previous.cancel_all();
        }
        self.score_saved = false;

        self.audio.switch_edition(edition, now_ms);
        self.presentation.render_deck(&loaded, &deck);
        self.session = Some(MatchSession::new(loaded, deck, &self.config, now_ms));
        self.refresh_leaderboard(edition);

        info!(%edition, now_ms, "game started");
        Ok(())
    }

    /// Route a tile click (or key press) to the session.
    ///
    /// Anything already due at `now_ms` runs first, exactly as `advance` would.
    /// An ignored flip adds no events and plays no sound.
    pub fn flip(&mut self, tile: TileId, now_ms: u64) -> Vec<SessionEvent> {
        self.audio.advance(now_ms);

        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let edition = session.edition().id;
        let events = session.flip(tile, now_ms);
        self.dispatch(edition, &events);
        events
    }

    /// Move time forward: session ticks, mismatch reverts, audio fades.
    pub fn advance(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        self.audio.advance(now_ms);

        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        let edition = session.edition().id;
        let events = session.advance(now_ms);
        self.dispatch(edition, &events);
        events
    }

    fn dispatch(&mut self, edition: EditionId, events: &[SessionEvent]) {
        for event in events {
            self.presentation.show_event(event);

            match event {
                SessionEvent::Flipped(_) => self.audio.play_effect(EffectKind::Flip),
                SessionEvent::MatchFound { .. } => self.audio.play_effect(EffectKind::Match),
                SessionEvent::Combo(count) => {
                    self.audio.play_effect(EffectKind::Combo);
                    self.presentation.combo_effect(*count);
                }
                SessionEvent::Win { elapsed_secs } => {
                    self.audio.play_win(edition);
                    self.audio.pause_loops();
                    self.presentation.celebrate(&edition.symbols());
                    self.presentation.request_player_name(*elapsed_secs);
                }
                SessionEvent::Mismatch { .. }
                | SessionEvent::Reverted { .. }
                | SessionEvent::Tick { .. } => {}
            }
        }
    }

    /// Record the finished session's time under `name`.
    ///
    /// Only a won session can be saved, once. Returns the updated board.
    pub fn save_score(&mut self, name: &str) -> Option<Vec<LeaderboardEntry>> {
        let session = self.session.as_ref().filter(|s| s.is_won())?;
        if self.score_saved {
            return None;
        }

        let edition = session.edition().id;
        let elapsed = session.elapsed_secs();
        let entries = self.leaderboard.record(edition, elapsed, name);
        self.score_saved = true;
        debug!(%edition, elapsed, "score saved");

        self.refresh_leaderboard(edition);
        Some(entries)
    }

    fn refresh_leaderboard(&mut self, edition: EditionId) {
        let entries = self.leaderboard.top_entries(edition);
        let best = entries.iter().map(|e| e.time).min();
        self.presentation.show_leaderboard(edition, &entries, best);
    }

    /// Set the global volume.
    pub fn set_volume(&mut self, volume: f32) {
        self.audio.set_volume(volume);
    }

    /// Toggle mute, returning the new state.
    pub fn toggle_mute(&mut self) -> bool {
        self.audio.toggle_muted()
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The running (or finished) session.
    #[must_use]
    pub fn session(&self) -> Option<&MatchSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn audio(&self) -> &AudioDirector {
        &self.audio
    }

    #[must_use]
    pub fn leaderboard(&self) -> &Leaderboard<K> {
        &self.leaderboard
    }

    #[must_use]
    pub fn loader(&self) -> &EditionLoader<S> {
        &self.loader
    }

    #[must_use]
    pub fn presentation(&self) -> &P {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut P {
        &mut self.presentation
    }
}
