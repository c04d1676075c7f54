//! The match session state machine.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::cards::{CardId, Edition};
use crate::core::{GameConfig, Scheduler, TaskId};
use crate::deck::{Deck, TileId};

use super::event::SessionEvent;
use super::tile::TileState;

/// Work the session schedules for later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionTask {
    /// Elapsed-time tick.
    Tick,
    /// Flip a mismatched pair back down.
    Revert([TileId; 2]),
}

/// Timing rules copied out of `GameConfig` at session start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Timing {
    combo_window_ms: u64,
    mismatch_delay_ms: u64,
    tick_interval_ms: u64,
}

impl From<&GameConfig> for Timing {
    fn from(config: &GameConfig) -> Self {
        Self {
            combo_window_ms: config.combo_window_ms,
            mismatch_delay_ms: config.mismatch_delay_ms,
            tick_interval_ms: config.tick_interval_ms.max(1),
        }
    }
}

/// One game on one deck.
///
/// Driven entirely by the host: `flip` on tile clicks, `advance` whenever
/// time moves. Both take the current time in milliseconds and return the
/// events they produced. The session owns its scheduled tasks (tick timer,
/// pending mismatch reverts); `reset` and `drop` cancel them.
///
/// ## Invariants
///
/// - At most two tiles are face-up and unmatched at any time
/// - Matched tiles never turn back
/// - `Win` fires exactly once, when every pair is matched
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use rap_memory::cards::{CardDefinition, Edition, EditionId, EditionRecord};
/// use rap_memory::core::GameConfig;
/// use rap_memory::deck::{Deck, TileId};
/// use rap_memory::session::{MatchSession, SessionEvent};
///
/// let record = EditionRecord {
///     edition: "Producers".into(),
///     cards: vec![CardDefinition::new("dre", "Dr. Dre", "img/dre.jpg")],
/// };
/// let edition = Arc::new(Edition::from_record(EditionId::Producers, record).unwrap());
/// let deck = Deck::unshuffled(&edition.cards);
/// let mut session = MatchSession::new(edition, deck, &GameConfig::default(), 0);
///
/// session.flip(TileId::new(0), 100);
/// let events = session.flip(TileId::new(1), 200);
/// assert!(events.iter().any(SessionEvent::is_win));
/// ```
#[derive(Debug)]
pub struct MatchSession {
    edition: Arc<Edition>,
    deck: Deck,
    tiles: Vec<TileState>,
    face_up: SmallVec<[TileId; 2]>,
    matched: FxHashSet<CardId>,
    elapsed_secs: u32,
    combo: u32,
    last_match_ms: Option<u64>,
    won: bool,
    timer: Option<TaskId>,
    scheduler: Scheduler<SessionTask>,
    timing: Timing,
}

impl MatchSession {
    /// Start a session on `deck` at `now_ms`. The elapsed timer starts immediately.
    pub fn new(edition: Arc<Edition>, deck: Deck, config: &GameConfig, now_ms: u64) -> Self {
        let mut session = Self {
            edition,
            tiles: Vec::new(),
            deck: Deck::unshuffled(&[]),
            face_up: SmallVec::new(),
            matched: FxHashSet::default(),
            elapsed_secs: 0,
            combo: 0,
            last_match_ms: None,
            won: false,
            timer: None,
            scheduler: Scheduler::new(),
            timing: Timing::from(config),
        };
        session.reset(deck, now_ms);
        session
    }

    /// Start over on a new deck.
    ///
    /// Cancels every task from the previous round before scheduling the new
    /// timer, so nothing stale can fire into this one.
    pub fn reset(&mut self, deck: Deck, now_ms: u64) {
        self.scheduler.clear();
        self.tiles = vec![TileState::Down; deck.len()];
        self.deck = deck;
        self.face_up.clear();
        self.matched.clear();
        self.elapsed_secs = 0;
        self.combo = 0;
        self.last_match_ms = None;
        self.won = false;
        self.timer = Some(
            self.scheduler
                .schedule(now_ms + self.timing.tick_interval_ms, SessionTask::Tick),
        );

        info!(
            edition = %self.edition.id,
            tiles = self.deck.len(),
            "session started"
        );
    }

    /// Turn a tile face-up.
    ///
    /// Work due at or before `now_ms` (ticks, mismatch reverts) runs first and
    /// its events lead the result. The flip itself is ignored when two tiles are
    /// still face-up, when the tile is not face-down, or when the tile does not
    /// exist. Flipping the second tile resolves the pair.
    pub fn flip(&mut self, tile: TileId, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = self.advance(now_ms);

        if self.face_up.len() >= 2 {
            return events;
        }
        match self.tiles.get_mut(tile.index()) {
            Some(state) if *state == TileState::Down => *state = TileState::Up,
            _ => return events,
        }

        self.face_up.push(tile);
        events.push(SessionEvent::Flipped(tile));

        if self.face_up.len() == 2 {
            self.resolve(now_ms, &mut events);
        }
        events
    }

    /// Compare the two face-up tiles.
    fn resolve(&mut self, now_ms: u64, events: &mut Vec<SessionEvent>) {
        let pair = [self.face_up[0], self.face_up[1]];
        let (first, second) = match (self.deck.card(pair[0]), self.deck.card(pair[1])) {
            (Some(a), Some(b)) => (a, b),
            _ => return,
        };

        if first.id != second.id {
            self.scheduler.schedule(
                now_ms + self.timing.mismatch_delay_ms,
                SessionTask::Revert(pair),
            );
            events.push(SessionEvent::Mismatch { tiles: pair });
            return;
        }

        let card = first.id.clone();
        let name = first.name.clone();
        for tile in pair {
            self.tiles[tile.index()] = TileState::Matched;
        }
        self.face_up.clear();
        self.matched.insert(card.clone());

        self.combo = match self.last_match_ms {
            Some(last) if now_ms.saturating_sub(last) <= self.timing.combo_window_ms => {
                self.combo + 1
            }
            _ => 1,
        };
        self.last_match_ms = Some(now_ms);

        debug!(%card, combo = self.combo, "match found");
        events.push(SessionEvent::MatchFound {
            card,
            name,
            tiles: pair,
        });

        if self.combo >= 2 {
            events.push(SessionEvent::Combo(self.combo));
        }

        if !self.won && self.matched.len() * 2 == self.deck.len() {
            self.won = true;
            self.stop_timer();
            info!(
                edition = %self.edition.id,
                elapsed_secs = self.elapsed_secs,
                "session won"
            );
            events.push(SessionEvent::Win {
                elapsed_secs: self.elapsed_secs,
            });
        }
    }

    /// Run every task due at or before `now_ms`.
    pub fn advance(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        while let Some((due, task)) = self.scheduler.pop_due(now_ms) {
            match task {
                SessionTask::Tick => {
                    self.elapsed_secs += 1;
                    self.timer = Some(
                        self.scheduler
                            .schedule(due + self.timing.tick_interval_ms, SessionTask::Tick),
                    );
                    events.push(SessionEvent::Tick {
                        elapsed_secs: self.elapsed_secs,
                    });
                }
                SessionTask::Revert(pair) => {
                    for tile in pair {
                        let state = &mut self.tiles[tile.index()];
                        if *state == TileState::Up {
                            *state = TileState::Down;
                        }
                    }
                    self.face_up.clear();
                    events.push(SessionEvent::Reverted { tiles: pair });
                }
            }
        }

        events
    }

    /// Stop the elapsed-time counter.
    pub fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.scheduler.cancel(timer);
        }
    }

    /// Cancel everything this session has scheduled.
    pub fn cancel_all(&mut self) {
        self.scheduler.clear();
        self.timer = None;
    }

    // === Accessors ===

    #[must_use]
    pub fn edition(&self) -> &Arc<Edition> {
        &self.edition
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// State of a tile, `None` if it does not exist.
    #[must_use]
    pub fn tile_state(&self, tile: TileId) -> Option<TileState> {
        self.tiles.get(tile.index()).copied()
    }

    /// Tiles currently face-up and unmatched, in flip order.
    #[must_use]
    pub fn face_up(&self) -> &[TileId] {
        &self.face_up
    }

    /// Check whether a card has been matched.
    #[must_use]
    pub fn is_matched(&self, card: &CardId) -> bool {
        self.matched.contains(card)
    }

    /// Number of matched pairs.
    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    #[must_use]
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    /// Current combo streak (0 before the first match).
    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Whether the elapsed-time counter is running.
    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some()
    }

    /// When the next scheduled task is due.
    #[must_use]
    pub fn next_due(&self) -> Option<u64> {
        self.scheduler.next_due()
    }
}
