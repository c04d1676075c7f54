//! End-to-end tests for the game controller.

use rap_memory::audio::{AudioChannel, EffectKind, MemoryBackend};
use rap_memory::cards::{Edition, EditionId};
use rap_memory::core::GameConfig;
use rap_memory::deck::{Deck, TileId};
use rap_memory::game::{Game, Presentation};
use rap_memory::leaderboard::{KeyValueStore, Leaderboard, LeaderboardEntry, MemoryStore};
use rap_memory::loader::{LoadError, MemorySource};
use rap_memory::session::SessionEvent;

const NINETIES: &str = r#"{
    "edition": "90s Rappers",
    "cards": [
        { "id": "nas", "name": "Nas", "image": "images/90s/nas.jpg" },
        { "id": "biggie", "name": "The Notorious B.I.G.", "image": "images/90s/biggie.jpg" },
        { "id": "lauryn", "name": "Lauryn Hill", "image": "images/90s/lauryn.jpg" }
    ]
}"#;

const PRODUCERS: &str = r#"{
    "edition": "Producers",
    "cards": [
        { "id": "dilla", "name": "J Dilla", "image": "images/producers/dilla.jpg" },
        { "id": "premier", "name": "DJ Premier", "image": "images/producers/premier.jpg" }
    ]
}"#;

/// Presentation that writes down every hook call.
#[derive(Debug, Default)]
struct Recorder {
    decks: Vec<(EditionId, usize)>,
    events: Vec<SessionEvent>,
    boards: Vec<(EditionId, Vec<LeaderboardEntry>, Option<u32>)>,
    combos: Vec<u32>,
    celebrations: Vec<Vec<&'static str>>,
    name_requests: Vec<u32>,
}

impl Presentation for Recorder {
    fn render_deck(&mut self, edition: &Edition, deck: &Deck) {
        self.decks.push((edition.id, deck.len()));
    }

    fn show_event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }

    fn show_leaderboard(
        &mut self,
        edition: EditionId,
        entries: &[LeaderboardEntry],
        best_time: Option<u32>,
    ) {
        self.boards.push((edition, entries.to_vec(), best_time));
    }

    fn combo_effect(&mut self, count: u32) {
        self.combos.push(count);
    }

    fn celebrate(&mut self, symbols: &[&'static str]) {
        self.celebrations.push(symbols.to_vec());
    }

    fn request_player_name(&mut self, elapsed_secs: u32) {
        self.name_requests.push(elapsed_secs);
    }
}

type TestGame = Game<MemorySource, MemoryStore, Recorder>;

fn source() -> MemorySource {
    MemorySource::new()
        .with_document(EditionId::Nineties.data_ref(), NINETIES)
        .with_document(EditionId::Producers.data_ref(), PRODUCERS)
}

fn game_with(store: MemoryStore) -> (TestGame, MemoryBackend) {
    let mut backend = MemoryBackend::new();
    let game = Game::new(
        GameConfig::default().with_seed(42),
        source(),
        store,
        &mut backend,
        Recorder::default(),
    );
    (game, backend)
}

fn game() -> (TestGame, MemoryBackend) {
    game_with(MemoryStore::new())
}

/// Both tiles of every card, in edition order.
fn pairs(game: &TestGame) -> Vec<[TileId; 2]> {
    let session = game.session().expect("session running");
    session
        .edition()
        .cards
        .iter()
        .map(|card| {
            let tiles = session.deck().tiles_of(&card.id);
            [tiles[0], tiles[1]]
        })
        .collect()
}

/// Two tiles holding different cards.
fn mismatched(game: &TestGame) -> [TileId; 2] {
    let pairs = pairs(game);
    [pairs[0][0], pairs[1][0]]
}

fn solve(game: &mut TestGame, now: u64) {
    for [a, b] in pairs(game) {
        game.flip(a, now);
        game.flip(b, now);
    }
}

#[test]
fn test_start_renders_and_plays_loop() {
    let (mut game, backend) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();

    let p = game.presentation();
    assert_eq!(p.decks, vec![(EditionId::Nineties, 6)]);
    assert_eq!(p.boards, vec![(EditionId::Nineties, Vec::new(), None)]);

    let lp = backend.channel(EditionId::Nineties.loop_ref()).unwrap();
    assert!(lp.is_audible());
    assert!((lp.volume() - 0.3).abs() < 1e-6);
    assert_eq!(game.audio().current_edition(), Some(EditionId::Nineties));
}

#[test]
fn test_full_game_then_save_score() {
    let (mut game, backend) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();

    let ticks = game.advance(3_000);
    assert_eq!(ticks.len(), 3);
    solve(&mut game, 3_000);

    let p = game.presentation();
    assert!(p.events.iter().any(|e| matches!(e, SessionEvent::Win { elapsed_secs: 3 })));
    assert_eq!(p.combos, vec![2, 3]);
    assert_eq!(p.celebrations, vec![EditionId::Nineties.symbols().to_vec()]);
    assert_eq!(p.name_requests, vec![3]);

    let lp = backend.channel(EditionId::Nineties.loop_ref()).unwrap();
    assert!(lp.is_paused());
    let win = &backend.channels_for(EditionId::Nineties.win_ref())[EditionId::Nineties.index()];
    assert_eq!(win.play_count(), 1);
    assert_eq!(
        backend.channel(EffectKind::Match.source()).unwrap().play_count(),
        3
    );
    assert_eq!(
        backend.channel(EffectKind::Flip.source()).unwrap().play_count(),
        6
    );

    // The clock stopped at the win.
    game.advance(20_000);
    assert_eq!(game.session().unwrap().elapsed_secs(), 3);

    let board = game.save_score("  MC Test ").unwrap();
    assert_eq!(board, vec![LeaderboardEntry::new("MC Test", 3)]);
    assert!(game.save_score("again").is_none());

    let last = game.presentation().boards.last().unwrap();
    assert_eq!(last.2, Some(3));
    assert!(game
        .leaderboard()
        .store()
        .get(&Leaderboard::<MemoryStore>::key(EditionId::Nineties))
        .is_some());
}

#[test]
fn test_save_before_win_is_refused() {
    let (mut game, _) = game();
    assert!(game.save_score("early").is_none());

    game.start_game(EditionId::Nineties, 0).unwrap();
    assert!(game.save_score("early").is_none());
    assert!(game.leaderboard().top_entries(EditionId::Nineties).is_empty());
}

#[test]
fn test_blank_name_saved_as_anonymous() {
    let (mut game, _) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();
    solve(&mut game, 500);

    let board = game.save_score("   ").unwrap();
    assert_eq!(board[0].name, "Anonymous");
    assert_eq!(board[0].time, 0);
}

#[test]
fn test_flip_without_session_is_ignored() {
    let (mut game, backend) = game();
    assert!(game.flip(TileId::new(0), 0).is_empty());
    assert!(game.advance(5_000).is_empty());
    assert_eq!(
        backend.channel(EffectKind::Flip.source()).unwrap().play_count(),
        0
    );
}

#[test]
fn test_ignored_flip_makes_no_sound() {
    let (mut game, backend) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();

    game.flip(TileId::new(0), 10);
    assert!(game.flip(TileId::new(0), 20).is_empty());
    assert!(game.flip(TileId::new(99), 30).is_empty());
    assert_eq!(
        backend.channel(EffectKind::Flip.source()).unwrap().play_count(),
        1
    );
}

#[test]
fn test_load_failure_keeps_previous_game() {
    let (mut game, _) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();
    let [a, _] = mismatched(&game);
    game.flip(a, 100);

    let err = game.start_game(EditionId::Eighties, 200).unwrap_err();
    assert!(matches!(err, LoadError::Unreachable { .. }));
    assert_eq!(err.reference(), EditionId::Eighties.data_ref());

    let session = game.session().unwrap();
    assert_eq!(session.edition().id, EditionId::Nineties);
    assert_eq!(session.face_up(), &[a]);
    assert_eq!(game.audio().current_edition(), Some(EditionId::Nineties));
    assert_eq!(game.presentation().decks.len(), 1);
}

#[test]
fn test_malformed_edition_is_reported() {
    let mut backend = MemoryBackend::new();
    let mut game = Game::new(
        GameConfig::default(),
        MemorySource::new().with_document(EditionId::Producers.data_ref(), "{ not json"),
        MemoryStore::new(),
        &mut backend,
        Recorder::default(),
    );

    let err = game.start_game(EditionId::Producers, 0).unwrap_err();
    assert!(matches!(err, LoadError::Malformed { .. }));
    assert!(game.session().is_none());
}

#[test]
fn test_edition_fetched_once() {
    let (mut game, _) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();
    game.start_game(EditionId::Producers, 1_000).unwrap();
    game.start_game(EditionId::Nineties, 2_000).unwrap();

    assert_eq!(game.loader().source().fetch_count(), 2);
    assert_eq!(game.loader().cached_count(), 2);
}

#[test]
fn test_restart_cancels_pending_work() {
    let (mut game, _) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();
    let [a, b] = mismatched(&game);
    game.flip(a, 100);
    let events = game.flip(b, 100);
    assert!(matches!(events.last(), Some(SessionEvent::Mismatch { .. })));

    game.start_game(EditionId::Producers, 500).unwrap();
    let events = game.advance(2_000);

    assert!(!events
        .iter()
        .any(|e| matches!(e, SessionEvent::Reverted { .. })));
    let session = game.session().unwrap();
    assert_eq!(session.edition().id, EditionId::Producers);
    assert_eq!(session.elapsed_secs(), 1);
    assert!(session.face_up().is_empty());
}

#[test]
fn test_mute_silences_effects() {
    let (mut game, backend) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();

    assert!(game.toggle_mute());
    let events = game.flip(TileId::new(0), 10);
    assert_eq!(events, vec![SessionEvent::Flipped(TileId::new(0))]);

    let flip = backend.channel(EffectKind::Flip.source()).unwrap();
    assert_eq!(flip.play_count(), 0);
    let lp = backend.channel(EditionId::Nineties.loop_ref()).unwrap();
    assert!(!lp.is_audible());

    assert!(!game.toggle_mute());
    assert!(lp.is_audible());
}

#[test]
fn test_volume_applies_loop_ratio() {
    let (mut game, backend) = game();
    game.start_game(EditionId::Producers, 0).unwrap();
    game.set_volume(0.5);

    let lp = backend.channel(EditionId::Producers.loop_ref()).unwrap();
    assert!((lp.volume() - 0.15).abs() < 1e-6);
    assert_eq!(
        backend.channel(EffectKind::Combo.source()).unwrap().volume(),
        0.5
    );
}

#[test]
fn test_win_sound_fades_when_next_game_starts() {
    let (mut game, backend) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();
    solve(&mut game, 100);

    let win = backend.channels_for(EditionId::Nineties.win_ref())[EditionId::Nineties.index()].clone();
    win.set_position(0.8);

    game.start_game(EditionId::Producers, 2_000).unwrap();
    assert!(game.audio().is_fading(EditionId::Nineties));

    game.advance(3_100);
    assert!(!game.audio().is_fading(EditionId::Nineties));
    assert!(win.is_paused());
    assert_eq!(win.volume(), 1.0);
}

#[test]
fn test_corrupt_leaderboard_shows_empty() {
    let mut store = MemoryStore::new();
    store.insert_raw(Leaderboard::<MemoryStore>::key(EditionId::Nineties), "{{{");
    let (mut game, _) = game_with(store);

    game.start_game(EditionId::Nineties, 0).unwrap();
    assert_eq!(
        game.presentation().boards,
        vec![(EditionId::Nineties, Vec::new(), None)]
    );

    solve(&mut game, 0);
    let board = game.save_score("Rakim").unwrap();
    assert_eq!(board, vec![LeaderboardEntry::new("Rakim", 0)]);
}

#[test]
fn test_read_only_storage_still_returns_board() {
    let (mut game, _) = game_with(MemoryStore::read_only());
    game.start_game(EditionId::Nineties, 0).unwrap();
    game.advance(1_000);
    solve(&mut game, 1_000);

    let board = game.save_score("Guru").unwrap();
    assert_eq!(board, vec![LeaderboardEntry::new("Guru", 1)]);
    assert!(game.leaderboard().top_entries(EditionId::Nineties).is_empty());
}

#[test]
fn test_clicks_alone_drive_the_clock() {
    let (mut game, backend) = game();
    game.start_game(EditionId::Nineties, 0).unwrap();
    let [a, b] = mismatched(&game);
    game.flip(a, 0);
    game.flip(b, 0);

    let partner = pairs(&game)[0][1];
    let events = game.flip(partner, 5_000);
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::Reverted { .. })));
    assert_eq!(events.last(), Some(&SessionEvent::Flipped(partner)));
    assert!(game
        .presentation()
        .events
        .iter()
        .any(|e| matches!(e, SessionEvent::Tick { elapsed_secs: 5 })));

    // Finish the open pair, then the rest, all on clicks at 30s.
    game.flip(a, 30_000);
    solve(&mut game, 30_000);
    assert_eq!(game.presentation().name_requests, vec![30]);
    assert_eq!(
        backend.channel(EffectKind::Flip.source()).unwrap().play_count(),
        2 + 1 + 1 + 4
    );
}
