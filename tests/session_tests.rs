//! Session state machine tests driven by random flip/advance sequences.

use std::sync::Arc;

use proptest::prelude::*;

use rap_memory::cards::{CardDefinition, Edition, EditionId, EditionRecord};
use rap_memory::core::{GameConfig, GameRng};
use rap_memory::deck::{self, TileId};
use rap_memory::session::{MatchSession, SessionEvent, TileState};

fn session(pairs: usize, seed: u64) -> MatchSession {
    let cards = (0..pairs)
        .map(|i| CardDefinition::new(format!("r{i}"), format!("Rapper {i}"), format!("img/{i}.jpg")))
        .collect();
    let edition = Edition::from_record(
        EditionId::UndergroundLegends,
        EditionRecord {
            edition: "Underground Legends".into(),
            cards,
        },
    )
    .expect("valid edition");
    let deck = deck::build(&edition, &mut GameRng::new(seed));
    MatchSession::new(Arc::new(edition), deck, &GameConfig::default(), 0)
}

/// Solve the board pair by pair, `gap_ms` between matches.
fn solve(session: &mut MatchSession, mut now: u64, gap_ms: u64) -> (Vec<SessionEvent>, u64) {
    let mut events = Vec::new();
    let cards: Vec<_> = session.edition().cards.iter().map(|c| c.id.clone()).collect();
    for card in cards {
        let tiles = session.deck().tiles_of(&card);
        events.extend(session.advance(now));
        events.extend(session.flip(tiles[0], now));
        events.extend(session.flip(tiles[1], now));
        now += gap_ms;
    }
    (events, now)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Arbitrary play never leaves more than two tiles face-up, never
    /// un-matches a tile, and wins exactly when every pair is found.
    #[test]
    fn prop_random_play_invariants(
        pairs in 1usize..7,
        seed in any::<u64>(),
        steps in prop::collection::vec((0u16..14, 0u64..2_500), 0..200),
    ) {
        let mut s = session(pairs, seed);
        let len = s.deck().len();
        let mut now = 0u64;
        let mut wins = 0usize;
        let mut matched = vec![false; len];

        for (tile, dt) in steps {
            now += dt;
            let mut events = s.advance(now);
            events.extend(s.flip(TileId::new(tile % len as u16), now));

            wins += events.iter().filter(|e| e.is_win()).count();
            prop_assert!(s.face_up().len() <= 2);

            for t in s.deck().tile_ids() {
                let state = s.tile_state(t);
                if matched[t.index()] {
                    prop_assert_eq!(state, Some(TileState::Matched));
                }
                matched[t.index()] = state == Some(TileState::Matched);
            }

            prop_assert_eq!(s.is_won(), s.matched_count() == s.deck().pair_count());
        }

        prop_assert!(wins <= 1);
        prop_assert_eq!(wins == 1, s.is_won());

        // A pending mismatch always resolves once its delay passes.
        s.advance(now + GameConfig::default().mismatch_delay_ms);
        prop_assert!(s.face_up().len() <= 1);
    }

    /// Elapsed time after any gap equals the number of whole ticks.
    #[test]
    fn prop_elapsed_counts_whole_seconds(gaps in prop::collection::vec(0u64..5_000, 1..20)) {
        let mut s = session(4, 7);
        let mut now = 0;
        for gap in gaps {
            now += gap;
            s.advance(now);
            prop_assert_eq!(u64::from(s.elapsed_secs()), now / 1_000);
        }
    }
}

#[test]
fn test_quick_solve_builds_combo() {
    let mut s = session(5, 3);
    let (events, _) = solve(&mut s, 100, 500);

    let combos: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Combo(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(combos, vec![2, 3, 4, 5]);
    assert!(s.is_won());
    assert_eq!(events.iter().filter(|e| e.is_win()).count(), 1);
}

#[test]
fn test_slow_solve_has_no_combo() {
    let mut s = session(3, 3);
    let (events, _) = solve(&mut s, 0, 10_001);

    assert!(!events.iter().any(|e| matches!(e, SessionEvent::Combo(_))));
    assert_eq!(s.combo(), 1);
    assert!(s.is_won());
}

#[test]
fn test_timer_stops_at_win() {
    let mut s = session(2, 11);
    let (events, now) = solve(&mut s, 2_500, 0);

    let win_secs = events.iter().find_map(|e| match e {
        SessionEvent::Win { elapsed_secs } => Some(*elapsed_secs),
        _ => None,
    });
    assert_eq!(win_secs, Some(2));
    assert!(!s.is_timer_running());

    let later = s.advance(now + 60_000);
    assert!(later.is_empty());
    assert_eq!(s.elapsed_secs(), 2);
}

#[test]
fn test_flips_blocked_while_mismatch_pending() {
    let mut s = session(3, 5);
    let first = TileId::new(0);
    let card = s.deck().card_id(first).cloned().expect("tile exists");
    let other = s
        .deck()
        .tile_ids()
        .find(|&t| s.deck().card_id(t) != Some(&card))
        .expect("a tile with another card");
    let third = s
        .deck()
        .tile_ids()
        .find(|&t| t != first && t != other)
        .expect("a third tile");

    s.flip(first, 0);
    let events = s.flip(other, 0);
    assert!(matches!(events.last(), Some(SessionEvent::Mismatch { .. })));

    assert!(s.flip(third, 500).is_empty());
    assert_eq!(s.tile_state(third), Some(TileState::Down));

    let events = s.advance(1_000);
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::Reverted { tiles } if *tiles == [first, other])));
    assert!(s.face_up().is_empty());
    assert_eq!(s.flip(third, 1_000), vec![SessionEvent::Flipped(third)]);
}

#[test]
fn test_flip_alone_releases_mismatched_pair() {
    let mut s = session(3, 8);
    let pairs: Vec<[TileId; 2]> = s
        .edition()
        .cards
        .iter()
        .map(|c| {
            let tiles = s.deck().tiles_of(&c.id);
            [tiles[0], tiles[1]]
        })
        .collect();

    s.flip(pairs[0][0], 0);
    s.flip(pairs[1][0], 0);

    // The revert was due at 1_000; a click at 5_000 must not be blocked by it.
    let events = s.flip(pairs[0][1], 5_000);
    assert!(events
        .iter()
        .any(|e| matches!(e, SessionEvent::Reverted { .. })));
    assert_eq!(events.last(), Some(&SessionEvent::Flipped(pairs[0][1])));
    assert_eq!(s.elapsed_secs(), 5);
}

#[test]
fn test_win_time_counts_ticks_due_at_the_last_click() {
    let mut s = session(2, 21);
    let mut events = Vec::new();
    let cards: Vec<_> = s.edition().cards.iter().map(|c| c.id.clone()).collect();
    for card in cards {
        let tiles = s.deck().tiles_of(&card);
        events.extend(s.flip(tiles[0], 30_000));
        events.extend(s.flip(tiles[1], 30_000));
    }

    assert_eq!(
        events.iter().find(|e| e.is_win()),
        Some(&SessionEvent::Win { elapsed_secs: 30 })
    );
}
