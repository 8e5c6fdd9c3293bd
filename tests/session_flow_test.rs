//! Session flow tests: pull/decide state machine, presenter cues, the pull
//! log and the multi-session registry.

use gacha::catalog::{Catalog, Character, Rarity};
use gacha::collection::{Collection, EntryId};
use gacha::config::GameConfig;
use gacha::core::clock::ManualClock;
use gacha::error::GachaError;
use gacha::presenter::{Cue, NullPresenter, Presenter, PullLog};
use gacha::pull::PullCount;
use gacha::session::{GameSession, SessionPhase, SessionRegistry};
use std::sync::{Arc, Mutex};

/// Records cues so tests can check what the front end was asked to play.
#[derive(Clone, Default)]
struct RecordingPresenter {
    cues: Arc<Mutex<Vec<Cue>>>,
    pulls: Arc<Mutex<Vec<String>>>,
}

impl RecordingPresenter {
    fn cues(&self) -> Vec<Cue> {
        self.cues.lock().unwrap().clone()
    }

    fn clear(&self) {
        self.cues.lock().unwrap().clear();
    }
}

impl Presenter for RecordingPresenter {
    fn play_cue(&mut self, cue: Cue) {
        self.cues.lock().unwrap().push(cue);
    }

    fn log_pull(&mut self, character: &Character, _username: &str) {
        self.pulls.lock().unwrap().push(character.name.clone());
    }
}

fn recorded_session(seed: u64, gems: u64) -> (GameSession, RecordingPresenter, ManualClock) {
    let mut config = GameConfig::seeded(seed);
    config.starting_gems = gems;
    let presenter = RecordingPresenter::default();
    let clock = ManualClock::new(0);
    let session = GameSession::new(&config, Box::new(clock.clone()), Box::new(presenter.clone()));
    (session, presenter, clock)
}

// =========================================================================
// Pull and decide
// =========================================================================

#[test]
fn test_single_pull_then_save() {
    let (mut session, presenter, _clock) = recorded_session(1, 8000);
    let outcome = session.pull(PullCount::Single).unwrap();
    assert_eq!(outcome.cost_charged, 100);
    assert_eq!(session.gems(), 7900);

    let pending = session.pending_draw().unwrap();
    assert_eq!(pending.position, 0);
    assert_eq!(pending.batch_size, 1);
    assert_eq!(pending.character, outcome.characters[0]);
    assert_eq!(
        presenter.cues(),
        vec![Cue::Pull, Cue::for_rarity(outcome.characters[0].rarity)]
    );

    presenter.clear();
    let entry = session.save_drawn().unwrap();
    assert_eq!(presenter.cues(), vec![Cue::Save]);
    assert_eq!(session.phase(), &SessionPhase::Idle);
    assert_eq!(
        session.collection().get(entry).unwrap().character.name,
        outcome.characters[0].name
    );
}

#[test]
fn test_ten_pull_plays_best_reveal_once() {
    let (mut session, presenter, _clock) = recorded_session(2, 8000);
    let outcome = session.pull(PullCount::Ten).unwrap();
    assert_eq!(outcome.characters.len(), 10);
    let best = outcome.characters.iter().map(|c| c.rarity).max().unwrap();
    assert_eq!(presenter.cues(), vec![Cue::Pull, Cue::for_rarity(best)]);
    assert_eq!(presenter.pulls.lock().unwrap().len(), 10);
}

#[test]
fn test_mixed_decisions_then_dismiss() {
    let (mut session, _presenter, _clock) = recorded_session(3, 8000);
    let outcome = session.pull(PullCount::Ten).unwrap();
    assert_eq!(session.gems(), 7000);

    session.save_drawn().unwrap();
    session.save_drawn().unwrap();
    let payout = session.sell_drawn().unwrap();
    assert_eq!(session.gems(), 7000 + payout);
    assert_eq!(session.lifetime_stats().total_cards_sold, 1);

    let pending = session.pending_draw().unwrap();
    assert_eq!(pending.position, 3);
    assert_eq!(pending.character, outcome.characters[3]);

    assert_eq!(session.dismiss_drawn(), Ok(7));
    assert!(session.phase().is_idle());
    assert_eq!(session.collection().total_cards(), 2);
    assert_eq!(session.lifetime_stats().total_pulls, 10);
}

#[test]
fn test_save_all_keeps_batch_order() {
    let (mut session, _presenter, _clock) = recorded_session(4, 8000);
    let outcome = session.pull(PullCount::Ten).unwrap();
    session.sell_drawn().unwrap();
    let entries = session.save_all_drawn().unwrap();
    assert_eq!(entries.len(), 9);
    for (entry, character) in entries.iter().zip(&outcome.characters[1..]) {
        let owned = session.collection().get(*entry).unwrap();
        if character.has_effect() {
            assert_eq!(&owned.character, character);
        } else {
            assert_eq!(owned.character.name, character.name);
        }
    }
    assert_eq!(session.collection().total_cards(), 9);
    assert!(session.phase().is_idle());
}

#[test]
fn test_decisions_without_a_draw_are_rejected() {
    let (mut session, presenter, _clock) = recorded_session(5, 8000);
    assert_eq!(session.save_drawn(), Err(GachaError::NoPendingDraw));
    assert_eq!(session.sell_drawn(), Err(GachaError::NoPendingDraw));
    assert_eq!(session.save_all_drawn(), Err(GachaError::NoPendingDraw));
    assert_eq!(session.dismiss_drawn(), Err(GachaError::NoPendingDraw));
    assert!(presenter.cues().is_empty());
    assert_eq!(session.gems(), 8000);
}

#[test]
fn test_second_pull_blocked_until_resolved() {
    let (mut session, _presenter, _clock) = recorded_session(6, 8000);
    session.pull(PullCount::Single).unwrap();
    assert_eq!(
        session.pull(PullCount::Ten),
        Err(GachaError::OperationInProgress)
    );
    assert_eq!(session.gems(), 7900);
    session.sell_drawn().unwrap();
    assert!(session.pull(PullCount::Single).is_ok());
}

#[test]
fn test_rejected_pull_plays_nothing() {
    let (mut session, presenter, _clock) = recorded_session(7, 99);
    assert_eq!(
        session.pull(PullCount::Single),
        Err(GachaError::InsufficientFunds {
            needed: 100,
            available: 99
        })
    );
    assert!(presenter.cues().is_empty());
    assert!(presenter.pulls.lock().unwrap().is_empty());
}

// =========================================================================
// Fusion and fountain cues
// =========================================================================

/// A session whose collection holds one stacked entry of ten plain commons.
fn session_with_commons(seed: u64, presenter: &RecordingPresenter) -> (GameSession, EntryId) {
    let config = GameConfig::seeded(seed);
    let fresh = GameSession::new(&config, Box::new(ManualClock::new(0)), Box::new(NullPresenter));
    let mut data = fresh.to_save_data();
    let mut collection = Collection::new();
    let kitty = Catalog::shared()
        .characters()
        .iter()
        .find(|c| c.rarity == Rarity::Common && !c.has_effect())
        .cloned()
        .unwrap();
    let mut entry = None;
    for _ in 0..10 {
        entry = Some(collection.save(kitty.clone()));
    }
    data.collection = collection;
    let session = GameSession::restore(
        &config,
        data,
        Box::new(ManualClock::new(0)),
        Box::new(presenter.clone()),
    );
    (session, entry.unwrap())
}

#[test]
fn test_fusion_success_cue() {
    let presenter = RecordingPresenter::default();
    let (mut session, entry) = session_with_commons(8, &presenter);
    for staged in 1..=10 {
        assert_eq!(session.stage_for_fusion(entry), Ok(staged));
    }
    assert_eq!(session.fusion_chance(Rarity::Common), Some(100));
    let outcome = session.attempt_fusion(Rarity::Common).unwrap();
    assert!(outcome.success);
    assert_eq!(presenter.cues(), vec![Cue::Legendary]);
    assert!(session.staged(Rarity::Common).is_empty());
    assert_eq!(session.collection().total_cards(), 1);
    assert_eq!(session.collection().entries()[0].rarity(), Rarity::Rare);
}

#[test]
fn test_locking_withdraws_staged_copies() {
    let presenter = RecordingPresenter::default();
    let (mut session, entry) = session_with_commons(12, &presenter);
    for _ in 0..10 {
        session.stage_for_fusion(entry).unwrap();
    }
    assert_eq!(session.fusion_chance(Rarity::Common), Some(100));

    assert_eq!(session.toggle_lock(entry), Ok(true));
    assert!(session.staged(Rarity::Common).is_empty());
    assert_eq!(session.selection().staged_count(entry), 0);
    assert_eq!(session.fusion_chance(Rarity::Common), None);
    assert_eq!(
        session.attempt_fusion(Rarity::Common),
        Err(GachaError::InvalidSelectionSize {
            expected: 10,
            found: 0
        })
    );
    assert_eq!(session.stage_for_fusion(entry), Err(GachaError::ItemLocked(entry)));

    assert_eq!(session.toggle_lock(entry), Ok(false));
    assert_eq!(session.stage_for_fusion(entry), Ok(1));
    assert_eq!(session.collection().total_cards(), 10);
}

#[test]
fn test_short_fusion_batch_is_rejected() {
    let (mut session, presenter, _clock) = recorded_session(9, 8000);
    assert_eq!(
        session.attempt_fusion(Rarity::Rare),
        Err(GachaError::InvalidSelectionSize {
            expected: 10,
            found: 0
        })
    );
    assert_eq!(session.fusion_chance(Rarity::Rare), None);
    assert!(presenter.cues().is_empty());
}

#[test]
fn test_fountain_collect_cue() {
    let (mut session, presenter, clock) = recorded_session(10, 0);
    clock.advance_minutes(3);
    session.collect_fountain().unwrap();
    assert_eq!(presenter.cues(), vec![Cue::Save]);
}

// =========================================================================
// Pull log
// =========================================================================

#[test]
fn test_pull_log_through_shared_handle() {
    let log = Arc::new(Mutex::new(PullLog::new()));
    let config = GameConfig::seeded(12);
    let mut session = GameSession::new(
        &config,
        Box::new(ManualClock::new(0)),
        Box::new(Arc::clone(&log)),
    );
    let outcome = session.pull(PullCount::Ten).unwrap();

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 10);
    let latest = log.latest().unwrap();
    assert_eq!(latest.character, outcome.characters[9]);
    assert_eq!(latest.username, "Tester");
}

// =========================================================================
// Registry
// =========================================================================

#[test]
fn test_registry_hosts_independent_sessions() {
    let registry = SessionRegistry::new();
    let make = |seed| {
        let mut config = GameConfig::seeded(seed);
        config.starting_gems = 500;
        GameSession::new(&config, Box::new(ManualClock::new(0)), Box::new(NullPresenter))
    };
    let a = registry.insert(make(1));
    let b = registry.insert(make(2));
    assert_eq!(registry.len(), 2);

    let cost = registry
        .with_session(&a, |s| s.pull(PullCount::Single).map(|o| o.cost_charged))
        .unwrap();
    assert_eq!(cost, Ok(100));
    assert_eq!(registry.with_session(&a, |s| s.gems()), Some(400));
    assert_eq!(registry.with_session(&b, |s| s.gems()), Some(500));

    assert_eq!(registry.tick_all(60_000), 100);
    assert_eq!(registry.with_session(&b, |s| s.gems()), Some(550));

    assert!(registry.remove(&a).is_some());
    assert!(registry.with_session(&a, |s| s.gems()).is_none());
    assert_eq!(registry.ids(), vec![b]);
}
