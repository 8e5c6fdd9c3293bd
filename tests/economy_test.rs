//! Economy tests: passive income timer, boosts and the prize fountain.

use gacha::config::GameConfig;
use gacha::core::clock::ManualClock;
use gacha::economy::{fountain_reward, passive_reward, Economy};
use gacha::error::GachaError;
use gacha::presenter::NullPresenter;
use gacha::rates::ActiveEffects;
use gacha::session::GameSession;

fn session_with_clock(gems: u64) -> (GameSession, ManualClock) {
    let clock = ManualClock::new(1_000_000);
    let mut config = GameConfig::seeded(11);
    config.starting_gems = gems;
    let session = GameSession::new(&config, Box::new(clock.clone()), Box::new(NullPresenter));
    (session, clock)
}

// =========================================================================
// Passive income
// =========================================================================

#[test]
fn test_passive_income_every_sixty_seconds() {
    let (mut session, clock) = session_with_clock(0);
    clock.advance_seconds(59);
    assert_eq!(session.tick_now(), 0);
    assert_eq!(session.gems(), 0);

    clock.advance_seconds(1);
    assert_eq!(session.tick_now(), 50);
    assert_eq!(session.gems(), 50);
    assert_eq!(session.gem_state().next_gem_time, 60.0);

    clock.advance_seconds(120);
    assert_eq!(session.tick_now(), 100);
    assert_eq!(session.gems(), 150);
}

#[test]
fn test_partial_seconds_carry_over() {
    let mut economy = Economy::new(0, 0);
    let effects = ActiveEffects::new();
    for step in 1..=119 {
        economy.advance(step * 500, &effects);
    }
    // 59.5 seconds elapsed: 59 whole steps applied
    assert_eq!(economy.gems, 0);
    assert_eq!(economy.next_gem_time, 1.0);
    economy.advance(60_000, &effects);
    assert_eq!(economy.gems, 50);
}

#[test]
fn test_timer_boost_speeds_up_payouts() {
    let mut economy = Economy::new(0, 0);
    let effects = ActiveEffects {
        timer_boost: 100.0,
        ..ActiveEffects::new()
    };
    for _ in 0..29 {
        assert_eq!(economy.tick_second(&effects), 0);
    }
    assert_eq!(economy.tick_second(&effects), 50);
    assert_eq!(economy.next_gem_time, 60.0);
}

#[test]
fn test_gem_boost_scales_payout() {
    let effects = ActiveEffects {
        gem_boost: 50.0,
        ..ActiveEffects::new()
    };
    assert_eq!(passive_reward(&ActiveEffects::new()), 50);
    assert_eq!(passive_reward(&effects), 75);

    let mut economy = Economy::new(10, 0);
    assert_eq!(economy.advance(60_000, &effects), 75);
    assert_eq!(economy.gems, 85);
}

#[test]
fn test_timer_never_leaves_its_range() {
    let mut economy = Economy::new(0, 0);
    let effects = ActiveEffects {
        timer_boost: 37.0,
        ..ActiveEffects::new()
    };
    for _ in 0..1000 {
        economy.tick_second(&effects);
        assert!(economy.next_gem_time > 0.0 && economy.next_gem_time <= 60.0);
    }
}

// =========================================================================
// Fountain
// =========================================================================

#[test]
fn test_fountain_reward_is_monotonic_and_capped() {
    let mut previous = 0;
    let mut minutes = 0.0;
    while minutes <= 40.0 {
        let reward = fountain_reward(minutes);
        assert!(reward >= previous, "{minutes} min");
        assert!(reward <= 1000);
        previous = reward;
        minutes += 0.25;
    }
    assert_eq!(fountain_reward(1.0), 10);
    assert_eq!(fountain_reward(25.0), 1000);
    assert_eq!(fountain_reward(40.0), 1000);
}

#[test]
fn test_fountain_collect_through_session() {
    let (mut session, clock) = session_with_clock(0);
    assert_eq!(session.collect_fountain(), Err(GachaError::NothingToCollect));

    clock.advance_minutes(5);
    let state = session.fountain_state();
    assert!(state.ready);
    assert_eq!(state.reward, 21);
    assert_eq!(session.collect_fountain(), Ok(21));
    assert_eq!(session.gems(), 21);

    // Collecting restarts the accumulator.
    assert_eq!(session.fountain_state().minutes, 0.0);
    assert_eq!(session.collect_fountain(), Err(GachaError::NothingToCollect));
}

#[test]
fn test_fountain_caps_at_twenty_five_minutes() {
    let (mut session, clock) = session_with_clock(0);
    clock.advance_minutes(90);
    let state = session.fountain_state();
    assert_eq!(state.minutes, 25.0);
    assert_eq!(state.reward, 1000);
    assert_eq!(session.collect_fountain(), Ok(1000));
}

#[test]
fn test_fountain_under_one_minute_is_not_ready() {
    let (mut session, clock) = session_with_clock(0);
    clock.advance_seconds(59);
    assert!(!session.fountain_state().ready);
    assert_eq!(session.collect_fountain(), Err(GachaError::NothingToCollect));
    clock.advance_seconds(1);
    assert_eq!(session.collect_fountain(), Ok(10));
}
