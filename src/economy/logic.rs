use super::types::*;
use crate::core::constants::*;
use crate::error::{GachaError, GachaResult};
use crate::rates::ActiveEffects;

/// Fountain payout for `minutes` accumulated.
///
/// Exponential through reward(1) = 10 and reward(25) = 1000, hard-capped at
/// 1000. Anything under a minute pays nothing.
pub fn fountain_reward(minutes: f64) -> u64 {
    if minutes.is_nan() || minutes < FOUNTAIN_MIN_MINUTES {
        return 0;
    }
    let growth = FOUNTAIN_GROWTH_RATIO.ln() / FOUNTAIN_GROWTH_SPAN_MINUTES;
    let reward = FOUNTAIN_REWARD_AT_ONE_MINUTE * (growth * (minutes - FOUNTAIN_MIN_MINUTES)).exp();
    // Absorb exp/ln rounding so the calibration points land exactly.
    ((reward + 1e-9).floor() as u64).min(FOUNTAIN_REWARD_CAP)
}

/// Gems credited each time the passive timer runs out.
pub fn passive_reward(effects: &ActiveEffects) -> u64 {
    (PASSIVE_GEM_REWARD as f64 * (1.0 + effects.gem_boost / 100.0))
        .floor()
        .max(0.0) as u64
}

impl Economy {
    pub fn new(starting_gems: u64, now_ms: i64) -> Self {
        Self {
            gems: starting_gems,
            next_gem_time: PASSIVE_GEM_PERIOD_SECONDS,
            fountain_minutes: 0.0,
            fountain_last_collected_ms: now_ms,
            last_tick_ms: now_ms,
        }
    }

    /// Deduct `cost`, or reject without touching the balance.
    pub fn spend(&mut self, cost: u64) -> GachaResult<()> {
        self.gems = self
            .gems
            .checked_sub(cost)
            .ok_or(GachaError::InsufficientFunds {
                needed: cost,
                available: self.gems,
            })?;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.gems = self.gems.saturating_add(amount);
    }

    /// One real-time second of the passive timer. Returns gems credited.
    pub fn tick_second(&mut self, effects: &ActiveEffects) -> u64 {
        self.next_gem_time -= 1.0 + effects.timer_boost / 100.0;
        if self.next_gem_time > 0.0 {
            return 0;
        }
        let reward = passive_reward(effects);
        self.credit(reward);
        self.next_gem_time = PASSIVE_GEM_PERIOD_SECONDS;
        reward
    }

    /// Catch up to `now_ms`: one passive step per whole elapsed second, then
    /// refresh the fountain. Returns passive gems credited.
    pub fn advance(&mut self, now_ms: i64, effects: &ActiveEffects) -> u64 {
        let elapsed_seconds = (now_ms - self.last_tick_ms).max(0) / 1000;
        let mut credited = 0;
        for _ in 0..elapsed_seconds {
            credited += self.tick_second(effects);
        }
        self.last_tick_ms += elapsed_seconds * 1000;
        if now_ms < self.last_tick_ms {
            // Clock went backwards; restart the reference.
            self.last_tick_ms = now_ms;
        }
        self.refresh_fountain(now_ms);
        credited
    }

    /// Minutes since the last collection as of `now_ms`, capped.
    pub fn fountain_minutes_at(&self, now_ms: i64) -> f64 {
        let elapsed_ms = (now_ms - self.fountain_last_collected_ms).max(0);
        (elapsed_ms as f64 / 60_000.0).min(FOUNTAIN_MAX_MINUTES)
    }

    pub fn refresh_fountain(&mut self, now_ms: i64) {
        self.fountain_minutes = self.fountain_minutes_at(now_ms);
    }

    /// Pay out the fountain and restart it from `now_ms`.
    pub fn collect_fountain(&mut self, now_ms: i64) -> GachaResult<u64> {
        self.refresh_fountain(now_ms);
        let reward = fountain_reward(self.fountain_minutes);
        if reward == 0 {
            return Err(GachaError::NothingToCollect);
        }
        self.credit(reward);
        self.fountain_minutes = 0.0;
        self.fountain_last_collected_ms = now_ms;
        Ok(reward)
    }

    /// Move the passive timer reference without crediting anything in between.
    pub fn resume_at(&mut self, now_ms: i64) {
        self.last_tick_ms = now_ms;
    }

    pub fn gem_state(&self) -> GemState {
        GemState {
            gems: self.gems,
            next_gem_time: self.next_gem_time,
        }
    }

    pub fn fountain_state(&self, now_ms: i64) -> FountainState {
        let minutes = self.fountain_minutes_at(now_ms);
        let reward = fountain_reward(minutes);
        FountainState {
            minutes,
            reward,
            ready: reward > 0,
        }
    }
}
