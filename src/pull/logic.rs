use crate::catalog::{Catalog, Character, Rarity};
use crate::core::constants::{MULTI_PULL_SIZE, PULL_PRICE};
use crate::pity::PityTracker;
use crate::rates::RateTable;
use crate::stats::LifetimeStats;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The two pull sizes the game offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PullCount {
    Single,
    Ten,
}

impl PullCount {
    pub fn times(&self) -> u32 {
        match self {
            PullCount::Single => 1,
            PullCount::Ten => MULTI_PULL_SIZE,
        }
    }

    pub fn from_times(times: u32) -> Option<PullCount> {
        match times {
            1 => Some(PullCount::Single),
            MULTI_PULL_SIZE => Some(PullCount::Ten),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PullOutcome {
    pub characters: Vec<Character>,
    pub cost_charged: u64,
}

/// Gem cost of a pull after discount, floored and never negative.
pub fn pull_cost(count: PullCount, pull_discount: f64) -> u64 {
    let cost = PULL_PRICE as f64 * count.times() as f64 * (1.0 - pull_discount / 100.0);
    cost.floor().max(0.0) as u64
}

/// Rates the next single draw uses, after the pity floor if one applies.
pub fn draw_rates(rates: &RateTable, pity: &PityTracker) -> RateTable {
    match pity.floor() {
        Some(floor) => rates.with_pity_floor(floor),
        None => *rates,
    }
}

/// One draw: pick a tier from the normalized `rates` (pity applied), then a
/// uniform catalog entry of that tier. Updates pity and lifetime counters.
pub fn draw_one<R: Rng>(
    catalog: &Catalog,
    rates: &RateTable,
    pity: &mut PityTracker,
    stats: &mut LifetimeStats,
    rng: &mut R,
) -> Option<Character> {
    let table = draw_rates(rates, pity);
    let roll = rng.gen::<f64>() * 100.0;
    let rarity = table.roll(roll);
    let character = pick_in_tier(catalog, rarity, rng)?;

    debug!(
        roll,
        rarity = rarity.name(),
        pity_floor = ?pity.floor(),
        character = %character.name,
        "draw"
    );

    pity.record(character.rarity);
    stats.record_pulls(1);
    stats.record_rarity(character.rarity);
    Some(character)
}

/// Uniform pick within a tier. A tier with no entries falls back to the
/// nearest lower tier that has any, then upward.
fn pick_in_tier<R: Rng>(catalog: &Catalog, rarity: Rarity, rng: &mut R) -> Option<Character> {
    let lower = Rarity::ALL[..=rarity.index()].iter().rev();
    let upper = Rarity::ALL[rarity.index() + 1..].iter();
    lower
        .chain(upper)
        .find(|r| catalog.count_of_rarity(**r) > 0)
        .and_then(|r| catalog.random_of_rarity(*r, rng))
        .cloned()
}

/// `count` draws in sequence; pity advances between them.
pub fn draw_batch<R: Rng>(
    catalog: &Catalog,
    rates: &RateTable,
    pity: &mut PityTracker,
    stats: &mut LifetimeStats,
    count: PullCount,
    rng: &mut R,
) -> Vec<Character> {
    (0..count.times())
        .filter_map(|_| draw_one(catalog, rates, pity, stats, rng))
        .collect()
}
