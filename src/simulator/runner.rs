//! Monte Carlo runner driving real sessions and the fusion engine.

use super::config::SimConfig;
use super::report::{FusionStats, RunStats, SimReport};
use crate::catalog::{Catalog, Character, Rarity};
use crate::collection::Collection;
use crate::config::GameConfig;
use crate::core::clock::ManualClock;
use crate::core::constants::FUSION_BATCH_SIZE;
use crate::error::{GachaError, GachaResult};
use crate::fusion::{attempt_fusion, FusionSelection};
use crate::pity::PityTracker;
use crate::presenter::NullPresenter;
use crate::pull::PullCount;
use crate::session::GameSession;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;
use tracing::debug;

fn run_seed(config: &SimConfig, salt: u64) -> u64 {
    match config.seed {
        Some(seed) => seed.wrapping_add(salt),
        None => rand::thread_rng().gen(),
    }
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let catalog = Catalog::shared();
    let mut runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let stats = simulate_single_run(config, run_seed(config, run_idx as u64));
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {} pulls, longest SR drought {}, longest UR drought {}, {} unique",
                run_idx + 1,
                config.num_runs,
                stats.pulls,
                stats.longest_super_rare_drought,
                stats.longest_ultra_rare_drought,
                stats.unique_collected
            );
        }
        runs.push(stats);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(run_seed(config, u32::MAX as u64));
    let fusion = simulate_fusions(&catalog, config.fusion_trials, &mut rng);

    SimReport::from_runs(runs, fusion)
}

/// One session: every ten-pull is saved in full.
fn simulate_single_run(config: &SimConfig, seed: u64) -> RunStats {
    let mut game_config = GameConfig::seeded(seed);
    game_config.starting_gems = config.starting_gems();
    let mut session = GameSession::new(
        &game_config,
        Box::new(ManualClock::new(0)),
        Box::new(NullPresenter),
    );

    let mut stats = RunStats::default();
    let mut mirror = PityTracker::new();
    let mut super_rare_drought = 0;
    let mut ultra_rare_drought = 0;

    for _ in 0..config.ten_pulls_per_run {
        let outcome = match session.pull(PullCount::Ten) {
            Ok(outcome) => outcome,
            Err(err) => {
                debug!(%err, "simulated pull rejected");
                break;
            }
        };
        for character in &outcome.characters {
            match mirror.floor() {
                Some(Rarity::UltraRare) => stats.ultra_rare_pity_activations += 1,
                Some(_) => stats.super_rare_pity_activations += 1,
                None => {}
            }
            mirror.record(character.rarity);

            stats.pulls += 1;
            stats.by_rarity[character.rarity.index()] += 1;
            if character.rarity >= Rarity::SuperRare {
                super_rare_drought = 0;
            } else {
                super_rare_drought += 1;
                stats.longest_super_rare_drought =
                    stats.longest_super_rare_drought.max(super_rare_drought);
            }
            if character.rarity >= Rarity::UltraRare {
                ultra_rare_drought = 0;
            } else {
                ultra_rare_drought += 1;
                stats.longest_ultra_rare_drought =
                    stats.longest_ultra_rare_drought.max(ultra_rare_drought);
            }
        }
        stats.gems_spent += outcome.cost_charged;
        if session.save_all_drawn().is_err() {
            break;
        }
    }

    let collection = session.collection_stats();
    stats.unique_collected = collection.unique_characters;
    stats.final_luck_boost = session.active_effects().luck_boost;
    stats
}

/// First tier with at least ten effect-free catalog entries of distinct ids.
fn fusion_tier(catalog: &Catalog) -> Option<(Rarity, Vec<Character>)> {
    Rarity::ALL
        .into_iter()
        .filter(|r| r.next().is_some())
        .map(|r| {
            let mut seen = HashSet::new();
            let plain: Vec<Character> = catalog
                .by_rarity(r)
                .filter(|c| !c.has_effect() && seen.insert(c.name.clone()))
                .cloned()
                .collect();
            (r, plain)
        })
        .find(|(_, plain)| plain.len() >= 10)
}

fn simulate_fusions<R: Rng>(catalog: &Catalog, trials: u32, rng: &mut R) -> FusionStats {
    let mut stats = FusionStats::default();
    if trials == 0 {
        return stats;
    }

    // Identical: ten copies of one card.
    let Some(base) = catalog.by_rarity(Rarity::Common).find(|c| !c.has_effect()) else {
        return stats;
    };
    for _ in 0..trials {
        match fusion_trial(std::iter::repeat(base).take(FUSION_BATCH_SIZE), catalog, rng) {
            Ok(success) => {
                stats.identical_trials += 1;
                stats.identical_successes += success as u32;
            }
            Err(err) => {
                debug!(%err, "identical fusion trial rejected");
                stats.rejected_trials += 1;
            }
        }
    }

    // Distinct: ten different plain cards of one tier.
    let Some((rarity, plain)) = fusion_tier(catalog) else {
        return stats;
    };
    for _ in 0..trials {
        match fusion_trial(plain.iter().take(FUSION_BATCH_SIZE), catalog, rng) {
            Ok(success) => {
                stats.distinct_trials += 1;
                stats.distinct_successes += success as u32;
            }
            Err(err) => {
                debug!(%err, rarity = rarity.name(), "distinct fusion trial rejected");
                stats.rejected_trials += 1;
            }
        }
    }

    stats
}

/// Save and stage each card in a fresh collection, then fuse. Returns whether
/// the fusion succeeded.
fn fusion_trial<'a, R: Rng>(
    cards: impl Iterator<Item = &'a Character>,
    catalog: &Catalog,
    rng: &mut R,
) -> GachaResult<bool> {
    let mut collection = Collection::new();
    let mut selection = FusionSelection::new();
    let mut rarity = None;
    for character in cards {
        let entry = collection.save(character.clone());
        selection.stage(&collection, entry)?;
        rarity = Some(character.rarity);
    }
    let rarity = rarity.ok_or(GachaError::InvalidSelectionSize {
        expected: FUSION_BATCH_SIZE,
        found: 0,
    })?;
    let outcome = attempt_fusion(&mut collection, &mut selection, rarity, catalog, rng)?;
    Ok(outcome.success)
}
