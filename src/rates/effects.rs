//! Passive effect aggregation: character effects, collection milestones and
//! edition completion bonuses folded into one set of percentage boosts.

use crate::catalog::{Edition, Effect, EffectKind};
use crate::core::constants::*;
use serde::{Deserialize, Serialize};

/// Which aggregate fields an effect kind feeds. `Special` feeds all five.
pub fn effect_targets(kind: EffectKind) -> &'static [EffectKind] {
    match kind {
        EffectKind::GemBoost => &[EffectKind::GemBoost],
        EffectKind::LuckBoost => &[EffectKind::LuckBoost],
        EffectKind::TimerBoost => &[EffectKind::TimerBoost],
        EffectKind::PullDiscount => &[EffectKind::PullDiscount],
        EffectKind::SellBoost => &[EffectKind::SellBoost],
        EffectKind::Special => &EffectKind::STATS,
    }
}

/// Summed percentage boosts currently in force.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub gem_boost: f64,
    pub luck_boost: f64,
    pub timer_boost: f64,
    pub pull_discount: f64,
    pub sell_boost: f64,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, kind: EffectKind) -> Option<&mut f64> {
        match kind {
            EffectKind::GemBoost => Some(&mut self.gem_boost),
            EffectKind::LuckBoost => Some(&mut self.luck_boost),
            EffectKind::TimerBoost => Some(&mut self.timer_boost),
            EffectKind::PullDiscount => Some(&mut self.pull_discount),
            EffectKind::SellBoost => Some(&mut self.sell_boost),
            EffectKind::Special => None,
        }
    }

    /// Value of one stat. `Special` has no field of its own and reads 0.
    pub fn get(&self, kind: EffectKind) -> f64 {
        match kind {
            EffectKind::GemBoost => self.gem_boost,
            EffectKind::LuckBoost => self.luck_boost,
            EffectKind::TimerBoost => self.timer_boost,
            EffectKind::PullDiscount => self.pull_discount,
            EffectKind::SellBoost => self.sell_boost,
            EffectKind::Special => 0.0,
        }
    }

    pub fn add(&mut self, kind: EffectKind, value: f64) {
        for target in effect_targets(kind) {
            if let Some(slot) = self.slot_mut(*target) {
                *slot += value;
            }
        }
    }

    pub fn add_effect(&mut self, effect: &Effect) {
        self.add(effect.kind, effect.value);
    }

    pub fn merge(&mut self, other: &ActiveEffects) {
        for kind in EffectKind::STATS {
            self.add(kind, other.get(kind));
        }
    }

    pub fn from_effects<'a>(effects: impl IntoIterator<Item = &'a Effect>) -> Self {
        let mut totals = Self::new();
        for effect in effects {
            totals.add_effect(effect);
        }
        totals
    }

    pub fn is_empty(&self) -> bool {
        EffectKind::STATS.iter().all(|k| self.get(*k) == 0.0)
    }

    /// Display badges for the non-zero stats (e.g. "+5% Gems").
    pub fn badges(&self) -> Vec<String> {
        EffectKind::STATS
            .iter()
            .filter(|k| self.get(**k) > 0.0)
            .map(|k| format!("+{}% {}", self.get(*k), k.label()))
            .collect()
    }
}

/// Bonuses for owning a share of the whole catalog. These stack: reaching
/// 100% grants all three.
pub fn milestone_bonuses(unique_owned: usize, catalog_len: usize) -> ActiveEffects {
    let mut bonuses = ActiveEffects::new();
    if catalog_len == 0 {
        return bonuses;
    }
    let owned = unique_owned as f64;
    let total = catalog_len as f64;
    if owned >= total * MILESTONE_GEM_BOOST_SHARE {
        bonuses.gem_boost += MILESTONE_GEM_BOOST;
    }
    if owned >= total * MILESTONE_TIMER_BOOST_SHARE {
        bonuses.timer_boost += MILESTONE_TIMER_BOOST;
    }
    if owned >= total * MILESTONE_PULL_DISCOUNT_SHARE {
        bonuses.pull_discount += MILESTONE_PULL_DISCOUNT;
    }
    bonuses
}

/// The stat an edition's completion bonus feeds. Anniversary feeds every
/// stat (at smaller values); editions outside the bonus set feed nothing.
pub fn edition_bonus_kind(edition: Edition) -> Option<EffectKind> {
    match edition {
        Edition::Normal => Some(EffectKind::GemBoost),
        Edition::Winter => Some(EffectKind::TimerBoost),
        Edition::Summer => Some(EffectKind::PullDiscount),
        Edition::Halloween => Some(EffectKind::LuckBoost),
        Edition::Special => Some(EffectKind::SellBoost),
        Edition::Anniversary => Some(EffectKind::Special),
        Edition::Limited => None,
    }
}

/// Bonus for the highest breakpoint reached. Breakpoints do not accumulate.
pub fn edition_bonus_value(edition: Edition, completion_percent: f64) -> f64 {
    let values = match edition {
        Edition::Anniversary => &ANNIVERSARY_BONUS_VALUES,
        Edition::Limited => return 0.0,
        _ => &EDITION_BONUS_VALUES,
    };
    EDITION_BREAKPOINTS
        .iter()
        .zip(values.iter())
        .rev()
        .find(|(breakpoint, _)| completion_percent >= **breakpoint)
        .map(|(_, value)| *value)
        .unwrap_or(0.0)
}

/// Completion percentage for an edition. An edition with no catalog entries
/// is never complete.
pub fn edition_completion(unique_owned: usize, edition_size: usize) -> f64 {
    if edition_size == 0 {
        return 0.0;
    }
    unique_owned as f64 / edition_size as f64 * 100.0
}

/// Sum of edition bonuses over `(edition, unique_owned, edition_size)` rows.
pub fn edition_bonuses(
    progress: impl IntoIterator<Item = (Edition, usize, usize)>,
) -> ActiveEffects {
    let mut bonuses = ActiveEffects::new();
    for (edition, unique, size) in progress {
        let Some(kind) = edition_bonus_kind(edition) else {
            continue;
        };
        let value = edition_bonus_value(edition, edition_completion(unique, size));
        if value > 0.0 {
            bonuses.add(kind, value);
        }
    }
    bonuses
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_special_effect_feeds_all_stats() {
        let effects = ActiveEffects::from_effects(&[Effect::new(EffectKind::Special, 1.0, "")]);
        for kind in EffectKind::STATS {
            assert!((effects.get(kind) - 1.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_effects_sum_per_kind() {
        let list = vec![
            Effect::new(EffectKind::GemBoost, 5.0, ""),
            Effect::new(EffectKind::GemBoost, 10.0, ""),
            Effect::new(EffectKind::SellBoost, 15.0, ""),
        ];
        let effects = ActiveEffects::from_effects(&list);
        assert!((effects.gem_boost - 15.0).abs() < f64::EPSILON);
        assert!((effects.sell_boost - 15.0).abs() < f64::EPSILON);
        assert_eq!(effects.luck_boost, 0.0);
    }

    #[test]
    fn test_milestones_stack() {
        assert!(milestone_bonuses(0, 142).is_empty());
        let thirty = milestone_bonuses(43, 142);
        assert_eq!(thirty.gem_boost, 5.0);
        assert_eq!(thirty.timer_boost, 0.0);
        let full = milestone_bonuses(142, 142);
        assert_eq!(full.gem_boost, 5.0);
        assert_eq!(full.timer_boost, 10.0);
        assert_eq!(full.pull_discount, 15.0);
    }

    #[test]
    fn test_edition_bonus_takes_highest_breakpoint_only() {
        assert_eq!(edition_bonus_value(Edition::Winter, 29.9), 0.0);
        assert_eq!(edition_bonus_value(Edition::Winter, 30.0), 5.0);
        assert_eq!(edition_bonus_value(Edition::Winter, 80.0), 10.0);
        assert_eq!(edition_bonus_value(Edition::Winter, 100.0), 15.0);
        assert_eq!(edition_bonus_value(Edition::Anniversary, 100.0), 6.0);
        assert_eq!(edition_bonus_value(Edition::Limited, 100.0), 0.0);
    }

    #[test]
    fn test_anniversary_completion_feeds_every_stat() {
        let bonuses = edition_bonuses([(Edition::Anniversary, 3, 3)]);
        for kind in EffectKind::STATS {
            assert_eq!(bonuses.get(kind), 6.0);
        }
    }

    #[test]
    fn test_edition_bonuses_route_to_declared_stat() {
        let bonuses = edition_bonuses([
            (Edition::Summer, 5, 10),
            (Edition::Halloween, 1, 10),
            (Edition::Special, 10, 10),
        ]);
        assert_eq!(bonuses.pull_discount, 5.0);
        assert_eq!(bonuses.luck_boost, 0.0);
        assert_eq!(bonuses.sell_boost, 15.0);
    }

    #[test]
    fn test_empty_edition_grants_nothing() {
        assert_eq!(edition_completion(0, 0), 0.0);
        assert!(edition_bonuses([(Edition::Normal, 0, 0)]).is_empty());
    }
}
