//! Simulation report generation.

use crate::catalog::Rarity;
use crate::rates::RateTable;
use serde::Serialize;

/// Counters from one simulated session.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub pulls: u64,
    pub gems_spent: u64,
    pub by_rarity: [u64; 6],
    pub longest_super_rare_drought: u32,
    pub longest_ultra_rare_drought: u32,
    pub super_rare_pity_activations: u32,
    pub ultra_rare_pity_activations: u32,
    pub unique_collected: usize,
    pub final_luck_boost: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FusionStats {
    pub identical_trials: u32,
    pub identical_successes: u32,
    pub distinct_trials: u32,
    pub distinct_successes: u32,
    /// Trials whose batch could not be staged or fused at all.
    pub rejected_trials: u32,
}

impl FusionStats {
    pub fn identical_rate(&self) -> f64 {
        rate(self.identical_successes, self.identical_trials)
    }

    pub fn distinct_rate(&self) -> f64 {
        rate(self.distinct_successes, self.distinct_trials)
    }
}

fn rate(hits: u32, trials: u32) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    hits as f64 / trials as f64 * 100.0
}

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub total_pulls: u64,
    pub total_gems_spent: u64,
    pub by_rarity: [u64; 6],
    pub longest_super_rare_drought: u32,
    pub longest_ultra_rare_drought: u32,
    pub super_rare_pity_activations: u64,
    pub ultra_rare_pity_activations: u64,
    pub avg_unique_collected: f64,
    pub avg_final_luck_boost: f64,
    pub fusion: FusionStats,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, fusion: FusionStats) -> Self {
        let num_runs = runs.len() as u32;
        let mut by_rarity = [0u64; 6];
        for run in &runs {
            for (total, count) in by_rarity.iter_mut().zip(run.by_rarity.iter()) {
                *total += count;
            }
        }
        let average = |f: &dyn Fn(&RunStats) -> f64| {
            if runs.is_empty() {
                0.0
            } else {
                runs.iter().map(f).sum::<f64>() / runs.len() as f64
            }
        };

        Self {
            num_runs,
            total_pulls: runs.iter().map(|r| r.pulls).sum(),
            total_gems_spent: runs.iter().map(|r| r.gems_spent).sum(),
            by_rarity,
            longest_super_rare_drought: runs
                .iter()
                .map(|r| r.longest_super_rare_drought)
                .max()
                .unwrap_or(0),
            longest_ultra_rare_drought: runs
                .iter()
                .map(|r| r.longest_ultra_rare_drought)
                .max()
                .unwrap_or(0),
            super_rare_pity_activations: runs
                .iter()
                .map(|r| r.super_rare_pity_activations as u64)
                .sum(),
            ultra_rare_pity_activations: runs
                .iter()
                .map(|r| r.ultra_rare_pity_activations as u64)
                .sum(),
            avg_unique_collected: average(&|r| r.unique_collected as f64),
            avg_final_luck_boost: average(&|r| r.final_luck_boost),
            fusion,
        }
    }

    /// Observed share of pulls landing on `rarity`, in percent.
    pub fn observed_share(&self, rarity: Rarity) -> f64 {
        if self.total_pulls == 0 {
            return 0.0;
        }
        self.by_rarity[rarity.index()] as f64 / self.total_pulls as f64 * 100.0
    }

    pub fn to_text(&self) -> String {
        let mut report = String::new();
        let base = RateTable::base().normalized();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  GACHA SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {}    Pulls: {}    Gems spent: {}\n\n",
            self.num_runs, self.total_pulls, self.total_gems_spent
        ));

        report.push_str("── RARITY DISTRIBUTION ──────────────────────────────────────────\n");
        report.push_str("  Tier          Count     Observed   Base\n");
        for rarity in Rarity::ALL {
            report.push_str(&format!(
                "  {:<12} {:>7}   {:>7.2}%   {:>5.2}%\n",
                rarity.name(),
                self.by_rarity[rarity.index()],
                self.observed_share(rarity),
                base.weight(rarity)
            ));
        }
        report.push('\n');

        report.push_str("── PITY ─────────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Longest super-rare drought: {}\n",
            self.longest_super_rare_drought
        ));
        report.push_str(&format!(
            "  Longest ultra-rare drought: {}\n",
            self.longest_ultra_rare_drought
        ));
        report.push_str(&format!(
            "  Super-rare floor applied:   {}\n",
            self.super_rare_pity_activations
        ));
        report.push_str(&format!(
            "  Ultra-rare floor applied:   {}\n\n",
            self.ultra_rare_pity_activations
        ));

        report.push_str("── COLLECTION ───────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Avg unique collected: {:.1}\n",
            self.avg_unique_collected
        ));
        report.push_str(&format!(
            "  Avg final luck boost: {:.2}%\n\n",
            self.avg_final_luck_boost
        ));

        report.push_str("── FUSION ───────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Identical batch: {:>6.2}% over {} trials\n",
            self.fusion.identical_rate(),
            self.fusion.identical_trials
        ));
        report.push_str(&format!(
            "  Distinct batch:  {:>6.2}% over {} trials\n",
            self.fusion.distinct_rate(),
            self.fusion.distinct_trials
        ));
        if self.fusion.rejected_trials > 0 {
            report.push_str(&format!(
                "  Rejected:        {} trials\n",
                self.fusion.rejected_trials
            ));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
