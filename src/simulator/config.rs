//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of independent sessions to play
    pub num_runs: u32,

    /// Ten-pulls per session
    pub ten_pulls_per_run: u32,

    /// Fusion attempts per selection shape (distinct and identical)
    pub fusion_trials: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            ten_pulls_per_run: 50,
            fusion_trials: 2000,
            seed: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small run for smoke tests
    pub fn quick() -> Self {
        Self {
            num_runs: 10,
            ten_pulls_per_run: 20,
            fusion_trials: 200,
            ..Default::default()
        }
    }

    /// Long sessions to exercise the ultra-rare guarantee
    pub fn pity_analysis() -> Self {
        Self {
            num_runs: 100,
            ten_pulls_per_run: 200,
            fusion_trials: 0,
            ..Default::default()
        }
    }

    /// Fusion odds only
    pub fn fusion_analysis(trials: u32) -> Self {
        Self {
            num_runs: 0,
            ten_pulls_per_run: 0,
            fusion_trials: trials,
            ..Default::default()
        }
    }

    /// Gems a run needs to afford every ten-pull at full price.
    pub fn starting_gems(&self) -> u64 {
        self.ten_pulls_per_run as u64
            * crate::core::constants::PULL_PRICE
            * crate::core::constants::MULTI_PULL_SIZE as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(SimConfig::default().num_runs, 200);
        assert_eq!(SimConfig::quick().fusion_trials, 200);
        assert_eq!(SimConfig::fusion_analysis(50).num_runs, 0);
        assert_eq!(SimConfig::pity_analysis().starting_gems(), 200_000);
    }
}
