//! Engine-wide tuning knobs and scenario switches.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Scenario switches that bypass the corruption roll.
///
/// When several are active they are consulted in the order of
/// [`ScenarioOverride::PRIORITY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioOverride {
    /// Every corruption check succeeds.
    AlwaysCorrupt,
    /// Every corruption check fails.
    NeverCorrupt,
    /// The prosecutor always catches thieves and is never corrupt.
    InfallibleDetector,
}

impl ScenarioOverride {
    /// Evaluation order.
    pub const PRIORITY: [Self; 3] = [
        Self::AlwaysCorrupt,
        Self::NeverCorrupt,
        Self::InfallibleDetector,
    ];
}

/// Configuration shared by every mechanic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Global fear level, 0..=6. A corrupt minister only acts if a d6 beats it.
    pub fear: u8,
    /// Active scenario switches.
    pub overrides: BTreeSet<ScenarioOverride>,
    /// Smallest bribe a caught thief pays the prosecutor.
    pub min_bribe: i64,
    /// Price of buying a favourable loyalty report.
    pub loyalty_bribe: i64,
    /// Detector rolls below this are noisy.
    pub accuracy_threshold: i32,
    /// Upper bound on redraws when faking a close contest.
    pub contest_max_attempts: u32,
    /// Reveal every true value on recruitment.
    pub transparent: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fear: 0,
            overrides: BTreeSet::new(),
            min_bribe: 10,
            loyalty_bribe: 25,
            accuracy_threshold: 5,
            contest_max_attempts: 32,
            transparent: false,
        }
    }
}

impl EngineConfig {
    /// Set the fear level (clamped to 0..=6).
    pub fn with_fear(mut self, fear: u8) -> Self {
        self.fear = fear.min(6);
        self
    }

    /// Turn on a scenario switch.
    pub fn with_override(mut self, scenario: ScenarioOverride) -> Self {
        self.overrides.insert(scenario);
        self
    }

    /// Set the minimum bribe for a caught theft.
    pub fn with_min_bribe(mut self, amount: i64) -> Self {
        self.min_bribe = amount.max(0);
        self
    }

    /// Set the price of a loyalty bribe.
    pub fn with_loyalty_bribe(mut self, amount: i64) -> Self {
        self.loyalty_bribe = amount.max(0);
        self
    }

    /// Set the detector accuracy threshold.
    pub fn with_accuracy_threshold(mut self, threshold: i32) -> Self {
        self.accuracy_threshold = threshold;
        self
    }

    /// Set how many redraws a rigged contest may try (at least one).
    pub fn with_contest_max_attempts(mut self, attempts: u32) -> Self {
        self.contest_max_attempts = attempts.max(1);
        self
    }

    /// Toggle transparency mode.
    pub fn with_transparency(mut self, transparent: bool) -> Self {
        self.transparent = transparent;
        self
    }

    /// Whether a scenario switch is on.
    pub fn has_override(&self, scenario: ScenarioOverride) -> bool {
        self.overrides.contains(&scenario)
    }
}
