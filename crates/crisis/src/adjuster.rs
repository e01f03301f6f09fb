//! Scenario-dependent inflation of incidence and arrival rates.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::error::CrisisError;

/// Label that sums every stressor in the standard adjuster.
pub const AGGREGATE_CRISIS: &str = "crisis";

/// Which rule [`CrisisAdjuster::factor`] applies to a scenario name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorMode {
    /// The name is an aggregate label; all stressor factors are summed.
    Aggregate,
    /// The name is a configured stressor with its own factor.
    Single,
    /// The name is unknown; the factor is zero.
    Unrecognized,
}

/// Maps crisis scenario names to multiplicative rate-inflation factors.
///
/// Stressor names (for example `pandemic`) carry their own factor. Names in
/// the aggregate set describe a generic elevated state and use the sum of
/// all stressor factors. Every other name gets a factor of zero, so an
/// unknown scenario leaves rates unchanged.
#[derive(Debug, Clone)]
pub struct CrisisAdjuster {
    factors: BTreeMap<String, f64>,
    aggregate: BTreeSet<String>,
}

impl CrisisAdjuster {
    /// Builds an adjuster from stressor factors and aggregate labels.
    ///
    /// # Errors
    ///
    /// Returns [`CrisisError::InvalidFactor`] if a factor is negative or
    /// non-finite, and [`CrisisError::AmbiguousScenario`] if a name appears
    /// both as a stressor and as an aggregate label.
    pub fn new(
        factors: BTreeMap<String, f64>,
        aggregate: BTreeSet<String>,
    ) -> Result<Self, CrisisError> {
        for (scenario, &value) in &factors {
            if !value.is_finite() || value < 0.0 {
                return Err(CrisisError::InvalidFactor {
                    scenario: scenario.clone(),
                    value,
                });
            }
        }
        if let Some(name) = aggregate.iter().find(|n| factors.contains_key(*n)) {
            return Err(CrisisError::AmbiguousScenario {
                scenario: name.clone(),
            });
        }
        Ok(Self { factors, aggregate })
    }

    /// The standard five stressors, aggregated under `crisis`.
    pub fn standard() -> Self {
        let factors = [
            ("unemployment_rise", 0.2),
            ("poverty_increase", 0.15),
            ("refugee_influx", 0.1),
            ("natural_disaster", 0.05),
            ("pandemic", 0.3),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
        let aggregate = BTreeSet::from([AGGREGATE_CRISIS.to_string()]);
        Self { factors, aggregate }
    }

    /// Reports which rule applies to `scenario`.
    pub fn mode(&self, scenario: &str) -> FactorMode {
        if self.aggregate.contains(scenario) {
            FactorMode::Aggregate
        } else if self.factors.contains_key(scenario) {
            FactorMode::Single
        } else {
            FactorMode::Unrecognized
        }
    }

    /// Returns the inflation factor for `scenario` (always `>= 0`).
    pub fn factor(&self, scenario: &str) -> f64 {
        match self.mode(scenario) {
            FactorMode::Aggregate => self.combined_factor(),
            FactorMode::Single => self.factors[scenario],
            FactorMode::Unrecognized => {
                debug!(scenario, "unrecognized crisis scenario, no adjustment");
                0.0
            }
        }
    }

    /// Sum of every stressor factor.
    pub fn combined_factor(&self) -> f64 {
        self.factors.values().sum()
    }

    /// Returns `base_rate * (1 + factor(scenario))`.
    pub fn adjust(&self, base_rate: f64, scenario: &str) -> f64 {
        base_rate * (1.0 + self.factor(scenario))
    }

    /// Stressor names and their factors, sorted by name.
    pub fn factors(&self) -> &BTreeMap<String, f64> {
        &self.factors
    }

    /// Aggregate labels, sorted.
    pub fn aggregate_labels(&self) -> &BTreeSet<String> {
        &self.aggregate
    }
}

impl Default for CrisisAdjuster {
    fn default() -> Self {
        Self::standard()
    }
}
