//! Process-wide model configuration.

use std::collections::BTreeSet;

use carecast_care::{RelapseModel, ResourceAllocation};
use carecast_crisis::CrisisAdjuster;
use carecast_markov::TransitionTable;
use carecast_queue::QueueConfig;

use crate::error::SimError;

/// Every table and constant the simulation reads.
///
/// Built once at startup, validated, then shared read-only by any number
/// of runs.
///
/// # Example
///
/// ```
/// use carecast_sim::ModelConfig;
///
/// let config = ModelConfig::new().with_incidence_rate(0.2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ModelConfig {
    transitions: TransitionTable,
    crisis: CrisisAdjuster,
    allocation: ResourceAllocation,
    relapse: RelapseModel,
    queue: QueueConfig,
    annual_growth_rate: f64,
    incidence_rate: f64,
    onset_rate: f64,
}

impl ModelConfig {
    /// Creates a configuration with the standard tables.
    ///
    /// Defaults: `peace`/`crisis` transition matrices, five crisis stressors
    /// aggregated under `crisis`, allocation 0.4/0.35/0.25, relapse 0.1 with
    /// decay 0.05, 38 servers at 10 per day over 365 days,
    /// `annual_growth_rate = 0.01`, `incidence_rate = 0.15`,
    /// `onset_rate = 0.1`.
    pub fn new() -> Self {
        Self {
            transitions: TransitionTable::standard(),
            crisis: CrisisAdjuster::standard(),
            allocation: ResourceAllocation::default(),
            relapse: RelapseModel::default(),
            queue: QueueConfig::new(),
            annual_growth_rate: 0.01,
            incidence_rate: 0.15,
            onset_rate: 0.1,
        }
    }

    /// Sets the per-scenario transition matrices.
    pub fn with_transitions(mut self, transitions: TransitionTable) -> Self {
        self.transitions = transitions;
        self
    }

    /// Sets the crisis factors.
    pub fn with_crisis(mut self, crisis: CrisisAdjuster) -> Self {
        self.crisis = crisis;
        self
    }

    /// Sets the default resource allocation.
    pub fn with_allocation(mut self, allocation: ResourceAllocation) -> Self {
        self.allocation = allocation;
        self
    }

    /// Sets the relapse model.
    pub fn with_relapse(mut self, relapse: RelapseModel) -> Self {
        self.relapse = relapse;
        self
    }

    /// Sets the default queue settings.
    pub fn with_queue(mut self, queue: QueueConfig) -> Self {
        self.queue = queue;
        self
    }

    /// Sets the annual population growth rate.
    pub fn with_annual_growth_rate(mut self, rate: f64) -> Self {
        self.annual_growth_rate = rate;
        self
    }

    /// Sets the annual share of the population seeking care.
    pub fn with_incidence_rate(mut self, rate: f64) -> Self {
        self.incidence_rate = rate;
        self
    }

    /// Sets the healthy-to-mild onset share applied before progression.
    pub fn with_onset_rate(mut self, rate: f64) -> Self {
        self.onset_rate = rate;
        self
    }

    // --- Accessors ---

    /// Returns the transition table.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// Returns the crisis adjuster.
    pub fn crisis(&self) -> &CrisisAdjuster {
        &self.crisis
    }

    /// Returns the default resource allocation.
    pub fn allocation(&self) -> &ResourceAllocation {
        &self.allocation
    }

    /// Returns the relapse model.
    pub fn relapse(&self) -> &RelapseModel {
        &self.relapse
    }

    /// Returns the default queue settings.
    pub fn queue(&self) -> &QueueConfig {
        &self.queue
    }

    /// Returns the annual population growth rate.
    pub fn annual_growth_rate(&self) -> f64 {
        self.annual_growth_rate
    }

    /// Returns the annual incidence rate.
    pub fn incidence_rate(&self) -> f64 {
        self.incidence_rate
    }

    /// Returns the onset rate.
    pub fn onset_rate(&self) -> f64 {
        self.onset_rate
    }

    /// Every scenario name the configuration knows about, sorted.
    pub fn scenario_names(&self) -> Vec<String> {
        let mut names: BTreeSet<String> =
            self.transitions.scenarios().map(str::to_string).collect();
        names.extend(self.crisis.factors().keys().cloned());
        names.extend(self.crisis.aggregate_labels().iter().cloned());
        names.into_iter().collect()
    }

    /// Validates this configuration.
    ///
    /// Table invariants are enforced when the tables are built; this checks
    /// the scalar rates and the queue defaults.
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.annual_growth_rate.is_finite() || self.annual_growth_rate <= -1.0 {
            return Err(SimError::InvalidConfig {
                reason: format!(
                    "annual_growth_rate must be finite and > -1, got {}",
                    self.annual_growth_rate
                ),
            });
        }
        if !self.incidence_rate.is_finite() || self.incidence_rate < 0.0 {
            return Err(SimError::InvalidConfig {
                reason: format!(
                    "incidence_rate must be finite and >= 0, got {}",
                    self.incidence_rate
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.onset_rate) {
            return Err(SimError::InvalidConfig {
                reason: format!("onset_rate must be in [0, 1], got {}", self.onset_rate),
            });
        }
        self.queue.validate()?;
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::new()
    }
}
