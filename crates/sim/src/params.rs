//! Per-run simulation inputs.

use carecast_care::ResourceAllocation;
use carecast_markov::{BASELINE_SCENARIO, N_STATES, StateDistribution};
use carecast_queue::{DAYS_PER_WEEK, QueueConfig};

use crate::error::SimError;

/// Starting population, as a total or split by severity state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialPopulation {
    /// Everybody starts healthy.
    Total(u64),
    /// Counts in healthy/mild/moderate/severe order.
    ByState([u64; N_STATES]),
}

impl InitialPopulation {
    /// Total number of people, or `None` if the state counts overflow `u64`.
    pub fn checked_total(&self) -> Option<u64> {
        match self {
            Self::Total(n) => Some(*n),
            Self::ByState(counts) => counts.iter().try_fold(0u64, |acc, &c| acc.checked_add(c)),
        }
    }

    /// Total number of people, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.checked_total().unwrap_or(u64::MAX)
    }

    /// The starting state distribution.
    pub fn distribution(&self) -> StateDistribution {
        match self {
            Self::Total(n) => StateDistribution::all_healthy(*n),
            Self::ByState(counts) => StateDistribution::from_counts(*counts),
        }
    }
}

impl Default for InitialPopulation {
    /// 800k healthy, 100k mild, 80k moderate, 20k severe.
    fn default() -> Self {
        Self::ByState([800_000, 100_000, 80_000, 20_000])
    }
}

/// Inputs for one simulation run.
///
/// Optional fields fall back to the [`ModelConfig`](crate::ModelConfig)
/// defaults.
#[derive(Debug, Clone)]
pub struct SimulationParams {
    population: InitialPopulation,
    scenario: String,
    horizon_days: Option<usize>,
    allocation: Option<ResourceAllocation>,
    num_servers: Option<u32>,
    service_rate_per_server: Option<f64>,
    first_weekday: Option<u8>,
    progression_steps: usize,
    projection_days: u32,
}

impl SimulationParams {
    /// Creates parameters for `population` under the baseline scenario.
    ///
    /// Defaults: scenario `peace`, one progression step, one projection day,
    /// no overrides.
    pub fn new(population: InitialPopulation) -> Self {
        Self {
            population,
            scenario: BASELINE_SCENARIO.to_string(),
            horizon_days: None,
            allocation: None,
            num_servers: None,
            service_rate_per_server: None,
            first_weekday: None,
            progression_steps: 1,
            projection_days: 1,
        }
    }

    /// Sets the crisis scenario name.
    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = scenario.into();
        self
    }

    /// Overrides the number of simulated days.
    pub fn with_horizon_days(mut self, days: usize) -> Self {
        self.horizon_days = Some(days);
        self
    }

    /// Overrides the resource-allocation table.
    pub fn with_allocation(mut self, allocation: ResourceAllocation) -> Self {
        self.allocation = Some(allocation);
        self
    }

    /// Overrides the number of servers.
    pub fn with_num_servers(mut self, n: u32) -> Self {
        self.num_servers = Some(n);
        self
    }

    /// Overrides the people served per server per day.
    pub fn with_service_rate_per_server(mut self, rate: f64) -> Self {
        self.service_rate_per_server = Some(rate);
        self
    }

    /// Overrides the weekday (Monday = 0) of the first simulated day.
    pub fn with_first_weekday(mut self, weekday: u8) -> Self {
        self.first_weekday = Some(weekday);
        self
    }

    /// Sets the number of Markov steps applied to the distribution.
    pub fn with_progression_steps(mut self, steps: usize) -> Self {
        self.progression_steps = steps;
        self
    }

    /// Sets the number of days the population is projected forward.
    pub fn with_projection_days(mut self, days: u32) -> Self {
        self.projection_days = days;
        self
    }

    // --- Accessors ---

    /// Returns the starting population.
    pub fn population(&self) -> &InitialPopulation {
        &self.population
    }

    /// Returns the scenario name.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Returns the allocation override, if any.
    pub fn allocation(&self) -> Option<&ResourceAllocation> {
        self.allocation.as_ref()
    }

    /// Returns the number of Markov steps.
    pub fn progression_steps(&self) -> usize {
        self.progression_steps
    }

    /// Returns the number of projection days.
    pub fn projection_days(&self) -> u32 {
        self.projection_days
    }

    /// Applies the queue overrides on top of `base`.
    pub fn queue_config(&self, base: &QueueConfig) -> QueueConfig {
        let mut cfg = base.clone();
        if let Some(days) = self.horizon_days {
            cfg = cfg.with_horizon_days(days);
        }
        if let Some(n) = self.num_servers {
            cfg = cfg.with_num_servers(n);
        }
        if let Some(rate) = self.service_rate_per_server {
            cfg = cfg.with_service_rate_per_server(rate);
        }
        if let Some(weekday) = self.first_weekday {
            cfg = cfg.with_first_weekday(weekday);
        }
        cfg
    }

    /// Validates the inputs before anything is simulated.
    ///
    /// Overrides must be positive; the scenario name must be non-empty and
    /// the population total must fit in a `u64`.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.scenario.trim().is_empty() {
            return Err(invalid("scenario must not be empty".to_string()));
        }
        if self.population.checked_total().is_none() {
            return Err(invalid("population counts overflow when summed".to_string()));
        }
        if self.horizon_days == Some(0) {
            return Err(invalid("horizon_days must be > 0".to_string()));
        }
        if self.num_servers == Some(0) {
            return Err(invalid("num_servers must be > 0".to_string()));
        }
        if let Some(rate) = self.service_rate_per_server {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(invalid(format!(
                    "service_rate_per_server must be finite and > 0, got {rate}"
                )));
            }
        }
        if let Some(weekday) = self.first_weekday {
            if weekday as usize >= DAYS_PER_WEEK {
                return Err(invalid(format!("first_weekday must be 0..=6, got {weekday}")));
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> SimError {
    SimError::InvalidParams { reason }
}
