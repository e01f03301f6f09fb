use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level Carecast configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CarecastConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Scenario whose matrix is used when a scenario has none of its own.
    #[serde(default = "default_baseline")]
    pub baseline: String,

    /// Population and demand settings.
    #[serde(default)]
    pub population: PopulationToml,

    /// Service capacity settings.
    #[serde(default)]
    pub service: ServiceToml,

    /// Named transition matrices. Empty means the built-in peace/crisis pair.
    #[serde(default)]
    pub transitions: BTreeMap<String, TransitionToml>,

    /// Crisis factors. Absent means the built-in stressor set.
    #[serde(default)]
    pub crisis: Option<CrisisToml>,

    /// Resource allocation proportions.
    #[serde(default)]
    pub allocation: AllocationToml,

    /// Relapse decay model.
    #[serde(default)]
    pub relapse: RelapseToml,
}

impl CarecastConfig {
    /// Reads and parses a TOML file, or returns the defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

impl Default for CarecastConfig {
    fn default() -> Self {
        Self {
            seed: None,
            baseline: default_baseline(),
            population: PopulationToml::default(),
            service: ServiceToml::default(),
            transitions: BTreeMap::new(),
            crisis: None,
            allocation: AllocationToml::default(),
            relapse: RelapseToml::default(),
        }
    }
}

fn default_baseline() -> String {
    "peace".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PopulationToml {
    /// Everybody starts healthy. Mutually exclusive with `counts`.
    #[serde(default)]
    pub total: Option<u64>,
    /// Healthy/mild/moderate/severe starting counts.
    #[serde(default)]
    pub counts: Option<[u64; 4]>,
    #[serde(default = "default_growth_rate")]
    pub growth_rate: f64,
    #[serde(default = "default_incidence_rate")]
    pub incidence_rate: f64,
    #[serde(default = "default_onset_rate")]
    pub onset_rate: f64,
    #[serde(default = "default_one")]
    pub projection_days: u32,
    #[serde(default = "default_one_steps")]
    pub progression_steps: usize,
}

impl Default for PopulationToml {
    fn default() -> Self {
        Self {
            total: None,
            counts: None,
            growth_rate: default_growth_rate(),
            incidence_rate: default_incidence_rate(),
            onset_rate: default_onset_rate(),
            projection_days: default_one(),
            progression_steps: default_one_steps(),
        }
    }
}

fn default_growth_rate() -> f64 {
    0.01
}
fn default_incidence_rate() -> f64 {
    0.15
}
fn default_onset_rate() -> f64 {
    0.1
}
fn default_one() -> u32 {
    1
}
fn default_one_steps() -> usize {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceToml {
    #[serde(default = "default_servers")]
    pub servers: u32,
    #[serde(default = "default_service_rate")]
    pub service_rate: f64,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: usize,
    /// Weekday of day 1, Monday = 0.
    #[serde(default)]
    pub first_weekday: u8,
}

impl Default for ServiceToml {
    fn default() -> Self {
        Self {
            servers: default_servers(),
            service_rate: default_service_rate(),
            horizon_days: default_horizon_days(),
            first_weekday: 0,
        }
    }
}

fn default_servers() -> u32 {
    38
}
fn default_service_rate() -> f64 {
    10.0
}
fn default_horizon_days() -> usize {
    365
}

/// One named transition matrix, rows in healthy/mild/moderate/severe order.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransitionToml {
    pub rows: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrisisToml {
    /// Stressor name to rate-inflation factor.
    #[serde(default)]
    pub factors: BTreeMap<String, f64>,
    /// Names whose factor is the sum of all stressor factors.
    #[serde(default = "default_aggregate")]
    pub aggregate: Vec<String>,
}

fn default_aggregate() -> Vec<String> {
    vec!["crisis".to_string()]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllocationToml {
    #[serde(default = "default_alloc_mild")]
    pub mild: f64,
    #[serde(default = "default_alloc_moderate")]
    pub moderate: f64,
    #[serde(default = "default_alloc_severe")]
    pub severe: f64,
}

impl Default for AllocationToml {
    fn default() -> Self {
        Self {
            mild: default_alloc_mild(),
            moderate: default_alloc_moderate(),
            severe: default_alloc_severe(),
        }
    }
}

fn default_alloc_mild() -> f64 {
    0.4
}
fn default_alloc_moderate() -> f64 {
    0.35
}
fn default_alloc_severe() -> f64 {
    0.25
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelapseToml {
    #[serde(default = "default_relapse_base")]
    pub base_rate: f64,
    #[serde(default = "default_relapse_decay")]
    pub decay: f64,
}

impl Default for RelapseToml {
    fn default() -> Self {
        Self {
            base_rate: default_relapse_base(),
            decay: default_relapse_decay(),
        }
    }
}

fn default_relapse_base() -> f64 {
    0.1
}
fn default_relapse_decay() -> f64 {
    0.05
}
