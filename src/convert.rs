//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Context, Result, bail};

use crate::config::*;

use carecast_care::{RelapseModel, ResourceAllocation};
use carecast_crisis::CrisisAdjuster;
use carecast_markov::{
    BASELINE_SCENARIO, N_STATES, SeverityState, TransitionMatrix, TransitionTable,
};
use carecast_queue::QueueConfig;
use carecast_sim::{InitialPopulation, ModelConfig};

/// Converts TOML rows into a [`TransitionMatrix`].
///
/// Rows must form a 4x4 row-stochastic matrix.
pub fn parse_matrix(rows: &[Vec<f64>]) -> Result<TransitionMatrix> {
    if rows.len() != N_STATES {
        bail!("expected {N_STATES} rows, got {}", rows.len());
    }
    let mut probs = [[0.0; N_STATES]; N_STATES];
    for (i, row) in rows.iter().enumerate() {
        if row.len() != N_STATES {
            bail!("row {i} has {} entries, expected {N_STATES}", row.len());
        }
        probs[i].copy_from_slice(row);
    }
    Ok(TransitionMatrix::new(probs)?)
}

/// Builds a [`TransitionTable`] from the named TOML matrices.
///
/// An empty table selects the built-in peace/crisis matrices, which only
/// works with the default baseline.
pub fn build_transition_table(
    transitions: &BTreeMap<String, TransitionToml>,
    baseline: &str,
) -> Result<TransitionTable> {
    if transitions.is_empty() {
        if baseline != BASELINE_SCENARIO {
            bail!("baseline {baseline:?} has no [transitions.{baseline}] matrix");
        }
        return Ok(TransitionTable::standard());
    }
    let mut matrices = BTreeMap::new();
    for (name, t) in transitions {
        let matrix =
            parse_matrix(&t.rows).with_context(|| format!("invalid [transitions.{name}]"))?;
        matrices.insert(name.clone(), matrix);
    }
    Ok(TransitionTable::new(matrices, baseline)?)
}

/// Builds a [`CrisisAdjuster`], or the built-in stressor set if `crisis` is absent.
pub fn build_crisis_adjuster(crisis: Option<&CrisisToml>) -> Result<CrisisAdjuster> {
    let Some(crisis) = crisis else {
        return Ok(CrisisAdjuster::standard());
    };
    let aggregate: BTreeSet<String> = crisis.aggregate.iter().cloned().collect();
    CrisisAdjuster::new(crisis.factors.clone(), aggregate).context("invalid [crisis] section")
}

/// Builds a [`ResourceAllocation`] from the TOML proportions.
pub fn build_allocation(alloc: &AllocationToml) -> Result<ResourceAllocation> {
    ResourceAllocation::new([
        (SeverityState::Mild, alloc.mild),
        (SeverityState::Moderate, alloc.moderate),
        (SeverityState::Severe, alloc.severe),
    ])
    .context("invalid [allocation] section")
}

/// Builds a [`RelapseModel`] from the TOML relapse settings.
pub fn build_relapse(relapse: &RelapseToml) -> Result<RelapseModel> {
    RelapseModel::new(relapse.base_rate, relapse.decay).context("invalid [relapse] section")
}

/// Builds a [`QueueConfig`] from the TOML service settings.
pub fn build_queue_config(service: &ServiceToml) -> QueueConfig {
    QueueConfig::new()
        .with_horizon_days(service.horizon_days)
        .with_num_servers(service.servers)
        .with_service_rate_per_server(service.service_rate)
        .with_first_weekday(service.first_weekday)
}

/// Resolves the configured starting population.
///
/// At most one of `total` or `counts` may be set; neither gives the default
/// population.
pub fn build_population(population: &PopulationToml) -> Result<InitialPopulation> {
    match (population.total, population.counts) {
        (Some(n), None) => Ok(InitialPopulation::Total(n)),
        (None, Some(counts)) => Ok(InitialPopulation::ByState(counts)),
        (None, None) => Ok(InitialPopulation::default()),
        (Some(_), Some(_)) => {
            bail!("[population] must have at most one of total or counts, got both")
        }
    }
}

/// Builds and validates a [`ModelConfig`] from the whole TOML configuration.
pub fn build_model_config(config: &CarecastConfig) -> Result<ModelConfig> {
    let model = ModelConfig::new()
        .with_transitions(build_transition_table(&config.transitions, &config.baseline)?)
        .with_crisis(build_crisis_adjuster(config.crisis.as_ref())?)
        .with_allocation(build_allocation(&config.allocation)?)
        .with_relapse(build_relapse(&config.relapse)?)
        .with_queue(build_queue_config(&config.service))
        .with_annual_growth_rate(config.population.growth_rate)
        .with_incidence_rate(config.population.incidence_rate)
        .with_onset_rate(config.population.onset_rate);
    model.validate().context("invalid model configuration")?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_rows() -> Vec<Vec<f64>> {
        (0..N_STATES)
            .map(|i| (0..N_STATES).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect()
    }

    #[test]
    fn defaults_build_the_standard_model() {
        let model = build_model_config(&CarecastConfig::default()).unwrap();
        assert_eq!(model.transitions().baseline(), "peace");
        assert!(model.transitions().get("crisis").is_some());
        assert_eq!(model.crisis().factor("pandemic"), 0.3);
        assert_eq!(model.allocation().get(SeverityState::Mild), 0.4);
        assert_eq!(model.queue().num_servers(), 38);
    }

    #[test]
    fn parse_matrix_rejects_wrong_shape() {
        assert!(parse_matrix(&identity_rows()[..3]).is_err());
        let mut rows = identity_rows();
        rows[2].push(0.0);
        let err = parse_matrix(&rows).unwrap_err();
        assert!(err.to_string().contains("row 2"), "{err}");
    }

    #[test]
    fn parse_matrix_rejects_non_stochastic_rows() {
        let mut rows = identity_rows();
        rows[1][1] = 0.9;
        assert!(parse_matrix(&rows).is_err());
    }

    #[test]
    fn custom_transitions_need_their_baseline() {
        let mut transitions = BTreeMap::new();
        transitions.insert(
            "calm".to_string(),
            TransitionToml {
                rows: identity_rows(),
            },
        );
        assert!(build_transition_table(&transitions, "peace").is_err());
        let table = build_transition_table(&transitions, "calm").unwrap();
        assert_eq!(table.resolve_name("storm"), "calm");
    }

    #[test]
    fn custom_baseline_without_matrices_fails() {
        assert!(build_transition_table(&BTreeMap::new(), "calm").is_err());
    }

    #[test]
    fn ambiguous_crisis_names_fail() {
        let crisis = CrisisToml {
            factors: BTreeMap::from([("crisis".to_string(), 0.5)]),
            aggregate: vec!["crisis".to_string()],
        };
        assert!(build_crisis_adjuster(Some(&crisis)).is_err());
    }

    #[test]
    fn invalid_allocation_fails() {
        let alloc = AllocationToml {
            mild: 1.5,
            ..AllocationToml::default()
        };
        let err = build_allocation(&alloc).unwrap_err();
        assert!(format!("{err:#}").contains("[allocation]"));
    }

    #[test]
    fn population_total_and_counts_are_exclusive() {
        let pop = PopulationToml {
            total: Some(10),
            counts: Some([1, 2, 3, 4]),
            ..PopulationToml::default()
        };
        assert!(build_population(&pop).is_err());

        let pop = PopulationToml {
            total: Some(10),
            ..PopulationToml::default()
        };
        assert_eq!(build_population(&pop).unwrap(), InitialPopulation::Total(10));
        assert_eq!(
            build_population(&PopulationToml::default()).unwrap(),
            InitialPopulation::default()
        );
    }

    #[test]
    fn sample_config_matches_builtin_defaults() {
        let path = std::path::Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/carecast.toml"));
        let config = CarecastConfig::load(Some(path)).unwrap();
        let model = build_model_config(&config).unwrap();
        let standard = ModelConfig::new();
        for name in ["peace", "crisis"] {
            assert_eq!(
                model.transitions().get(name).unwrap().probs(),
                standard.transitions().get(name).unwrap().probs()
            );
        }
        assert_eq!(model.crisis().factors(), standard.crisis().factors());
        assert_eq!(build_population(&config.population).unwrap(), InitialPopulation::default());
    }

    #[test]
    fn invalid_onset_rate_fails_validation() {
        let mut config = CarecastConfig::default();
        config.population.onset_rate = 1.5;
        assert!(build_model_config(&config).is_err());
    }
}
