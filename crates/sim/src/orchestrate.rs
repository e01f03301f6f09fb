//! End-to-end scenario simulation.

use carecast_care::allocate;
use carecast_markov::{SeverityState, advance};
use carecast_queue::{ArrivalSource, QueueMetrics, RatioEstimate, RngArrivals, simulate_queue};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::demand::{base_arrival_rate, project_population};
use crate::error::SimError;
use crate::params::SimulationParams;
use crate::result::SimulationResult;

/// Runs one simulation.
///
/// Order: adjust the arrival rate for the scenario, apply onset and evolve
/// the distribution, allocate resources from the evolved case mix, run the
/// queue, then read severe and relapse load and the demand-over-resources
/// ratio off the evolved distribution.
///
/// # Arguments
///
/// * `config` - Shared model configuration.
/// * `params` - Inputs for this run.
/// * `arrivals` - Source of daily arrival counts.
///
/// # Errors
///
/// Returns [`SimError::InvalidParams`] or [`SimError::InvalidConfig`] before
/// any computation if inputs are invalid, or a wrapped component error.
#[tracing::instrument(skip_all, fields(scenario = %params.scenario()))]
pub fn run_simulation(
    config: &ModelConfig,
    params: &SimulationParams,
    arrivals: &mut impl ArrivalSource,
) -> Result<SimulationResult, SimError> {
    config.validate()?;
    params.validate()?;
    let queue_cfg = params.queue_config(config.queue());
    queue_cfg.validate()?;

    let scenario = params.scenario();
    let population = params.population().total() as f64;

    // Step 1: Arrival rate
    let projected = project_population(
        population,
        config.annual_growth_rate(),
        params.projection_days(),
    );
    let base_rate = base_arrival_rate(projected, config.incidence_rate());
    let arrival_rate = config.crisis().adjust(base_rate, scenario);
    debug!(
        projected,
        base_rate,
        arrival_rate,
        mode = ?config.crisis().mode(scenario),
        "arrival rate"
    );

    // Step 2: State evolution
    let mut distribution = params.population().distribution();
    distribution.apply_onset(config.onset_rate())?;
    let transition_scenario = config.transitions().resolve_name(scenario).to_string();
    let matrix = config.transitions().resolve(scenario);
    let evolved = advance(&distribution, matrix, params.progression_steps());

    // Step 3: Resources and capacity
    let table = params.allocation().unwrap_or(config.allocation());
    let resources = allocate(&evolved, table);
    let resource_units = resources.total();
    let daily_capacity = queue_cfg.service_rate_per_server() * resource_units;

    // Step 4: Queue
    let trace = simulate_queue(&queue_cfg, arrival_rate, resource_units, arrivals)?;
    let metrics = QueueMetrics::from_trace(&trace);

    // Step 5: Direct reads
    let severe_cases = evolved.get(SeverityState::Severe);
    let relapse_cases = config
        .relapse()
        .relapse(evolved.total(), params.progression_steps() as f64);
    let ratio = RatioEstimate::new(evolved.total(), resource_units);

    info!(
        transition_scenario = %transition_scenario,
        average_waiting_time = metrics.average_waiting_time,
        max_queue_length = metrics.max_queue_length,
        "simulation complete"
    );

    Ok(SimulationResult {
        scenario: scenario.to_string(),
        transition_scenario,
        arrival_rate,
        daily_capacity,
        average_waiting_time: metrics.average_waiting_time,
        average_queue_length: metrics.average_queue_length,
        max_queue_length: metrics.max_queue_length,
        severe_cases,
        relapse_cases,
        ratio,
        distribution: evolved,
    })
}

/// Runs one simulation with Poisson arrivals from a seeded generator.
///
/// Identical inputs and seed give bit-identical results.
pub fn run_seeded(
    config: &ModelConfig,
    params: &SimulationParams,
    seed: u64,
) -> Result<SimulationResult, SimError> {
    let mut arrivals = RngArrivals::new(StdRng::seed_from_u64(seed));
    run_simulation(config, params, &mut arrivals)
}

/// Runs `params` under every scenario the configuration knows, in name order.
///
/// Each scenario gets a fresh generator seeded with `seed`, so results
/// differ only by scenario.
pub fn run_all_scenarios(
    config: &ModelConfig,
    params: &SimulationParams,
    seed: u64,
) -> Result<Vec<SimulationResult>, SimError> {
    config
        .scenario_names()
        .into_iter()
        .map(|name| run_seeded(config, &params.clone().with_scenario(name), seed))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::InitialPopulation;
    use approx::assert_relative_eq;
    use carecast_queue::ScriptedArrivals;

    #[test]
    fn rejects_invalid_params_before_running() {
        let params = SimulationParams::new(InitialPopulation::Total(100)).with_num_servers(0);
        let mut arrivals = ScriptedArrivals::default();
        let err = run_simulation(&ModelConfig::new(), &params, &mut arrivals).unwrap_err();
        assert!(matches!(err, SimError::InvalidParams { .. }));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ModelConfig::new().with_onset_rate(2.0);
        let params = SimulationParams::new(InitialPopulation::Total(100));
        let mut arrivals = ScriptedArrivals::default();
        assert!(matches!(
            run_simulation(&config, &params, &mut arrivals),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn unknown_scenario_matches_baseline() {
        let config = ModelConfig::new();
        let params = SimulationParams::new(InitialPopulation::default()).with_horizon_days(30);
        let peace = run_seeded(&config, &params, 1).unwrap();
        let unknown = run_seeded(&config, &params.clone().with_scenario("unknown"), 1).unwrap();

        assert_eq!(unknown.transition_scenario, "peace");
        assert_eq!(unknown.arrival_rate, peace.arrival_rate);
        assert_eq!(unknown.average_queue_length, peace.average_queue_length);
        assert_eq!(unknown.distribution, peace.distribution);
    }

    #[test]
    fn crisis_inflates_arrival_rate() {
        let config = ModelConfig::new();
        let params = SimulationParams::new(InitialPopulation::Total(365_000))
            .with_projection_days(0)
            .with_horizon_days(7);
        let peace = run_seeded(&config, &params, 3).unwrap();
        let crisis = run_seeded(&config, &params.clone().with_scenario("crisis"), 3).unwrap();
        let pandemic = run_seeded(&config, &params.with_scenario("pandemic"), 3).unwrap();

        assert_relative_eq!(peace.arrival_rate, 150.0, epsilon = 1e-9);
        assert_relative_eq!(crisis.arrival_rate, 270.0, epsilon = 1e-9);
        assert_relative_eq!(pandemic.arrival_rate, 195.0, epsilon = 1e-9);
        assert_eq!(crisis.transition_scenario, "crisis");
        assert_eq!(pandemic.transition_scenario, "peace");
    }

    #[test]
    fn all_scenarios_in_name_order() {
        let config = ModelConfig::new();
        let params = SimulationParams::new(InitialPopulation::Total(10_000)).with_horizon_days(14);
        let results = run_all_scenarios(&config, &params, 5).unwrap();
        let names: Vec<&str> = results.iter().map(|r| r.scenario.as_str()).collect();
        assert_eq!(names.len(), config.scenario_names().len());
        assert_eq!(names[0], "crisis");
        assert!(names.contains(&"peace"));
    }
}
