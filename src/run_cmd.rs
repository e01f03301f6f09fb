//! Run command: simulate one crisis scenario.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use carecast_queue::RngArrivals;
use carecast_sim::{InitialPopulation, SimulationParams, run_simulation};

use crate::cli::{RunArgs, SimArgs};
use crate::config::CarecastConfig;
use crate::convert;

/// Run a single simulation and print the result.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run", scenario = %args.scenario).entered();

    // 1. Load and convert configuration
    let config = CarecastConfig::load(args.sim.config.as_deref())?;
    let model = convert::build_model_config(&config)?;

    // 2. Merge CLI flags over config
    let params = build_params(&config, &args.sim)?.with_scenario(args.scenario.as_str());

    // 3. Seeded arrivals
    let seed = resolve_seed(args.sim.seed, config.seed);
    info!(seed, "seeding arrivals");
    let mut arrivals = RngArrivals::new(StdRng::seed_from_u64(seed));

    // 4. Simulate
    let result = run_simulation(&model, &params, &mut arrivals)
        .with_context(|| format!("simulation failed for scenario {:?}", args.scenario))?;
    info!(severe = result.severe_cases, "run complete");

    // 5. Report
    if args.sim.json {
        let json =
            serde_json::to_string_pretty(&result).context("failed to serialize result")?;
        println!("{json}");
    } else {
        println!("{result}");
    }
    Ok(())
}

/// Picks the CLI seed, then the config seed, then a freshly drawn one.
///
/// Callers log the result so that any run can be reproduced.
pub fn resolve_seed(cli: Option<u64>, config: Option<u64>) -> u64 {
    cli.or(config).unwrap_or_else(rand::random::<u64>)
}

/// Builds run parameters from the config file, with CLI flags taking priority.
pub fn build_params(config: &CarecastConfig, sim: &SimArgs) -> Result<SimulationParams> {
    let population = if let Some(n) = sim.total {
        InitialPopulation::Total(n)
    } else if let Some(counts) = sim.by_state() {
        InitialPopulation::ByState(counts)
    } else {
        convert::build_population(&config.population)?
    };

    let mut params = SimulationParams::new(population)
        .with_progression_steps(sim.steps.unwrap_or(config.population.progression_steps))
        .with_projection_days(config.population.projection_days);
    if let Some(days) = sim.days {
        params = params.with_horizon_days(days);
    }
    if let Some(n) = sim.servers {
        params = params.with_num_servers(n);
    }
    if let Some(rate) = sim.service_rate {
        params = params.with_service_rate_per_server(rate);
    }
    params.validate().context("invalid command-line parameters")?;
    Ok(params)
}
