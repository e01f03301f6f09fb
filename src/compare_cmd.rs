//! Compare command: simulate every configured scenario side by side.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use carecast_sim::{SimulationResult, run_all_scenarios};

use crate::cli::CompareArgs;
use crate::config::CarecastConfig;
use crate::convert;
use crate::run_cmd::{build_params, resolve_seed};

/// Run all scenarios with a shared seed and print a comparison table.
pub fn run(args: CompareArgs) -> Result<()> {
    let _cmd = info_span!("compare").entered();

    let config = CarecastConfig::load(args.sim.config.as_deref())?;
    let model = convert::build_model_config(&config)?;
    let params = build_params(&config, &args.sim)?;

    // Every scenario shares one seed so that only the scenario differs.
    let seed = resolve_seed(args.sim.seed, config.seed);
    info!(seed, "comparing scenarios");

    let results = run_all_scenarios(&model, &params, seed).context("scenario comparison failed")?;

    if args.sim.json {
        let json =
            serde_json::to_string_pretty(&results).context("failed to serialize results")?;
        println!("{json}");
    } else {
        print!("{}", render_table(&results));
    }
    Ok(())
}

fn render_table(results: &[SimulationResult]) -> String {
    let mut out = format!(
        "{:<20} {:>10} {:>10} {:>12} {:>10} {:>10} {:>10}\n",
        "scenario", "arrivals", "wait (d)", "avg queue", "max queue", "severe", "relapse"
    );
    for r in results {
        out.push_str(&format!(
            "{:<20} {:>10.1} {:>10.2} {:>12.0} {:>10} {:>10.0} {:>10.0}\n",
            r.scenario,
            r.arrival_rate,
            r.average_waiting_time,
            r.average_queue_length,
            r.max_queue_length,
            r.severe_cases,
            r.relapse_cases,
        ));
    }
    out
}
