use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Carecast mental-health service demand estimator.
#[derive(Parser)]
#[command(
    name = "carecast",
    version,
    about = "Mental-health service demand estimator under crisis scenarios"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate one crisis scenario.
    Run(RunArgs),
    /// Simulate every configured scenario and print them side by side.
    Compare(CompareArgs),
    /// List the configured scenarios.
    Scenarios(ScenariosArgs),
}

/// Inputs shared by `run` and `compare`.
#[derive(clap::Args)]
pub struct SimArgs {
    /// Path to TOML configuration file. Built-in defaults are used if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Total population, all starting healthy.
    #[arg(long, conflicts_with_all = ["healthy", "mild", "moderate", "severe"])]
    pub total: Option<u64>,

    /// Initial healthy count.
    #[arg(long)]
    pub healthy: Option<u64>,

    /// Initial mild count.
    #[arg(long)]
    pub mild: Option<u64>,

    /// Initial moderate count.
    #[arg(long)]
    pub moderate: Option<u64>,

    /// Initial severe count.
    #[arg(long)]
    pub severe: Option<u64>,

    /// Override the number of simulated days.
    #[arg(short, long)]
    pub days: Option<usize>,

    /// Override the number of servers.
    #[arg(long)]
    pub servers: Option<u32>,

    /// Override people served per server per day.
    #[arg(long = "service-rate", allow_negative_numbers = true)]
    pub service_rate: Option<f64>,

    /// Override the number of Markov progression steps.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SimArgs {
    /// Per-state counts, if any per-state flag was given. Missing states are 0.
    pub fn by_state(&self) -> Option<[u64; 4]> {
        let counts = [self.healthy, self.mild, self.moderate, self.severe];
        if counts.iter().all(Option::is_none) {
            return None;
        }
        Some(counts.map(|c| c.unwrap_or(0)))
    }
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Crisis scenario name. Unknown names run as the baseline.
    #[arg(long, default_value = "peace")]
    pub scenario: String,

    #[command(flatten)]
    pub sim: SimArgs,
}

/// Arguments for the `compare` subcommand.
#[derive(clap::Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub sim: SimArgs,
}

/// Arguments for the `scenarios` subcommand.
#[derive(clap::Args)]
pub struct ScenariosArgs {
    /// Path to TOML configuration file. Built-in defaults are used if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_run_with_population_split() {
        let cli = Cli::try_parse_from([
            "carecast", "-vv", "run", "--scenario", "pandemic", "--healthy", "90", "--severe",
            "10", "--days", "30",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.scenario, "pandemic");
        assert_eq!(args.sim.by_state(), Some([90, 0, 0, 10]));
        assert_eq!(args.sim.days, Some(30));
        assert!(args.sim.total.is_none());
    }

    #[test]
    fn total_conflicts_with_state_counts() {
        let res = Cli::try_parse_from(["carecast", "run", "--total", "100", "--mild", "5"]);
        assert!(res.is_err());
    }

    #[test]
    fn negative_population_is_rejected() {
        let res = Cli::try_parse_from(["carecast", "compare", "--total=-5"]);
        assert!(res.is_err());
    }
}
