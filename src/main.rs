mod cli;
mod compare_cmd;
mod config;
mod convert;
mod logging;
mod run_cmd;
mod scenarios_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run_cmd::run(args),
        Command::Compare(args) => compare_cmd::run(args),
        Command::Scenarios(args) => scenarios_cmd::run(args),
    }
}
