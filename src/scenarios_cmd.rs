//! Scenarios command: list what the configuration knows about.

use anyhow::Result;

use carecast_crisis::FactorMode;
use carecast_sim::ModelConfig;

use crate::cli::ScenariosArgs;
use crate::config::CarecastConfig;
use crate::convert;

/// Print every scenario with its factor and transition matrix.
pub fn run(args: ScenariosArgs) -> Result<()> {
    let config = CarecastConfig::load(args.config.as_deref())?;
    let model = convert::build_model_config(&config)?;
    print!("{}", describe(&model));
    Ok(())
}

fn describe(model: &ModelConfig) -> String {
    let transitions = model.transitions();
    let crisis = model.crisis();
    let mut out = format!("baseline: {}\n", transitions.baseline());
    for name in model.scenario_names() {
        let kind = match crisis.mode(&name) {
            FactorMode::Aggregate => "aggregate",
            FactorMode::Single => "stressor",
            FactorMode::Unrecognized => "-",
        };
        out.push_str(&format!(
            "{:<20} {:<10} factor {:>5.2}  matrix {}\n",
            name,
            kind,
            crisis.factor(&name),
            transitions.resolve_name(&name),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_standard_scenarios() {
        let text = describe(&ModelConfig::new());
        assert!(text.starts_with("baseline: peace\n"));
        let crisis = text.lines().find(|l| l.starts_with("crisis ")).unwrap();
        assert!(crisis.contains("aggregate"));
        assert!(crisis.contains("0.80"));
        assert!(crisis.ends_with("matrix crisis"));
        let pandemic = text.lines().find(|l| l.starts_with("pandemic ")).unwrap();
        assert!(pandemic.contains("stressor"));
        assert!(pandemic.ends_with("matrix peace"));
    }
}
