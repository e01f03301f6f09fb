use tracing_subscriber::EnvFilter;

/// All workspace crate targets that should receive log output.
const CRATE_TARGETS: &[&str] = &[
    "carecast",
    "carecast_care",
    "carecast_crisis",
    "carecast_markov",
    "carecast_queue",
    "carecast_sim",
];

/// Builds the default filter directive for a verbosity level.
///
/// Mapping:
/// - 0 (none) -> warn
/// - 1 (-v)   -> info
/// - 2 (-vv)  -> debug
/// - 3+ (-vvv)-> trace
fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing based on CLI verbosity level.
///
/// `RUST_LOG` env var overrides the CLI flag if set. Logs go to stderr so
/// that `--json` output on stdout stays clean.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_covers_every_crate() {
        let d = default_directive(1);
        for t in CRATE_TARGETS {
            assert!(d.contains(&format!("{t}=info")));
        }
    }

    #[test]
    fn verbosity_saturates_at_trace() {
        assert!(default_directive(0).starts_with("carecast=warn"));
        assert!(default_directive(2).starts_with("carecast=debug"));
        assert!(default_directive(9).starts_with("carecast=trace"));
    }
}
