use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tiergate_app::{render_report, validate_results_dir};
use tiergate_types::EvaluationConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_RESULTS_DIR: &str = "validation/tier2/results";

#[derive(Debug, Parser)]
#[command(
    name = "tiergate",
    version,
    about = "Check benchmark ground truth with paired t-tests"
)]
struct Cli {
    /// Directory holding one `<RULE>_bench.txt` report per rule
    #[arg(value_name = "RESULTS_DIR", default_value = DEFAULT_RESULTS_DIR)]
    results_dir: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();

    match real_main() {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn real_main() -> anyhow::Result<u8> {
    let cli = Cli::parse();
    tracing::debug!(results_dir = %cli.results_dir.display(), "starting validation");

    let report = validate_results_dir(&cli.results_dir, EvaluationConfig::default())
        .with_context(|| format!("validate {}", cli.results_dir.display()))?;

    print!("{}", render_report(&report));
    Ok(report.exit_code())
}

/// Logs go to stderr so stdout stays the report. `RUST_LOG` overrides the
/// default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn results_dir_defaults_to_conventional_path() {
        let cli = Cli::try_parse_from(["tiergate"]).unwrap();
        assert_eq!(cli.results_dir, PathBuf::from(DEFAULT_RESULTS_DIR));
    }

    #[test]
    fn results_dir_is_positional() {
        let cli = Cli::try_parse_from(["tiergate", "out/results"]).unwrap();
        assert_eq!(cli.results_dir, PathBuf::from("out/results"));
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["tiergate", "--alpha", "0.05"]).is_err());
    }
}
