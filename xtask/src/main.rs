use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tiergate_rules::RuleRegistry;
use tiergate_types::{EvaluationConfig, RuleDefinition, WARMUP_LABEL};

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Repo automation for tiergate")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write synthetic benchmark reports for every built-in rule.
    SampleResults {
        /// Output directory
        #[arg(long, default_value = "validation/tier2/results")]
        out_dir: PathBuf,

        /// Trials per variant
        #[arg(long, default_value_t = 5)]
        trials: usize,

        /// Rules whose fixed variant should come out slower
        #[arg(long = "regress", value_name = "RULE")]
        regress: Vec<String>,
    },

    /// Run the "usual" repo checks (fmt, clippy, test).
    Ci,

    /// Run mutation testing via cargo-mutants (must be installed).
    Mutants {
        /// Extra args forwarded to cargo-mutants
        #[arg(trailing_var_arg = true)]
        args: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::SampleResults {
            out_dir,
            trials,
            regress,
        } => cmd_sample_results(&out_dir, trials, &regress),
        Command::Ci => cmd_ci(),
        Command::Mutants { args } => cmd_mutants(args),
    }
}

fn cmd_ci() -> anyhow::Result<()> {
    run("cargo", ["fmt", "--all", "--", "--check"])?;
    run(
        "cargo",
        ["clippy", "--all-targets", "--all-features", "--", "-D", "warnings"],
    )?;
    run("cargo", ["test", "--all"])?;
    run(
        "cargo",
        [
            "test",
            "-p",
            "tiergate-significance",
            "--no-default-features",
        ],
    )?;
    Ok(())
}

fn cmd_mutants(args: Vec<String>) -> anyhow::Result<()> {
    // Typical usage: `cargo install cargo-mutants` then `cargo run -p xtask -- mutants`.
    let mut cmd = std::process::Command::new("cargo");
    cmd.arg("mutants");
    for a in args {
        cmd.arg(a);
    }
    let status = cmd.status().context("running cargo mutants")?;
    if !status.success() {
        anyhow::bail!("cargo mutants failed: {status}");
    }
    Ok(())
}

fn run<const N: usize>(bin: &str, args: [&str; N]) -> anyhow::Result<()> {
    let status = std::process::Command::new(bin)
        .args(args)
        .status()
        .with_context(|| format!("running {bin}"))?;
    if !status.success() {
        anyhow::bail!("{bin} failed: {status}");
    }
    Ok(())
}

fn cmd_sample_results(out_dir: &Path, trials: usize, regress: &[String]) -> anyhow::Result<()> {
    if trials == 0 {
        anyhow::bail!("--trials must be at least 1");
    }

    let registry = RuleRegistry::builtin();
    for id in regress {
        if registry.lookup(id).is_none() {
            anyhow::bail!("unknown rule {id}");
        }
    }

    fs::create_dir_all(out_dir).with_context(|| format!("create dir {}", out_dir.display()))?;

    let config = EvaluationConfig::default();
    for (seed, rule) in registry.iter().enumerate() {
        let slower_fix = regress.iter().any(|r| r == rule.id);
        let text = sample_report(rule, trials, seed as u64 + 1, slower_fix);
        let path = config.report_path(out_dir, rule.id);
        fs::write(&path, text).with_context(|| format!("write {}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

const ITERATIONS: i64 = 100_000;

/// Harness-style report: a warmup line, then alternating trials.
fn sample_report(rule: &RuleDefinition, trials: usize, seed: u64, slower_fix: bool) -> String {
    let mut noise = Lcg(seed);
    let hazardous_ns = 2_000_000 + (seed as i64) * 150_000;
    let fixed_ns = if slower_fix {
        hazardous_ns * 3 / 2
    } else {
        hazardous_ns / 3
    };

    let mut out = format!("{} Ground Truth Benchmark\n", rule.id);
    out.push_str(&"=".repeat(49));
    out.push_str(&format!("\nIterations: {ITERATIONS}\n\n"));
    out.push_str(&trial_line(WARMUP_LABEL, hazardous_ns * 11 / 10));

    for i in 0..trials {
        out.push_str(&format!("--- Trial {} ---\n", i + 1));
        out.push_str(&trial_line(
            rule.baseline_label,
            noise.jitter(hazardous_ns),
        ));
        out.push_str(&trial_line(rule.variant_label, noise.jitter(fixed_ns)));
        out.push('\n');
    }
    out
}

fn trial_line(label: &str, total_ns: i64) -> String {
    format!(
        "{label:<26}{total_ns:>11} ns  ({:5.2} ns/op)\n",
        total_ns as f64 / ITERATIONS as f64
    )
}

/// Small deterministic generator so sample runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    /// `value` plus or minus up to 2%.
    fn jitter(&mut self, value: i64) -> i64 {
        let span = (value / 50).max(1);
        let offset = (self.next_u64() % (2 * span as u64 + 1)) as i64 - span;
        value + offset
    }
}
