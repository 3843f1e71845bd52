//! Cross-crate integration tests.
//!
//! These exercise the parser, engine, domain and app crates together on
//! reports written to disk, the same way the binary runs them.

use std::fs;
use tempfile::tempdir;
use tiergate_app::{
    EvaluateRuleUseCase, FsReportSource, ReportSource, ValidateUseCase, render_report,
    validate_results_dir,
};
use tiergate_domain::evaluate;
use tiergate_error::TiergateError;
use tiergate_ingest::{load_report, parse_report};
use tiergate_paired::PairedSamples;
use tiergate_rules::RuleRegistry;
use tiergate_significance::{DEFAULT_ALPHA, paired_t_test};
use tiergate_types::{EvaluationConfig, RunOutcome, VerdictStatus};

const FL002_REPORT: &str = "\
FL002 Ground Truth Benchmark
=================================================
Iterations: 100

warmup                          130 ns  ( 1.30 ns/op)
--- Trial 1 ---
hazardous                       100 ns  ( 1.00 ns/op)
fixed                            50 ns  ( 0.50 ns/op)

--- Trial 2 ---
hazardous                       110 ns  ( 1.10 ns/op)
fixed                            48 ns  ( 0.48 ns/op)

--- Trial 3 ---
hazardous                       105 ns  ( 1.05 ns/op)
fixed                            52 ns  ( 0.52 ns/op)

--- Trial 4 ---
hazardous                        95 ns  ( 0.95 ns/op)
fixed                            51 ns  ( 0.51 ns/op)

--- Trial 5 ---
hazardous                       120 ns  ( 1.20 ns/op)
fixed                            49 ns  ( 0.49 ns/op)
";

#[test]
fn parser_feeds_engine_with_harness_order() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("FL002_bench.txt");
    fs::write(&path, FL002_REPORT).unwrap();

    let trials = load_report(&path).unwrap();
    assert!(!trials.contains("warmup"));

    let pairs = PairedSamples::truncate(&trials.total_ns("hazardous"), &trials.total_ns("fixed"));
    assert_eq!(pairs.len(), 5);

    let test = paired_t_test(&pairs.baseline_f64(), &pairs.variant_f64(), DEFAULT_ALPHA)
        .computed()
        .expect("statrs is enabled by default");
    assert!(test.significant);
    assert!(test.statistic > 0.0);
}

#[test]
fn end_to_end_single_pass() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("FL002_bench.txt"), FL002_REPORT).unwrap();

    let report = validate_results_dir(dir.path(), EvaluationConfig::default()).unwrap();

    assert_eq!(report.counts.pass, 1);
    assert_eq!(report.counts.fail, 0);
    assert_eq!(report.counts.skip, 6);
    assert_eq!(report.outcome(), RunOutcome::Pass);
    assert_eq!(report.exit_code(), 0);

    let rendered = render_report(&report);
    assert!(rendered.contains(
        "  [PASS] FL002: haz=106ns fix=50ns ratio=2.12x t=11.806 p=0.000295 d=5.28 SIGNIFICANT (α=0.01)\n"
    ));
    assert!(rendered.ends_with("RESULT: PASS (all 1 validated rule(s) confirmed)\n"));
}

#[test]
fn custom_suffix_and_alpha_flow_through() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("FL002.log"), FL002_REPORT).unwrap();

    let config = EvaluationConfig {
        alpha: 0.05,
        report_suffix: ".log".to_string(),
        ..EvaluationConfig::default()
    };
    let source = FsReportSource::new(dir.path(), &config);
    assert!(source.load("FL002").unwrap().is_some());
    assert!(source.load("FL001").unwrap().is_none());

    let evaluator = EvaluateRuleUseCase::new(source, RuleRegistry::builtin(), config).unwrap();
    let verdict = evaluator.execute("FL002").unwrap();
    assert_eq!(verdict.status, VerdictStatus::Pass);
    assert!(verdict.message.ends_with("(α=0.05)"));

    let report = ValidateUseCase::new(evaluator).execute().unwrap();
    assert_eq!(report.counts.pass, 1);
}

#[test]
fn non_utf8_bytes_do_not_hide_trials() {
    let dir = tempdir().unwrap();
    let mut bytes = b"FL002 \xff\xfe garbage header\n".to_vec();
    bytes.extend_from_slice(FL002_REPORT.as_bytes());
    fs::write(dir.path().join("FL002_bench.txt"), bytes).unwrap();

    let report = validate_results_dir(dir.path(), EvaluationConfig::default()).unwrap();
    let fl002 = report
        .results
        .iter()
        .find(|r| r.rule_id == "FL002")
        .unwrap();
    assert_eq!(fl002.verdict.status, VerdictStatus::Pass);
}

#[test]
fn every_builtin_rule_is_reported_once() {
    let dir = tempdir().unwrap();
    let report = validate_results_dir(dir.path(), EvaluationConfig::default()).unwrap();
    assert_eq!(report.results.len(), RuleRegistry::builtin().len());
    assert_eq!(report.counts.total() as usize, report.results.len());
}

#[test]
fn domain_and_app_agree_on_the_verdict() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("FL002_bench.txt"), FL002_REPORT).unwrap();
    let config = EvaluationConfig::default();

    let direct = evaluate(
        "FL002",
        RuleRegistry::builtin().lookup("FL002"),
        &parse_report(FL002_REPORT),
        &config,
    );
    let report = validate_results_dir(dir.path(), config).unwrap();
    let via_app = &report
        .results
        .iter()
        .find(|r| r.rule_id == "FL002")
        .unwrap()
        .verdict;
    assert_eq!(&direct, via_app);
}

#[test]
fn unreadable_report_aborts_with_io_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("FL002_bench.txt"), FL002_REPORT).unwrap();
    fs::create_dir(dir.path().join("FL010_bench.txt")).unwrap();

    let err = validate_results_dir(dir.path(), EvaluationConfig::default()).unwrap_err();
    assert!(err.is_io());
    match err {
        TiergateError::Io { path, .. } => assert!(path.ends_with("FL010_bench.txt")),
        other => panic!("expected an I/O error, got {other}"),
    }
}

#[cfg(unix)]
#[test]
fn symlink_loop_report_is_fatal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("FL030_bench.txt");
    std::os::unix::fs::symlink(&path, &path).unwrap();

    let err = validate_results_dir(dir.path(), EvaluationConfig::default()).unwrap_err();
    assert!(matches!(err, TiergateError::Io { .. }));
}

#[test]
fn invalid_config_is_rejected_before_any_read() {
    let dir = tempdir().unwrap();
    let config = EvaluationConfig {
        min_trials: 1,
        ..EvaluationConfig::default()
    };
    let err = validate_results_dir(dir.path(), config).unwrap_err();
    assert!(matches!(err, TiergateError::InvalidConfig(_)));
    assert!(!err.is_io());
}
