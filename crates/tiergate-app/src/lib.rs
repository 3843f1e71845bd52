//! Application layer for tiergate.
//!
//! The app layer coordinates report loading, catalog lookup and domain
//! evaluation. It does not parse CLI flags and it does not print.

mod report;

pub use report::{TITLE, render_report, render_rule_line, render_summary, result_line, separator};

use std::path::{Path, PathBuf};
use tiergate_error::TiergateError;
use tiergate_ingest::load_report;
use tiergate_rules::RuleRegistry;
use tiergate_types::{
    EvaluationConfig, RunOutcome, TrialCollection, Verdict, VerdictCounts, VerdictStatus,
};

/// Where per-rule benchmark reports come from.
pub trait ReportSource {
    /// Trials for `rule_id`, or `None` when no report exists for it.
    ///
    /// A report that exists but cannot be read is an error.
    fn load(&self, rule_id: &str) -> Result<Option<TrialCollection>, TiergateError>;

    /// Human-readable location of the report for `rule_id`.
    fn describe(&self, rule_id: &str) -> String;
}

/// Reads `<results_dir>/<rule_id><suffix>` from disk.
#[derive(Debug, Clone)]
pub struct FsReportSource {
    results_dir: PathBuf,
    config: EvaluationConfig,
}

impl FsReportSource {
    pub fn new(results_dir: impl Into<PathBuf>, config: &EvaluationConfig) -> Self {
        Self {
            results_dir: results_dir.into(),
            config: config.clone(),
        }
    }

    pub fn report_path(&self, rule_id: &str) -> PathBuf {
        self.config.report_path(&self.results_dir, rule_id)
    }
}

impl ReportSource for FsReportSource {
    fn load(&self, rule_id: &str) -> Result<Option<TrialCollection>, TiergateError> {
        let path = self.report_path(rule_id);
        // Only NotFound counts as missing; any other metadata error is fatal.
        if !path.try_exists().map_err(|e| TiergateError::io(&path, e))? {
            return Ok(None);
        }
        load_report(&path).map(Some)
    }

    fn describe(&self, rule_id: &str) -> String {
        self.report_path(rule_id).display().to_string()
    }
}

/// Evaluates a single rule: load its report, look it up, decide.
pub struct EvaluateRuleUseCase<S: ReportSource> {
    source: S,
    registry: RuleRegistry,
    config: EvaluationConfig,
}

impl<S: ReportSource> EvaluateRuleUseCase<S> {
    pub fn new(
        source: S,
        registry: RuleRegistry,
        config: EvaluationConfig,
    ) -> Result<Self, TiergateError> {
        config.validate()?;
        Ok(Self {
            source,
            registry,
            config,
        })
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn execute(&self, rule_id: &str) -> Result<Verdict, TiergateError> {
        let Some(data) = self.source.load(rule_id)? else {
            tracing::debug!(rule = rule_id, "no benchmark report");
            return Ok(Verdict::skip(format!(
                "No benchmark output for {rule_id} ({})",
                self.source.describe(rule_id)
            )));
        };

        let verdict = tiergate_domain::evaluate(
            rule_id,
            self.registry.lookup(rule_id),
            &data,
            &self.config,
        );
        tracing::debug!(
            rule = rule_id,
            status = verdict.status.tag(),
            labels = data.len(),
            "evaluated rule"
        );
        Ok(verdict)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleResult {
    pub rule_id: String,
    pub verdict: Verdict,
}

/// Verdicts for every registered rule, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub results: Vec<RuleResult>,
    pub counts: VerdictCounts,
}

impl ValidationReport {
    pub fn outcome(&self) -> RunOutcome {
        self.counts.outcome()
    }

    pub fn exit_code(&self) -> u8 {
        self.outcome().exit_code()
    }

    pub fn with_status(&self, status: VerdictStatus) -> impl Iterator<Item = &RuleResult> {
        self.results
            .iter()
            .filter(move |r| r.verdict.status == status)
    }
}

/// Runs the evaluator over the whole registry.
pub struct ValidateUseCase<S: ReportSource> {
    evaluator: EvaluateRuleUseCase<S>,
}

impl<S: ReportSource> ValidateUseCase<S> {
    pub fn new(evaluator: EvaluateRuleUseCase<S>) -> Self {
        Self { evaluator }
    }

    /// Evaluate every rule once, in catalog order.
    ///
    /// An I/O failure on any report aborts the run.
    pub fn execute(&self) -> Result<ValidationReport, TiergateError> {
        if !tiergate_significance::is_available() {
            tracing::warn!("built without the t distribution; rules will only be ratio-checked");
        }

        let mut results = Vec::with_capacity(self.evaluator.registry().len());
        let mut counts = VerdictCounts::default();

        for rule in self.evaluator.registry().iter() {
            let verdict = self.evaluator.execute(rule.id)?;
            counts.record(verdict.status);
            results.push(RuleResult {
                rule_id: rule.id.to_string(),
                verdict,
            });
        }

        tracing::debug!(
            pass = counts.pass,
            fail = counts.fail,
            skip = counts.skip,
            "validation finished"
        );
        Ok(ValidationReport { results, counts })
    }
}

/// Validate the built-in catalog against reports in `results_dir`.
pub fn validate_results_dir(
    results_dir: &Path,
    config: EvaluationConfig,
) -> Result<ValidationReport, TiergateError> {
    let source = FsReportSource::new(results_dir, &config);
    let evaluator = EvaluateRuleUseCase::new(source, RuleRegistry::builtin(), config)?;
    ValidateUseCase::new(evaluator).execute()
}
