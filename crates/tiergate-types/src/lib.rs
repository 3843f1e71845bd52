//! Shared types for tiergate.
//!
//! Design goal: explicit, immutable, boring.
//! Trial data flows from the report parser into the evaluator, and verdicts
//! flow from the evaluator into the aggregator. Nothing here does I/O.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tiergate_error::TiergateError;

/// Label reserved for warm-up trials. Matched by the parser, never analyzed.
pub const WARMUP_LABEL: &str = "warmup";

pub const DEFAULT_ALPHA: f64 = 0.01;
pub const DEFAULT_MIN_TRIALS: usize = 3;
pub const DEFAULT_REPORT_SUFFIX: &str = "_bench.txt";

/// One measured run, as printed by the benchmark harness.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialObservation {
    pub label: String,

    /// Total elapsed time of the trial.
    pub total_ns: i64,

    /// Derived time per operation or per element.
    pub per_unit_ns: f64,
}

/// Trials grouped by label.
///
/// Labels keep the order of their first appearance and observations keep
/// file order, which is the temporal order of repeated trials.
/// A label is only present once at least one observation was pushed for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialCollection {
    entries: Vec<(String, Vec<TrialObservation>)>,
    index: HashMap<String, usize>,
}

impl TrialCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, obs: TrialObservation) {
        match self.index.get(&obs.label) {
            Some(&i) => self.entries[i].1.push(obs),
            None => {
                self.index.insert(obs.label.clone(), self.entries.len());
                self.entries.push((obs.label.clone(), vec![obs]));
            }
        }
    }

    /// Observations for `label`, empty when the label never appeared.
    pub fn get(&self, label: &str) -> &[TrialObservation] {
        self.index
            .get(label)
            .map(|&i| self.entries[i].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_ns(&self, label: &str) -> Vec<i64> {
        self.get(label).iter().map(|o| o.total_ns).collect()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of observations across all labels.
    pub fn observation_count(&self) -> usize {
        self.entries.iter().map(|(_, v)| v.len()).sum()
    }
}

impl FromIterator<TrialObservation> for TrialCollection {
    fn from_iter<I: IntoIterator<Item = TrialObservation>>(iter: I) -> Self {
        let mut c = TrialCollection::new();
        for obs in iter {
            c.push(obs);
        }
        c
    }
}

/// Expected direction of the variant's mean relative to the baseline's mean.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Higher,
    Lower,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Higher => "higher",
            Direction::Lower => "lower",
        }
    }

    /// Whether `variant_mean` lies on the expected side of `baseline_mean`.
    pub fn holds(self, baseline_mean: f64, variant_mean: f64) -> bool {
        match self {
            Direction::Higher => variant_mean > baseline_mean,
            Direction::Lower => variant_mean < baseline_mean,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {0} (expected lower|higher)")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "higher" => Ok(Direction::Higher),
            "lower" => Ok(Direction::Lower),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// A named claim: the variant's mean timing differs from the baseline's in
/// `direction`. In the built-in catalog the hazardous code path is the
/// baseline and the fixed code path is the variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RuleDefinition {
    pub id: &'static str,
    pub baseline_label: &'static str,
    pub variant_label: &'static str,
    pub direction: Direction,
}

impl RuleDefinition {
    pub const fn new(
        id: &'static str,
        baseline_label: &'static str,
        variant_label: &'static str,
        direction: Direction,
    ) -> Self {
        Self {
            id,
            baseline_label,
            variant_label,
            direction,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VerdictStatus {
    Pass,
    Fail,
    Skip,
}

impl VerdictStatus {
    /// Tag used in report lines, e.g. `PASS`.
    pub fn tag(self) -> &'static str {
        match self {
            VerdictStatus::Pass => "PASS",
            VerdictStatus::Fail => "FAIL",
            VerdictStatus::Skip => "SKIP",
        }
    }
}

/// Outcome of evaluating one rule. Carries only a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub message: String,
}

impl Verdict {
    pub fn pass(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Pass,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Fail,
            message: message.into(),
        }
    }

    pub fn skip(message: impl Into<String>) -> Self {
        Self {
            status: VerdictStatus::Skip,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictCounts {
    pub pass: u32,
    pub fail: u32,
    pub skip: u32,
}

impl VerdictCounts {
    pub fn record(&mut self, status: VerdictStatus) {
        match status {
            VerdictStatus::Pass => self.pass += 1,
            VerdictStatus::Fail => self.fail += 1,
            VerdictStatus::Skip => self.skip += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.pass + self.fail + self.skip
    }

    pub fn outcome(&self) -> RunOutcome {
        if self.fail > 0 {
            RunOutcome::Fail
        } else if self.pass > 0 {
            RunOutcome::Pass
        } else {
            RunOutcome::Skip
        }
    }
}

/// Overall result of a validation run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No failures and at least one rule confirmed.
    Pass,
    /// At least one rule contradicted by significant data.
    Fail,
    /// Nothing validated: every rule was skipped.
    Skip,
}

impl RunOutcome {
    pub fn tag(self) -> &'static str {
        match self {
            RunOutcome::Pass => "PASS",
            RunOutcome::Fail => "FAIL",
            RunOutcome::Skip => "SKIP",
        }
    }

    /// Only failures make the process exit nonzero.
    pub fn exit_code(self) -> u8 {
        match self {
            RunOutcome::Fail => 1,
            RunOutcome::Pass | RunOutcome::Skip => 0,
        }
    }
}

/// Knobs for rule evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    /// Significance threshold for the paired t-test.
    pub alpha: f64,

    /// Minimum trials required on each side before testing.
    pub min_trials: usize,

    /// Report file name is `<rule_id><report_suffix>`.
    pub report_suffix: String,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            min_trials: DEFAULT_MIN_TRIALS,
            report_suffix: DEFAULT_REPORT_SUFFIX.to_string(),
        }
    }
}

impl EvaluationConfig {
    pub fn validate(&self) -> Result<(), TiergateError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(TiergateError::InvalidConfig(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        // The t-test needs two pairs to estimate a variance.
        if self.min_trials < 2 {
            return Err(TiergateError::InvalidConfig(format!(
                "min_trials must be >= 2, got {}",
                self.min_trials
            )));
        }
        if self.report_suffix.is_empty() {
            return Err(TiergateError::InvalidConfig(
                "report_suffix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn report_file_name(&self, rule_id: &str) -> String {
        format!("{rule_id}{}", self.report_suffix)
    }

    pub fn report_path(&self, results_dir: &Path, rule_id: &str) -> PathBuf {
        results_dir.join(self.report_file_name(rule_id))
    }
}
