//! Plain-text rendering of a validation run.
//!
//! The layout is line-oriented so CI logs stay greppable:
//!
//! ```text
//! Tier 2: Statistical Analysis
//! ==================================================
//!
//!   [PASS] FL002: haz=106ns fix=50ns ...
//!
//! ==================================================
//!   PASS: 1  FAIL: 0  SKIP: 6
//!
//! RESULT: PASS (all 1 validated rule(s) confirmed)
//! ```

use crate::{RuleResult, ValidationReport};
use tiergate_types::{RunOutcome, VerdictCounts};

pub const TITLE: &str = "Tier 2: Statistical Analysis";

const RULE_WIDTH: usize = 50;

pub fn separator() -> String {
    "=".repeat(RULE_WIDTH)
}

pub fn render_rule_line(result: &RuleResult) -> String {
    format!(
        "  [{}] {}: {}",
        result.verdict.status.tag(),
        result.rule_id,
        result.verdict.message
    )
}

pub fn render_summary(counts: &VerdictCounts) -> String {
    format!(
        "  PASS: {}  FAIL: {}  SKIP: {}",
        counts.pass, counts.fail, counts.skip
    )
}

/// The final one-line verdict for the whole run.
pub fn result_line(counts: &VerdictCounts) -> String {
    match counts.outcome() {
        RunOutcome::Fail => format!("RESULT: FAIL ({} rule(s) failed ground truth)", counts.fail),
        RunOutcome::Pass => format!(
            "RESULT: PASS (all {} validated rule(s) confirmed)",
            counts.pass
        ),
        RunOutcome::Skip => "RESULT: SKIP (no rules validated)".to_string(),
    }
}

/// Render the complete report, newline-terminated.
pub fn render_report(report: &ValidationReport) -> String {
    let sep = separator();
    let mut out = String::new();

    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&sep);
    out.push_str("\n\n");

    for result in &report.results {
        out.push_str(&render_rule_line(result));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    out.push_str(&render_summary(&report.counts));
    out.push_str("\n\n");
    out.push_str(&result_line(&report.counts));
    out.push('\n');
    out
}
