//! Rule evaluation policy for tiergate.
//!
//! This crate is intentionally I/O-free: it turns parsed trial data and a
//! rule definition into a verdict.

use tiergate_paired::{PairedSamples, PairedSummary};
use tiergate_significance::{PairedTTest, TestOutcome, paired_t_test};
use tiergate_types::{EvaluationConfig, RuleDefinition, TrialCollection, Verdict};

/// Evaluate one rule against the trials parsed from its report.
///
/// `rule` is `None` when `rule_id` has no catalog entry. Every condition that
/// prevents a decision yields a `skip` verdict; only significant data on the
/// wrong side of the claim yields `fail`.
pub fn evaluate(
    rule_id: &str,
    rule: Option<&RuleDefinition>,
    data: &TrialCollection,
    config: &EvaluationConfig,
) -> Verdict {
    if data.is_empty() {
        return Verdict::skip(format!("Could not parse benchmark output for {rule_id}"));
    }

    let Some(rule) = rule else {
        return Verdict::skip(format!("No rule definition for {rule_id}"));
    };

    let haz = data.total_ns(rule.baseline_label);
    let fix = data.total_ns(rule.variant_label);

    if haz.len() < config.min_trials || fix.len() < config.min_trials {
        return Verdict::skip(format!(
            "Insufficient trials (need ≥{}, got haz={}, fix={})",
            config.min_trials,
            haz.len(),
            fix.len()
        ));
    }

    let pairs = PairedSamples::truncate(&haz, &fix);
    if haz.len() != fix.len() {
        tracing::debug!(
            rule = rule_id,
            haz = haz.len(),
            fix = fix.len(),
            pairs = pairs.len(),
            "truncated unequal trial counts"
        );
    }
    let outcome = paired_t_test(&pairs.baseline_f64(), &pairs.variant_f64(), config.alpha);
    conclude(rule, &pairs, outcome, config.alpha)
}

/// Turn an engine outcome into a verdict.
///
/// Without a test result only the manual ratio is reported, as a skip.
pub fn conclude(
    rule: &RuleDefinition,
    pairs: &PairedSamples,
    outcome: TestOutcome,
    alpha: f64,
) -> Verdict {
    let summary = pairs.summary();
    match outcome {
        TestOutcome::Computed(test) => decide(rule, &summary, &test, alpha),
        TestOutcome::Unavailable => Verdict::skip(format!(
            "statistics engine unavailable, manual check: {}",
            manual_ratio(&summary)
        )),
        TestOutcome::InsufficientData => Verdict::skip(format!(
            "too few pairs for a t-test ({}), manual check: {}",
            pairs.len(),
            manual_ratio(&summary)
        )),
    }
}

/// Apply the rule's direction to a completed test.
pub fn decide(
    rule: &RuleDefinition,
    summary: &PairedSummary,
    test: &PairedTTest,
    alpha: f64,
) -> Verdict {
    let message = format!(
        "haz={:.0}ns fix={:.0}ns ratio={:.2}x t={:.3} p={:.6} d={:.2} {} (α={alpha})",
        summary.baseline_mean,
        summary.variant_mean,
        summary.ratio,
        test.statistic,
        test.p_value,
        test.effect_size,
        if test.significant {
            "SIGNIFICANT"
        } else {
            "NOT significant"
        },
    );

    if test.significant
        && rule
            .direction
            .holds(summary.baseline_mean, summary.variant_mean)
    {
        Verdict::pass(message)
    } else {
        Verdict::fail(message)
    }
}

fn manual_ratio(summary: &PairedSummary) -> String {
    format!(
        "haz={:.0}ns, fix={:.0}ns, ratio={:.2}x",
        summary.baseline_mean, summary.variant_mean, summary.ratio
    )
}
