//! Paired significance testing for repeated timing measurements.
//!
//! `a[i]` and `b[i]` are one matched pair. The test works on the
//! differences `a[i] - b[i]` under the null hypothesis that their population
//! mean is zero.
//!
//! The Student's t distribution comes from `statrs` behind the default
//! `statrs` feature. Without it every call returns
//! [`TestOutcome::Unavailable`] and callers fall back to a plain ratio.

pub const DEFAULT_ALPHA: f64 = 0.01;

/// Fewest pairs for which a sample variance exists.
pub const MIN_PAIRS: usize = 2;

/// A complete paired t-test result. All fields are always present together.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedTTest {
    /// t statistic of the mean difference.
    pub statistic: f64,

    /// Two-sided p-value.
    pub p_value: f64,

    /// `p_value < alpha`.
    pub significant: bool,

    /// Cohen's d for paired samples: mean difference over its sample
    /// standard deviation. 0.0 when all differences are identical.
    pub effect_size: f64,

    /// Degrees of freedom (`n - 1`).
    pub df: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestOutcome {
    Computed(PairedTTest),

    /// Fewer than [`MIN_PAIRS`] observations on a side.
    InsufficientData,

    /// No t distribution available in this build.
    Unavailable,
}

impl TestOutcome {
    pub fn computed(self) -> Option<PairedTTest> {
        match self {
            TestOutcome::Computed(t) => Some(t),
            TestOutcome::InsufficientData | TestOutcome::Unavailable => None,
        }
    }
}

/// Whether this build can compute p-values.
pub fn is_available() -> bool {
    cfg!(feature = "statrs")
}

/// Run a two-sided paired t-test at significance level `alpha`.
///
/// Sequences of unequal length are compared over their first
/// `min(a.len(), b.len())` pairs.
pub fn paired_t_test(a: &[f64], b: &[f64], alpha: f64) -> TestOutcome {
    if a.len() < MIN_PAIRS || b.len() < MIN_PAIRS {
        return TestOutcome::InsufficientData;
    }
    if !is_available() {
        return TestOutcome::Unavailable;
    }

    let diffs: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
    let n = diffs.len() as f64;
    let df = n - 1.0;

    let mean = diffs.iter().sum::<f64>() / n;
    let variance = diffs.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / df;
    let sd = variance.sqrt();

    let (statistic, p_value, effect_size) = if sd > 0.0 {
        let t = mean / (sd / n.sqrt());
        let Some(p) = two_sided_p_value(t, df) else {
            return TestOutcome::Unavailable;
        };
        (t, p, mean / sd)
    } else if mean != 0.0 {
        // Identical nonzero differences: infinitely far from the null.
        (f64::INFINITY.copysign(mean), 0.0, 0.0)
    } else {
        (0.0, 1.0, 0.0)
    };

    TestOutcome::Computed(PairedTTest {
        statistic,
        p_value,
        significant: p_value < alpha,
        effect_size,
        df,
    })
}

#[cfg(feature = "statrs")]
fn two_sided_p_value(t: f64, df: f64) -> Option<f64> {
    use statrs::distribution::{ContinuousCDF, StudentsT};

    let dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p = 2.0 * dist.sf(t.abs());
    p.is_finite().then(|| p.clamp(0.0, 1.0))
}

#[cfg(not(feature = "statrs"))]
fn two_sided_p_value(_t: f64, _df: f64) -> Option<f64> {
    None
}
