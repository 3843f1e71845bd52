//! Positional pairing of baseline and variant trials.
//!
//! The harness runs the two variants in alternating order, so the i-th
//! baseline trial is paired with the i-th variant trial. Extra trials on the
//! longer side are dropped from the end.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairedSamples {
    baseline: Vec<i64>,
    variant: Vec<i64>,
}

/// Means of both sides and their ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedSummary {
    pub baseline_mean: f64,
    pub variant_mean: f64,

    /// baseline_mean / variant_mean, or 0 when the variant mean is not positive.
    pub ratio: f64,
}

impl PairedSamples {
    /// Keep the first `min(baseline.len(), variant.len())` trials of each side.
    pub fn truncate(baseline: &[i64], variant: &[i64]) -> Self {
        let n = baseline.len().min(variant.len());
        Self {
            baseline: baseline[..n].to_vec(),
            variant: variant[..n].to_vec(),
        }
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }

    pub fn baseline(&self) -> &[i64] {
        &self.baseline
    }

    pub fn variant(&self) -> &[i64] {
        &self.variant
    }

    pub fn baseline_f64(&self) -> Vec<f64> {
        to_f64(&self.baseline)
    }

    pub fn variant_f64(&self) -> Vec<f64> {
        to_f64(&self.variant)
    }

    pub fn summary(&self) -> PairedSummary {
        let baseline_mean = mean(&self.baseline);
        let variant_mean = mean(&self.variant);
        let ratio = if variant_mean > 0.0 {
            baseline_mean / variant_mean
        } else {
            0.0
        };
        PairedSummary {
            baseline_mean,
            variant_mean,
            ratio,
        }
    }
}

fn to_f64(values: &[i64]) -> Vec<f64> {
    values.iter().map(|&v| v as f64).collect()
}

/// Arithmetic mean, 0 for an empty slice.
fn mean(values: &[i64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}
