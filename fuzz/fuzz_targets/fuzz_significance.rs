//! Fuzz target for the paired t-test.
//!
//! Checks that any pair of sample sequences yields either no result or a
//! well-formed one: p-value in [0, 1] and significance consistent with alpha.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tiergate_significance::{paired_t_test, TestOutcome};

#[derive(Arbitrary, Debug)]
struct Input {
    baseline: Vec<i32>,
    variant: Vec<i32>,
    alpha_permille: u16,
}

fuzz_target!(|input: Input| {
    let a: Vec<f64> = input.baseline.iter().map(|&v| f64::from(v)).collect();
    let b: Vec<f64> = input.variant.iter().map(|&v| f64::from(v)).collect();
    let alpha = f64::from(input.alpha_permille % 999 + 1) / 1000.0;

    if let TestOutcome::Computed(t) = paired_t_test(&a, &b, alpha) {
        assert!((0.0..=1.0).contains(&t.p_value));
        assert_eq!(t.significant, t.p_value < alpha);
        assert!(!t.effect_size.is_nan());
    }
});
