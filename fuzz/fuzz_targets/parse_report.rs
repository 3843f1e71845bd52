//! Fuzz target for the benchmark report parser.
//!
//! Arbitrary bytes are decoded lossily, the same way reports are read from
//! disk. The parser must never panic and must never record a warmup trial.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let trials = tiergate_ingest::parse_report(&text);

    assert!(!trials.contains("warmup"));
    assert!(trials.observation_count() <= text.lines().count());
});
