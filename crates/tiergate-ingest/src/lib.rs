//! Import trial timings from benchmark harness text output.
//!
//! The harness prints one line per trial among headers and separators:
//!
//! ```text
//! --- Trial 1 ---
//! large (192B)               1834021 ns  ( 1.83 ns/elem, sizeof=192)
//! split (32B)                 702113 ns  ( 0.70 ns/elem, sizeof=32)
//! ```
//!
//! Only lines shaped like the trial records above are kept. Everything else
//! is ignored, and parsing never fails because of content.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tiergate_error::TiergateError;
use tiergate_types::{TrialCollection, TrialObservation, WARMUP_LABEL};

// label, two or more blanks, total ns, then "(<per-unit> ns/op|ns/elem".
static TRIAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s{2,}(-?[0-9]+)\s+ns\s+\(\s*(-?[0-9.]+)\s+ns/(?:op|elem)")
        .expect("trial line regex is valid")
});

/// Parse one line into a trial observation.
///
/// Returns `None` for lines that are not trial records, and for records
/// whose numbers do not fit the observation types.
pub fn parse_line(line: &str) -> Option<TrialObservation> {
    let caps = TRIAL_LINE.captures(line.trim())?;
    let label = caps.get(1)?.as_str().trim();
    let total_ns: i64 = caps.get(2)?.as_str().parse().ok()?;
    let per_unit_ns: f64 = caps.get(3)?.as_str().parse().ok()?;

    Some(TrialObservation {
        label: label.to_string(),
        total_ns,
        per_unit_ns,
    })
}

/// Parse a whole report. Warm-up trials are dropped.
pub fn parse_report(text: &str) -> TrialCollection {
    let mut trials = TrialCollection::new();
    for (lineno, line) in text.lines().enumerate() {
        let Some(obs) = parse_line(line) else {
            continue;
        };
        if obs.label == WARMUP_LABEL {
            tracing::trace!(line = lineno + 1, "skipping warmup trial");
            continue;
        }
        trials.push(obs);
    }
    trials
}

/// Read and parse a report file.
///
/// A file that cannot be opened or read is an error; a file with no trial
/// lines is an empty collection.
pub fn load_report(path: &Path) -> Result<TrialCollection, TiergateError> {
    let bytes = std::fs::read(path).map_err(|e| TiergateError::io(path, e))?;
    let text = String::from_utf8_lossy(&bytes);
    let trials = parse_report(&text);
    tracing::debug!(
        path = %path.display(),
        labels = trials.len(),
        observations = trials.observation_count(),
        "parsed benchmark report"
    );
    Ok(trials)
}
