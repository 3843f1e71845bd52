//! Tiergate workspace-level test utilities.
//!
//! This crate exists solely to support workspace-level integration tests,
//! particularly the BDD/cucumber tests in `tests/cucumber.rs`.
//!
//! The actual tiergate functionality is in the workspace member crates:
//! - `tiergate-types`: Shared data model and evaluation config
//! - `tiergate-ingest`: Benchmark report parser
//! - `tiergate-rules`: Built-in rule catalog
//! - `tiergate-significance`: Paired t-test
//! - `tiergate-paired`: Positional pairing and means
//! - `tiergate-domain`: Verdict policy
//! - `tiergate-app`: Use cases and report rendering
//! - `tiergate` (tiergate-cli): CLI interface
