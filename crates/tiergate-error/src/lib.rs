//! Error types shared across the tiergate crates.
//!
//! Only conditions that must abort a run live here. Everything that merely
//! prevents a decision for one rule (missing report, too few trials, ...)
//! is a `skip` verdict, not an error.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TiergateError {
    /// A report file exists but could not be opened or read.
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TiergateError {
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        TiergateError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for failures of the underlying system rather than of the input data.
    pub fn is_io(&self) -> bool {
        matches!(self, TiergateError::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, TiergateError>;
