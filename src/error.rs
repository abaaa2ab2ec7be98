// File: src/error.rs
use std::process::ExitCode;
use thiserror::Error;

/// Errors raised while loading, querying or regenerating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The phrase and lookup documents disagree. Fatal at load time.
    #[error("catalog data is inconsistent: {reason}")]
    DataIntegrity { reason: String },

    /// A positional fetch outside `[0, len)`. Callers treat it as "no such entry".
    #[error("index {index} is out of range for a catalog of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn integrity(reason: impl Into<String>) -> Self {
        Self::DataIntegrity { reason: reason.into() }
    }

    /// Exit codes used by the `jargon` binary:
    /// - 1: IO error
    /// - 2: malformed document or invalid input
    /// - 3: data integrity failure
    /// - 4: index out of range
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::Io(_) => ExitCode::from(1),
            Self::Json(_) | Self::InvalidInput { .. } => ExitCode::from(2),
            Self::DataIntegrity { .. } => ExitCode::from(3),
            Self::IndexOutOfRange { .. } => ExitCode::from(4),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
