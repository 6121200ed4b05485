//! # Error Handling
//!
//! Errors surfaced by the generator, dataset storage and config loading.
//! Provider-side errors live in [`crate::providers`].

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::models::DatasetViolation;

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("malformed dataset {}: {violation}", path.display())]
    MalformedDataset {
        path: PathBuf,
        violation: DatasetViolation,
    },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl FixtureError {
    /// Whether the error means the file simply is not there.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FixtureError::NotFound { .. })
    }
}

pub type Result<T, E = FixtureError> = std::result::Result<T, E>;
