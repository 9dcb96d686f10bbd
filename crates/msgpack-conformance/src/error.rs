use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::harness::Report;

/// Errors raised while producing a fixture file.
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} of {} reference cases failed", .0.failed_count(), .0.total())]
    Verification(Report),
    #[error("cannot render JSON fixtures: {0}")]
    Json(#[from] serde_json::Error),
}
