//! Session-level error and save status types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures the session records or reports.
///
/// Only `GenerationFailed` blocks play; the other two are degraded
/// outcomes that are logged and otherwise ignored.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionError {
    #[error("Failed to generate maze: {0}")]
    GenerationFailed(String),

    #[error("Failed to fetch last score: {0}")]
    ScoreFetchFailed(String),

    #[error("Failed to save score: {0}")]
    ScoreSaveFailed(String),
}

/// Outcome of persisting the current attempt's score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveStatus {
    #[default]
    NotAttempted,
    Pending,
    Saved,
    Failed(String),
}
