//! Mood-insight errors.

use thiserror::Error;

use crate::storage::StoreError;

/// Input rejected before it reaches the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Mood label is required")]
    MissingMood,

    #[error("Intensity must be between 1 and 10, got {0}")]
    IntensityOutOfRange(u8),
}

/// Why a call to the remote classifier did not produce a usable result.
///
/// Never surfaces to callers of the sentiment client; it only feeds the
/// failure log before the fallback takes over.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    #[error("Classifier returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed classifier response: {0}")]
    Malformed(String),
}

/// Errors from the mood pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
