use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single segmentation request.
///
/// A request either succeeds completely or fails with one of these; no
/// partial list of segments is ever returned.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum SegmentError {
    #[error("invalid route geometry: {0}")]
    InvalidGeometry(String),
    #[error("invalid spacing {0} km: spacing must be a finite value greater than zero")]
    InvalidSpacing(f64),
    #[error("segmentation aborted: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn segmentation worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("segmentation worker is no longer running")]
    Disconnected,
}
