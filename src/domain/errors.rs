// ============================================================================
// Domain Errors
// Submission rejections, configuration errors and engine-level failures
// ============================================================================

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Why a submission was not admitted to the book.
///
/// A rejection leaves the book unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RejectReason {
    /// Quantity was zero, negative, or not a whole number of lots
    #[error("invalid quantity: must be a positive number of lots")]
    InvalidQuantity,
    /// Price was zero, negative, or not a whole number of ticks
    #[error("invalid price: must be a positive number of ticks")]
    InvalidPrice,
}

/// Configuration validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("tick size must be positive")]
    NonPositiveTickSize,

    #[error("lot size must be positive")]
    NonPositiveLotSize,

    #[error("snapshot depth must be at least one level")]
    ZeroSnapshotDepth,

    #[error("malformed configuration: {0}")]
    Malformed(String),
}

/// Errors surfaced by engine front-ends that sit between callers and the book
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("order rejected: {0}")]
    Rejected(#[from] RejectReason),

    #[error("matching engine task has stopped")]
    Closed,
}
