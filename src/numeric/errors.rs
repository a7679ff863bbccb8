// ============================================================================
// Numeric Errors
// Error types for tick/lot arithmetic and decimal conversion
// ============================================================================

use thiserror::Error;

/// Errors that can occur during tick/lot arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum NumericError {
    /// Result exceeded i64::MAX
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,
    /// Result below i64::MIN
    #[error("arithmetic underflow: result below minimum value")]
    Underflow,
    /// Value is not a whole number of ticks or lots
    #[error("precision loss: value is not a whole multiple of the unit")]
    PrecisionLoss,
    /// Unit size or input value is invalid
    #[error("invalid input: unit size must be positive")]
    InvalidInput,
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
