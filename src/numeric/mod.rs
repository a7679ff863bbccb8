// ============================================================================
// Numeric Module
// Integer price/quantity units for deterministic order matching
// ============================================================================
//
// This module provides:
// - Price: limit and execution prices counted in ticks
// - Quantity: order sizes counted in lots
// - NumericError: Error types for arithmetic and decimal conversion
//
// Design principles:
// - No floating-point operations
// - Arithmetic that can overflow returns Result
// - Decimal values only at the edges (input conversion, reporting)

mod errors;
mod units;

pub use errors::{NumericError, NumericResult};
pub use units::{Price, Quantity};
