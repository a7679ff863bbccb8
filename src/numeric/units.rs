// ============================================================================
// Price and Quantity Units
// Integer tick/lot counts with a decimal bridge for display and input
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Converts `value` into a whole number of `unit`s.
fn decimal_to_units(value: Decimal, unit: Decimal) -> NumericResult<i64> {
    if unit <= Decimal::ZERO {
        return Err(NumericError::InvalidInput);
    }

    let units = value.checked_div(unit).ok_or(NumericError::Overflow)?;
    if units.fract() != Decimal::ZERO {
        return Err(NumericError::PrecisionLoss);
    }

    units.to_i64().ok_or(if units.is_sign_negative() {
        NumericError::Underflow
    } else {
        NumericError::Overflow
    })
}

macro_rules! integer_unit {
    ($(#[$meta:meta])* $name:ident, $ctor:ident, $getter:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[repr(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Zero units
            pub const ZERO: Self = Self(0);

            /// Largest representable value
            pub const MAX: Self = Self(i64::MAX);

            #[inline]
            pub const fn $ctor(value: i64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn $getter(self) -> i64 {
                self.0
            }

            #[inline]
            pub const fn is_positive(self) -> bool {
                self.0 > 0
            }

            #[inline]
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }

            #[inline]
            pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
                self.0
                    .checked_add(rhs.0)
                    .map(Self)
                    .ok_or(if rhs.0 < 0 {
                        NumericError::Underflow
                    } else {
                        NumericError::Overflow
                    })
            }

            #[inline]
            pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
                self.0
                    .checked_sub(rhs.0)
                    .map(Self)
                    .ok_or(if rhs.0 > 0 {
                        NumericError::Underflow
                    } else {
                        NumericError::Overflow
                    })
            }

            #[inline]
            pub fn min(self, other: Self) -> Self {
                Ord::min(self, other)
            }

            /// Convert a decimal amount into whole units of size `unit`.
            ///
            /// # Errors
            /// `InvalidInput` for a non-positive unit, `PrecisionLoss` when the
            /// value is not a whole multiple of the unit, `Overflow`/`Underflow`
            /// when the unit count does not fit in an i64.
            pub fn from_decimal(value: Decimal, unit: Decimal) -> NumericResult<Self> {
                decimal_to_units(value, unit).map(Self)
            }

            /// Convert back into a decimal amount given the unit size.
            ///
            /// Fails with `Overflow` when the product exceeds the decimal range.
            pub fn to_decimal(self, unit: Decimal) -> NumericResult<Decimal> {
                Decimal::from(self.0)
                    .checked_mul(unit)
                    .ok_or(NumericError::Overflow)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

integer_unit!(
    /// Limit or execution price, counted in ticks.
    Price,
    from_ticks,
    ticks
);

integer_unit!(
    /// Order or trade size, counted in lots.
    Quantity,
    from_lots,
    lots
);
