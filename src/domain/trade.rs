// ============================================================================
// Trade Domain Model
// ============================================================================

use crate::numeric::{NumericError, NumericResult, Price, Quantity};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use super::OrderView;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fill between the best bid and the best ask of one symbol
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TradeEvent {
    /// Unique trade identifier
    pub id: Uuid,

    /// Ticker both orders rest under
    pub symbol: Arc<str>,

    /// Executed quantity
    pub quantity: Quantity,

    /// Execution price
    pub price: Price,

    /// Buy order as it stands after this fill
    pub buy_order: OrderView,

    /// Sell order as it stands after this fill
    pub sell_order: OrderView,

    /// Trade timestamp
    pub timestamp: DateTime<Utc>,
}

impl TradeEvent {
    pub fn new(
        symbol: Arc<str>,
        quantity: Quantity,
        price: Price,
        buy_order: OrderView,
        sell_order: OrderView,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol,
            quantity,
            price,
            buy_order,
            sell_order,
            timestamp: Utc::now(),
        }
    }

    /// Notional value in tick-lots (price * quantity)
    ///
    /// Returns a Result because multiplication can overflow.
    pub fn notional_value(&self) -> NumericResult<i64> {
        self.price
            .ticks()
            .checked_mul(self.quantity.lots())
            .ok_or(NumericError::Overflow)
    }
}

impl fmt::Display for TradeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matched: {} of {} at {} (buy {} / sell {})",
            self.quantity, self.symbol, self.price, self.buy_order.order_id, self.sell_order.order_id
        )
    }
}
