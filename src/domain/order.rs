// ============================================================================
// Order Domain Model
// ============================================================================

use crate::numeric::{Price, Quantity};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Value Objects
// ============================================================================

/// Order identity, taken from the engine's monotonically increasing
/// acceptance sequence. A lower id means an earlier arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderId(u64);

impl OrderId {
    pub const fn from_sequence(sequence: u64) -> Self {
        Self(sequence)
    }

    pub const fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => f.write_str("BUY"),
            Side::Sell => f.write_str("SELL"),
        }
    }
}

// ============================================================================
// Order State Machine
// ============================================================================

pub mod state {
    #[cfg(feature = "serde")]
    use serde::{Deserialize, Serialize};

    /// Lifecycle of a resting order. Rejected submissions never become
    /// orders, so there is no rejected state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub enum OrderState {
        Accepted,
        PartiallyFilled,
        Filled,
    }

    impl OrderState {
        pub fn is_terminal(&self) -> bool {
            matches!(self, OrderState::Filled)
        }
    }
}

// ============================================================================
// Order Entity
// ============================================================================

/// A resting limit order.
///
/// Identity fields are fixed at acceptance; only the remaining quantity (and
/// the state derived from it) changes, and only through [`Order::try_fill`].
#[derive(Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub symbol: Arc<str>,
    pub price: Price,
    /// Quantity at submission
    pub quantity: Quantity,
    pub timestamp: DateTime<Utc>,

    remaining: Quantity,
    state: state::OrderState,
}

impl Order {
    pub fn new(
        id: OrderId,
        side: Side,
        symbol: Arc<str>,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id,
            side,
            symbol,
            price,
            quantity,
            timestamp: Utc::now(),
            remaining: quantity,
            state: state::OrderState::Accepted,
        }
    }

    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining
    }

    pub fn filled_quantity(&self) -> Quantity {
        // remaining never exceeds quantity, so this cannot underflow
        Quantity::from_lots(self.quantity.lots() - self.remaining.lots())
    }

    pub fn state(&self) -> state::OrderState {
        self.state
    }

    pub fn is_filled(&self) -> bool {
        self.remaining.is_zero()
    }

    /// Fill `quantity` lots of this order.
    /// Returns false, leaving the order untouched, if the fill is not
    /// positive or exceeds the remaining quantity.
    pub fn try_fill(&mut self, quantity: Quantity) -> bool {
        if !quantity.is_positive() || quantity > self.remaining {
            return false;
        }

        self.remaining = Quantity::from_lots(self.remaining.lots() - quantity.lots());
        self.state = if self.remaining.is_zero() {
            state::OrderState::Filled
        } else {
            state::OrderState::PartiallyFilled
        };
        true
    }

    pub fn view(&self) -> OrderView {
        OrderView::from(self)
    }
}

// ============================================================================
// Read-only View
// ============================================================================

/// Detached, read-only copy of an order used for snapshots and trade reports
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderView {
    pub order_id: OrderId,
    pub side: Side,
    pub symbol: Arc<str>,
    pub original_quantity: Quantity,
    pub remaining_quantity: Quantity,
    pub limit_price: Price,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.id,
            side: order.side,
            symbol: Arc::clone(&order.symbol),
            original_quantity: order.quantity,
            remaining_quantity: order.remaining,
            limit_price: order.price,
        }
    }
}

impl fmt::Display for OrderView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} @ {}",
            self.side, self.symbol, self.remaining_quantity, self.limit_price
        )
    }
}
