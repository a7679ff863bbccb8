// ============================================================================
// Engine Configuration
// Trade pricing, unit sizes and sizing hints for a matching engine
// ============================================================================

use rust_decimal::Decimal;

use super::errors::ConfigError;
use super::Order;
use crate::numeric::Price;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Trade Price Policy
// ============================================================================

/// Decides the execution price when the best bid crosses the best ask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TradePricePolicy {
    /// Always trade at the ask's limit price (price improvement to the buyer)
    #[default]
    AskPrice,

    /// Always trade at the bid's limit price (price improvement to the seller)
    BidPrice,

    /// Trade at the price of whichever order arrived first
    RestingOrder,

    /// Trade halfway between bid and ask, rounded toward the ask
    Midpoint,
}

impl TradePricePolicy {
    /// Execution price for a crossing pair (`bid.price >= ask.price`).
    /// The result always lies within `[ask.price, bid.price]`.
    pub fn trade_price(&self, bid: &Order, ask: &Order) -> Price {
        match self {
            TradePricePolicy::AskPrice => ask.price,
            TradePricePolicy::BidPrice => bid.price,
            TradePricePolicy::RestingOrder => {
                if bid.id < ask.id {
                    bid.price
                } else {
                    ask.price
                }
            },
            TradePricePolicy::Midpoint => {
                // bid >= ask > 0 so neither step can overflow
                let half_spread = (bid.price.ticks() - ask.price.ticks()) / 2;
                Price::from_ticks(ask.price.ticks() + half_spread)
            },
        }
    }
}

// ============================================================================
// Engine Configuration
// ============================================================================

/// Configuration for creating a matching engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// How crossing orders are priced
    pub trade_price_policy: TradePricePolicy,

    /// Decimal value of one price tick, for decimal submissions
    pub tick_size: Decimal,

    /// Decimal value of one quantity lot, for decimal submissions
    pub lot_size: Decimal,

    /// Arena capacity reserved per side when a symbol's book is created
    pub queue_capacity: usize,

    /// Default number of levels in depth snapshots
    pub snapshot_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trade_price_policy: TradePricePolicy::AskPrice,
            tick_size: Decimal::ONE,
            lot_size: Decimal::ONE,
            queue_capacity: 64,
            snapshot_depth: 10,
        }
    }
}

impl EngineConfig {
    pub fn new(trade_price_policy: TradePricePolicy) -> Self {
        Self {
            trade_price_policy,
            ..Self::default()
        }
    }

    /// Builder method: Set price tick size
    pub fn with_tick_size(mut self, tick: Decimal) -> Self {
        self.tick_size = tick;
        self
    }

    /// Builder method: Set lot size
    pub fn with_lot_size(mut self, lot: Decimal) -> Self {
        self.lot_size = lot;
        self
    }

    /// Builder method: Set per-side arena capacity
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Builder method: Set default snapshot depth
    pub fn with_snapshot_depth(mut self, depth: usize) -> Self {
        self.snapshot_depth = depth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_size <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveTickSize);
        }

        if self.lot_size <= Decimal::ZERO {
            return Err(ConfigError::NonPositiveLotSize);
        }

        if self.snapshot_depth == 0 {
            return Err(ConfigError::ZeroSnapshotDepth);
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    /// Missing fields take their default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl EngineConfig {
    /// Equity-style configuration
    /// - Cent ticks, whole-share lots
    /// - Trades at the resting order's price
    pub fn equities() -> Self {
        Self::new(TradePricePolicy::RestingOrder).with_tick_size(Decimal::new(1, 2))
    }

    /// Crossing-network style configuration
    /// - Trades at the midpoint of the crossing pair
    pub fn midpoint_cross() -> Self {
        Self::new(TradePricePolicy::Midpoint)
    }
}
