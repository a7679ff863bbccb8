// ============================================================================
// Matching Engine Factory
// Creates matching engines with proper configuration
// ============================================================================

use crate::domain::{ConfigError, EngineConfig, TradePricePolicy};
use crate::engine::{MatchingEngine, PriceTimePriority};
use crate::interfaces::{EventHandler, MatchingAlgorithm, NoOpEventHandler};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a matching engine from configuration
///
/// # Arguments
/// * `config` - Engine configuration
/// * `event_handler` - Event handler for order and trade events
///
/// # Returns
/// * `Result<MatchingEngine, ConfigError>` - Configured matching engine or error
///
/// # Example
/// ```
/// use order_matching::prelude::*;
/// use std::sync::Arc;
///
/// let config = EngineConfig::equities();
/// let engine = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(engine.algorithm_name(), "PriceTime-Resting");
/// ```
pub fn create_from_config(
    config: EngineConfig,
    event_handler: Arc<dyn EventHandler>,
) -> Result<MatchingEngine, ConfigError> {
    // Validate configuration first
    config.validate()?;

    let algorithm = create_matching_algorithm(config.trade_price_policy);

    Ok(MatchingEngine::with_config(config, algorithm, event_handler))
}

/// Creates the matching algorithm for a trade price policy
fn create_matching_algorithm(policy: TradePricePolicy) -> Box<dyn MatchingAlgorithm> {
    Box::new(PriceTimePriority::new(policy))
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Fluent builder for matching engines
///
/// # Example
/// ```
/// use order_matching::prelude::*;
/// use std::sync::Arc;
///
/// let engine = MatchingEngineBuilder::new()
///     .trade_price_policy(TradePricePolicy::Midpoint)
///     .snapshot_depth(5)
///     .event_handler(Arc::new(LoggingEventHandler))
///     .build()
///     .unwrap();
/// assert_eq!(engine.config().snapshot_depth, 5);
/// ```
pub struct MatchingEngineBuilder {
    config: EngineConfig,
    event_handler: Option<Arc<dyn EventHandler>>,
}

impl MatchingEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            event_handler: None,
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    pub fn trade_price_policy(mut self, policy: TradePricePolicy) -> Self {
        self.config.trade_price_policy = policy;
        self
    }

    pub fn tick_size(mut self, tick: rust_decimal::Decimal) -> Self {
        self.config = self.config.with_tick_size(tick);
        self
    }

    pub fn lot_size(mut self, lot: rust_decimal::Decimal) -> Self {
        self.config = self.config.with_lot_size(lot);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_queue_capacity(capacity);
        self
    }

    pub fn snapshot_depth(mut self, depth: usize) -> Self {
        self.config = self.config.with_snapshot_depth(depth);
        self
    }

    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    pub fn build(self) -> Result<MatchingEngine, ConfigError> {
        self.config.validate()?;

        let algorithm = create_matching_algorithm(self.config.trade_price_policy);
        let event_handler = self
            .event_handler
            .unwrap_or_else(|| Arc::new(NoOpEventHandler) as Arc<dyn EventHandler>);

        Ok(MatchingEngine::with_config(self.config, algorithm, event_handler))
    }
}

impl Default for MatchingEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
