// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod errors;
pub mod order;
pub mod order_book;
pub mod price_queue;
pub mod trade;

pub use config::{EngineConfig, TradePricePolicy};
pub use errors::{ConfigError, EngineError, RejectReason};
pub use order::{Order, OrderId, OrderView, Side};
pub use order_book::{OrderBook, OrderBookSnapshot, OrderViews};
pub use price_queue::PriceOrderedQueue;
pub use trade::TradeEvent;

// Re-export state machine
pub use order::state::OrderState;
