// ============================================================================
// Engine Module
// Contains the core matching engine business logic
// ============================================================================

mod matching_engine;
mod price_time;
mod shared;

#[cfg(feature = "async")]
mod actor;

pub mod factory;

pub use factory::{create_from_config, MatchingEngineBuilder};
pub use matching_engine::MatchingEngine;
pub use price_time::PriceTimePriority;
pub use shared::SharedMatchingEngine;

#[cfg(feature = "async")]
pub use actor::{EngineCommand, EngineHandle};
