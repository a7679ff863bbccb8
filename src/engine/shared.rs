// ============================================================================
// Shared Matching Engine
// Mutex-serialised handle for synchronous multi-producer callers
// ============================================================================

use crate::domain::{OrderId, OrderView, RejectReason, Side, TradeEvent};
use crate::engine::MatchingEngine;
use crate::numeric::{Price, Quantity};
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle that serialises every call on one engine.
///
/// Each operation holds the lock for its whole duration, so submissions and
/// match passes from different threads are linearizable.
#[derive(Clone)]
pub struct SharedMatchingEngine {
    inner: Arc<Mutex<MatchingEngine>>,
}

impl SharedMatchingEngine {
    pub fn new(engine: MatchingEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn submit_order(
        &self,
        side: Side,
        symbol: &str,
        quantity: Quantity,
        price: Price,
    ) -> Result<OrderId, RejectReason> {
        self.inner.lock().submit_order(side, symbol, quantity, price)
    }

    pub fn match_orders(&self) -> Vec<TradeEvent> {
        self.inner.lock().match_orders()
    }

    /// Listing of one side, collected under the lock
    pub fn snapshot(&self, side: Side) -> Vec<OrderView> {
        self.inner.lock().snapshot(side).collect()
    }

    /// Run several operations under a single lock acquisition
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut MatchingEngine) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<MatchingEngine> for SharedMatchingEngine {
    fn from(engine: MatchingEngine) -> Self {
        Self::new(engine)
    }
}
