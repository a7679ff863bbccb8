// ============================================================================
// Event Handler Interface
// Defines the contract for handling order and trade events
// ============================================================================

use crate::domain::{OrderId, RejectReason, Side, TradeEvent};
use crate::numeric::{Price, Quantity};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the matching engine
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OrderEvent {
    /// Order validated and resting in its book
    OrderAccepted {
        order_id: OrderId,
        side: Side,
        symbol: Arc<str>,
        price: Price,
        quantity: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// Submission refused; the book is unchanged
    OrderRejected {
        side: Side,
        symbol: Arc<str>,
        reason: RejectReason,
        timestamp: DateTime<Utc>,
    },

    /// Best bid and best ask traded
    TradeExecuted {
        trade: TradeEvent,
        timestamp: DateTime<Utc>,
    },

    /// Order traded and still rests with reduced quantity
    OrderPartiallyFilled {
        order_id: OrderId,
        filled_quantity: Quantity,
        remaining_quantity: Quantity,
        timestamp: DateTime<Utc>,
    },

    /// Order fully filled and removed from its book
    OrderFilled {
        order_id: OrderId,
        total_filled: Quantity,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing matching engine events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an order event
    fn on_event(&self, event: OrderEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<OrderEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: OrderEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: OrderEvent) {
        match &event {
            OrderEvent::TradeExecuted { trade, .. } => tracing::info!("{}", trade),
            OrderEvent::OrderRejected { reason, symbol, .. } => {
                tracing::warn!(%symbol, "Order rejected: {}", reason)
            },
            _ => tracing::debug!("Matching engine event: {:?}", event),
        }
    }
}

/// Buffers every event in memory until drained
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<OrderEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events, oldest first
    pub fn drain(&self) -> Vec<OrderEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: OrderEvent) {
        self.events.lock().push(event);
    }

    fn on_events(&self, events: Vec<OrderEvent>) {
        self.events.lock().extend(events);
    }
}
