// ============================================================================
// Matching Engine
// Core business logic for order submission and matching
// ============================================================================

use crate::domain::{
    EngineConfig, Order, OrderBook, OrderBookSnapshot, OrderId, OrderView, RejectReason, Side,
    TradeEvent,
};
use crate::interfaces::{EventHandler, MatchingAlgorithm, OrderEvent};
use crate::numeric::{Price, Quantity};
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Single-threaded matching engine with one book per symbol.
///
/// Submission only rests orders; crossing orders trade when
/// [`MatchingEngine::match_orders`] is called, so callers can batch several
/// submissions before matching. The engine is not internally synchronized:
/// wrap it in [`SharedMatchingEngine`](crate::engine::SharedMatchingEngine)
/// or an [`EngineHandle`](crate::engine) task for multi-producer use.
pub struct MatchingEngine {
    /// Books keyed by symbol, iterated in symbol order
    books: BTreeMap<Arc<str>, OrderBook>,

    /// Pluggable matching algorithm
    algorithm: Box<dyn MatchingAlgorithm>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,

    /// Next acceptance sequence number
    next_sequence: u64,

    config: EngineConfig,
}

impl MatchingEngine {
    /// Create a new matching engine with default configuration
    pub fn new(algorithm: Box<dyn MatchingAlgorithm>, event_handler: Arc<dyn EventHandler>) -> Self {
        Self::with_config(EngineConfig::default(), algorithm, event_handler)
    }

    /// Create a new matching engine from an already validated configuration
    pub fn with_config(
        config: EngineConfig,
        algorithm: Box<dyn MatchingAlgorithm>,
        event_handler: Arc<dyn EventHandler>,
    ) -> Self {
        Self {
            books: BTreeMap::new(),
            algorithm,
            event_handler,
            next_sequence: 1,
            config,
        }
    }

    /// Submit a limit order
    ///
    /// Validates the order and rests it at its priority position. No trade
    /// is attempted. A rejected order leaves every book unchanged.
    #[instrument(level = "debug", skip(self))]
    pub fn submit_order(
        &mut self,
        side: Side,
        symbol: &str,
        quantity: Quantity,
        price: Price,
    ) -> Result<OrderId, RejectReason> {
        if let Err(reason) = Self::validate_order(quantity, price) {
            debug!(%reason, "Order rejected");
            self.event_handler.on_event(OrderEvent::OrderRejected {
                side,
                symbol: Arc::from(symbol),
                reason,
                timestamp: Utc::now(),
            });
            return Err(reason);
        }

        let order_id = OrderId::from_sequence(self.next_sequence);
        self.next_sequence += 1;

        // Share one allocation per symbol between the book key and its orders
        let symbol: Arc<str> = match self.books.get_key_value(symbol) {
            Some((key, _)) => Arc::clone(key),
            None => Arc::from(symbol),
        };

        let order = Order::new(order_id, side, Arc::clone(&symbol), price, quantity);
        let event = OrderEvent::OrderAccepted {
            order_id,
            side,
            symbol: Arc::clone(&symbol),
            price,
            quantity,
            timestamp: order.timestamp,
        };

        let capacity = self.config.queue_capacity;
        self.books
            .entry(Arc::clone(&symbol))
            .or_insert_with(|| OrderBook::with_capacity(symbol, capacity))
            .insert(order);

        debug!(%order_id, "Order accepted");
        self.event_handler.on_event(event);

        Ok(order_id)
    }

    /// Submit a limit order expressed in decimal units
    ///
    /// Price and quantity are converted with the configured tick and lot
    /// sizes. Values that are not whole, positive multiples of their unit are
    /// rejected as `InvalidPrice` / `InvalidQuantity`.
    pub fn submit_decimal_order(
        &mut self,
        side: Side,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderId, RejectReason> {
        // Quantity is judged before price, as in `validate_order`
        let converted = Quantity::from_decimal(quantity, self.config.lot_size)
            .ok()
            .filter(|quantity| quantity.is_positive())
            .ok_or(RejectReason::InvalidQuantity)
            .and_then(|quantity| {
                Price::from_decimal(price, self.config.tick_size)
                    .map(|price| (quantity, price))
                    .map_err(|_| RejectReason::InvalidPrice)
            });

        match converted {
            Ok((quantity, price)) => self.submit_order(side, symbol, quantity, price),
            Err(reason) => {
                self.event_handler.on_event(OrderEvent::OrderRejected {
                    side,
                    symbol: Arc::from(symbol),
                    reason,
                    timestamp: Utc::now(),
                });
                Err(reason)
            },
        }
    }

    /// Match every book until no best bid meets its best ask
    ///
    /// Never fails: books that do not cross produce no trades. Books
    /// emptied by matching are dropped.
    pub fn match_orders(&mut self) -> Vec<TradeEvent> {
        let mut trades = Vec::new();

        for book in self.books.values_mut() {
            trades.extend(self.algorithm.match_book(book));
        }
        self.books.retain(|_, book| !book.is_empty());

        if !trades.is_empty() {
            debug!(
                trades = trades.len(),
                algorithm = self.algorithm.name(),
                "Match pass complete"
            );
            self.event_handler.on_events(Self::trade_events(&trades));
        }

        trades
    }

    /// Lazy listing of one side of every book: symbols in order, each
    /// book's orders in priority order
    pub fn snapshot(&self, side: Side) -> impl Iterator<Item = OrderView> + Clone + '_ {
        self.books.values().flat_map(move |book| book.snapshot(side))
    }

    /// Book for one symbol, if any orders rest under it
    pub fn book(&self, symbol: &str) -> Option<&OrderBook> {
        self.books.get(symbol)
    }

    /// Aggregated depth for one symbol; `depth` defaults to the configured value
    pub fn get_snapshot(&self, symbol: &str, depth: Option<usize>) -> OrderBookSnapshot {
        let depth = depth.unwrap_or(self.config.snapshot_depth);
        match self.books.get(symbol) {
            Some(book) => book.depth_snapshot(depth),
            None => OrderBookSnapshot::new(symbol.to_string()),
        }
    }

    /// Symbols with resting orders
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.books.keys().map(|symbol| &**symbol)
    }

    /// Number of resting orders across all books
    pub fn order_count(&self) -> usize {
        self.books.values().map(OrderBook::len).sum()
    }

    pub fn algorithm_name(&self) -> &str {
        self.algorithm.name()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn validate_order(quantity: Quantity, price: Price) -> Result<(), RejectReason> {
        if !quantity.is_positive() {
            return Err(RejectReason::InvalidQuantity);
        }

        if !price.is_positive() {
            return Err(RejectReason::InvalidPrice);
        }

        Ok(())
    }

    fn trade_events(trades: &[TradeEvent]) -> Vec<OrderEvent> {
        let mut events = Vec::with_capacity(trades.len() * 3);

        for trade in trades {
            events.push(OrderEvent::TradeExecuted {
                trade: trade.clone(),
                timestamp: trade.timestamp,
            });

            for order in [&trade.buy_order, &trade.sell_order] {
                let filled = Quantity::from_lots(
                    order.original_quantity.lots() - order.remaining_quantity.lots(),
                );
                if order.remaining_quantity.is_zero() {
                    events.push(OrderEvent::OrderFilled {
                        order_id: order.order_id,
                        total_filled: filled,
                        timestamp: trade.timestamp,
                    });
                } else {
                    events.push(OrderEvent::OrderPartiallyFilled {
                        order_id: order.order_id,
                        filled_quantity: filled,
                        remaining_quantity: order.remaining_quantity,
                        timestamp: trade.timestamp,
                    });
                }
            }
        }

        events
    }
}
