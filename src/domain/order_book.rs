// ============================================================================
// Order Book Domain Model
// ============================================================================

use rust_decimal::Decimal;
use std::sync::Arc;

use super::price_queue::{self, PriceOrderedQueue};
use super::{Order, OrderView, Side};
use crate::numeric::{Price, Quantity};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Order Book
// ============================================================================

/// Bid and ask queues for a single symbol.
///
/// The book is the only mutator of its queues; callers get read access
/// through [`OrderBook::snapshot`] and the best-price accessors.
#[derive(Debug)]
pub struct OrderBook {
    symbol: Arc<str>,
    bids: PriceOrderedQueue,
    asks: PriceOrderedQueue,
}

impl OrderBook {
    pub fn new(symbol: Arc<str>) -> Self {
        Self::with_capacity(symbol, 0)
    }

    pub fn with_capacity(symbol: Arc<str>, capacity: usize) -> Self {
        Self {
            symbol,
            bids: PriceOrderedQueue::with_capacity(Side::Buy, capacity),
            asks: PriceOrderedQueue::with_capacity(Side::Sell, capacity),
        }
    }

    pub fn symbol(&self) -> &Arc<str> {
        &self.symbol
    }

    pub fn side(&self, side: Side) -> &PriceOrderedQueue {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub fn bids(&self) -> &PriceOrderedQueue {
        &self.bids
    }

    pub fn asks(&self) -> &PriceOrderedQueue {
        &self.asks
    }

    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Rest an already validated order on its side
    pub(crate) fn insert(&mut self, order: Order) {
        debug_assert_eq!(&*order.symbol, &*self.symbol);
        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
    }

    pub fn best_bid(&self) -> Option<&Order> {
        self.bids.peek()
    }

    pub fn best_ask(&self) -> Option<&Order> {
        self.asks.peek()
    }

    /// Spread in ticks (ask - bid). Negative while the book is crossed.
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => ask.price.checked_sub(bid.price).ok(),
            _ => None,
        }
    }

    /// True if the heads cross, i.e. a match pass would trade
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }

    /// Mutable access to both heads at once, for the matching loop
    pub(crate) fn heads_mut(&mut self) -> Option<(&mut Order, &mut Order)> {
        match (self.bids.peek_mut(), self.asks.peek_mut()) {
            (Some(bid), Some(ask)) => Some((bid, ask)),
            _ => None,
        }
    }

    /// Unlink the head of one side
    pub(crate) fn pop_best(&mut self, side: Side) -> Option<Order> {
        match side {
            Side::Buy => self.bids.pop_front(),
            Side::Sell => self.asks.pop_front(),
        }
    }

    /// Lazy, restartable listing of one side in priority order
    pub fn snapshot(&self, side: Side) -> OrderViews<'_> {
        OrderViews {
            inner: self.side(side).iter(),
        }
    }

    /// Aggregated top-of-book view, `depth` levels per side
    pub fn depth_snapshot(&self, depth: usize) -> OrderBookSnapshot {
        OrderBookSnapshot::with_depth(
            self.symbol.to_string(),
            self.bids.depth(depth),
            self.asks.depth(depth),
        )
    }
}

/// Iterator of [`OrderView`]s over one side of a book
#[derive(Debug, Clone)]
pub struct OrderViews<'a> {
    inner: price_queue::Iter<'a>,
}

impl Iterator for OrderViews<'_> {
    type Item = OrderView;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(OrderView::from)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for OrderViews<'_> {}

impl std::iter::FusedIterator for OrderViews<'_> {}

// ============================================================================
// Order Book Snapshot
// ============================================================================

/// Immutable snapshot of aggregated book levels
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderBookSnapshot {
    pub symbol: String,
    /// Bid levels (price, quantity), best first
    pub bids: Vec<(Price, Quantity)>,
    /// Ask levels (price, quantity), best first
    pub asks: Vec<(Price, Quantity)>,
    /// Current spread in ticks (ask - bid)
    pub spread: Option<Price>,
    /// Mid price in ticks; may fall on a half tick
    pub mid_price: Option<Decimal>,
}

impl OrderBookSnapshot {
    pub fn new(symbol: String) -> Self {
        Self {
            symbol,
            bids: Vec::new(),
            asks: Vec::new(),
            spread: None,
            mid_price: None,
        }
    }

    pub fn with_depth(
        symbol: String,
        bids: Vec<(Price, Quantity)>,
        asks: Vec<(Price, Quantity)>,
    ) -> Self {
        let (spread, mid_price) = match (bids.first(), asks.first()) {
            (Some((bid, _)), Some((ask, _))) => (
                ask.checked_sub(*bid).ok(),
                Some((Decimal::from(bid.ticks()) + Decimal::from(ask.ticks())) / Decimal::from(2)),
            ),
            _ => (None, None),
        };

        Self {
            symbol,
            bids,
            asks,
            spread,
            mid_price,
        }
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.bids.first().map(|(price, _)| *price)
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.asks.first().map(|(price, _)| *price)
    }

    pub fn total_bid_quantity(&self) -> Quantity {
        Self::total(&self.bids)
    }

    pub fn total_ask_quantity(&self) -> Quantity {
        Self::total(&self.asks)
    }

    fn total(levels: &[(Price, Quantity)]) -> Quantity {
        levels.iter().fold(Quantity::ZERO, |acc, (_, qty)| {
            acc.checked_add(*qty).unwrap_or(Quantity::MAX)
        })
    }
}
