// ============================================================================
// Price/Time Priority Matching Algorithm
// Drains crossing heads of a book until the best bid no longer meets the ask
// ============================================================================

use crate::domain::{OrderBook, Side, TradeEvent, TradePricePolicy};
use crate::interfaces::{sealed, MatchingAlgorithm};
use std::sync::Arc;

/// Price/Time Priority matching algorithm
///
/// Each step trades the head of the bid queue against the head of the ask
/// queue. Both queues are sorted best-first, so when the heads do not cross
/// no deeper pair can either and the pass stops.
///
/// # Example
/// ```text
/// Bids:  50 x 30 (A)          Asks: 40 x 100 (B)
///
/// Step 1: A crosses B, trade 30 @ 40 (ask price)
///         A is filled and unlinked, B rests with 70
/// Step 2: bid queue empty, stop
/// ```
pub struct PriceTimePriority {
    price_policy: TradePricePolicy,
}

impl PriceTimePriority {
    pub fn new(price_policy: TradePricePolicy) -> Self {
        Self { price_policy }
    }

    pub fn price_policy(&self) -> TradePricePolicy {
        self.price_policy
    }
}

impl Default for PriceTimePriority {
    fn default() -> Self {
        Self::new(TradePricePolicy::AskPrice)
    }
}

impl sealed::Sealed for PriceTimePriority {}

impl MatchingAlgorithm for PriceTimePriority {
    fn match_book(&self, book: &mut OrderBook) -> Vec<TradeEvent> {
        let mut trades = Vec::new();
        let symbol = Arc::clone(book.symbol());

        loop {
            let Some((bid, ask)) = book.heads_mut() else {
                break;
            };

            if !self.prices_cross(bid.price, ask.price) {
                break;
            }

            let quantity = bid.remaining_quantity().min(ask.remaining_quantity());
            let price = self.price_policy.trade_price(bid, ask);

            // quantity is the smaller remaining size, so neither fill can be refused
            let filled = bid.try_fill(quantity) && ask.try_fill(quantity);
            debug_assert!(filled, "head fill refused for {quantity} lots");

            let bid_done = bid.is_filled();
            let ask_done = ask.is_filled();

            let trade = TradeEvent::new(Arc::clone(&symbol), quantity, price, bid.view(), ask.view());
            tracing::trace!(
                symbol = %trade.symbol,
                buy = %trade.buy_order.order_id,
                sell = %trade.sell_order.order_id,
                "Trade {} @ {}",
                trade.quantity,
                trade.price
            );
            trades.push(trade);

            if bid_done {
                book.pop_best(Side::Buy);
            }
            if ask_done {
                book.pop_best(Side::Sell);
            }
        }

        trades
    }

    fn name(&self) -> &str {
        match self.price_policy {
            TradePricePolicy::AskPrice => "PriceTime-Ask",
            TradePricePolicy::BidPrice => "PriceTime-Bid",
            TradePricePolicy::RestingOrder => "PriceTime-Resting",
            TradePricePolicy::Midpoint => "PriceTime-Midpoint",
        }
    }
}
