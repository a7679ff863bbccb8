// ============================================================================
// Order Matching Library
// Limit order book with price-time priority matching
// ============================================================================

//! # Order Matching
//!
//! A single-threaded limit order book and matching engine.
//!
//! ## Features
//!
//! - **Price-ordered queues** per symbol and side, kept fully sorted
//!   (best price first, earlier arrival first within a price)
//! - **Explicit match passes**: submission only rests orders, so callers can
//!   batch submissions before calling `match_orders`
//! - **Configurable trade pricing** (ask, bid, resting order, midpoint)
//! - **Event handlers** for logging and audit of accepts, rejects and fills
//! - **Single-writer wrappers**: a mutex handle, and a tokio task behind the
//!   `async` feature
//!
//! ## Example
//!
//! ```rust
//! use order_matching::prelude::*;
//! use order_matching::numeric::{Price, Quantity};
//! use std::sync::Arc;
//!
//! let mut engine = MatchingEngine::new(
//!     Box::new(PriceTimePriority::new(TradePricePolicy::AskPrice)),
//!     Arc::new(NoOpEventHandler),
//! );
//!
//! engine
//!     .submit_order(Side::Buy, "TICKER1", Quantity::from_lots(30), Price::from_ticks(50))
//!     .unwrap();
//! engine
//!     .submit_order(Side::Sell, "TICKER1", Quantity::from_lots(100), Price::from_ticks(40))
//!     .unwrap();
//!
//! let trades = engine.match_orders();
//! assert_eq!(trades.len(), 1);
//! assert_eq!(trades[0].quantity, Quantity::from_lots(30));
//! assert_eq!(trades[0].price, Price::from_ticks(40));
//!
//! for order in engine.snapshot(Side::Sell) {
//!     println!("{order}");
//! }
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        ConfigError, EngineConfig, EngineError, Order, OrderBook, OrderBookSnapshot, OrderId,
        OrderState, OrderView, RejectReason, Side, TradeEvent, TradePricePolicy,
    };
    #[cfg(feature = "async")]
    pub use crate::engine::EngineHandle;
    pub use crate::engine::{
        create_from_config, MatchingEngine, MatchingEngineBuilder, PriceTimePriority,
        SharedMatchingEngine,
    };
    pub use crate::interfaces::{
        EventHandler, LoggingEventHandler, MatchingAlgorithm, NoOpEventHandler, OrderEvent,
        RecordingEventHandler,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use crate::numeric::{Price, Quantity};
    use std::sync::Arc;

    fn engine() -> MatchingEngine {
        MatchingEngine::new(
            Box::new(PriceTimePriority::default()),
            Arc::new(NoOpEventHandler),
        )
    }

    fn submit(
        engine: &mut MatchingEngine,
        side: Side,
        quantity: i64,
        price: i64,
    ) -> Result<OrderId, RejectReason> {
        engine.submit_order(
            side,
            "TICKER1",
            Quantity::from_lots(quantity),
            Price::from_ticks(price),
        )
    }

    fn listing(engine: &MatchingEngine, side: Side) -> Vec<(i64, i64)> {
        engine
            .snapshot(side)
            .map(|v| (v.limit_price.ticks(), v.remaining_quantity.lots()))
            .collect()
    }

    #[test]
    fn test_bids_sorted_best_first() {
        let mut engine = engine();
        submit(&mut engine, Side::Buy, 100, 50).unwrap();
        submit(&mut engine, Side::Buy, 50, 60).unwrap();

        assert_eq!(listing(&engine, Side::Buy), vec![(60, 50), (50, 100)]);
    }

    #[test]
    fn test_full_fill_empties_both_sides() {
        let mut engine = engine();
        submit(&mut engine, Side::Buy, 100, 50).unwrap();
        submit(&mut engine, Side::Sell, 100, 40).unwrap();

        let trades = engine.match_orders();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, Quantity::from_lots(100));
        assert_eq!(trades[0].price, Price::from_ticks(40));
        assert!(listing(&engine, Side::Buy).is_empty());
        assert!(listing(&engine, Side::Sell).is_empty());
    }

    #[test]
    fn test_partial_fill_leaves_ask_resting() {
        let mut engine = engine();
        submit(&mut engine, Side::Buy, 30, 50).unwrap();
        submit(&mut engine, Side::Sell, 100, 40).unwrap();

        let trades = engine.match_orders();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity, Quantity::from_lots(30));
        assert_eq!(trades[0].price, Price::from_ticks(40));
        assert!(listing(&engine, Side::Buy).is_empty());
        assert_eq!(listing(&engine, Side::Sell), vec![(40, 70)]);
    }

    #[test]
    fn test_non_crossing_orders_rest() {
        let mut engine = engine();
        submit(&mut engine, Side::Sell, 10, 60).unwrap();
        submit(&mut engine, Side::Buy, 10, 50).unwrap();

        assert!(engine.match_orders().is_empty());
        assert_eq!(listing(&engine, Side::Buy), vec![(50, 10)]);
        assert_eq!(listing(&engine, Side::Sell), vec![(60, 10)]);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut engine = engine();
        submit(&mut engine, Side::Sell, 10, 60).unwrap();

        assert_eq!(
            submit(&mut engine, Side::Buy, 0, 50),
            Err(RejectReason::InvalidQuantity)
        );
        assert_eq!(
            submit(&mut engine, Side::Buy, 10, -1),
            Err(RejectReason::InvalidPrice)
        );
        assert!(listing(&engine, Side::Buy).is_empty());
        assert_eq!(listing(&engine, Side::Sell), vec![(60, 10)]);
    }

    #[test]
    fn test_second_match_pass_is_empty() {
        let mut engine = engine();
        submit(&mut engine, Side::Buy, 30, 50).unwrap();
        submit(&mut engine, Side::Buy, 30, 45).unwrap();
        submit(&mut engine, Side::Sell, 40, 44).unwrap();
        submit(&mut engine, Side::Sell, 40, 48).unwrap();

        assert!(!engine.match_orders().is_empty());
        assert!(engine.match_orders().is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::prelude::*;
    use crate::numeric::{Price, Quantity};
    use proptest::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn order_strategy() -> impl Strategy<Value = (bool, u8, i64, i64)> {
        (any::<bool>(), 0u8..3, 1i64..200, 1i64..60)
    }

    fn policy_strategy() -> impl Strategy<Value = TradePricePolicy> {
        prop_oneof![
            Just(TradePricePolicy::AskPrice),
            Just(TradePricePolicy::BidPrice),
            Just(TradePricePolicy::RestingOrder),
            Just(TradePricePolicy::Midpoint),
        ]
    }

    fn populated(
        policy: TradePricePolicy,
        orders: &[(bool, u8, i64, i64)],
    ) -> (MatchingEngine, HashMap<OrderId, (Side, i64, i64)>) {
        let mut engine = MatchingEngine::new(
            Box::new(PriceTimePriority::new(policy)),
            Arc::new(NoOpEventHandler),
        );
        let mut submitted = HashMap::new();

        for (buy, symbol, quantity, price) in orders {
            let side = if *buy { Side::Buy } else { Side::Sell };
            let id = engine
                .submit_order(
                    side,
                    &format!("TICKER{symbol}"),
                    Quantity::from_lots(*quantity),
                    Price::from_ticks(*price),
                )
                .unwrap();
            submitted.insert(id, (side, *quantity, *price));
        }

        (engine, submitted)
    }

    proptest! {
        #[test]
        fn prop_queues_stay_sorted(orders in prop::collection::vec(order_strategy(), 0..80)) {
            let (engine, _) = populated(TradePricePolicy::AskPrice, &orders);

            for symbol in engine.symbols() {
                let book = engine.book(symbol).unwrap();
                prop_assert!(book.bids().is_sorted());
                prop_assert!(book.asks().is_sorted());
            }
        }

        #[test]
        fn prop_matching_is_sound(
            orders in prop::collection::vec(order_strategy(), 0..80),
            policy in policy_strategy(),
        ) {
            let (mut engine, submitted) = populated(policy, &orders);
            let trades = engine.match_orders();

            let mut filled: HashMap<OrderId, i64> = HashMap::new();
            for trade in &trades {
                let buy = trade.buy_order.limit_price;
                let sell = trade.sell_order.limit_price;

                // no spurious matches, price within the crossing pair
                prop_assert!(buy >= sell);
                prop_assert!(trade.price >= sell && trade.price <= buy);
                prop_assert_eq!(&trade.buy_order.symbol, &trade.sell_order.symbol);
                prop_assert!(trade.quantity.is_positive());

                *filled.entry(trade.buy_order.order_id).or_default() += trade.quantity.lots();
                *filled.entry(trade.sell_order.order_id).or_default() += trade.quantity.lots();
            }

            // conservation
            for (id, total) in &filled {
                let (_, original, _) = submitted[id];
                prop_assert!(*total <= original);
            }

            // termination: nothing left crossing
            for symbol in engine.symbols() {
                let book = engine.book(symbol).unwrap();
                prop_assert!(!book.is_crossed());
                prop_assert!(book.bids().is_sorted());
                prop_assert!(book.asks().is_sorted());
            }

            // resting quantity + fills == submitted quantity
            for side in [Side::Buy, Side::Sell] {
                for view in engine.snapshot(side) {
                    let (_, original, price) = submitted[&view.order_id];
                    let fills = filled.get(&view.order_id).copied().unwrap_or(0);
                    prop_assert_eq!(view.remaining_quantity.lots() + fills, original);
                    prop_assert_eq!(view.limit_price.ticks(), price);
                }
            }

            // idempotent empty match
            prop_assert!(engine.match_orders().is_empty());
        }
    }
}
