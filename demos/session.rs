// ============================================================================
// Session Example
// Submit a batch of orders, match once, and print the books around it
// ============================================================================

use order_matching::numeric::{Price, Quantity};
use order_matching::prelude::*;
use std::sync::Arc;

fn print_books(engine: &MatchingEngine) {
    for side in [Side::Buy, Side::Sell] {
        println!("{side} Orders:");
        let mut orders = engine.snapshot(side).peekable();
        if orders.peek().is_none() {
            println!("  No orders available.");
        }
        for order in orders {
            println!("  {order}");
        }
    }
}

fn main() {
    println!("=== Order Matching Session ===\n");

    let mut engine = MatchingEngineBuilder::new()
        .trade_price_policy(TradePricePolicy::AskPrice)
        .event_handler(Arc::new(LoggingEventHandler))
        .build()
        .expect("default configuration is valid");

    let orders = [
        (Side::Buy, "TICKER1", 100, 50),
        (Side::Buy, "TICKER1", 50, 60),
        (Side::Sell, "TICKER1", 120, 55),
        (Side::Sell, "TICKER2", 30, 210),
        (Side::Buy, "TICKER2", 45, 215),
        (Side::Sell, "TICKER3", 10, 60),
        (Side::Buy, "TICKER3", 10, 50),
        (Side::Buy, "TICKER4", 0, 99),
    ];

    for (side, symbol, quantity, price) in orders {
        let result = engine.submit_order(
            side,
            symbol,
            Quantity::from_lots(quantity),
            Price::from_ticks(price),
        );
        if let Err(reason) = result {
            println!("{side} {symbol} {quantity} @ {price} rejected: {reason}");
        }
    }

    println!("\n== Orders Before Matching ==");
    print_books(&engine);

    println!("\n== Matching Orders ==");
    for trade in engine.match_orders() {
        println!("  {trade}");
    }

    println!("\n== Orders After Matching ==");
    print_books(&engine);

    let snapshot = engine.get_snapshot("TICKER1", None);
    println!("\nTICKER1 spread: {:?}", snapshot.spread);
    println!("TICKER1 mid price: {:?}", snapshot.mid_price);
}
