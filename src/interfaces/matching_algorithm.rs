// ============================================================================
// Matching Algorithm Interface
// Defines the contract for pluggable matching algorithms
// ============================================================================

use crate::domain::{OrderBook, TradeEvent};
use crate::numeric::Price;

pub(crate) mod sealed {
    /// Implemented only by the crate's own algorithms
    pub trait Sealed {}
}

/// Strategy pattern interface for matching algorithms
///
/// The trait is sealed: `match_book` needs the book's crate-private
/// mutators, so [`PriceTimePriority`](crate::engine::PriceTimePriority) is
/// the only implementation. Trade pricing is selected through
/// [`TradePricePolicy`](crate::domain::TradePricePolicy) instead.
///
/// ```compile_fail
/// use order_matching::prelude::*;
///
/// struct Custom;
///
/// impl MatchingAlgorithm for Custom {
///     fn match_book(&self, _book: &mut OrderBook) -> Vec<TradeEvent> {
///         Vec::new()
///     }
///
///     fn name(&self) -> &str {
///         "Custom"
///     }
/// }
/// ```
pub trait MatchingAlgorithm: sealed::Sealed + Send + Sync {
    /// Drain crossing orders from a book
    ///
    /// # Arguments
    /// * `book` - The book to match; filled orders are removed from it
    ///
    /// # Returns
    /// Trades in execution order. Empty when the book does not cross.
    fn match_book(&self, book: &mut OrderBook) -> Vec<TradeEvent>;

    /// Get the algorithm name for logging
    fn name(&self) -> &str;

    /// Check if a bid and an ask can trade
    fn prices_cross(&self, bid: Price, ask: Price) -> bool {
        bid >= ask
    }
}
