// ============================================================================
// Price-Ordered Queue
// Index-linked sorted sequence of orders for one side of a book
// ============================================================================

use std::iter::FusedIterator;

use super::{Order, Side};
use crate::numeric::{Price, Quantity};

/// Arena slot: an order plus the index of the next order in priority order
#[derive(Debug)]
struct Node {
    order: Order,
    next: Option<usize>,
}

/// Sorted queue of resting orders for one side.
///
/// Orders live in a dense arena and are chained through integer `next`
/// indices, so insertion never moves existing orders and removal only
/// releases a slot for reuse.
///
/// Priority order:
/// - BUY: descending price, earlier arrival first within a price
/// - SELL: ascending price, earlier arrival first within a price
///
/// The chain is fully sorted after every insertion and removal, so the head
/// is always the best-priced, longest-resident order.
#[derive(Debug)]
pub struct PriceOrderedQueue {
    side: Side,
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<usize>,
    len: usize,
}

impl PriceOrderedQueue {
    pub fn new(side: Side) -> Self {
        Self::with_capacity(side, 0)
    }

    pub fn with_capacity(side: Side, capacity: usize) -> Self {
        Self {
            side,
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            len: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `incoming` strictly beats `resident` for this side
    #[inline]
    fn outranks(&self, incoming: Price, resident: Price) -> bool {
        match self.side {
            Side::Buy => incoming > resident,
            Side::Sell => incoming < resident,
        }
    }

    /// Insert an order in priority position.
    ///
    /// The order is linked in front of the first resident order it strictly
    /// outranks, or at the tail. O(n) in queue length.
    pub fn insert(&mut self, order: Order) {
        debug_assert_eq!(order.side, self.side, "order inserted on wrong side");

        let price = order.price;
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            let node = self.node(idx);
            if self.outranks(price, node.order.price) {
                break;
            }
            prev = Some(idx);
            cursor = node.next;
        }

        let idx = self.alloc(Node {
            order,
            next: cursor,
        });

        match prev {
            Some(p) => self.node_mut(p).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.len += 1;
    }

    /// Best order on this side
    pub fn peek(&self) -> Option<&Order> {
        self.head.map(|idx| &self.node(idx).order)
    }

    /// Mutable access to the head, for fills. The price key must not change.
    pub(crate) fn peek_mut(&mut self) -> Option<&mut Order> {
        let idx = self.head?;
        Some(&mut self.node_mut(idx).order)
    }

    /// Unlink and return the head order
    pub(crate) fn pop_front(&mut self) -> Option<Order> {
        let idx = self.head?;
        let node = self.slots[idx].take()?;
        self.head = node.next;
        self.free.push(idx);
        self.len -= 1;
        Some(node.order)
    }

    /// Lazy traversal in priority order. Cloning the iterator, or calling
    /// `iter` again, restarts from the current head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            queue: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Aggregated price levels, best first: `(price, total remaining)`
    pub fn depth(&self, levels: usize) -> Vec<(Price, Quantity)> {
        let mut depth: Vec<(Price, Quantity)> = Vec::new();

        for order in self.iter() {
            let remaining = order.remaining_quantity();
            match depth.last_mut() {
                Some((price, total)) if *price == order.price => {
                    *total = total.checked_add(remaining).unwrap_or(Quantity::MAX);
                },
                _ => {
                    if depth.len() == levels {
                        break;
                    }
                    depth.push((order.price, remaining));
                },
            }
        }

        depth
    }

    /// Total remaining quantity across all resting orders
    pub fn total_quantity(&self) -> Quantity {
        self.iter().fold(Quantity::ZERO, |acc, order| {
            acc.checked_add(order.remaining_quantity())
                .unwrap_or(Quantity::MAX)
        })
    }

    /// Check the priority ordering of the whole chain
    pub fn is_sorted(&self) -> bool {
        let mut orders = self.iter();
        let Some(mut prev) = orders.next() else {
            return true;
        };

        for order in orders {
            if self.outranks(order.price, prev.price)
                || (order.price == prev.price && order.id < prev.id)
            {
                return false;
            }
            prev = order;
        }
        true
    }

    // ========================================================================
    // Arena management
    // ========================================================================

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            },
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            },
        }
    }

    // Linked indices always point at occupied slots.
    #[inline]
    fn node(&self, idx: usize) -> &Node {
        match &self.slots[idx] {
            Some(node) => node,
            None => unreachable!("linked slot {idx} is vacant"),
        }
    }

    #[inline]
    fn node_mut(&mut self, idx: usize) -> &mut Node {
        match &mut self.slots[idx] {
            Some(node) => node,
            None => unreachable!("linked slot {idx} is vacant"),
        }
    }
}

impl<'a> IntoIterator for &'a PriceOrderedQueue {
    type Item = &'a Order;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Priority-order iterator over a [`PriceOrderedQueue`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    queue: &'a PriceOrderedQueue,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = self.queue.node(idx);
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.order)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderId;
    use std::sync::Arc;

    fn order(seq: u64, side: Side, price: i64, quantity: i64) -> Order {
        Order::new(
            OrderId::from_sequence(seq),
            side,
            Arc::from("TICKER0"),
            Price::from_ticks(price),
            Quantity::from_lots(quantity),
        )
    }

    fn prices(queue: &PriceOrderedQueue) -> Vec<i64> {
        queue.iter().map(|o| o.price.ticks()).collect()
    }

    fn ids(queue: &PriceOrderedQueue) -> Vec<u64> {
        queue.iter().map(|o| o.id.sequence()).collect()
    }

    #[test]
    fn test_buy_queue_descending() {
        let mut queue = PriceOrderedQueue::new(Side::Buy);
        queue.insert(order(1, Side::Buy, 50, 100));
        queue.insert(order(2, Side::Buy, 60, 50));
        queue.insert(order(3, Side::Buy, 55, 10));
        queue.insert(order(4, Side::Buy, 40, 10));

        assert_eq!(prices(&queue), vec![60, 55, 50, 40]);
        assert_eq!(queue.peek().map(|o| o.id.sequence()), Some(2));
        assert!(queue.is_sorted());
    }

    #[test]
    fn test_sell_queue_ascending() {
        let mut queue = PriceOrderedQueue::new(Side::Sell);
        queue.insert(order(1, Side::Sell, 50, 100));
        queue.insert(order(2, Side::Sell, 40, 50));
        queue.insert(order(3, Side::Sell, 45, 10));
        queue.insert(order(4, Side::Sell, 70, 10));

        assert_eq!(prices(&queue), vec![40, 45, 50, 70]);
        assert!(queue.is_sorted());
    }

    #[test]
    fn test_equal_prices_keep_arrival_order() {
        let mut queue = PriceOrderedQueue::new(Side::Buy);
        queue.insert(order(1, Side::Buy, 50, 1));
        queue.insert(order(2, Side::Buy, 50, 1));
        queue.insert(order(3, Side::Buy, 60, 1));
        queue.insert(order(4, Side::Buy, 50, 1));

        assert_eq!(ids(&queue), vec![3, 1, 2, 4]);
    }

    #[test]
    fn test_pop_front_reuses_slots() {
        let mut queue = PriceOrderedQueue::new(Side::Sell);
        queue.insert(order(1, Side::Sell, 10, 1));
        queue.insert(order(2, Side::Sell, 20, 1));

        let popped = queue.pop_front().unwrap();
        assert_eq!(popped.id.sequence(), 1);
        assert_eq!(queue.len(), 1);

        queue.insert(order(3, Side::Sell, 5, 1));
        assert_eq!(queue.slots.len(), 2);
        assert_eq!(ids(&queue), vec![3, 2]);

        queue.pop_front();
        queue.pop_front();
        assert!(queue.is_empty());
        assert!(queue.pop_front().is_none());
        assert!(queue.peek().is_none());
    }

    #[test]
    fn test_iterator_is_restartable() {
        let mut queue = PriceOrderedQueue::new(Side::Buy);
        queue.insert(order(1, Side::Buy, 50, 1));
        queue.insert(order(2, Side::Buy, 60, 1));

        let mut iter = queue.iter();
        let restart = iter.clone();
        assert_eq!(iter.len(), 2);
        iter.next();
        assert_eq!(iter.len(), 1);
        assert_eq!(restart.count(), 2);
        assert_eq!(queue.iter().count(), 2);
    }

    #[test]
    fn test_depth_aggregates_levels() {
        let mut queue = PriceOrderedQueue::new(Side::Sell);
        queue.insert(order(1, Side::Sell, 40, 10));
        queue.insert(order(2, Side::Sell, 40, 5));
        queue.insert(order(3, Side::Sell, 41, 7));
        queue.insert(order(4, Side::Sell, 42, 1));

        assert_eq!(
            queue.depth(2),
            vec![
                (Price::from_ticks(40), Quantity::from_lots(15)),
                (Price::from_ticks(41), Quantity::from_lots(7)),
            ]
        );
        assert_eq!(queue.total_quantity(), Quantity::from_lots(23));
    }

    #[test]
    fn test_peek_mut_fill_keeps_position() {
        let mut queue = PriceOrderedQueue::new(Side::Buy);
        queue.insert(order(1, Side::Buy, 60, 10));
        queue.insert(order(2, Side::Buy, 50, 10));

        assert!(queue.peek_mut().unwrap().try_fill(Quantity::from_lots(4)));
        let head = queue.peek().unwrap();
        assert_eq!(head.id.sequence(), 1);
        assert_eq!(head.remaining_quantity(), Quantity::from_lots(6));
    }

    mod properties {
        use super::*;
        use quickcheck::quickcheck;

        quickcheck! {
            fn prop_any_insertion_sequence_stays_sorted(prices: Vec<u16>, buy: bool) -> bool {
                let side = if buy { Side::Buy } else { Side::Sell };
                let mut queue = PriceOrderedQueue::new(side);
                for (seq, price) in prices.iter().enumerate() {
                    queue.insert(order(seq as u64, side, i64::from(*price) + 1, 1));
                }
                queue.is_sorted() && queue.len() == prices.len()
            }
        }
    }
}
