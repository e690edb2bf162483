use std::collections::VecDeque;

use crate::{EmptyBoardError, core::Order};

/// The queue of pending orders shown to the player.
///
/// Orders are served first in, first out: the player always works on [`front`].
///
/// [`front`]: OrderBoard::front
///
/// # Example
///
/// ```
/// use flapjack_engine::{Order, OrderBoard, Sequence, Timestamp};
///
/// let mut board = OrderBoard::new();
/// board.push(Order::new(Timestamp::from_millis(0), Sequence::from_values([1, 2])));
/// board.push(Order::new(Timestamp::from_millis(5), Sequence::from_values([3])));
///
/// let done = board.complete().unwrap();
/// assert_eq!(done.sequence().to_string(), "1, 2");
/// assert_eq!(board.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderBoard {
    orders: VecDeque<Order>,
}

impl OrderBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, order: Order) {
        self.orders.push_back(order);
    }

    /// Removes and returns the front order.
    pub fn complete(&mut self) -> Result<Order, EmptyBoardError> {
        self.orders.pop_front().ok_or(EmptyBoardError)
    }

    #[must_use]
    pub fn front(&self) -> Option<&Order> {
        self.orders.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> + '_ {
        self.orders.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Sequence, Timestamp};

    fn order(millis: u64, values: &[u8]) -> Order {
        Order::new(
            Timestamp::from_millis(millis),
            Sequence::from_values(values.iter().copied()),
        )
    }

    #[test]
    fn test_orders_complete_in_push_order() {
        let mut board = OrderBoard::new();
        board.push(order(1, &[1, 2, 3]));
        board.push(order(2, &[2, 3, 2]));
        board.push(order(3, &[1]));

        assert_eq!(board.front(), Some(&order(1, &[1, 2, 3])));
        assert_eq!(board.complete(), Ok(order(1, &[1, 2, 3])));
        assert_eq!(board.complete(), Ok(order(2, &[2, 3, 2])));
        assert_eq!(board.iter().collect::<Vec<_>>(), [&order(3, &[1])]);
    }

    #[test]
    fn test_complete_on_empty_board_fails() {
        let mut board = OrderBoard::new();
        assert!(board.is_empty());
        assert_eq!(board.complete(), Err(EmptyBoardError));
        assert_eq!(board.front(), None);
    }
}
