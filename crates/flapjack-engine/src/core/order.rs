use serde::Serialize;

use crate::core::{Attempt, OrderKey, Sequence, Timestamp};

/// An immutable request shown to the player: a sequence plus the time it was created.
///
/// Identity for performance tracking is the sequence alone (see [`Order::key`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    created_at: Timestamp,
    sequence: Sequence,
}

impl Order {
    #[must_use]
    pub const fn new(created_at: Timestamp, sequence: Sequence) -> Self {
        Self {
            created_at,
            sequence,
        }
    }

    #[must_use]
    pub const fn created_at(&self) -> Timestamp {
        self.created_at
    }

    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub fn key(&self) -> OrderKey {
        self.sequence.key()
    }

    /// Returns `true` if the attempt picked exactly this order's symbols, in order.
    ///
    /// An empty order is matched only by an empty attempt.
    #[must_use]
    pub fn is_matched_by(&self, attempt: &Attempt) -> bool {
        attempt.matches(&self.sequence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Symbol;

    #[test]
    fn test_key_ignores_creation_time() {
        let a = Order::new(Timestamp::from_millis(1), Sequence::from_values([1, 2]));
        let b = Order::new(Timestamp::from_millis(99), Sequence::from_values([1, 2]));
        assert_ne!(a, b);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_match_requires_same_symbols_in_same_order() {
        let order = Order::new(Timestamp::default(), Sequence::from_values([1, 2, 3]));

        let mut attempt = Attempt::new(Timestamp::default());
        for value in [1, 2, 3] {
            attempt.pick(Symbol::new(value));
        }
        assert!(order.is_matched_by(&attempt));

        let mut reversed = Attempt::new(Timestamp::default());
        for value in [3, 2, 1] {
            reversed.pick(Symbol::new(value));
        }
        assert!(!order.is_matched_by(&reversed));

        let mut short = Attempt::new(Timestamp::default());
        short.pick(Symbol::new(1));
        assert!(!order.is_matched_by(&short));
    }

    #[test]
    fn test_empty_order_matches_only_empty_attempt() {
        let order = Order::new(Timestamp::default(), Sequence::new());
        let empty = Attempt::new(Timestamp::default());
        assert!(order.is_matched_by(&empty));

        let mut picked = Attempt::new(Timestamp::default());
        picked.pick(Symbol::new(2));
        assert!(!order.is_matched_by(&picked));
    }
}
