use std::{fmt, slice};

use serde::{Deserialize, Serialize};

use crate::core::Symbol;

/// An ordered list of symbols describing the steps of an order.
///
/// Generated sequences hold 1 to 6 symbols with no two adjacent symbols equal, but
/// any length is a valid value: crossover and mutation can produce an empty sequence
/// or one longer than the creation bounds, and repair only restores adjacency.
///
/// # Example
///
/// ```
/// use flapjack_engine::Sequence;
///
/// let sequence = Sequence::from_values([1, 2, 3]);
/// assert_eq!(sequence.key().as_str(), "123");
/// assert_eq!(sequence.to_string(), "1, 2, 3");
/// assert!(!sequence.has_adjacent_duplicates());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Symbol>);

impl Sequence {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a sequence from 1-based symbol values.
    ///
    /// # Panics
    ///
    /// Panics if a value is not a non-zero digit.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        values.into_iter().map(Symbol::new).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut Vec<Symbol> {
        &mut self.0
    }

    pub fn iter(&self) -> slice::Iter<'_, Symbol> {
        self.0.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<Symbol> {
        self.0.last().copied()
    }

    /// Returns the canonical identity of this sequence: its digits concatenated.
    #[must_use]
    pub fn key(&self) -> OrderKey {
        OrderKey(self.0.iter().map(ToString::to_string).collect())
    }

    /// Returns `true` if two neighbouring symbols are equal.
    #[must_use]
    pub fn has_adjacent_duplicates(&self) -> bool {
        self.0.windows(2).any(|pair| pair[0] == pair[1])
    }
}

impl From<Vec<Symbol>> for Sequence {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl FromIterator<Symbol> for Sequence {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Symbol;
    type IntoIter = slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// Canonical identity of a sequence, used to deduplicate performance records.
///
/// Two orders with equal sequences share one key regardless of when they were created.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
#[serde(transparent)]
#[display("{_0}")]
pub struct OrderKey(String);

impl OrderKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
