use serde::{Deserialize, Serialize};

use crate::{InvalidAlphabetError, InvalidSymbolError, core::RandomSource};

/// One pickup type.
///
/// Symbols are 1-based and render as a single decimal digit, which keeps the
/// canonical key of a [`Sequence`](crate::Sequence) a plain digit string.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[display("{_0}")]
pub struct Symbol(u8);

impl Symbol {
    /// Creates a symbol from its 1-based value.
    ///
    /// Whether the symbol belongs to a given [`Alphabet`] is checked by the alphabet,
    /// see [`Alphabet::symbol`].
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in `1..=9`.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        assert!(
            value >= 1 && value <= Alphabet::MAX_SIZE,
            "symbol value must be a non-zero digit"
        );
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Symbol {
    type Error = InvalidSymbolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0 || value > Alphabet::MAX_SIZE {
            return Err(InvalidSymbolError::new(value, Alphabet::MAX_SIZE));
        }
        Ok(Self(value))
    }
}

impl From<Symbol> for u8 {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

/// The fixed set of symbols orders are built from: `1..=size`.
///
/// The size is bounded to `3..=9`. Repair excludes up to two neighbouring values and
/// must always have a candidate left, and keys are rendered one digit per symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alphabet {
    size: u8,
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::PANCAKES
    }
}

impl Alphabet {
    pub const MIN_SIZE: u8 = 3;
    pub const MAX_SIZE: u8 = 9;

    /// Three pancake kinds, the alphabet of the stock game.
    pub const PANCAKES: Self = Self { size: 3 };

    pub const fn new(size: u8) -> Result<Self, InvalidAlphabetError> {
        if size < Self::MIN_SIZE || size > Self::MAX_SIZE {
            return Err(InvalidAlphabetError::new(size));
        }
        Ok(Self { size })
    }

    #[must_use]
    pub const fn size(self) -> u8 {
        self.size
    }

    #[must_use]
    pub const fn contains(self, symbol: Symbol) -> bool {
        symbol.0 >= 1 && symbol.0 <= self.size
    }

    /// Looks up the symbol with the given 1-based value.
    pub const fn symbol(self, value: u8) -> Result<Symbol, InvalidSymbolError> {
        if value == 0 || value > self.size {
            return Err(InvalidSymbolError::new(value, self.size));
        }
        Ok(Symbol(value))
    }

    /// Returns `Ok(())` if `symbol` belongs to this alphabet.
    pub const fn check(self, symbol: Symbol) -> Result<(), InvalidSymbolError> {
        if self.contains(symbol) {
            Ok(())
        } else {
            Err(InvalidSymbolError::new(symbol.0, self.size))
        }
    }

    /// Iterates over all symbols in ascending order.
    pub fn symbols(self) -> impl Iterator<Item = Symbol> {
        (1..=self.size).map(Symbol)
    }

    /// Asserts that every symbol belongs to this alphabet.
    ///
    /// Operators call this on their inputs; a foreign symbol can only come from a bug.
    pub(crate) fn assert_all(self, symbols: &[Symbol]) {
        for &symbol in symbols {
            assert!(
                self.contains(symbol),
                "symbol {symbol} is outside the alphabet 1..={}",
                self.size
            );
        }
    }

    /// Draws a symbol uniformly from the whole alphabet.
    pub fn random_symbol<R>(self, rng: &mut R) -> Symbol
    where
        R: RandomSource + ?Sized,
    {
        let offset = rng.below(usize::from(self.size));
        Symbol(1 + u8::try_from(offset).expect("offset is below the alphabet size"))
    }

    /// Draws a symbol uniformly from the alphabet minus `excluded`.
    ///
    /// # Panics
    ///
    /// Panics if `excluded` covers the whole alphabet.
    pub fn random_symbol_excluding<R>(self, excluded: &[Symbol], rng: &mut R) -> Symbol
    where
        R: RandomSource + ?Sized,
    {
        let candidates = self
            .symbols()
            .filter(|symbol| !excluded.contains(symbol))
            .collect::<Vec<_>>();
        assert!(
            !candidates.is_empty(),
            "no symbol left after excluding {excluded:?}"
        );
        candidates[rng.below(candidates.len())]
    }
}
