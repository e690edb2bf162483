//! Adaptive order generation for the flapjack minigame.
//!
//! The player is shown a queue of *orders* (short symbol sequences) and reproduces
//! each one by walking over pickup tiles. This crate holds everything below the
//! presentation layer:
//!
//! - [`core`] - value types: [`Symbol`], [`Alphabet`], [`Sequence`], [`Order`],
//!   [`Attempt`], [`Timestamp`] and the injectable [`RandomSource`]
//! - [`engine`] - the evolutionary order generator, performance records, the order
//!   board, the scoreboard and the [`GameSession`] that owns them
//!
//! Nothing here reads a clock or ambient randomness: timestamps are passed in by the
//! host and every random draw goes through a [`RandomSource`].

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("symbol {value} is outside the alphabet 1..={size}")]
pub struct InvalidSymbolError {
    value: u8,
    size: u8,
}

impl InvalidSymbolError {
    pub(crate) const fn new(value: u8, size: u8) -> Self {
        Self { value, size }
    }

    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display(
    "alphabet size {size} is not supported (expected {}..={})",
    Alphabet::MIN_SIZE,
    Alphabet::MAX_SIZE
)]
pub struct InvalidAlphabetError {
    size: u8,
}

impl InvalidAlphabetError {
    pub(crate) const fn new(size: u8) -> Self {
        Self { size }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no pending order on the board")]
pub struct EmptyBoardError;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("invalid alphabet: {_0}")]
    Alphabet(InvalidAlphabetError),
    #[display("invalid opening order #{index}: {source}")]
    OpeningOrder {
        index: usize,
        source: InvalidSymbolError,
    },
    #[display("mutation probability {probability} is outside [0, 1]")]
    MutationProbability { probability: f64 },
    #[display("difficulty pool must hold at least one record")]
    EmptyDifficultyPool,
    #[display("invalid order length bounds {min}..={max}")]
    LengthBounds { min: usize, max: usize },
}
