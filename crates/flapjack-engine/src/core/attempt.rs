use serde::Serialize;

use crate::core::{Sequence, Symbol, Timestamp};

/// What a pickup did to the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum PickOutcome {
    /// The symbol was appended.
    Pushed,
    /// The symbol equalled the last pick, which was taken back (counted as a miss).
    Popped,
}

/// The player's transcript for the order at the front of the board.
///
/// A fresh attempt is started for every order and discarded once the order resolves.
///
/// # Pickup Rule
///
/// Walking onto a pickup equal to the last picked symbol takes that symbol back and
/// counts a miss; any other pickup is appended. A transcript built only through
/// [`Attempt::pick`] therefore never holds two equal adjacent symbols.
///
/// ```
/// use flapjack_engine::{Attempt, Symbol, Timestamp};
///
/// let mut attempt = Attempt::new(Timestamp::from_millis(0));
/// attempt.pick(Symbol::new(1));
/// attempt.pick(Symbol::new(2));
/// attempt.pick(Symbol::new(2)); // steps back over the same pickup
///
/// assert_eq!(attempt.picks().to_string(), "1");
/// assert_eq!(attempt.misses(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attempt {
    started_at: Timestamp,
    picks: Sequence,
    moves: usize,
    misses: usize,
}

impl Attempt {
    #[must_use]
    pub const fn new(started_at: Timestamp) -> Self {
        Self {
            started_at,
            picks: Sequence::new(),
            moves: 0,
            misses: 0,
        }
    }

    #[must_use]
    pub const fn started_at(&self) -> Timestamp {
        self.started_at
    }

    #[must_use]
    pub const fn picks(&self) -> &Sequence {
        &self.picks
    }

    #[must_use]
    pub const fn moves(&self) -> usize {
        self.moves
    }

    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Applies a pickup, see [Pickup Rule](Self#pickup-rule).
    pub fn pick(&mut self, symbol: Symbol) -> PickOutcome {
        if self.picks.last() == Some(symbol) {
            self.pop();
            PickOutcome::Popped
        } else {
            self.push(symbol);
            PickOutcome::Pushed
        }
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.picks.symbols_mut().push(symbol);
    }

    /// Takes back the last pick and counts a miss.
    pub fn pop(&mut self) -> Option<Symbol> {
        self.misses += 1;
        self.picks.symbols_mut().pop()
    }

    /// Counts one traversal between stop points.
    pub fn add_move(&mut self) {
        self.moves += 1;
    }

    /// Returns `true` if the picks equal `sequence` exactly.
    #[must_use]
    pub fn matches(&self, sequence: &Sequence) -> bool {
        self.picks == *sequence
    }
}
