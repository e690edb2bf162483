//! Genetic operators over symbol sequences.
//!
//! - [`repair`] restores the no-adjacent-duplicates invariant
//! - [`breed`] crosses two parents at one shared cut fraction
//! - [`mutate`] applies at most one structural [`Mutation`], then repairs
//!
//! Neither operator enforces the 1..=6 creation bounds: an empty or over-long child
//! is a valid sequence. All draws go through the caller's [`RandomSource`].

use crate::core::{Alphabet, RandomSource, Sequence};

/// Replaces symbols so that no two adjacent symbols are equal.
///
/// The length never changes. Sequences shorter than two are returned untouched. For
/// two symbols, an equal second symbol is redrawn from the alphabet minus the first.
/// Longer sequences get one left-to-right pass over the interior positions: a symbol
/// equal to its (already repaired) left neighbour or to its right neighbour is
/// redrawn from the alphabet minus both neighbours. Every position is visited once,
/// and a clean sequence is returned unchanged, so `repair` is idempotent.
///
/// # Panics
///
/// Panics if a symbol lies outside `alphabet`.
///
/// # Example
///
/// ```
/// use flapjack_engine::{Alphabet, Sequence, operators};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut rng = Pcg32::seed_from_u64(0);
/// let sequence = Sequence::from_values([1, 1, 1]);
/// let repaired = operators::repair(sequence, Alphabet::PANCAKES, &mut rng);
/// assert!(repaired.as_slice()[1].value() != 1);
/// assert!(!repaired.has_adjacent_duplicates());
/// ```
pub fn repair<R>(mut sequence: Sequence, alphabet: Alphabet, rng: &mut R) -> Sequence
where
    R: RandomSource + ?Sized,
{
    alphabet.assert_all(sequence.as_slice());
    let symbols = sequence.symbols_mut();
    match symbols.len() {
        0 | 1 => {}
        2 => {
            if symbols[0] == symbols[1] {
                symbols[1] = alphabet.random_symbol_excluding(&[symbols[0]], rng);
            }
        }
        len => {
            // symbols[i + 1] is still the original right neighbour when position i is
            // visited.
            for i in 1..len - 1 {
                let (left, current, right) = (symbols[i - 1], symbols[i], symbols[i + 1]);
                if current == left || current == right {
                    symbols[i] = alphabet.random_symbol_excluding(&[left, right], rng);
                }
            }
        }
    }
    sequence
}

/// Crosses two parents at one shared cut fraction.
///
/// A fraction `r` is drawn from `[0, 1)`; the child is the first `⌊len(prefix)·r⌋`
/// symbols of `prefix` followed by `suffix` from position `⌊len(suffix)·r⌋` onward.
/// The roles are not symmetric: `prefix` always contributes the head and `suffix` the
/// tail. The child is not repaired.
pub fn breed<R>(prefix: &Sequence, suffix: &Sequence, rng: &mut R) -> Sequence
where
    R: RandomSource + ?Sized,
{
    let fraction = rng.unit();
    let head = &prefix.as_slice()[..cut_index(prefix.len(), fraction)];
    let tail = &suffix.as_slice()[cut_index(suffix.len(), fraction)..];
    head.iter().chain(tail).copied().collect()
}

#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn cut_index(len: usize, fraction: f64) -> usize {
    debug_assert!((0.0..1.0).contains(&fraction));
    ((len as f64 * fraction).floor() as usize).min(len)
}

/// A structural change applied by [`mutate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Mutation {
    /// Insert a random symbol at a cut position in `[0, len]`.
    Insert,
    /// Remove the symbol at a position in `[0, len)`.
    Remove,
    /// Replace the symbol at a position in `[0, len)` with a different one.
    Replace,
}

impl Mutation {
    pub const ALL: [Self; 3] = [Self::Insert, Self::Remove, Self::Replace];

    /// Picks one of [`Mutation::ALL`] uniformly.
    pub fn random<R>(rng: &mut R) -> Self
    where
        R: RandomSource + ?Sized,
    {
        Self::ALL[rng.below(Self::ALL.len())]
    }

    /// Applies this mutation once, without repairing.
    ///
    /// Removing from or replacing in an empty sequence leaves it empty.
    pub fn apply<R>(self, mut sequence: Sequence, alphabet: Alphabet, rng: &mut R) -> Sequence
    where
        R: RandomSource + ?Sized,
    {
        let symbols = sequence.symbols_mut();
        match self {
            Self::Insert => {
                let position = rng.below(symbols.len() + 1);
                let symbol = alphabet.random_symbol(rng);
                symbols.insert(position, symbol);
            }
            Self::Remove => {
                if !symbols.is_empty() {
                    let position = rng.below(symbols.len());
                    symbols.remove(position);
                }
            }
            Self::Replace => {
                if !symbols.is_empty() {
                    let position = rng.below(symbols.len());
                    let current = symbols[position];
                    symbols[position] = alphabet.random_symbol_excluding(&[current], rng);
                }
            }
        }
        sequence
    }
}

/// Mutates `sequence` with the given probability.
///
/// With probability `1 - probability` the input is returned as is. Otherwise one
/// [`Mutation`] is chosen uniformly, applied once, and the result is [`repair`]ed.
///
/// # Panics
///
/// Panics if `probability` is outside `[0, 1]` or a symbol lies outside `alphabet`.
pub fn mutate<R>(
    sequence: Sequence,
    probability: f64,
    alphabet: Alphabet,
    rng: &mut R,
) -> Sequence
where
    R: RandomSource + ?Sized,
{
    assert!(
        (0.0..=1.0).contains(&probability),
        "mutation probability must be in [0, 1], got {probability}"
    );
    alphabet.assert_all(sequence.as_slice());
    if rng.unit() >= probability {
        return sequence;
    }
    let mutation = Mutation::random(rng);
    let mutated = mutation.apply(sequence, alphabet, rng);
    repair(mutated, alphabet, rng)
}
