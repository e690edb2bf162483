//! Half-Gaussian biased sampling over a difficulty-ranked pool.
//!
//! A uniform draw `x ∈ [0, 1)` is mapped to
//!
//! ```text
//! index = round((n - 1) · exp(-(x - MEAN)² / (2 · WIDTH²)))
//! ```
//!
//! clamped to `[0, n - 1]`. About half of the unit interval (`x ≳ 0.5`) lands on index
//! 0, the hardest record; the rest spreads over the remaining indices. [`MEAN`] and
//! [`WIDTH`] set the selection pressure and are fixed.

use crate::core::RandomSource;

/// Centre of the bell curve.
pub const MEAN: f64 = 0.0;
/// Width of the bell curve.
pub const WIDTH: f64 = 0.3;

/// Maps a unit draw `x` to an index into a pool of `len` elements.
///
/// # Panics
///
/// Panics if `len` is zero.
///
/// # Example
///
/// ```
/// use flapjack_engine::selection::gauss_index;
///
/// assert_eq!(gauss_index(3, 0.0), 2);
/// assert_eq!(gauss_index(3, 0.3), 1);
/// assert_eq!(gauss_index(3, 0.9), 0);
/// assert_eq!(gauss_index(1, 0.0), 0);
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
#[must_use]
pub fn gauss_index(len: usize, x: f64) -> usize {
    assert!(len > 0, "cannot sample from an empty pool");
    let max = (len - 1) as f64;
    let bell = (-(x - MEAN).powi(2) / (2.0 * WIDTH.powi(2))).exp();
    (max * bell).round().clamp(0.0, max) as usize
}

/// Returns one element of `pool`, biased toward the front.
///
/// `pool` must already be ranked hardest-first.
///
/// # Panics
///
/// Panics if `pool` is empty.
pub fn sample_gauss<'a, T, R>(pool: &'a [T], rng: &mut R) -> &'a T
where
    R: RandomSource + ?Sized,
{
    &pool[gauss_index(pool.len(), rng.unit())]
}
