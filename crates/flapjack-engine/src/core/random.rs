use rand::Rng;

/// The single source of randomness consumed by the generator and its operators.
///
/// Every [`rand::Rng`] is a `RandomSource`, so callers normally pass a seeded
/// [`rand_pcg::Pcg32`] (see [`OrderSeed`](crate::OrderSeed)). Tests can substitute a
/// scripted source to pin every draw.
pub trait RandomSource {
    /// Returns a value uniformly distributed in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns an index uniformly distributed in `[0, n)`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is zero.
    fn below(&mut self, n: usize) -> usize;
}

impl<R> RandomSource for R
where
    R: Rng + ?Sized,
{
    fn unit(&mut self) -> f64 {
        self.random::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "cannot draw an index from an empty range");
        self.random_range(0..n)
    }
}

#[cfg(test)]
pub(crate) use self::scripted::ScriptedSource;


#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_rng_draws_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for n in 1..20 {
            let x = rng.unit();
            assert!((0.0..1.0).contains(&x));
            assert!(rng.below(n) < n);
        }
    }

    #[test]
    fn test_scripted_source_replays_draws() {
        let mut source = ScriptedSource::new([0.25, 0.75], [2, 0]);
        assert_eq!(source.unit(), 0.25);
        assert_eq!(source.below(3), 2);
        assert_eq!(source.unit(), 0.75);
        assert_eq!(source.below(1), 0);
        assert!(source.is_exhausted());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_scripted_source_rejects_out_of_range_index() {
        let mut source = ScriptedSource::from_indices([3]);
        source.below(3);
    }
}
