use serde::{Deserialize, Serialize};

use crate::{
    ConfigError,
    core::{Alphabet, Attempt, Order, RandomSource, Sequence, Timestamp},
};

use super::{
    operators,
    record_store::{AttemptCounts, PerformanceRecord, RecordStore, Verdict},
    selection,
};

/// Tuning knobs of the order generator.
///
/// ```
/// use flapjack_engine::GeneratorParams;
///
/// let params: GeneratorParams = serde_json::from_str(r#"{"mutation_probability": 0.25}"#).unwrap();
/// assert_eq!(params.mutation_probability, 0.25);
/// assert_eq!(params.difficulty_pool_size, 4);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorParams {
    /// Chance that a bred child receives one structural mutation.
    pub mutation_probability: f64,
    /// How many of the hardest records compete as parents.
    pub difficulty_pool_size: usize,
    /// While the store holds at most this many records, orders are drawn at random.
    pub warm_up_records: usize,
    /// Shortest randomly drawn order.
    pub min_length: usize,
    /// Longest randomly drawn order.
    pub max_length: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            mutation_probability: 0.1,
            difficulty_pool_size: 4,
            warm_up_records: 2,
            min_length: 1,
            max_length: 6,
        }
    }
}

impl GeneratorParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return Err(ConfigError::MutationProbability {
                probability: self.mutation_probability,
            });
        }
        if self.difficulty_pool_size == 0 {
            return Err(ConfigError::EmptyDifficultyPool);
        }
        if self.min_length == 0 || self.min_length > self.max_length {
            return Err(ConfigError::LengthBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }
}

/// The adaptive order generator.
///
/// Owns the [`RecordStore`] and produces new orders from it. Until the store knows more
/// than [`GeneratorParams::warm_up_records`] distinct sequences, orders are random.
/// After that each order descends from two of the hardest recorded sequences:
///
/// 1. rank all records hardest first and keep the top
///    [`GeneratorParams::difficulty_pool_size`]
/// 2. draw parent A, then parent B, with [`selection::sample_gauss`]
/// 3. `repair(mutate(breed(A, B)))`
///
/// so the player keeps seeing variations of whatever they struggle with.
#[derive(Debug, Clone)]
pub struct OrderLibrary {
    alphabet: Alphabet,
    params: GeneratorParams,
    store: RecordStore,
}

impl OrderLibrary {
    pub fn new(alphabet: Alphabet, params: GeneratorParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            alphabet,
            params,
            store: RecordStore::new(),
        })
    }

    #[must_use]
    pub const fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    #[must_use]
    pub const fn params(&self) -> &GeneratorParams {
        &self.params
    }

    #[must_use]
    pub const fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Resolves `attempt` against `order` and updates the order's record.
    pub fn record_attempt(&mut self, order: &Order, attempt: &Attempt) -> Verdict {
        let verdict = self.store.record_attempt(order, attempt);
        log::debug!(
            "resolved order [{}] with picks [{}]: {verdict:?} after {} moves",
            order.sequence(),
            attempt.picks(),
            attempt.moves()
        );
        verdict
    }

    #[must_use]
    pub fn aggregate_counts(&self) -> AttemptCounts {
        self.store.aggregate_counts()
    }

    /// The records currently eligible as parents, hardest first.
    #[must_use]
    pub fn difficulty_pool(&self) -> Vec<&PerformanceRecord> {
        self.store.difficulty_pool(self.params.difficulty_pool_size)
    }

    /// Produces the next order, stamped with `now`.
    pub fn next_order<R>(&self, now: Timestamp, rng: &mut R) -> Order
    where
        R: RandomSource + ?Sized,
    {
        let sequence = if self.store.len() > self.params.warm_up_records {
            self.evolved_sequence(rng)
        } else {
            log::debug!(
                "warming up with a random order ({} of {} records)",
                self.store.len(),
                self.params.warm_up_records
            );
            self.random_sequence(rng)
        };
        Order::new(now, sequence)
    }

    /// Draws a random sequence.
    ///
    /// A target length is drawn uniformly from the configured bounds, then that many
    /// symbols are drawn. A symbol equal to the previous one is dropped, so the result
    /// has no adjacent duplicates and may be shorter than the target, but never empty.
    pub fn random_sequence<R>(&self, rng: &mut R) -> Sequence
    where
        R: RandomSource + ?Sized,
    {
        let span = self.params.max_length - self.params.min_length + 1;
        let target = self.params.min_length + rng.below(span);
        let mut sequence = Sequence::new();
        for _ in 0..target {
            let symbol = self.alphabet.random_symbol(rng);
            if sequence.last() != Some(symbol) {
                sequence.symbols_mut().push(symbol);
            }
        }
        sequence
    }

    /// Breeds a child from two Gaussian-selected parents of the difficulty pool.
    ///
    /// # Panics
    ///
    /// Panics if the store is empty.
    pub fn evolved_sequence<R>(&self, rng: &mut R) -> Sequence
    where
        R: RandomSource + ?Sized,
    {
        let pool = self.difficulty_pool();
        let parent_a = selection::sample_gauss(&pool, rng).sequence();
        let parent_b = selection::sample_gauss(&pool, rng).sequence();
        let child = operators::breed(parent_a, parent_b, rng);
        let child = operators::mutate(child, self.params.mutation_probability, self.alphabet, rng);
        let child = operators::repair(child, self.alphabet, rng);
        log::debug!("bred [{child}] from [{parent_a}] x [{parent_b}]");
        child
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{
        core::random::ScriptedSource,
        engine::record_store::tests::{attempt_for, order_for, seed_record},
    };

    fn library() -> OrderLibrary {
        OrderLibrary::new(Alphabet::PANCAKES, GeneratorParams::default()).unwrap()
    }

    /// Library whose difficulty ranking is `[1,2,3,1,2]`, `[1,2,3]`, `[2,1]`.
    fn seeded_library() -> OrderLibrary {
        let mut library = library();
        seed_record(&mut library.store, &[1, 2, 3], 2, 0);
        seed_record(&mut library.store, &[1, 2, 3, 1, 2], 0, 1);
        seed_record(&mut library.store, &[2, 1], 5, 0);
        library
    }

    #[test]
    fn test_default_params_are_valid() {
        assert!(GeneratorParams::default().validate().is_ok());
    }

    #[test]
    fn test_params_validation() {
        let params = GeneratorParams {
            mutation_probability: 1.5,
            ..GeneratorParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::MutationProbability { probability: 1.5 })
        );

        let params = GeneratorParams {
            difficulty_pool_size: 0,
            ..GeneratorParams::default()
        };
        assert_eq!(params.validate(), Err(ConfigError::EmptyDifficultyPool));

        let params = GeneratorParams {
            min_length: 4,
            max_length: 3,
            ..GeneratorParams::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::LengthBounds { min: 4, max: 3 })
        );
        assert!(OrderLibrary::new(Alphabet::PANCAKES, params).is_err());
    }

    #[test]
    fn test_unknown_param_is_rejected() {
        let result = serde_json::from_str::<GeneratorParams>(r#"{"pool": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_cold_start_orders_are_well_formed() {
        let library = library();
        let mut rng = Pcg32::seed_from_u64(7);
        for i in 0..100 {
            let order = library.next_order(Timestamp::from_millis(i), &mut rng);
            let sequence = order.sequence();
            assert!((1..=6).contains(&sequence.len()), "{sequence}");
            assert!(!sequence.has_adjacent_duplicates(), "{sequence}");
            assert!(
                sequence
                    .iter()
                    .all(|&symbol| Alphabet::PANCAKES.contains(symbol))
            );
            assert_eq!(order.created_at(), Timestamp::from_millis(i));
        }
    }

    #[test]
    fn test_cold_start_drops_duplicate_symbols() {
        let library = library();
        // target length 1 + 2 = 3; symbols 2, 2 (dropped), 1
        let mut rng = ScriptedSource::from_indices([2, 1, 1, 0]);
        let sequence = library.random_sequence(&mut rng);
        assert_eq!(sequence, Sequence::from_values([2, 1]));
        assert!(rng.is_exhausted());

        // target length 1 + 5 = 6; every draw after the first repeats it
        let mut rng = ScriptedSource::from_indices([5, 2, 2, 2, 2, 2, 2]);
        let sequence = library.random_sequence(&mut rng);
        assert_eq!(sequence, Sequence::from_values([3]));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_cold_start_lengths_lean_short() {
        let library = library();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut histogram = [0_usize; 7];
        for _ in 0..6000 {
            histogram[library.random_sequence(&mut rng).len()] += 1;
        }
        // target 6 survives without a drop with probability (2/3)^5, about 1 in 8
        assert_eq!(histogram[0], 0);
        assert!(histogram[6] < 300, "{histogram:?}");
        assert!(histogram[1] > histogram[6] * 4, "{histogram:?}");
    }

    #[test]
    fn test_warm_up_holds_until_store_exceeds_threshold() {
        let mut library = library();
        seed_record(&mut library.store, &[1, 2, 3], 1, 0);
        seed_record(&mut library.store, &[2, 1], 1, 0);

        // Two records: still random, which draws only indices.
        let mut rng = ScriptedSource::from_indices([0, 2]);
        let order = library.next_order(Timestamp::default(), &mut rng);
        assert_eq!(order.sequence(), &Sequence::from_values([3]));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_evolved_order_from_recorded_fixture() {
        let library = seeded_library();
        let pool = library
            .difficulty_pool()
            .iter()
            .map(|record| record.sequence().key().to_string())
            .collect::<Vec<_>>();
        assert_eq!(pool, ["12312", "123", "21"]);

        // Parents [1,2,3,1,2] and [2,1], cut at 0.5 -> [1,2] ++ [1].
        // Mutation fires: insert 1 at position 1 -> [1,1,2,1].
        // Repair redraws position 1 from {3} -> [1,3,2,1]; the final repair is a no-op.
        let mut rng = ScriptedSource::new([0.9, 0.1, 0.5, 0.05], [0, 1, 0, 0]);
        let order = library.next_order(Timestamp::from_millis(1234), &mut rng);
        assert_eq!(order.sequence(), &Sequence::from_values([1, 3, 2, 1]));
        assert_eq!(order.created_at(), Timestamp::from_millis(1234));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_evolved_order_without_mutation() {
        let library = seeded_library();
        // Parents [1,2,3] and [1,2,3,1,2], cut at 0.5 -> [1] ++ [3,1,2].
        let mut rng = ScriptedSource::from_units([0.3, 0.9, 0.5, 0.5]);
        let order = library.next_order(Timestamp::default(), &mut rng);
        assert_eq!(order.sequence(), &Sequence::from_values([1, 3, 1, 2]));
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_evolved_orders_are_reproducible_for_equal_seeds() {
        let library = seeded_library();
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        for _ in 0..50 {
            let a = library.next_order(Timestamp::default(), &mut rng_a);
            let b = library.next_order(Timestamp::default(), &mut rng_b);
            assert_eq!(a, b);
            assert!(!a.sequence().has_adjacent_duplicates());
        }
    }

    #[test]
    fn test_record_attempt_feeds_aggregate_counts() {
        let mut library = library();
        let order = order_for(&[1, 2]);
        assert!(library.record_attempt(&order, &attempt_for(&[1, 2], 3)).is_correct());
        assert!(library.record_attempt(&order, &attempt_for(&[2], 2)).is_incorrect());
        assert_eq!(
            library.aggregate_counts(),
            AttemptCounts {
                correct: 1,
                incorrect: 1
            }
        );
        assert_eq!(library.store().len(), 1);
    }
}
