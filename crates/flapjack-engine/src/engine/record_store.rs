use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use crate::core::{Attempt, Order, OrderKey, Sequence};

/// Outcome of resolving an order against an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Accumulated statistics for one distinct sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceRecord {
    sequence: Sequence,
    correct_count: usize,
    incorrect_count: usize,
    total_moves_on_correct: usize,
}

impl PerformanceRecord {
    #[must_use]
    pub const fn new(sequence: Sequence) -> Self {
        Self {
            sequence,
            correct_count: 0,
            incorrect_count: 0,
            total_moves_on_correct: 0,
        }
    }

    #[must_use]
    pub const fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    #[must_use]
    pub const fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub const fn incorrect_count(&self) -> usize {
        self.incorrect_count
    }

    #[must_use]
    pub const fn total_moves_on_correct(&self) -> usize {
        self.total_moves_on_correct
    }

    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.correct_count + self.incorrect_count
    }

    /// Average number of moves over the correct attempts, if any.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean_moves_on_correct(&self) -> Option<f64> {
        (self.correct_count > 0)
            .then(|| self.total_moves_on_correct as f64 / self.correct_count as f64)
    }

    /// Orders records hardest first.
    ///
    /// Longer sequences are harder; among equal lengths, fewer observed successes is
    /// harder.
    #[must_use]
    pub fn cmp_difficulty(&self, other: &Self) -> Ordering {
        other
            .sequence
            .len()
            .cmp(&self.sequence.len())
            .then(self.correct_count.cmp(&other.correct_count))
    }

    fn record(&mut self, verdict: Verdict, moves: usize) {
        match verdict {
            Verdict::Correct => {
                self.correct_count += 1;
                self.total_moves_on_correct += moves;
            }
            Verdict::Incorrect => self.incorrect_count += 1,
        }
    }
}

/// Correct and incorrect totals over every record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttemptCounts {
    pub correct: usize,
    pub incorrect: usize,
}

/// Performance records keyed by the canonical key of their sequence.
///
/// Records are created on the first resolution of a sequence and are never evicted.
/// Iteration follows key order, which makes difficulty ranking reproducible when
/// records tie.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: BTreeMap<OrderKey, PerformanceRecord>,
}

impl RecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct sequences recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &OrderKey) -> Option<&PerformanceRecord> {
        self.records.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PerformanceRecord> + '_ {
        self.records.values()
    }

    /// Records the outcome of `attempt` against `order`.
    ///
    /// An exact match counts as correct and adds the attempt's moves to the record's
    /// move total; anything else counts as incorrect.
    pub fn record_attempt(&mut self, order: &Order, attempt: &Attempt) -> Verdict {
        let verdict = if order.is_matched_by(attempt) {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        self.records
            .entry(order.key())
            .or_insert_with(|| PerformanceRecord::new(order.sequence().clone()))
            .record(verdict, attempt.moves());
        verdict
    }

    #[must_use]
    pub fn aggregate_counts(&self) -> AttemptCounts {
        self.records
            .values()
            .fold(AttemptCounts::default(), |counts, record| AttemptCounts {
                correct: counts.correct + record.correct_count,
                incorrect: counts.incorrect + record.incorrect_count,
            })
    }

    /// All records, hardest first (see [`PerformanceRecord::cmp_difficulty`]).
    #[must_use]
    pub fn ranked_by_difficulty(&self) -> Vec<&PerformanceRecord> {
        let mut ranked = self.records.values().collect::<Vec<_>>();
        ranked.sort_by(|a, b| a.cmp_difficulty(b));
        ranked
    }

    /// The `size` hardest records, or fewer if the store holds fewer.
    #[must_use]
    pub fn difficulty_pool(&self, size: usize) -> Vec<&PerformanceRecord> {
        let mut ranked = self.ranked_by_difficulty();
        ranked.truncate(size);
        ranked
    }
}
