use std::time::Duration;

use serde::Serialize;

use crate::core::{Attempt, Timestamp};

/// Shortest elapsed time used for scoring; a faster completion scores as this.
pub const MIN_ELAPSED: Duration = Duration::from_millis(1);

/// Points for reproducing `len` symbols in `elapsed`.
///
/// `ceil(2^len / seconds)`: each extra symbol doubles the reward and finishing in half
/// the time doubles it again. `elapsed` below [`MIN_ELAPSED`] is raised to it.
///
/// ```
/// use std::time::Duration;
///
/// use flapjack_engine::points_for;
///
/// assert_eq!(points_for(3, Duration::from_secs(2)), 4);
/// assert_eq!(points_for(3, Duration::from_secs(3)), 3);
/// assert_eq!(points_for(0, Duration::from_secs(10)), 1);
/// ```
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn points_for(len: usize, elapsed: Duration) -> u64 {
    let seconds = elapsed.max(MIN_ELAPSED).as_secs_f64();
    let exponent = i32::try_from(len).unwrap_or(i32::MAX);
    (2.0_f64.powi(exponent) / seconds).ceil() as u64
}

/// Running score of a session.
///
/// # Example
///
/// ```
/// use flapjack_engine::{Attempt, Scoreboard, Symbol, Timestamp};
///
/// let mut attempt = Attempt::new(Timestamp::from_millis(0));
/// for value in [1, 2, 3] {
///     attempt.pick(Symbol::new(value));
/// }
///
/// let mut scoreboard = Scoreboard::new();
/// assert_eq!(scoreboard.award_points(&attempt, Timestamp::from_millis(2000)), 4);
/// assert_eq!(scoreboard.total(), 4);
/// assert_eq!(scoreboard.last_awarded(), Some(4));
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scoreboard {
    total: u64,
    last_awarded: Option<u64>,
}

impl Scoreboard {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: 0,
            last_awarded: None,
        }
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Points of the most recent award, until taken.
    #[must_use]
    pub const fn last_awarded(&self) -> Option<u64> {
        self.last_awarded
    }

    /// Returns and clears the most recent award, for one-shot display.
    pub const fn take_last_awarded(&mut self) -> Option<u64> {
        self.last_awarded.take()
    }

    /// Scores `attempt` as completed at `completed_at` and adds it to the total.
    pub fn award_points(&mut self, attempt: &Attempt, completed_at: Timestamp) -> u64 {
        let elapsed = completed_at.saturating_duration_since(attempt.started_at());
        let points = points_for(attempt.picks().len(), elapsed);
        self.total = self.total.saturating_add(points);
        self.last_awarded = Some(points);
        points
    }
}
