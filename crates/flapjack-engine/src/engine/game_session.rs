use std::{fmt, mem};

use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::{
    ConfigError, InvalidSymbolError,
    core::{Alphabet, Attempt, Order, PickOutcome, Symbol, Timestamp},
};

use super::{
    order_board::OrderBoard,
    order_library::OrderLibrary,
    order_seed::OrderSeed,
    record_store::{AttemptCounts, Verdict},
    scoreboard::Scoreboard,
    session_config::SessionConfig,
};

/// One resolved order, as returned by [`GameSession::complete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedOrder {
    pub order: Order,
    pub attempt: Attempt,
    pub verdict: Verdict,
    /// Points awarded; `None` unless the verdict is correct.
    pub points: Option<u64>,
}

/// Read-out of the attempt in progress and the running tallies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub picks: String,
    pub moves: usize,
    pub misses: usize,
    pub counts: AttemptCounts,
    pub score: u64,
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Doing: {}", self.picks)?;
        writeln!(f, "Moves: {}", self.moves)?;
        writeln!(f, "Misses: {}", self.misses)?;
        write!(f, "Right/Wrong: {}/{}", self.counts.correct, self.counts.incorrect)
    }
}

/// A running game: the order board, the attempt on its front order, the generator
/// and the score.
///
/// The board is never empty. It starts with the configured opening orders (or one
/// generated order if there are none), and every [`complete`](Self::complete) removes
/// one order and pushes one generated order.
#[derive(Debug, Clone)]
pub struct GameSession {
    seed: OrderSeed,
    rng: Pcg32,
    library: OrderLibrary,
    board: OrderBoard,
    scoreboard: Scoreboard,
    attempt: Attempt,
}

impl GameSession {
    /// Starts a session with a random seed.
    pub fn new(config: &SessionConfig, now: Timestamp) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random(), now)
    }

    /// Like [`Self::new`], but with a specific seed for reproducible orders.
    pub fn with_seed(
        config: &SessionConfig,
        seed: OrderSeed,
        now: Timestamp,
    ) -> Result<Self, ConfigError> {
        let alphabet = config.alphabet()?;
        let openings = config.opening_sequences(alphabet)?;
        let library = OrderLibrary::new(alphabet, config.generator.clone())?;
        let mut rng = seed.rng();

        let mut board = OrderBoard::new();
        for sequence in openings {
            board.push(Order::new(now, sequence));
        }
        if board.is_empty() {
            board.push(library.next_order(now, &mut rng));
        }
        log::debug!("session started with seed {seed} and {} orders", board.len());

        Ok(Self {
            seed,
            rng,
            library,
            board,
            scoreboard: Scoreboard::new(),
            attempt: Attempt::new(now),
        })
    }

    #[must_use]
    pub const fn seed(&self) -> OrderSeed {
        self.seed
    }

    #[must_use]
    pub const fn alphabet(&self) -> Alphabet {
        self.library.alphabet()
    }

    #[must_use]
    pub const fn board(&self) -> &OrderBoard {
        &self.board
    }

    /// The order the player is working on.
    #[must_use]
    pub fn current_order(&self) -> &Order {
        self.board
            .front()
            .expect("board always holds the order being worked on")
    }

    #[must_use]
    pub const fn attempt(&self) -> &Attempt {
        &self.attempt
    }

    #[must_use]
    pub const fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub const fn scoreboard_mut(&mut self) -> &mut Scoreboard {
        &mut self.scoreboard
    }

    #[must_use]
    pub const fn library(&self) -> &OrderLibrary {
        &self.library
    }

    #[must_use]
    pub fn aggregate_counts(&self) -> AttemptCounts {
        self.library.aggregate_counts()
    }

    /// Applies a pickup to the current attempt.
    pub fn pick(&mut self, symbol: Symbol) -> Result<PickOutcome, InvalidSymbolError> {
        self.alphabet().check(symbol)?;
        Ok(self.attempt.pick(symbol))
    }

    /// Counts one move of the player.
    pub fn record_move(&mut self) {
        self.attempt.add_move();
    }

    /// Resolves the current attempt against the front order.
    ///
    /// The attempt is recorded before the replacement order is generated, so the new
    /// order already reflects this result. Points are awarded only for a correct
    /// attempt. A new attempt starts at `now`.
    pub fn complete(&mut self, now: Timestamp) -> CompletedOrder {
        let order = self
            .board
            .complete()
            .expect("board always holds the order being worked on");
        let attempt = mem::replace(&mut self.attempt, Attempt::new(now));

        let verdict = self.library.record_attempt(&order, &attempt);
        let points = verdict
            .is_correct()
            .then(|| self.scoreboard.award_points(&attempt, now));

        let next = self.library.next_order(now, &mut self.rng);
        log::debug!("queued order [{}]", next.sequence());
        self.board.push(next);

        CompletedOrder {
            order,
            attempt,
            verdict,
            points,
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            picks: self.attempt.picks().to_string(),
            moves: self.attempt.moves(),
            misses: self.attempt.misses(),
            counts: self.aggregate_counts(),
            score: self.scoreboard.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Sequence;

    const SEED: OrderSeed = OrderSeed::from_bytes([7; 16]);

    fn session() -> GameSession {
        GameSession::with_seed(&SessionConfig::default(), SEED, Timestamp::from_millis(0))
            .unwrap()
    }

    fn play(session: &mut GameSession, values: &[u8]) {
        for &value in values {
            session.record_move();
            session.pick(Symbol::new(value)).unwrap();
        }
        session.record_move();
    }

    #[test]
    fn test_board_starts_with_opening_orders() {
        let session = session();
        let sequences = session
            .board()
            .iter()
            .map(|order| order.sequence().clone())
            .collect::<Vec<_>>();
        assert_eq!(
            sequences,
            [
                Sequence::from_values([1, 2, 3]),
                Sequence::from_values([2, 3, 2])
            ]
        );
        assert_eq!(session.seed(), SEED);
        assert!(session.attempt().picks().is_empty());
    }

    #[test]
    fn test_no_opening_orders_generates_one() {
        let config = SessionConfig {
            opening_orders: vec![],
            ..SessionConfig::default()
        };
        let session = GameSession::with_seed(&config, SEED, Timestamp::default()).unwrap();
        assert_eq!(session.board().len(), 1);
        assert!((1..=6).contains(&session.current_order().sequence().len()));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SessionConfig {
            alphabet_size: 12,
            ..SessionConfig::default()
        };
        assert!(GameSession::with_seed(&config, SEED, Timestamp::default()).is_err());
    }

    #[test]
    fn test_pick_outside_alphabet_is_rejected() {
        let mut session = session();
        let err = session.pick(Symbol::new(4)).unwrap_err();
        assert_eq!(err.value(), 4);
        assert!(session.attempt().picks().is_empty());
    }

    #[test]
    fn test_correct_completion_awards_points() {
        let mut session = session();
        play(&mut session, &[1, 2, 3]);

        let done = session.complete(Timestamp::from_millis(2_000));
        assert_eq!(done.order.sequence(), &Sequence::from_values([1, 2, 3]));
        assert!(done.verdict.is_correct());
        assert_eq!(done.points, Some(4));
        assert_eq!(done.attempt.moves(), 4);
        assert_eq!(session.scoreboard().total(), 4);

        // The second opening order moves up and a generated one is queued behind it.
        assert_eq!(session.board().len(), 2);
        assert_eq!(
            session.current_order().sequence(),
            &Sequence::from_values([2, 3, 2])
        );
        assert_eq!(session.attempt().started_at(), Timestamp::from_millis(2_000));
        assert_eq!(session.attempt().moves(), 0);
    }

    #[test]
    fn test_wrong_completion_awards_nothing() {
        let mut session = session();
        play(&mut session, &[1, 3]);

        let done = session.complete(Timestamp::from_millis(1_000));
        assert!(done.verdict.is_incorrect());
        assert_eq!(done.points, None);
        assert_eq!(session.scoreboard().total(), 0);
        assert_eq!(
            session.aggregate_counts(),
            AttemptCounts {
                correct: 0,
                incorrect: 1
            }
        );
    }

    #[test]
    fn test_board_never_runs_dry() {
        let mut session = session();
        for round in 1..=30 {
            let order = session.current_order().clone();
            let values = order
                .sequence()
                .iter()
                .map(|symbol| symbol.value())
                .collect::<Vec<_>>();
            if round % 3 == 0 {
                play(&mut session, &[]);
            } else {
                play(&mut session, &values);
            }
            let done = session.complete(Timestamp::from_millis(round * 1_000));
            assert_eq!(done.order, order);
            assert_eq!(session.board().len(), 2);
            assert!(!session.current_order().sequence().has_adjacent_duplicates());
        }
        let counts = session.aggregate_counts();
        assert_eq!(counts.correct + counts.incorrect, 30);
        assert_eq!(counts.incorrect, 10);
    }

    #[test]
    fn test_same_seed_same_orders() {
        let mut a = session();
        let mut b = session();
        for round in 1..=20 {
            play(&mut a, &[1, 2]);
            play(&mut b, &[1, 2]);
            let done_a = a.complete(Timestamp::from_millis(round * 500));
            let done_b = b.complete(Timestamp::from_millis(round * 500));
            assert_eq!(done_a, done_b);
        }
        assert_eq!(
            a.board().iter().collect::<Vec<_>>(),
            b.board().iter().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_snapshot_display() {
        let mut session = session();
        play(&mut session, &[1, 2, 2, 3]);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.picks, "1, 3");
        assert_eq!(
            snapshot.to_string(),
            "Doing: 1, 3\nMoves: 5\nMisses: 1\nRight/Wrong: 0/0"
        );
    }
}
