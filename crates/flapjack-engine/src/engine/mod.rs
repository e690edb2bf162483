//! Order generation and session state.
//!
//! This module builds the game on top of the [`core`](crate::core) value types:
//!
//! - [`operators`] - repair, crossover and mutation of sequences
//! - [`selection`] - Gaussian-biased sampling over a ranked pool
//! - [`RecordStore`] - per-sequence correct/incorrect statistics
//! - [`OrderLibrary`] - the adaptive generator fed by the record store
//! - [`OrderBoard`] - the FIFO queue of pending orders
//! - [`Scoreboard`] - points for correct, fast completions
//! - [`GameSession`] - owns all of the above plus the seeded random stream
//!
//! # Session Flow
//!
//! 1. Start a [`GameSession`] from a [`SessionConfig`] and an [`OrderSeed`]
//! 2. Feed the player's moves and pickups into the current attempt
//! 3. [`GameSession::complete`] resolves the attempt against the front order, records
//!    it, awards points if it matched, and queues a freshly generated order
//! 4. Repeat; once enough distinct sequences are recorded, new orders are bred from
//!    the hardest ones
//!
//! # Example
//!
//! ```
//! use flapjack_engine::{GameSession, OrderSeed, SessionConfig, Symbol, Timestamp};
//!
//! let seed: OrderSeed = "0123456789abcdef0123456789abcdef".parse().unwrap();
//! let mut session =
//!     GameSession::with_seed(&SessionConfig::default(), seed, Timestamp::from_millis(0))
//!         .unwrap();
//!
//! // The first opening order is always 1, 2, 3.
//! for value in [1, 2, 3] {
//!     session.record_move();
//!     session.pick(Symbol::new(value)).unwrap();
//! }
//! session.record_move(); // onto the completion tile
//!
//! let done = session.complete(Timestamp::from_millis(2000));
//! assert!(done.verdict.is_correct());
//! assert_eq!(done.points, Some(4));
//! assert_eq!(session.board().len(), 2);
//! ```

pub use self::{
    game_session::*, order_board::*, order_library::*, order_seed::*, record_store::*,
    scoreboard::*, session_config::*,
};

mod game_session;
mod order_board;
mod order_library;
mod order_seed;
mod record_store;
mod scoreboard;
mod session_config;

pub mod operators;
pub mod selection;
