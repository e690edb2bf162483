use std::io::{self, BufRead as _};

use anyhow::Context;
use flapjack_engine::{Alphabet, CompletedOrder, GameSession, PickOutcome, Symbol};

use crate::{command::SessionArg, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    session: SessionArg,
    /// Print the attempt read-out after every input line
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { session, debug } = arg;

    let mut session = session.start_session(util::wall_clock())?;
    eprintln!("Seed: {}", session.seed());
    eprintln!(
        "Type symbols 1..={} to pick them up, `done` to deliver, `quit` to stop.",
        session.alphabet().size()
    );
    print_board(&session);

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let flow = apply_line(&mut session, &line);
        if *debug {
            println!("{}", session.snapshot());
        }
        if flow == Flow::Quit {
            break;
        }
    }

    let counts = session.aggregate_counts();
    eprintln!();
    eprintln!("Session finished");
    eprintln!("  Right/Wrong: {}/{}", counts.correct, counts.incorrect);
    eprintln!("  Score: {}", session.scoreboard().total());
    Ok(())
}

fn apply_line(session: &mut GameSession, line: &str) -> Flow {
    for token in line.split_whitespace() {
        match token {
            "quit" | "q" => return Flow::Quit,
            "done" | "d" => {
                session.record_move();
                let done = session.complete(util::wall_clock());
                print_completed(session, &done);
                print_board(session);
            }
            _ => apply_picks(session, token),
        }
    }
    Flow::Continue
}

fn apply_picks(session: &mut GameSession, token: &str) {
    let symbols = match parse_picks(session.alphabet(), token) {
        Ok(symbols) => symbols,
        Err(e) => {
            eprintln!("Ignoring `{token}`: {e}");
            return;
        }
    };
    for symbol in symbols {
        session.record_move();
        match session.pick(symbol) {
            Ok(PickOutcome::Pushed) => {}
            Ok(PickOutcome::Popped) => println!("Put back {symbol}"),
            Err(e) => eprintln!("Ignoring {symbol}: {e}"),
        }
    }
}

/// Parses a run of digits into symbols; nothing is picked unless every digit is valid.
fn parse_picks(alphabet: Alphabet, token: &str) -> anyhow::Result<Vec<Symbol>> {
    token
        .chars()
        .map(|ch| -> anyhow::Result<Symbol> {
            let value = ch
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .with_context(|| format!("`{ch}` is not a symbol or command"))?;
            Ok(alphabet.symbol(value)?)
        })
        .collect()
}

fn print_completed(session: &mut GameSession, done: &CompletedOrder) {
    if done.verdict.is_correct() {
        let points = session.scoreboard_mut().take_last_awarded().unwrap_or(0);
        println!("Correct! +{points} points (total {})", session.scoreboard().total());
    } else {
        println!(
            "Wrong: ordered [{}], delivered [{}]",
            done.order.sequence(),
            done.attempt.picks()
        );
    }
}

fn print_board(session: &GameSession) {
    println!("Orders:");
    for (i, order) in session.board().iter().enumerate() {
        let marker = if i == 0 { '>' } else { ' ' };
        println!("  {marker} {}", order.sequence());
    }
}

#[cfg(test)]
mod tests {
    use flapjack_engine::{OrderSeed, SessionConfig, Timestamp};

    use super::*;

    fn session() -> GameSession {
        let seed = OrderSeed::from_bytes([5; 16]);
        GameSession::with_seed(&SessionConfig::default(), seed, Timestamp::from_millis(0))
            .unwrap()
    }

    #[test]
    fn test_parse_picks() {
        let alphabet = Alphabet::PANCAKES;
        assert_eq!(
            parse_picks(alphabet, "312").unwrap(),
            [Symbol::new(3), Symbol::new(1), Symbol::new(2)]
        );
        assert!(parse_picks(alphabet, "12x").is_err());
        assert!(parse_picks(alphabet, "14").is_err());
    }

    #[test]
    fn test_bad_token_picks_nothing() {
        let mut session = session();
        assert_eq!(apply_line(&mut session, "12x 24"), Flow::Continue);
        assert!(session.attempt().picks().is_empty());
        assert_eq!(session.attempt().moves(), 0);

        apply_line(&mut session, "12");
        assert_eq!(session.attempt().picks().to_string(), "1, 2");
        assert_eq!(session.attempt().moves(), 2);
        assert_eq!(apply_line(&mut session, "q"), Flow::Quit);
    }
}
