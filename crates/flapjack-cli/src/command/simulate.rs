use std::{iter, path::PathBuf, time::Duration};

use chrono::Utc;
use flapjack_engine::{CompletedOrder, GameSession, Symbol, Timestamp};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{command::SessionArg, model::report::SimulationReport, util};

/// How the simulated player reproduces an order.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum PlayerModel {
    /// Never slips.
    #[default]
    Perfect,
    /// Slips now and then, but steps back over the wrong pickup and fixes it.
    Careful,
    /// Slips more often and delivers whatever it picked.
    Sloppy,
}

impl PlayerModel {
    const fn name(self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Careful => "careful",
            Self::Sloppy => "sloppy",
        }
    }

    const fn slip_rate(self) -> f64 {
        match self {
            Self::Perfect => 0.0,
            Self::Careful => 0.15,
            Self::Sloppy => 0.25,
        }
    }

    const fn fixes_slips(self) -> bool {
        matches!(self, Self::Careful)
    }

    const fn step_time(self) -> Duration {
        match self {
            Self::Perfect => Duration::from_millis(300),
            Self::Careful => Duration::from_millis(600),
            Self::Sloppy => Duration::from_millis(250),
        }
    }
}

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    session: SessionArg,
    /// Number of orders to deliver
    #[arg(long, default_value_t = 100)]
    rounds: usize,
    /// Simulated player behavior
    #[arg(long, default_value = "perfect")]
    player: PlayerModel,
    /// Output file path for the JSON report
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        session,
        rounds,
        player,
        output,
    } = arg;

    let mut clock = Timestamp::from_millis(0);
    let mut session = session.start_session(clock)?;
    let mut player_rng = Pcg32::from_rng(&mut session.seed().rng());

    eprintln!("Simulating {rounds} rounds with a {} player", player.name());
    eprintln!("  Seed: {}", session.seed());
    for round in 0..*rounds {
        let done = play_round(&mut session, *player, &mut player_rng, &mut clock)?;
        eprintln!(
            "  #{round:4}: [{}] => {:?}{}",
            done.order.sequence(),
            done.verdict,
            done.points.map(|p| format!(" (+{p})")).unwrap_or_default()
        );
    }

    let library = session.library();
    let report = SimulationReport {
        generated_at: Utc::now(),
        seed: session.seed(),
        player: player.name().to_owned(),
        rounds: *rounds,
        counts: session.aggregate_counts(),
        score: session.scoreboard().total(),
        distinct_orders: library.store().len(),
        difficulty_pool: library.difficulty_pool().into_iter().cloned().collect(),
    };

    eprintln!();
    eprintln!("Simulation completed");
    eprintln!("  Right/Wrong: {}/{}", report.counts.correct, report.counts.incorrect);
    eprintln!("  Score: {}", report.score);
    eprintln!("  Distinct orders: {}", report.distinct_orders);
    eprintln!("  Hardest orders:");
    for record in &report.difficulty_pool {
        eprintln!(
            "    [{}] right {} / wrong {}",
            record.sequence(),
            record.correct_count(),
            record.incorrect_count()
        );
    }

    util::save_json(&report, output.as_deref())?;
    Ok(())
}

/// Plays the front order of `session` and delivers it.
fn play_round(
    session: &mut GameSession,
    player: PlayerModel,
    rng: &mut Pcg32,
    clock: &mut Timestamp,
) -> anyhow::Result<CompletedOrder> {
    let target = session.current_order().sequence().clone();
    let alphabet = session.alphabet();
    for &expected in &target {
        if rng.random_bool(player.slip_rate()) {
            let last = session.attempt().picks().last();
            let excluded = iter::once(expected).chain(last).collect::<Vec<_>>();
            let wrong = alphabet.random_symbol_excluding(&excluded, rng);
            step(session, wrong, player, clock)?;
            if !player.fixes_slips() {
                continue;
            }
            // walking back over the same pickup takes it off again
            step(session, wrong, player, clock)?;
        }
        step(session, expected, player, clock)?;
    }

    *clock = *clock + player.step_time();
    session.record_move();
    Ok(session.complete(*clock))
}

fn step(
    session: &mut GameSession,
    symbol: Symbol,
    player: PlayerModel,
    clock: &mut Timestamp,
) -> anyhow::Result<()> {
    *clock = *clock + player.step_time();
    session.record_move();
    session.pick(symbol)?;
    Ok(())
}
