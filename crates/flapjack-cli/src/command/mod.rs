use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flapjack_engine::{GameSession, OrderSeed, Timestamp};
use rand::Rng as _;

use crate::util;

use self::{play::PlayArg, simulate::SimulateArg};

mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play interactively on stdin
    Play(#[clap(flatten)] PlayArg),
    /// Drive a session with a simulated player
    Simulate(#[clap(flatten)] SimulateArg),
}

/// Options shared by every command that starts a session.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SessionArg {
    /// Session configuration file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for order generation (32 hex digits); random if omitted
    #[arg(long)]
    seed: Option<OrderSeed>,
}

impl SessionArg {
    pub(crate) fn start_session(&self, now: Timestamp) -> anyhow::Result<GameSession> {
        let config = util::read_config_file(self.config.as_deref())?;
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        GameSession::with_seed(&config, seed, now).context("Failed to start session")
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
    }
    Ok(())
}
