#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a manor pursuit game in the console.

mod config;
mod session;
mod town_file;

use std::{io, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use manor_core::{PlaceId, PlayerKind};
use manor_world::{query, Town};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::GameConfig, session::Session};

/// Turn-based pursuit of a target through the places of a town.
#[derive(Debug, Parser)]
#[command(name = "manor", version, about)]
struct Args {
    /// Town description file.
    town: PathBuf,
    /// TOML file with game settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Turns before the target escapes, overriding the config file.
    #[arg(long)]
    max_turns: Option<u32>,
    /// Items each player may carry, overriding the config file.
    #[arg(long)]
    carry_limit: Option<u32>,
    /// Adds a human player, optionally starting in a named place.
    #[arg(long = "human", value_name = "NAME[@PLACE]")]
    humans: Vec<String>,
    /// Adds a computer player, optionally starting in a named place.
    #[arg(long = "computer", value_name = "NAME[@PLACE]")]
    computers: Vec<String>,
}

/// Entry point for the manor command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig::load(args.config.as_deref())?
        .with_overrides(args.max_turns, args.carry_limit)?;
    init_tracing(&config.log_filter);

    if args.humans.is_empty() && args.computers.is_empty() {
        bail!("add at least one player with --human or --computer");
    }

    let layout = town_file::load(&args.town)?;
    let town = Town::from_layout(layout)
        .with_context(|| format!("invalid town in {}", args.town.display()))?;
    info!(
        town = query::town_name(&town),
        places = query::places(&town).len(),
        max_turns = config.max_turns,
        "loaded town"
    );

    let mut session = Session::new(town, config.max_turns, config.carry_limit);
    let entries = args
        .humans
        .iter()
        .map(|entry| (PlayerKind::Human, entry))
        .chain(args.computers.iter().map(|entry| (PlayerKind::Computer, entry)));
    for (kind, entry) in entries {
        let (name, start) = player_entry(session.town(), entry)?;
        let player = session.join(name, kind, start)?;
        info!(player = player.get(), name, %kind, "player joined");
    }

    let outcome = session.run(io::stdin().lock(), io::stdout().lock())?;
    info!(?outcome, "session finished");
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Splits `NAME[@PLACE]` and resolves the place, defaulting to the first one.
fn player_entry<'a>(town: &Town, entry: &'a str) -> Result<(&'a str, PlaceId)> {
    let Some((name, place)) = entry.split_once('@') else {
        return Ok((entry.trim(), PlaceId::new(0)));
    };

    let start = query::place_named(town, place.trim())
        .with_context(|| format!("no place called `{}` for player `{name}`", place.trim()))?;
    Ok((name.trim(), start))
}
