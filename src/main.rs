//! Match-3 Board Engine CLI
//!
//! Loads a level layout, generates a playable arrangement and lets you
//! inspect legal swaps, apply one, or watch an automatic game.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cookie_crunch::{LevelLayout, StandardLevel, Swap, DEFAULT_MAX_ATTEMPTS};

/// Generates and plays match-3 boards in the terminal.
#[derive(Parser)]
#[command(name = "cookie-crunch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Level layout file (JSON); defaults to a full 9x9 board
    #[arg(short, long, global = true)]
    level: Option<PathBuf>,

    /// Seed for a reproducible arrangement
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Give up after this many unplayable arrangements
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a playable arrangement and print it.
    Shuffle,
    /// List every legal swap of the generated arrangement.
    Swaps,
    /// Apply one swap and print the chains it creates.
    Swap {
        from_column: usize,
        from_row: usize,
        to_column: usize,
        to_row: usize,
    },
    /// Play legal swaps automatically, resolving cascades after each.
    Play {
        #[arg(short, long, default_value_t = 5)]
        turns: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut rng: Box<dyn RngCore> = match cli.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    };

    let mut level = load_level(cli.level.as_ref())?;
    level
        .try_initial_set(&mut *rng, cli.max_attempts)
        .context("failed to generate a playable arrangement")?;

    match cli.command.unwrap_or(Command::Shuffle) {
        Command::Shuffle => run_shuffle(&level),
        Command::Swaps => run_swaps(&level),
        Command::Swap {
            from_column,
            from_row,
            to_column,
            to_row,
        } => run_swap(&mut level, (from_column, from_row), (to_column, to_row))?,
        Command::Play { turns } => run_play(&mut level, &mut *rng, turns, cli.max_attempts)?,
    }

    Ok(())
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_level(path: Option<&PathBuf>) -> Result<StandardLevel> {
    match path {
        Some(path) => {
            let level = StandardLevel::try_from_file(path)
                .with_context(|| format!("failed to load level {}", path.display()))?;
            info!("Loaded level {} ({} open tiles)", path.display(), level.open_tile_count());
            Ok(level)
        }
        None => Ok(StandardLevel::from_layout(&LevelLayout::full(
            cookie_crunch::NUM_COLUMNS,
            cookie_crunch::NUM_ROWS,
        ))?),
    }
}

/// Prints the board and the number of legal swaps.
fn run_shuffle(level: &StandardLevel) {
    print!("{level}");
    println!("{} legal swaps", level.possible_swaps().len());
}

/// Prints every legal swap, sorted by position.
fn run_swaps(level: &StandardLevel) {
    print!("{level}");
    for swap in sorted_swaps(level) {
        println!("{swap}");
    }
}

fn sorted_swaps(level: &StandardLevel) -> Vec<Swap> {
    let mut swaps: Vec<Swap> = level.possible_swaps().iter().copied().collect();
    swaps.sort_by_key(|swap| (swap.from().coord(), swap.to().coord()));
    swaps
}

/// Applies a user-chosen swap if it is legal and prints the resulting chains.
fn run_swap(level: &mut StandardLevel, from: (usize, usize), to: (usize, usize)) -> Result<()> {
    print!("{level}");
    let Some(swap) = level.propose_swap(from, to) else {
        bail!("cells {from:?} and {to:?} are not two adjacent pieces");
    };
    if !level.is_possible(&swap) {
        println!("{swap} does not make a chain");
        return Ok(());
    }

    level.perform_swap(&swap);
    println!("{swap}");
    for chain in level.detect_all_chains() {
        println!("  {chain}");
    }
    print!("{level}");
    Ok(())
}

/// Plays random legal swaps, resolving cascades and reshuffling when stuck.
fn run_play(
    level: &mut StandardLevel,
    rng: &mut dyn RngCore,
    turns: usize,
    max_attempts: usize,
) -> Result<()> {
    for turn in 1..=turns {
        let swaps = sorted_swaps(level);
        let swap = swaps[rng.gen_range(0..swaps.len())];
        level.perform_swap(&swap);

        let rounds = level.resolve_chains(rng);
        let removed: usize = rounds.iter().flatten().map(|chain| chain.len()).sum();
        println!("Turn {turn}: {swap}");
        println!("  {} cascade rounds, {} pieces matched", rounds.len(), removed);
        print!("{level}");

        if level.detect_possible_swaps().is_empty() {
            debug!("no legal swaps left, reshuffling");
            level.try_initial_set(rng, max_attempts)?;
        }
    }
    Ok(())
}
