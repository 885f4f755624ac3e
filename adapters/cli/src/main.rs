#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter running Monte-Carlo match-3 simulations.

mod drivers;
mod report;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use match3_sim_core::{ApPool, Rules};
use tracing_subscriber::EnvFilter;

use crate::drivers::{ApDuel, ProtectTiles};
use crate::report::Reporter;

const DEFENSE_POOLS: &[&str] = &["G", "Y", "R", "BL", "P", "T"];
const OFFENSE_POOLS: &[&str] = &["BK", "R", "Y", "P"];
const DEFENSIVE_OFFENSE_POOLS: &[&str] = &["Y", "R", "G", "P", "BL", "BK"];

/// Monte-Carlo simulations of match-3 board mechanics.
#[derive(Debug, Parser)]
#[command(name = "match3-sim", version, about)]
struct CliArgs {
    /// TOML file overriding the default rules.
    #[arg(long, global = true, value_name = "PATH")]
    rules: Option<PathBuf>,
    /// Print one JSON object per record instead of text lines.
    #[arg(long, global = true)]
    json: bool,
    /// Raise log verbosity on stderr; repeat for more detail.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Random offense against an idle defense; prints the turn the board got stuck on.
    UntilStuck {
        /// Seed of the simulation.
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Print the board to stderr before every move.
        #[arg(long)]
        print_board: bool,
    },
    /// AP-seeking offense against the AI emulation; prints AP standings before every move.
    ApDuel(ApDuelArgs),
    /// Protect tile strength distributions over repeated random games.
    ProtectTiles(ProtectTilesArgs),
}

#[derive(Debug, Args)]
struct ApDuelArgs {
    /// Seed of the simulation.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Full turns to play.
    #[arg(long, default_value_t = 50)]
    turns: u32,
    /// Pools the offense collects, most wanted first.
    #[arg(long, value_delimiter = ',', value_parser = parse_pool)]
    offense_colors: Vec<ApPool>,
    /// Pools the defense prefers.
    #[arg(long, value_delimiter = ',', value_parser = parse_pool)]
    defense_colors: Vec<ApPool>,
    /// Default the offense to collecting the defense's colors.
    #[arg(long)]
    play_defense: bool,
}

#[derive(Debug, Args)]
struct ProtectTilesArgs {
    /// Seed of the simulation.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Repetitions of the whole sweep.
    #[arg(long, default_value_t = 1000)]
    trials: u32,
    /// Full turns per game.
    #[arg(long, default_value_t = 20)]
    turns: u32,
    /// Largest number of protect tiles placed.
    #[arg(long, default_value_t = 64)]
    max_protect_tiles: usize,
    /// Strength shared evenly between the placed tiles.
    #[arg(long, default_value_t = 64)]
    total_strength: u32,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);
    let rules = load_rules(args.rules.as_deref())?;

    let stdout = io::stdout();
    let mut reporter = Reporter::new(stdout.lock(), args.json);

    match args.command {
        Command::UntilStuck { seed, print_board } => {
            drivers::until_stuck(&rules, seed, print_board, &mut reporter)
        }
        Command::ApDuel(duel) => drivers::ap_duel(&rules, &duel.into_settings(), &mut reporter),
        Command::ProtectTiles(sweep) => drivers::protect_tiles(
            &rules,
            &ProtectTiles {
                seed: sweep.seed,
                trials: sweep.trials,
                turns: sweep.turns,
                max_protect_tiles: sweep.max_protect_tiles,
                total_strength: sweep.total_strength,
            },
            &mut reporter,
        ),
    }
}

impl ApDuelArgs {
    fn into_settings(self) -> ApDuel {
        let offense_default = if self.play_defense {
            DEFENSIVE_OFFENSE_POOLS
        } else {
            OFFENSE_POOLS
        };
        ApDuel {
            seed: self.seed,
            turns: self.turns,
            offense_pools: or_default(self.offense_colors, offense_default),
            defense_pools: or_default(self.defense_colors, DEFENSE_POOLS),
        }
    }
}

fn or_default(pools: Vec<ApPool>, codes: &[&str]) -> Vec<ApPool> {
    if !pools.is_empty() {
        return pools;
    }
    codes
        .iter()
        .filter_map(|code| ApPool::from_code(code))
        .collect()
}

fn parse_pool(code: &str) -> Result<ApPool, String> {
    ApPool::from_code(code).ok_or_else(|| format!("unknown AP pool `{code}`"))
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file at {}", path.display()))?;
    parse_rules(&contents).with_context(|| format!("invalid rules file at {}", path.display()))
}

fn parse_rules(contents: &str) -> Result<Rules> {
    let rules: Rules = toml::from_str(contents).context("failed to parse rules toml contents")?;
    rules.validate()?;
    Ok(rules)
}
