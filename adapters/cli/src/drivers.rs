//! Monte-Carlo drivers behind each subcommand.

use std::io::Write;

use anyhow::{bail, Context, Result};
use match3_sim_board::Board;
use match3_sim_core::{shuffle, ApPool, Facing, Rules, SeededRandomness, Square, Tile};
use match3_sim_system_game::{stop_after_turns, Game, GameEvent, Player};
use match3_sim_system_generation::rand_stable_board;
use match3_sim_system_strategy::{AiEmulation, ApSeeking, NoMove, RandomMove};
use tracing::{debug, info};

use crate::report::{ApSnapshot, ProtectionRecord, Reporter, StuckRecord};

/// Settings of the AP duel driver.
#[derive(Clone, Debug)]
pub(crate) struct ApDuel {
    pub(crate) seed: u64,
    pub(crate) turns: u32,
    pub(crate) offense_pools: Vec<ApPool>,
    pub(crate) defense_pools: Vec<ApPool>,
}

/// Settings of the protect tile driver.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProtectTiles {
    pub(crate) seed: u64,
    pub(crate) trials: u32,
    pub(crate) turns: u32,
    pub(crate) max_protect_tiles: usize,
    pub(crate) total_strength: u32,
}

/// Random offense against an idle defense until no move is left.
pub(crate) fn until_stuck<W: Write>(
    rules: &Rules,
    seed: u64,
    print_board: bool,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let mut rng = SeededRandomness::new(seed);
    let board = rand_stable_board(rules, &mut rng, true).context("failed to generate a board")?;
    let mut game = Game::new(
        board,
        Player::new(RandomMove),
        Player::new(NoMove),
        *rules,
        rng,
    )?;

    let mut events = Vec::new();
    while !game.is_stuck() {
        if print_board {
            eprintln!("***\n{}\n{}\n***", game.board(), game.board().fingerprint());
        }
        game.step(&mut events)?;
        events.clear();
    }

    info!(seed, turns = game.turn_count(), "board is stuck");
    reporter.emit(&StuckRecord {
        seed,
        turn_count: game.turn_count(),
        move_count: game.move_count(),
    })
}

/// AP-seeking offense against the AI emulation, reporting standings before every move.
pub(crate) fn ap_duel<W: Write>(
    rules: &Rules,
    duel: &ApDuel,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let mut rng = SeededRandomness::new(duel.seed);
    let board = rand_stable_board(rules, &mut rng, true).context("failed to generate a board")?;
    let mut game = Game::new(
        board,
        Player::new(ApSeeking::new(duel.offense_pools.clone())),
        Player::new(AiEmulation::new(duel.defense_pools.iter().copied())),
        *rules,
        rng,
    )?;

    reporter.note(&format!("O play colors: {}", join(&duel.offense_pools)))?;
    reporter.note(&format!("D colors: {}", join(&duel.defense_pools)))?;
    reporter.note("---")?;

    let mut stop = stop_after_turns::<SeededRandomness>(duel.turns);
    let mut events = Vec::new();
    while !stop(&game) {
        reporter.emit(&ApSnapshot::capture(&game))?;
        game.step(&mut events)?;
        let extra = events
            .iter()
            .filter(|event| matches!(event, GameEvent::ExtraMove { .. }))
            .count();
        debug!(move_count = game.move_count(), extra, "duel move");
        events.clear();
    }
    Ok(())
}

/// Every protect tile count from one to the maximum, repeated per trial.
pub(crate) fn protect_tiles<W: Write>(
    rules: &Rules,
    settings: &ProtectTiles,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let squares = rules.board_side * rules.board_side;
    if settings.max_protect_tiles == 0 || settings.max_protect_tiles > squares {
        bail!(
            "--max-protect-tiles must be between 1 and {squares}, got {}",
            settings.max_protect_tiles
        );
    }

    let mut rng = SeededRandomness::new(settings.seed);
    for trial in 0..settings.trials {
        for count in 1..=settings.max_protect_tiles {
            let sim_id = format!("{count}-{trial}");
            protect_tile_game(rules, settings, count, &sim_id, &mut rng, reporter)
                .with_context(|| format!("simulation {sim_id} failed"))?;
        }
    }
    Ok(())
}

fn protect_tile_game<W: Write>(
    rules: &Rules,
    settings: &ProtectTiles,
    count: usize,
    sim_id: &str,
    rng: &mut SeededRandomness,
    reporter: &mut Reporter<W>,
) -> Result<()> {
    let mut board = rand_stable_board(rules, &mut *rng, false)?;
    place_protect_tiles(
        &mut board,
        u32::try_from(count)?,
        settings.total_strength,
        &mut *rng,
    );

    let defense = AiEmulation::new(
        ["G", "Y", "R", "BL", "P", "T"]
            .into_iter()
            .filter_map(ApPool::from_code),
    );
    let mut game = Game::new(
        board,
        Player::new(RandomMove),
        Player::new(defense),
        *rules,
        &mut *rng,
    )?;

    let mut stop = stop_after_turns::<&mut SeededRandomness>(settings.turns);
    let mut events = Vec::new();
    while !stop(&game) {
        reporter.emit(&ProtectionRecord {
            sim_id: sim_id.to_owned(),
            num_tiles: count,
            move_count: game.move_count(),
            total_protection: game.board().total_protection(Facing::Offense),
        })?;
        game.step(&mut events)?;
        events.clear();
    }
    Ok(())
}

/// Turns `count` randomly chosen tiles into offense-facing protect tiles of their own color.
///
/// The strengths add up to `total_strength`; the first `total_strength % count` tiles
/// placed carry one point more than the rest.
fn place_protect_tiles(
    board: &mut Board,
    count: u32,
    total_strength: u32,
    rng: &mut SeededRandomness,
) {
    if count == 0 {
        return;
    }
    let base = total_strength / count;
    let remainder = total_strength % count;

    let mut squares: Vec<Square> = board.squares_from_bottom_right().collect();
    shuffle(rng, &mut squares);

    for (placed, square) in (0..count).zip(squares) {
        if let Some(color) = board.at(square).color() {
            board.set(
                square,
                Tile::Protect {
                    color,
                    facing: Facing::Offense,
                    strength: base + u32::from(placed < remainder),
                },
            );
        }
    }
}

fn join(pools: &[ApPool]) -> String {
    pools
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
