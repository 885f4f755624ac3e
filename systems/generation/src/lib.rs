#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random tile spawning and stable starting boards.

use std::num::NonZeroUsize;

use match3_sim_board::Board;
use match3_sim_core::{Color, Randomness, Rules, RulesError, Square, Tile};
use match3_sim_system_matching::find_matches_at;
use match3_sim_system_moves::probe_moves;
use match3_sim_system_settler::Refill;
use thiserror::Error;
use tracing::debug;

const SPAWNABLE: [Tile; 7] = [
    Tile::Colored(Color::Yellow),
    Tile::Colored(Color::Blue),
    Tile::Colored(Color::Black),
    Tile::Colored(Color::Purple),
    Tile::Colored(Color::Red),
    Tile::Colored(Color::Green),
    Tile::Teamup,
];

/// Reasons random generation gives up.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Rules failed validation.
    #[error(transparent)]
    Rules(#[from] RulesError),
    /// Every spawn tried on a square completed a match.
    #[error("square {square} still completed a match after {attempts} spawns")]
    UnstableSquare {
        /// Square that could not be filled.
        square: Square,
        /// Spawns tried on the square.
        attempts: usize,
    },
    /// Every generated board was stuck.
    #[error("no generated board had a legal move after {attempts} boards")]
    NoMoveAvailable {
        /// Boards generated.
        attempts: usize,
    },
}

/// A uniformly chosen plain colored tile, or a team-up when allowed.
pub fn spawn_tile(rng: &mut dyn Randomness, include_teamups: bool) -> Tile {
    let choices = if include_teamups {
        &SPAWNABLE[..]
    } else {
        &SPAWNABLE[..Color::ALL.len()]
    };
    choices[rng.pick_index(choices.len())]
}

/// Spawns a tile into every empty square, visiting from the bottom-right corner.
pub fn fill_empty_squares(
    board: &mut Board,
    rng: &mut dyn Randomness,
    include_teamups: bool,
) -> Vec<Square> {
    let empty: Vec<Square> = board
        .squares_from_bottom_right()
        .filter(|square| board.at(*square).is_empty())
        .collect();
    for square in &empty {
        board.set(*square, spawn_tile(rng, include_teamups));
    }
    empty
}

/// Refill that spawns random tiles after every cascade pass.
#[derive(Clone, Copy, Debug)]
pub struct RandomRefill {
    include_teamups: bool,
}

impl RandomRefill {
    /// Creates the refill.
    #[must_use]
    pub const fn new(include_teamups: bool) -> Self {
        Self { include_teamups }
    }
}

impl Refill for RandomRefill {
    fn refill(&mut self, board: &mut Board, rng: &mut dyn Randomness) -> Vec<Square> {
        fill_empty_squares(board, rng, self.include_teamups)
    }
}

/// Random board of `rules.board_side` with no matches and at least one legal move.
///
/// Squares are filled from the bottom-right corner, respawning each until it
/// completes no match. Stuck boards are discarded and regenerated.
///
/// # Errors
///
/// Fails when `rules` are inconsistent, or when a square or a whole board
/// exhausts `rules.max_generation_attempts`.
pub fn rand_stable_board(
    rules: &Rules,
    rng: &mut dyn Randomness,
    include_teamups: bool,
) -> Result<Board, GenerationError> {
    rules.validate()?;
    let attempts = rules.max_generation_attempts;

    for attempt in 1..=attempts {
        let mut board = Board::empty(rules.board_side);
        let squares: Vec<Square> = board.squares_from_bottom_right().collect();
        for square in squares {
            fill_stably(&mut board, square, rules, rng, include_teamups)?;
        }

        if !probe_moves(&board, NonZeroUsize::MIN, rules).is_empty() {
            debug!(attempt, "generated stable board");
            return Ok(board);
        }
        debug!(attempt, "generated board is stuck; retrying");
    }

    Err(GenerationError::NoMoveAvailable { attempts })
}

fn fill_stably(
    board: &mut Board,
    square: Square,
    rules: &Rules,
    rng: &mut dyn Randomness,
    include_teamups: bool,
) -> Result<(), GenerationError> {
    let attempts = rules.max_generation_attempts;
    for _ in 0..attempts {
        board.set(square, spawn_tile(rng, include_teamups));
        if find_matches_at(board, square, rules).is_empty() {
            return Ok(());
        }
    }
    Err(GenerationError::UnstableSquare { square, attempts })
}
