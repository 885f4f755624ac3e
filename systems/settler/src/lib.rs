#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Drives a board to a stable state.
//!
//! Each cascade pass finds every match, destroys it, drops a critical tile
//! into each match large enough to earn one, lets gravity settle the
//! survivors and finally hands the board to a [`Refill`]. Passes repeat until
//! no match remains.

use match3_sim_board::Board;
use match3_sim_core::{Match, Randomness, Rules, Square, Tile};
use match3_sim_system_criticals::critical_square;
use match3_sim_system_destroyer::destroy_matches;
use match3_sim_system_gravity::{apply_gravity, Fall};
use match3_sim_system_matching::find_matches;
use tracing::{debug, trace};

/// Source of new tiles for squares left empty after gravity.
pub trait Refill {
    /// Fills empty squares in place and returns the squares that were filled.
    fn refill(&mut self, board: &mut Board, rng: &mut dyn Randomness) -> Vec<Square>;
}

/// Leaves empty squares empty.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRefill;

impl Refill for NoRefill {
    fn refill(&mut self, _board: &mut Board, _rng: &mut dyn Randomness) -> Vec<Square> {
        Vec::new()
    }
}

/// Everything that happened during one cascade pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadePass {
    /// Matches found at the start of the pass.
    pub matches: Vec<Match>,
    /// Destroyed squares with the tiles they held before destruction.
    pub destroyed: Vec<(Square, Tile)>,
    /// Squares that received a critical tile.
    pub criticals: Vec<Square>,
    /// Tiles moved by gravity.
    pub moved: Vec<Fall>,
    /// Squares filled by the refill.
    pub refilled: Vec<Square>,
}

impl CascadePass {
    /// Reports whether any match in the pass reached the extent.
    #[must_use]
    pub fn has_extent_at_least(&self, extent: usize) -> bool {
        self.matches
            .iter()
            .any(|matched| matched.has_extent_at_least(extent))
    }
}

/// Stable board plus the passes that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settlement {
    /// Board without matches.
    pub board: Board,
    /// Passes in the order they ran; empty when the input was already stable.
    pub passes: Vec<CascadePass>,
}

/// Settles the board without refilling and discards the trace.
#[must_use]
pub fn settle(board: &Board, rules: &Rules, rng: &mut dyn Randomness) -> Board {
    settle_with_trace(board, rules, rng, &mut NoRefill).board
}

/// Settles the board and records every cascade pass.
pub fn settle_with_trace(
    board: &Board,
    rules: &Rules,
    rng: &mut dyn Randomness,
    refill: &mut dyn Refill,
) -> Settlement {
    let mut current = board.clone();
    let mut passes = Vec::new();

    loop {
        let matches = find_matches(&current, rules);
        if matches.is_empty() {
            break;
        }

        let destruction = destroy_matches(&current, &matches, rules);
        let destroyed: Vec<(Square, Tile)> = destruction
            .destroyed
            .iter()
            .map(|square| (*square, current.at(*square)))
            .collect();

        let mut next = destruction.board;
        let criticals: Vec<Square> = matches
            .iter()
            .filter_map(|matched| critical_square(matched, rules, &mut *rng))
            .collect();
        for square in &criticals {
            next.set(*square, Tile::Critical);
        }

        let gravity = apply_gravity(&next);
        let mut settled = gravity.board;
        let refilled = refill.refill(&mut settled, &mut *rng);

        debug!(
            pass = passes.len(),
            matches = matches.len(),
            destroyed = destroyed.len(),
            criticals = criticals.len(),
            refilled = refilled.len(),
            "cascade pass"
        );
        trace!(board = %settled, "board after cascade pass");

        passes.push(CascadePass {
            matches,
            destroyed,
            criticals,
            moved: gravity.moved,
            refilled,
        });
        current = settled;
    }

    Settlement {
        board: current,
        passes,
    }
}
