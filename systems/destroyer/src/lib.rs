#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Replaces matched tiles with empty squares.
//!
//! Besides the matched squares themselves, any row or column whose extent
//! within a match reaches the line-clear threshold is emptied entirely. The
//! input board is never touched so callers can still read the destroyed
//! tiles from it.

use std::collections::BTreeSet;

use match3_sim_board::Board;
use match3_sim_core::{Match, Rules, Square, Tile};
use match3_sim_system_matching::find_matches;

/// Board after destruction together with every emptied square.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destruction {
    /// Copy of the input with destroyed squares emptied.
    pub board: Board,
    /// Destroyed squares, sorted and deduplicated.
    pub destroyed: Vec<Square>,
}

/// Finds the board's matches and destroys them. A board without matches comes back unchanged.
#[must_use]
pub fn destroy_tiles(board: &Board, rules: &Rules) -> Destruction {
    let matches = find_matches(board, rules);
    destroy_matches(board, &matches, rules)
}

/// Destroys the provided matches plus their line-clear bonuses.
#[must_use]
pub fn destroy_matches(board: &Board, matches: &[Match], rules: &Rules) -> Destruction {
    let side = board.side();
    let mut destroyed = BTreeSet::new();

    for matched in matches {
        destroyed.extend(matched.squares().iter().copied());

        for row in matched.row_extents(rules.min_line_clear).into_keys() {
            destroyed.extend((0..side).map(|col| Square::new(row, col)));
        }
        for col in matched.col_extents(rules.min_line_clear).into_keys() {
            destroyed.extend((0..side).map(|row| Square::new(row, col)));
        }
    }

    let mut next = board.clone();
    for square in &destroyed {
        next.set(*square, Tile::Empty);
    }

    Destruction {
        board: next,
        destroyed: destroyed.into_iter().collect(),
    }
}
