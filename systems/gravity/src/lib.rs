#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Compacts tiles downward into empty squares.

use match3_sim_board::Board;
use match3_sim_core::Square;

/// A tile that came to rest on a different square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fall {
    /// Square the tile started on.
    pub from: Square,
    /// Square the tile landed on.
    pub to: Square,
}

/// Board after gravity plus every tile that moved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GravityOutcome {
    /// Copy of the input with tiles settled.
    pub board: Board,
    /// Moved tiles sorted by starting square.
    pub moved: Vec<Fall>,
}

/// Lets every tile fall into the lowest empty square beneath it.
///
/// Squares are visited from the bottom-right corner; an empty square swaps
/// with the nearest non-empty tile above it, so no tile moves twice. Applying
/// gravity to a settled board is a no-op with no moves.
#[must_use]
pub fn apply_gravity(board: &Board) -> GravityOutcome {
    let mut next = board.clone();
    let mut moved = Vec::new();

    for square in board.squares_from_bottom_right() {
        if !next.at(square).is_empty() {
            continue;
        }

        let above = (0..square.row)
            .rev()
            .map(|row| Square::new(row, square.col))
            .find(|candidate| !next.at(*candidate).is_empty());
        if let Some(from) = above {
            next.swap(square, from);
            moved.push(Fall { from, to: square });
        }
    }

    moved.sort();
    GravityOutcome { board: next, moved }
}
