#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Chooses the square inside a large match that becomes a critical tile.

use match3_sim_core::{choose, Match, Randomness, Rules, Square};

/// Square of `matched` that should hold the spawned critical, if any.
///
/// Matches with fewer than `rules.min_critical` tiles spawn nothing. A single
/// straight line picks its middle square, taking the left or top one of the
/// two central squares for even lengths. Irregular shapes pick their first
/// junction in row-major order; a junction is a square with a matched
/// neighbour in its own row and another in its own column. Shapes without
/// junctions fall back to a uniform pick.
pub fn critical_square<R>(matched: &Match, rules: &Rules, rng: &mut R) -> Option<Square>
where
    R: Randomness + ?Sized,
{
    if matched.tile_count() < rules.min_critical {
        return None;
    }

    let squares = matched.squares();
    if matched.is_straight_row() || matched.is_straight_col() {
        return squares.get((squares.len() - 1) / 2).copied();
    }

    if let Some(junction) = squares
        .iter()
        .copied()
        .find(|square| is_junction(matched, *square))
    {
        return Some(junction);
    }

    choose(rng, squares).copied()
}

fn is_junction(matched: &Match, square: Square) -> bool {
    let in_match = |row: Option<usize>, col: Option<usize>| match (row, col) {
        (Some(row), Some(col)) => matched.contains(Square::new(row, col)),
        _ => false,
    };

    let row_neighbour = in_match(Some(square.row), square.col.checked_sub(1))
        || in_match(Some(square.row), Some(square.col + 1));
    let col_neighbour = in_match(square.row.checked_sub(1), Some(square.col))
        || in_match(Some(square.row + 1), Some(square.col));
    row_neighbour && col_neighbour
}
