#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enumerates every legal adjacent swap and the matches it creates.
//!
//! A swap is legal when the board holds at least one match afterwards. Both
//! directions of a swap are listed separately because the touched tile
//! matters to callers even though the resulting boards are identical.

use std::num::NonZeroUsize;

use match3_sim_board::{Board, BoardCache, CacheKey, Operation};
use match3_sim_core::{Move, Rules, Swap};
use match3_sim_system_matching::find_matches;

/// Every legal move, sorted by swap.
#[must_use]
pub fn find_moves(board: &Board, rules: &Rules) -> Vec<Move> {
    scan(board, rules, None)
}

/// Memoized [`find_moves`].
pub fn find_moves_cached(board: &Board, rules: &Rules, cache: &mut BoardCache) -> Vec<Move> {
    let key = CacheKey::new(Operation::FindMoves, board, None);
    if let Some(moves) = cache.moves(&key) {
        return moves;
    }

    let moves = find_moves(board, rules);
    cache.store_moves(key, moves.clone());
    moves
}

/// Up to `limit` legal moves, sorted, found by scanning from the bottom-right corner.
///
/// The list is complete only when it is shorter than `limit`; reverse
/// directions of the returned swaps may be missing.
#[must_use]
pub fn probe_moves(board: &Board, limit: NonZeroUsize, rules: &Rules) -> Vec<Move> {
    scan(board, rules, Some(limit))
}

/// Memoized [`probe_moves`].
pub fn probe_moves_cached(
    board: &Board,
    limit: NonZeroUsize,
    rules: &Rules,
    cache: &mut BoardCache,
) -> Vec<Move> {
    let key = CacheKey::new(Operation::ProbeMoves, board, Some(limit.get()));
    if let Some(moves) = cache.moves(&key) {
        return moves;
    }

    let moves = probe_moves(board, limit, rules);
    cache.store_moves(key, moves.clone());
    moves
}

/// Reports whether any legal move exists.
pub fn has_move(board: &Board, rules: &Rules, cache: &mut BoardCache) -> bool {
    !probe_moves_cached(board, NonZeroUsize::MIN, rules, cache).is_empty()
}

fn scan(board: &Board, rules: &Rules, limit: Option<NonZeroUsize>) -> Vec<Move> {
    let mut scratch = board.clone();
    let mut moves = Vec::new();

    'squares: for from in board.squares_from_bottom_right() {
        for to in from.neighbors(board.side()) {
            scratch.swap(from, to);
            let matches = find_matches(&scratch, rules);
            scratch.swap(from, to);

            if matches.is_empty() {
                continue;
            }
            moves.push(Move::new(Swap::new(from, to), matches));
            if limit.map_or(false, |limit| moves.len() >= limit.get()) {
                break 'squares;
            }
        }
    }

    moves.sort();
    moves
}
