#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure match discovery over a board.
//!
//! Every square is probed in four directions for runs of mutually matching
//! tiles. The resulting candidates are then merged: two candidates sharing a
//! square whose tiles all match pairwise become one irregular match, so crosses
//! and corners resolve to a single logical match.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use match3_sim_board::{Board, BoardCache, CacheKey, Operation};
use match3_sim_core::{ApPool, Match, Rules, Square};

/// Direction a run is walked in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards column zero.
    Left,
    /// Towards the last column.
    Right,
    /// Towards the last row.
    Down,
    /// Towards row zero.
    Up,
}

impl Heading {
    /// Every heading in probing order.
    pub const ALL: [Heading; 4] = [Heading::Left, Heading::Right, Heading::Down, Heading::Up];

    /// The square one step along the heading, if it lies on a board of `side`.
    #[must_use]
    pub fn step(self, square: Square, side: usize) -> Option<Square> {
        let next = match self {
            Self::Left => Square::new(square.row, square.col.checked_sub(1)?),
            Self::Right => Square::new(square.row, square.col + 1),
            Self::Down => Square::new(square.row + 1, square.col),
            Self::Up => Square::new(square.row.checked_sub(1)?, square.col),
        };
        next.is_within(side).then_some(next)
    }
}

/// Walks from `start` along `heading` while every tile collected so far matches the next one.
///
/// Returns the run when it reaches the minimum match length.
#[must_use]
pub fn find_run(board: &Board, start: Square, heading: Heading, rules: &Rules) -> Option<Match> {
    let mut run = vec![start];
    let mut cursor = start;
    while let Some(next) = heading.step(cursor, board.side()) {
        let candidate = board.at(next);
        if !run.iter().all(|square| board.at(*square).matches(&candidate)) {
            break;
        }
        run.push(next);
        cursor = next;
    }

    (run.len() >= rules.min_match).then(|| Match::new(run))
}

/// Directional runs starting at one square, sorted and uncombined.
#[must_use]
pub fn find_matches_at(board: &Board, square: Square, rules: &Rules) -> Vec<Match> {
    let mut runs: Vec<Match> = Heading::ALL
        .into_iter()
        .filter_map(|heading| find_run(board, square, heading, rules))
        .collect();
    runs.sort();
    runs
}

/// Every maximal match on the board, sorted. Empty when the board is stable.
#[must_use]
pub fn find_matches(board: &Board, rules: &Rules) -> Vec<Match> {
    let mut candidates = BTreeSet::new();
    for square in board.squares() {
        candidates.extend(find_matches_at(board, square, rules));
    }
    combine_all(board, candidates.into_iter().collect())
}

/// Memoized [`find_matches`].
pub fn find_matches_cached(board: &Board, rules: &Rules, cache: &mut BoardCache) -> Vec<Match> {
    let key = CacheKey::new(Operation::FindMatches, board, None);
    if let Some(matches) = cache.matches(&key) {
        return matches;
    }

    let matches = find_matches(board, rules);
    cache.store_matches(key, matches.clone());
    matches
}

/// Uncombined candidates gathered by an early-exit scan.
///
/// The candidates are not maximal: a probe answers "is there a match?" and
/// must not feed scoring. Use [`find_matches`] for the real match set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchProbe {
    candidates: Vec<Match>,
}

impl MatchProbe {
    /// Reports whether the scan found nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidates found before the scan stopped.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Raw candidates in sorted order.
    #[must_use]
    pub fn candidates(&self) -> &[Match] {
        &self.candidates
    }
}

/// Scans row by row and stops as soon as `limit` distinct candidates exist.
#[must_use]
pub fn probe_matches(board: &Board, limit: NonZeroUsize, rules: &Rules) -> MatchProbe {
    let mut candidates = BTreeSet::new();
    for square in board.squares() {
        candidates.extend(find_matches_at(board, square, rules));
        if candidates.len() >= limit.get() {
            break;
        }
    }
    MatchProbe {
        candidates: candidates.into_iter().collect(),
    }
}

/// Memoized [`probe_matches`].
pub fn probe_matches_cached(
    board: &Board,
    limit: NonZeroUsize,
    rules: &Rules,
    cache: &mut BoardCache,
) -> MatchProbe {
    let key = CacheKey::new(Operation::ProbeMatches, board, Some(limit.get()));
    if let Some(candidates) = cache.matches(&key) {
        return MatchProbe { candidates };
    }

    let probe = probe_matches(board, limit, rules);
    cache.store_matches(key, probe.candidates.clone());
    probe
}

/// Reports whether the board holds at least one match.
#[must_use]
pub fn has_matches(board: &Board, rules: &Rules) -> bool {
    !probe_matches(board, NonZeroUsize::MIN, rules).is_empty()
}

/// Two matches merge when they overlap and every tile of one matches every tile of the other.
#[must_use]
pub fn can_combine(board: &Board, first: &Match, second: &Match) -> bool {
    first.shares_square(second)
        && first.squares().iter().all(|a| {
            let tile = board.at(*a);
            second
                .squares()
                .iter()
                .all(|b| tile.matches(&board.at(*b)))
        })
}

/// Merges candidates until no pair can combine, returning the sorted result.
///
/// Each candidate absorbs every already settled match it can combine with
/// before settling itself, so settled matches are pairwise uncombinable.
#[must_use]
pub fn combine_all(board: &Board, candidates: Vec<Match>) -> Vec<Match> {
    let mut pending = candidates;
    let mut settled: Vec<Match> = Vec::with_capacity(pending.len());

    while let Some(mut current) = pending.pop() {
        while let Some(index) = settled
            .iter()
            .position(|other| can_combine(board, &current, other))
        {
            let absorbed = settled.swap_remove(index);
            current = current.combine(&absorbed);
        }
        settled.push(current);
    }

    settled.sort();
    settled.dedup();
    settled
}

/// Pool credited by the match's non-critical tiles; `None` for an all-critical match.
#[must_use]
pub fn dominant_pool(board: &Board, matched: &Match) -> Option<ApPool> {
    matched
        .squares()
        .iter()
        .map(|square| board.at(*square))
        .find(|tile| !tile.is_critical())
        .and_then(|tile| tile.ap())
        .map(|ap| ap.pool)
}
