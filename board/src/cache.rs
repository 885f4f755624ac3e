//! Memoization of board-dependent queries.

use std::collections::HashMap;

use match3_sim_core::{Match, Move};

use crate::{Board, Fingerprint};

/// Query whose result is memoized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Full, combined match discovery.
    FindMatches,
    /// Early-exit match discovery.
    ProbeMatches,
    /// Full move enumeration.
    FindMoves,
    /// Early-exit move enumeration.
    ProbeMoves,
}

/// Cache key: the query, the board contents and the query's extra parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Query being memoized.
    pub operation: Operation,
    /// Contents of the board the query ran against.
    pub fingerprint: Fingerprint,
    /// Early-exit limit, if any.
    pub extra: Option<usize>,
}

impl CacheKey {
    /// Builds the key for running `operation` against `board`.
    #[must_use]
    pub fn new(operation: Operation, board: &Board, extra: Option<usize>) -> Self {
        Self {
            operation,
            fingerprint: board.fingerprint(),
            extra,
        }
    }
}

/// Hit and miss counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
}

#[derive(Clone, Debug)]
enum Entry {
    Matches(Vec<Match>),
    Moves(Vec<Move>),
}

/// Memo table owned by a single simulation.
///
/// Entries never expire; call [`BoardCache::clear`] between independent
/// games. An empty result is a valid entry and is served as a hit.
#[derive(Clone, Debug, Default)]
pub struct BoardCache {
    entries: HashMap<CacheKey, Entry>,
    stats: CacheStats,
}

impl BoardCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Previously stored matches for the key.
    pub fn matches(&mut self, key: &CacheKey) -> Option<Vec<Match>> {
        let found = match self.entries.get(key) {
            Some(Entry::Matches(matches)) => Some(matches.clone()),
            _ => None,
        };
        self.record(found.is_some());
        found
    }

    /// Stores matches under the key.
    pub fn store_matches(&mut self, key: CacheKey, matches: Vec<Match>) {
        let _ = self.entries.insert(key, Entry::Matches(matches));
    }

    /// Previously stored moves for the key.
    pub fn moves(&mut self, key: &CacheKey) -> Option<Vec<Move>> {
        let found = match self.entries.get(key) {
            Some(Entry::Moves(moves)) => Some(moves.clone()),
            _ => None,
        };
        self.record(found.is_some());
        found
    }

    /// Stores moves under the key.
    pub fn store_moves(&mut self, key: CacheKey, moves: Vec<Move>) {
        let _ = self.entries.insert(key, Entry::Moves(moves));
    }

    /// Drops every entry and resets the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats = CacheStats::default();
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hit and miss counters since creation or the last clear.
    #[must_use]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    fn record(&mut self, hit: bool) {
        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
    }
}
