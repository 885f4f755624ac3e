#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Move selection contract and the reference strategies.
//!
//! A strategy sees an immutable [`GameView`] and a [`Context`] carrying the
//! rules, the game's board cache and its randomness. It answers with the swap
//! it wants to play, or `None` when it cannot or will not move.

use std::collections::BTreeSet;
use std::fmt;

use match3_sim_board::{Board, BoardCache};
use match3_sim_core::{choose, explode, ApPool, Facing, Randomness, Rules, Swap};
use match3_sim_system_matching::dominant_pool;
use match3_sim_system_moves::find_moves_cached;
use match3_sim_system_settler::{settle_with_trace, NoRefill};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Participant in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Moves first.
    Offense,
    /// Moves second.
    Defense,
}

impl Side {
    /// The other participant.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Offense => Self::Defense,
            Self::Defense => Self::Offense,
        }
    }

    /// Facing of special tiles that work for this side.
    #[must_use]
    pub const fn facing(self) -> Facing {
        match self {
            Self::Offense => Facing::Offense,
            Self::Defense => Facing::Defense,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offense => f.write_str("offense"),
            Self::Defense => f.write_str("defense"),
        }
    }
}

/// Read-only snapshot handed to strategies.
#[derive(Clone, Copy, Debug)]
pub struct GameView<'a> {
    /// Current board.
    pub board: &'a Board,
    /// Moves attempted so far, including the one being chosen.
    pub move_count: u32,
    /// Current turn, starting at one.
    pub turn_count: u32,
    /// Side choosing the move.
    pub to_move: Side,
}

/// Services a strategy may use while choosing.
pub struct Context<'a> {
    /// Thresholds in force.
    pub rules: &'a Rules,
    /// Cache shared with the rest of the game.
    pub cache: &'a mut BoardCache,
    /// Randomness for tie breaks.
    pub rng: &'a mut dyn Randomness,
}

/// Move selection policy.
pub trait Strategy: fmt::Debug {
    /// Chooses a swap, or `None` when no move is available or wanted.
    fn pick_move(&mut self, view: &GameView<'_>, context: &mut Context<'_>) -> Option<Swap>;
}

/// Never moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMove;

impl Strategy for NoMove {
    fn pick_move(&mut self, _view: &GameView<'_>, _context: &mut Context<'_>) -> Option<Swap> {
        None
    }
}

/// Plays the first legal move in canonical order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstMove;

impl Strategy for FirstMove {
    fn pick_move(&mut self, view: &GameView<'_>, context: &mut Context<'_>) -> Option<Swap> {
        find_moves_cached(view.board, context.rules, context.cache)
            .first()
            .map(|candidate| candidate.swap())
    }
}

/// Plays a uniformly random legal move.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomMove;

impl Strategy for RandomMove {
    fn pick_move(&mut self, view: &GameView<'_>, context: &mut Context<'_>) -> Option<Swap> {
        let moves = find_moves_cached(view.board, context.rules, context.cache);
        choose(&mut *context.rng, &moves).map(|candidate| candidate.swap())
    }
}

/// Greedy AP collector with a strict preference order over pools.
///
/// Every legal move is played out on a copy of the board through the full
/// cascade without refills; the move whose AP vector (in preference order)
/// is lexicographically greatest wins, ties going to the earliest move.
#[derive(Clone, Debug)]
pub struct ApSeeking {
    pools: Vec<ApPool>,
}

impl ApSeeking {
    /// Creates the strategy; earlier pools are preferred.
    #[must_use]
    pub fn new(pools: Vec<ApPool>) -> Self {
        Self { pools }
    }
}

impl Strategy for ApSeeking {
    fn pick_move(&mut self, view: &GameView<'_>, context: &mut Context<'_>) -> Option<Swap> {
        let moves = find_moves_cached(view.board, context.rules, context.cache);
        let mut best: Option<(Vec<u32>, Swap)> = None;

        for candidate in &moves {
            let gained = simulated_ap(
                view.board,
                candidate.swap(),
                &self.pools,
                context.rules,
                &mut *context.rng,
            );
            trace!(swap = %candidate.swap(), ?gained, "scored move");
            let better = best.as_ref().map_or(true, |(score, _)| gained > *score);
            if better {
                best = Some((gained, candidate.swap()));
            }
        }

        best.map(|(_, swap)| swap)
    }
}

/// AP per pool, in the order of `pools`, earned by playing `swap` and letting the board settle.
#[must_use]
pub fn simulated_ap(
    board: &Board,
    swap: Swap,
    pools: &[ApPool],
    rules: &Rules,
    rng: &mut dyn Randomness,
) -> Vec<u32> {
    let mut scratch = board.clone();
    scratch.swap(swap.from, swap.to);

    let mut gained = vec![0; pools.len()];
    let settlement = settle_with_trace(&scratch, rules, rng, &mut NoRefill);
    for (_, tile) in settlement
        .passes
        .iter()
        .flat_map(|pass| pass.destroyed.iter())
    {
        let Some(ap) = tile.ap() else {
            continue;
        };
        if let Some(index) = pools.iter().position(|pool| *pool == ap.pool) {
            gained[index] += ap.amount;
        }
    }
    gained
}

/// Emulation of the opposing AI.
///
/// Moves are exploded into one option per match. Options reaching the
/// longest row or column extent survive; among those, options whose match
/// belongs to a preferred pool win when any exist; the final pick is uniform.
#[derive(Clone, Debug)]
pub struct AiEmulation {
    pools: BTreeSet<ApPool>,
}

impl AiEmulation {
    /// Creates the strategy preferring the provided pools.
    #[must_use]
    pub fn new(pools: impl IntoIterator<Item = ApPool>) -> Self {
        Self {
            pools: pools.into_iter().collect(),
        }
    }
}

impl Strategy for AiEmulation {
    fn pick_move(&mut self, view: &GameView<'_>, context: &mut Context<'_>) -> Option<Swap> {
        let moves = find_moves_cached(view.board, context.rules, context.cache);
        let options = explode(&moves);

        let longest = options
            .iter()
            .map(|option| option.matched.longest_extent())
            .max()?;
        let widest: Vec<_> = options
            .into_iter()
            .filter(|option| option.matched.longest_extent() == longest)
            .collect();

        let preferred: Vec<_> = widest
            .iter()
            .filter(|option| {
                let mut swapped = view.board.clone();
                swapped.swap(option.swap.from, option.swap.to);
                dominant_pool(&swapped, &option.matched)
                    .map_or(false, |pool| self.pools.contains(&pool))
            })
            .cloned()
            .collect();
        let shortlist = if preferred.is_empty() {
            widest
        } else {
            preferred
        };

        choose(&mut *context.rng, &shortlist).map(|option| option.swap)
    }
}
