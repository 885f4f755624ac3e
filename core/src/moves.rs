//! Swap requests and the matches they produce.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Match, Square};

/// Request to exchange the tiles on two adjacent squares.
///
/// `from` is the touched tile; the direction matters to scoring even though
/// both orders produce structurally identical boards.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Swap {
    /// Square of the tile the player picked up.
    pub from: Square,
    /// Square the tile is dropped on.
    pub to: Square,
}

impl Swap {
    /// Creates a swap between two squares.
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// The same swap performed from the other side.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

impl fmt::Display for Swap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Legal swap together with every match it creates.
///
/// Ordering follows the swap first, so sorted move lists are in canonical
/// (from, to) order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    swap: Swap,
    matches: Vec<Match>,
}

impl Move {
    /// Creates a move record.
    #[must_use]
    pub fn new(swap: Swap, matches: Vec<Match>) -> Self {
        Self { swap, matches }
    }

    /// Swap performed by the move.
    #[must_use]
    pub const fn swap(&self) -> Swap {
        self.swap
    }

    /// Matches present on the board after the swap.
    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.matches
    }
}

/// A move narrowed to a single one of its matches.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MoveOption {
    /// Swap that creates the match.
    pub swap: Swap,
    /// One match created by the swap.
    pub matched: Match,
}

/// Expands every move into one record per match it creates, preserving order.
#[must_use]
pub fn explode(moves: &[Move]) -> Vec<MoveOption> {
    moves
        .iter()
        .flat_map(|candidate| {
            candidate.matches().iter().map(move |matched| MoveOption {
                swap: candidate.swap(),
                matched: matched.clone(),
            })
        })
        .collect()
}
