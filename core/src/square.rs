//! Board coordinates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a single square measured in rows from the top and columns from the left.
///
/// Ordering is row-major, which is the canonical order used for sorted match
/// and move listings.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Square {
    /// Zero-based row index.
    pub row: usize,
    /// Zero-based column index.
    pub col: usize,
}

impl Square {
    /// Creates a new square coordinate.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Reports whether the square lies inside a board with the provided side length.
    #[must_use]
    pub const fn is_within(self, side: usize) -> bool {
        self.row < side && self.col < side
    }

    /// In-bounds orthogonal neighbours, sorted.
    ///
    /// Candidates are probed down, up, right, then left before sorting, so a
    /// square has at most four neighbours and fewer on edges and corners.
    #[must_use]
    pub fn neighbors(self, side: usize) -> Vec<Square> {
        let mut neighbors: Vec<Square> = [
            self.row.checked_add(1).map(|row| Square::new(row, self.col)),
            self.row.checked_sub(1).map(|row| Square::new(row, self.col)),
            self.col.checked_add(1).map(|col| Square::new(self.row, col)),
            self.col.checked_sub(1).map(|col| Square::new(self.row, col)),
        ]
        .into_iter()
        .flatten()
        .filter(|square| square.is_within(side))
        .collect();
        neighbors.sort();
        neighbors
    }

    /// Reports whether the two squares share an edge.
    #[must_use]
    pub const fn is_adjacent(self, other: Square) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
