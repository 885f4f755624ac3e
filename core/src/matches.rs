//! Sets of matched squares and their geometric extents.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Square;

/// Immutable set of unique squares whose tiles mutually match.
///
/// Squares are kept sorted and deduplicated so equal coordinate sets compare
/// and hash equal regardless of discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Match {
    squares: Vec<Square>,
}

impl Match {
    /// Creates a match from the provided squares in any order.
    #[must_use]
    pub fn new(squares: impl IntoIterator<Item = Square>) -> Self {
        let mut squares: Vec<Square> = squares.into_iter().collect();
        squares.sort();
        squares.dedup();
        Self { squares }
    }

    /// Squares in canonical row-major order.
    #[must_use]
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Number of squares covered by the match.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.squares.len()
    }

    /// Reports whether the match covers the square.
    #[must_use]
    pub fn contains(&self, square: Square) -> bool {
        self.squares.binary_search(&square).is_ok()
    }

    /// Reports whether the two matches cover at least one common square.
    #[must_use]
    pub fn shares_square(&self, other: &Match) -> bool {
        other.squares.iter().any(|square| self.contains(*square))
    }

    /// Union of both matches.
    #[must_use]
    pub fn combine(&self, other: &Match) -> Match {
        Match::new(self.squares.iter().chain(other.squares.iter()).copied())
    }

    /// Reports whether this match is a strict superset of `other`.
    #[must_use]
    pub fn subsumes(&self, other: &Match) -> bool {
        self.tile_count() > other.tile_count()
            && other.squares.iter().all(|square| self.contains(*square))
    }

    /// Longest contiguous column run per row, keeping only rows reaching `min_extent`.
    #[must_use]
    pub fn row_extents(&self, min_extent: usize) -> BTreeMap<usize, usize> {
        max_extents(
            self.squares.iter().map(|square| (square.row, square.col)),
            min_extent,
        )
    }

    /// Longest contiguous row run per column, keeping only columns reaching `min_extent`.
    #[must_use]
    pub fn col_extents(&self, min_extent: usize) -> BTreeMap<usize, usize> {
        max_extents(
            self.squares.iter().map(|square| (square.col, square.row)),
            min_extent,
        )
    }

    /// Longest row or column extent anywhere in the match.
    #[must_use]
    pub fn longest_extent(&self) -> usize {
        self.row_extents(0)
            .into_values()
            .chain(self.col_extents(0).into_values())
            .max()
            .unwrap_or(0)
    }

    /// Reports whether any row or column extent reaches `extent`.
    #[must_use]
    pub fn has_extent_at_least(&self, extent: usize) -> bool {
        self.longest_extent() >= extent
    }

    /// Reports whether every square lies in a single row.
    #[must_use]
    pub fn is_straight_row(&self) -> bool {
        self.squares
            .first()
            .map_or(false, |first| self.squares.iter().all(|s| s.row == first.row))
    }

    /// Reports whether every square lies in a single column.
    #[must_use]
    pub fn is_straight_col(&self) -> bool {
        self.squares
            .first()
            .map_or(false, |first| self.squares.iter().all(|s| s.col == first.col))
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Match(")?;
        for (index, square) in self.squares.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{square}")?;
        }
        f.write_str(")")
    }
}

/// Groups `(line, position)` pairs by line and measures the longest run of consecutive positions.
fn max_extents(
    pairs: impl Iterator<Item = (usize, usize)>,
    min_extent: usize,
) -> BTreeMap<usize, usize> {
    let mut lines: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (line, position) in pairs {
        lines.entry(line).or_default().push(position);
    }

    lines
        .into_iter()
        .filter_map(|(line, mut positions)| {
            positions.sort_unstable();
            let mut longest = 0;
            let mut current = 0;
            let mut previous: Option<usize> = None;
            for position in positions {
                current = match previous {
                    Some(prev) if prev + 1 == position => current + 1,
                    _ => 1,
                };
                longest = longest.max(current);
                previous = Some(position);
            }
            (longest >= min_extent).then_some((line, longest))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::Match;
    use crate::Square;

    fn squares(coords: &[(usize, usize)]) -> Vec<Square> {
        coords
            .iter()
            .map(|&(row, col)| Square::new(row, col))
            .collect()
    }

    #[test]
    fn construction_sorts_and_dedups() {
        let first = Match::new(squares(&[(2, 1), (0, 1), (1, 1), (0, 1)]));
        let second = Match::new(squares(&[(0, 1), (1, 1), (2, 1)]));
        assert_eq!(first, second);
        assert_eq!(first.tile_count(), 3);
        assert_eq!(first.squares()[0], Square::new(0, 1));
    }

    #[test]
    fn cross_combines_into_five_squares() {
        let vertical = Match::new(squares(&[(0, 1), (1, 1), (2, 1)]));
        let horizontal = Match::new(squares(&[(1, 0), (1, 1), (1, 2)]));
        assert!(vertical.shares_square(&horizontal));

        let cross = vertical.combine(&horizontal);
        assert_eq!(cross.tile_count(), 5);
        assert!(cross.subsumes(&vertical));
        assert!(!vertical.subsumes(&cross));
        assert!(!cross.subsumes(&cross));
        assert!(!cross.is_straight_row());
        assert!(!cross.is_straight_col());
    }

    #[test]
    fn extents_measure_contiguous_runs_only() {
        let gapped = Match::new(squares(&[(0, 0), (0, 1), (0, 3), (0, 4), (0, 5)]));
        assert_eq!(gapped.row_extents(0), BTreeMap::from([(0, 3)]));
        assert_eq!(gapped.longest_extent(), 3);
        assert!(gapped.has_extent_at_least(3));
        assert!(!gapped.has_extent_at_least(4));
    }

    #[test]
    fn extents_filter_by_minimum() {
        let ell = Match::new(squares(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (2, 3)]));
        assert_eq!(ell.row_extents(3), BTreeMap::from([(2, 4)]));
        assert_eq!(ell.col_extents(3), BTreeMap::from([(0, 3)]));
        assert_eq!(ell.longest_extent(), 4);
    }

    #[test]
    fn straight_lines_are_detected() {
        let row = Match::new(squares(&[(3, 2), (3, 3), (3, 4)]));
        assert!(row.is_straight_row());
        assert!(!row.is_straight_col());
        assert!(!Match::new(Vec::new()).is_straight_row());
    }
}
