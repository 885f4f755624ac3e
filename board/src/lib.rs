#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Square tile grid that every system reads and rewrites.
//!
//! A [`Board`] is a plain value: cloning it yields a fully independent grid,
//! and systems hand back fresh boards rather than mutating their input. The
//! board's [`Fingerprint`] is a pure function of its contents and keys the
//! [`BoardCache`].

mod cache;
mod text;

use std::fmt;
use std::ops::Index;

use match3_sim_core::{Facing, Square, Tile};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use cache::{BoardCache, CacheKey, CacheStats, Operation};
pub use text::{parse_tile, ParseBoardError};

/// Reasons a board cannot be assembled from rows.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BoardError {
    /// No rows were supplied.
    #[error("board has no rows")]
    Empty,
    /// A row's length differs from the number of rows.
    #[error("row {row} has {len} tiles but the board has {side} rows")]
    NotSquare {
        /// Index of the offending row.
        row: usize,
        /// Number of tiles in the offending row.
        len: usize,
        /// Number of rows, which every row length must equal.
        side: usize,
    },
}

/// N×N grid of tiles stored in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    side: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Creates a board of the given side where every square is empty.
    #[must_use]
    pub fn empty(side: usize) -> Self {
        Self::filled(side, Tile::Empty)
    }

    /// Creates a board of the given side with every square holding `tile`.
    #[must_use]
    pub fn filled(side: usize, tile: Tile) -> Self {
        Self {
            side,
            cells: vec![tile; side * side],
        }
    }

    /// Assembles a board from rows, top row first.
    ///
    /// # Errors
    ///
    /// Fails when there are no rows or any row length differs from the row count.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self, BoardError> {
        let side = rows.len();
        if side == 0 {
            return Err(BoardError::Empty);
        }

        let mut cells = Vec::with_capacity(side * side);
        for (row, tiles) in rows.into_iter().enumerate() {
            if tiles.len() != side {
                return Err(BoardError::NotSquare {
                    row,
                    len: tiles.len(),
                    side,
                });
            }
            cells.extend(tiles);
        }

        Ok(Self { side, cells })
    }

    /// Number of rows, which equals the number of columns.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Non-panicking bounds check used by speculative probes.
    #[must_use]
    pub const fn is_in_bounds(&self, square: Square) -> bool {
        square.is_within(self.side)
    }

    /// Tile at the square, or `None` outside the board.
    #[must_use]
    pub fn get(&self, square: Square) -> Option<Tile> {
        self.offset(square).map(|offset| self.cells[offset])
    }

    /// Tile at the square.
    ///
    /// # Panics
    ///
    /// Panics when the square lies outside the board.
    #[must_use]
    pub fn at(&self, square: Square) -> Tile {
        self[square]
    }

    /// Replaces the tile at the square.
    ///
    /// # Panics
    ///
    /// Panics when the square lies outside the board.
    pub fn set(&mut self, square: Square, tile: Tile) {
        let offset = self.expect_offset(square);
        self.cells[offset] = tile;
    }

    /// Exchanges the tiles on two squares in place.
    ///
    /// # Panics
    ///
    /// Panics when either square lies outside the board.
    pub fn swap(&mut self, first: Square, second: Square) {
        let first = self.expect_offset(first);
        let second = self.expect_offset(second);
        self.cells.swap(first, second);
    }

    /// Rows of tiles, top row first.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.side.max(1))
    }

    /// Every square in row-major order.
    pub fn squares(&self) -> impl DoubleEndedIterator<Item = Square> {
        let side = self.side;
        (0..side * side).map(move |offset| Square::new(offset / side, offset % side))
    }

    /// Every square starting at the bottom-right corner, rows in reverse then columns in reverse.
    pub fn squares_from_bottom_right(&self) -> impl Iterator<Item = Square> {
        self.squares().rev()
    }

    /// Every square paired with its tile in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (Square, Tile)> + '_ {
        self.squares().zip(self.cells.iter().copied())
    }

    /// Total damage absorbed by protect tiles working for `facing`.
    #[must_use]
    pub fn total_protection(&self, facing: Facing) -> u32 {
        self.cells.iter().map(|tile| tile.protection(facing)).sum()
    }

    /// Content hash over the side and every tile's text form.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update((self.side as u64).to_le_bytes());
        for tile in &self.cells {
            hasher.update(tile.to_string().as_bytes());
            hasher.update([b'|']);
        }
        let digest = hasher.finalize();
        let mut bytes = [0_u8; 32];
        bytes.copy_from_slice(&digest);
        Fingerprint(bytes)
    }

    fn offset(&self, square: Square) -> Option<usize> {
        self.is_in_bounds(square)
            .then_some(square.row * self.side + square.col)
    }

    fn expect_offset(&self, square: Square) -> usize {
        match self.offset(square) {
            Some(offset) => offset,
            None => panic!(
                "square {square} is outside a board of side {}",
                self.side
            ),
        }
    }
}

impl Index<Square> for Board {
    type Output = Tile;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[self.expect_offset(square)]
    }
}

/// SHA-256 digest identifying a board's contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
