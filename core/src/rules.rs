//! Tunable thresholds shared by every system.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thresholds and limits governing board mechanics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Side length of generated boards.
    pub board_side: usize,
    /// Minimum run length that forms a match.
    pub min_match: usize,
    /// Row or column extent that clears the entire line.
    pub min_line_clear: usize,
    /// Tile count a match needs before it spawns a critical tile.
    pub min_critical: usize,
    /// Extent a match needs before the mover keeps the turn.
    pub min_extra_move: usize,
    /// Attempts allowed per square and per board during random generation.
    pub max_generation_attempts: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            board_side: 8,
            min_match: 3,
            min_line_clear: 4,
            min_critical: 5,
            min_extra_move: 5,
            max_generation_attempts: 100,
        }
    }
}

/// Reasons a [`Rules`] value is rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Boards must have at least one square.
    #[error("board side must be positive")]
    ZeroSide,
    /// Matches shorter than two tiles are meaningless.
    #[error("minimum match length {0} is below 2")]
    MatchTooShort(usize),
    /// A threshold is lower than the minimum match length it builds on.
    #[error("{name} ({value}) must be at least the minimum match length ({min_match})")]
    ThresholdBelowMatch {
        /// Name of the offending field.
        name: &'static str,
        /// Configured value.
        value: usize,
        /// Configured minimum match length.
        min_match: usize,
    },
    /// Random generation needs at least one attempt.
    #[error("generation attempts must be positive")]
    ZeroAttempts,
}

impl Rules {
    /// Checks that the thresholds are mutually consistent.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.board_side == 0 {
            return Err(RulesError::ZeroSide);
        }
        if self.min_match < 2 {
            return Err(RulesError::MatchTooShort(self.min_match));
        }
        for (name, value) in [
            ("min_line_clear", self.min_line_clear),
            ("min_critical", self.min_critical),
            ("min_extra_move", self.min_extra_move),
        ] {
            if value < self.min_match {
                return Err(RulesError::ThresholdBelowMatch {
                    name,
                    value,
                    min_match: self.min_match,
                });
            }
        }
        if self.max_generation_attempts == 0 {
            return Err(RulesError::ZeroAttempts);
        }
        Ok(())
    }
}
