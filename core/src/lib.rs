#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the match-3 simulation engine.
//!
//! This crate defines the value types every system exchanges: tiles and their
//! matching table, board coordinates, matches, moves, the tunable [`Rules`]
//! and the injected [`Randomness`] service. Systems are pure functions over
//! these values and a board; the game crate strings them together into a
//! turn-taking loop.

mod matches;
mod moves;
mod random;
mod rules;
mod square;
mod tile;

pub use matches::Match;
pub use moves::{explode, Move, MoveOption, Swap};
pub use random::{choose, shuffle, Randomness, ScriptedRandomness, SeededRandomness};
pub use rules::{Rules, RulesError};
pub use square::Square;
pub use tile::{ApPool, ApYield, Color, Facing, Tile};

#[cfg(test)]
mod tests {
    use super::{Color, Facing, Match, Move, Rules, Square, Swap, Tile};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn special_tile_round_trips_through_bincode() {
        assert_round_trip(&Tile::Protect {
            color: Color::Purple,
            facing: Facing::Defense,
            strength: 16,
        });
    }

    #[test]
    fn move_round_trips_through_bincode() {
        let matched = Match::new([Square::new(0, 0), Square::new(0, 1), Square::new(0, 2)]);
        let candidate = Move::new(Swap::new(Square::new(1, 2), Square::new(0, 2)), vec![matched]);
        assert_round_trip(&candidate);
    }

    #[test]
    fn rules_round_trip_through_bincode() {
        assert_round_trip(&Rules::default());
    }
}
