//! Tile variants, their pairwise matching table and action point yields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Colors a colored-family tile can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    /// Yellow, written `Y`.
    Yellow,
    /// Blue, written `BL`.
    Blue,
    /// Black, written `BK`.
    Black,
    /// Purple, written `P`.
    Purple,
    /// Red, written `R`.
    Red,
    /// Green, written `G`.
    Green,
}

impl Color {
    /// Every color in canonical order.
    pub const ALL: [Color; 6] = [
        Color::Yellow,
        Color::Blue,
        Color::Black,
        Color::Purple,
        Color::Red,
        Color::Green,
    ];

    /// Short code used by the board text form.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Yellow => "Y",
            Self::Blue => "BL",
            Self::Black => "BK",
            Self::Purple => "P",
            Self::Red => "R",
            Self::Green => "G",
        }
    }

    /// Resolves a short color code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|color| color.code() == code)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Side of the duel a special tile is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Facing {
    /// Tiles owned by the offense, written `<`.
    Offense,
    /// Tiles owned by the defense, written `>`.
    Defense,
}

impl Facing {
    /// Symbol used by the board text form.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Offense => "<",
            Self::Defense => ">",
        }
    }

    /// Resolves a facing symbol.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Self::Offense),
            ">" => Some(Self::Defense),
            _ => None,
        }
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Pool that collects action points when a tile is destroyed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApPool {
    /// Points of a single color.
    Color(Color),
    /// Team-up points.
    Teamup,
}

impl ApPool {
    /// Resolves a pool from its code: a color code or `T`.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        if code == "T" {
            return Some(Self::Teamup);
        }
        Color::from_code(code).map(Self::Color)
    }
}

impl fmt::Display for ApPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => color.fmt(f),
            Self::Teamup => f.write_str("T"),
        }
    }
}

/// Action points yielded by destroying a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApYield {
    /// Pool credited with the points.
    pub pool: ApPool,
    /// Number of points credited.
    pub amount: u32,
}

/// Content of a single board square.
///
/// Colored-family variants (`Colored`, `Strike`, `Attack`, `Protect` and
/// `Countdown`) all carry a color and match by it; `Critical` and `Teamup`
/// are colorless and follow their own rules. The table is symmetric:
/// `a.matches(&b) == b.matches(&a)` for every pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// A hole left by destruction, waiting for gravity or a refill.
    Empty,
    /// Upgraded colorless tile that matches every non-empty tile.
    Critical,
    /// Team-up tile; matches other team-ups and criticals.
    Teamup,
    /// Plain colored tile.
    Colored(Color),
    /// Colored tile that boosts matches of its color.
    Strike {
        /// Color the tile matches as.
        color: Color,
        /// Side the tile works for.
        facing: Facing,
        /// Bonus damage.
        strength: u32,
    },
    /// Colored tile that damages its target every turn.
    Attack {
        /// Color the tile matches as.
        color: Color,
        /// Side the tile works for.
        facing: Facing,
        /// Damage per turn.
        strength: u32,
    },
    /// Colored tile that absorbs damage for its side.
    Protect {
        /// Color the tile matches as.
        color: Color,
        /// Side the tile protects.
        facing: Facing,
        /// Damage absorbed.
        strength: u32,
    },
    /// Colored tile that fires an effect when its counter runs out.
    Countdown {
        /// Color the tile matches as.
        color: Color,
        /// Turns remaining before the countdown fires.
        turns_left: u32,
    },
}

impl Tile {
    /// Reports whether the square holds no tile.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Reports whether the tile is a critical.
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        matches!(self, Self::Critical)
    }

    /// Reports whether the tile is a team-up.
    #[must_use]
    pub const fn is_teamup(&self) -> bool {
        matches!(self, Self::Teamup)
    }

    /// Reports whether the square holds any tile at all.
    #[must_use]
    pub const fn is_game_tile(&self) -> bool {
        !self.is_empty()
    }

    /// Color carried by colored-family tiles.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        match *self {
            Self::Colored(color)
            | Self::Strike { color, .. }
            | Self::Attack { color, .. }
            | Self::Protect { color, .. }
            | Self::Countdown { color, .. } => Some(color),
            Self::Empty | Self::Critical | Self::Teamup => None,
        }
    }

    /// Pairwise matching predicate.
    #[must_use]
    pub fn matches(&self, other: &Tile) -> bool {
        match self {
            Self::Empty => false,
            Self::Critical => other.is_game_tile(),
            Self::Teamup => other.is_teamup() || other.is_critical(),
            _ => other.is_critical() || (other.color().is_some() && other.color() == self.color()),
        }
    }

    /// Action points yielded when the tile is destroyed.
    #[must_use]
    pub const fn ap(&self) -> Option<ApYield> {
        match self.color() {
            Some(color) => Some(ApYield {
                pool: ApPool::Color(color),
                amount: 1,
            }),
            None if self.is_teamup() => Some(ApYield {
                pool: ApPool::Teamup,
                amount: 1,
            }),
            None => None,
        }
    }

    /// Damage absorbed on behalf of `facing`; zero for everything but protect tiles.
    #[must_use]
    pub fn protection(&self, facing: Facing) -> u32 {
        match *self {
            Self::Protect {
                facing: own,
                strength,
                ..
            } if own == facing => strength,
            _ => 0,
        }
    }

    /// Advances a countdown tile by one turn.
    ///
    /// Returns `None` for tiles without a countdown. Otherwise yields the tile
    /// replacing this one and whether the countdown fired on this tick; a
    /// fired countdown reverts to a plain tile of its color.
    #[must_use]
    pub fn tick_countdown(&self) -> Option<(Tile, bool)> {
        let Self::Countdown { color, turns_left } = *self else {
            return None;
        };

        let remaining = turns_left.saturating_sub(1);
        if remaining == 0 {
            Some((Self::Colored(color), true))
        } else {
            Some((
                Self::Countdown {
                    color,
                    turns_left: remaining,
                },
                false,
            ))
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("E"),
            Self::Critical => f.write_str("C"),
            Self::Teamup => f.write_str("T"),
            Self::Colored(color) => write!(f, "{color}"),
            Self::Strike {
                color,
                facing,
                strength,
            } => write!(f, "{color} S {facing} {strength}"),
            Self::Attack {
                color,
                facing,
                strength,
            } => write!(f, "{color} A {facing} {strength}"),
            Self::Protect {
                color,
                facing,
                strength,
            } => write!(f, "{color} P {facing} {strength}"),
            Self::Countdown { color, turns_left } => write!(f, "{color} CD {turns_left}"),
        }
    }
}
