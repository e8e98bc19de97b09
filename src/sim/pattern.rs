//! Directions and local wall patterns.
//!
//! The agent perceives its four neighboring cells as a [`WallPattern`]: which
//! of them are border walls and which are open. In a rectangular arena with at
//! least two interior cells per axis only nine patterns can occur — the empty
//! pattern, the four single walls, and the four corner combinations — so the
//! pattern space is a closed enumeration rather than a string code.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A cardinal move direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// One row up.
    North,
    /// One column right.
    East,
    /// One column left.
    West,
    /// One row down.
    South,
}

impl Direction {
    /// All directions in canonical N, E, W, S order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::West,
        Direction::South,
    ];

    /// Row/column delta of a one-cell move in this direction.
    ///
    /// Rows grow downward, columns grow rightward.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
            Direction::South => (1, 0),
        }
    }

    /// Slot index of this direction within a wall pattern (N=0, E=1, W=2, S=3).
    #[must_use]
    pub(crate) const fn slot(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::West => 2,
            Direction::South => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::West => 'W',
            Direction::South => 'S',
        };
        write!(f, "{c}")
    }
}

/// One of the nine canonical local wall patterns.
///
/// Variants are declared in the lexicographic order of their rendered text
/// (wall letters sort before the `x` wildcard), so iterating [`ALL`] visits
/// patterns in the order rule listings are printed. `derive(Ord)` relies on
/// this declaration order.
///
/// Invariant: every pattern has at least one open slot, so a legal move always
/// exists.
///
/// [`ALL`]: WallPattern::ALL
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum WallPattern {
    /// Walls to the north and east (`NExx`).
    NorthEast,
    /// Walls to the north and west (`NxWx`).
    NorthWest,
    /// Wall to the north only (`Nxxx`).
    North,
    /// Walls to the east and south (`xExS`).
    EastSouth,
    /// Wall to the east only (`xExx`).
    East,
    /// Walls to the west and south (`xxWS`).
    WestSouth,
    /// Wall to the west only (`xxWx`).
    West,
    /// Wall to the south only (`xxxS`).
    South,
    /// No walls (`xxxx`).
    Open,
}

impl WallPattern {
    /// Number of canonical patterns.
    pub const COUNT: usize = 9;

    /// All canonical patterns, in listing order.
    pub const ALL: [WallPattern; WallPattern::COUNT] = [
        WallPattern::NorthEast,
        WallPattern::NorthWest,
        WallPattern::North,
        WallPattern::EastSouth,
        WallPattern::East,
        WallPattern::WestSouth,
        WallPattern::West,
        WallPattern::South,
        WallPattern::Open,
    ];

    /// Wall flags in N, E, W, S slot order.
    #[must_use]
    pub const fn walls(self) -> [bool; 4] {
        match self {
            WallPattern::NorthEast => [true, true, false, false],
            WallPattern::NorthWest => [true, false, true, false],
            WallPattern::North => [true, false, false, false],
            WallPattern::EastSouth => [false, true, false, true],
            WallPattern::East => [false, true, false, false],
            WallPattern::WestSouth => [false, false, true, true],
            WallPattern::West => [false, false, true, false],
            WallPattern::South => [false, false, false, true],
            WallPattern::Open => [false, false, false, false],
        }
    }

    /// Check whether moving in `dir` is legal under this pattern.
    #[must_use]
    pub const fn is_open(self, dir: Direction) -> bool {
        !self.walls()[dir.slot()]
    }

    /// Classify four neighbor-wall flags (N, E, W, S) into a canonical
    /// pattern.
    ///
    /// Returns `None` for combinations outside the canonical set, such as
    /// opposite walls. Those cannot arise in an arena of at least 4x4 cells.
    #[must_use]
    pub const fn from_walls(north: bool, east: bool, west: bool, south: bool) -> Option<Self> {
        match (north, east, west, south) {
            (false, false, false, false) => Some(WallPattern::Open),
            (true, false, false, false) => Some(WallPattern::North),
            (false, true, false, false) => Some(WallPattern::East),
            (false, false, true, false) => Some(WallPattern::West),
            (false, false, false, true) => Some(WallPattern::South),
            (true, true, false, false) => Some(WallPattern::NorthEast),
            (true, false, true, false) => Some(WallPattern::NorthWest),
            (false, true, false, true) => Some(WallPattern::EastSouth),
            (false, false, true, true) => Some(WallPattern::WestSouth),
            _ => None,
        }
    }

    /// Index of this pattern into per-pattern lookup tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Draw a uniformly random direction that is open under this pattern.
    ///
    /// Rejection-samples over the four cardinals; terminates because every
    /// canonical pattern has at least one open slot.
    #[must_use]
    pub fn random_open<R: Rng>(self, rng: &mut R) -> Direction {
        let mut dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        while !self.is_open(dir) {
            dir = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
        }
        dir
    }
}

impl fmt::Display for WallPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LETTERS: [char; 4] = ['N', 'E', 'W', 'S'];
        let walls = self.walls();
        for (slot, &blocked) in walls.iter().enumerate() {
            let c = if blocked { LETTERS[slot] } else { 'x' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
