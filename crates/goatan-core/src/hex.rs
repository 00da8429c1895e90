//! Tile sides and the axial coordinate system used to build boards.
//!
//! This module provides:
//! - `Side`: the six fixed directions around a tile, in clockwise order
//! - `HexCoord`: axial coordinates for flat-topped hexes
//!
//! The layout engine itself never needs coordinates, it only walks sides.
//! `HexCoord` exists for the board generator, which has to know which
//! cells border which before any ids exist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six sides of a flat-topped hex tile.
///
/// Order is clockwise starting from the top. The intersection "on" a side is
/// the corner at the clockwise end of that side's edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Side {
    /// Top edge
    North,
    /// Top-right edge
    NorthEast,
    /// Bottom-right edge
    SouthEast,
    /// Bottom edge
    South,
    /// Bottom-left edge
    SouthWest,
    /// Top-left edge
    NorthWest,
}

impl Side {
    /// All sides in clockwise order starting from North
    pub const ALL: [Side; 6] = [
        Side::North,
        Side::NorthEast,
        Side::SouthEast,
        Side::South,
        Side::SouthWest,
        Side::NorthWest,
    ];

    /// Position of this side in the cyclic order (North = 0)
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Side at the given cyclic position, wrapping around
    pub const fn from_index(index: usize) -> Side {
        Side::ALL[index % 6]
    }

    /// The side facing this one from the neighboring tile
    pub const fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::NorthEast => Side::SouthWest,
            Side::SouthEast => Side::NorthWest,
            Side::South => Side::North,
            Side::SouthWest => Side::NorthEast,
            Side::NorthWest => Side::SouthEast,
        }
    }

    /// Next side clockwise
    pub const fn next(self) -> Side {
        Side::from_index(self.index() + 1)
    }

    /// Next side counter-clockwise
    pub const fn previous(self) -> Side {
        Side::from_index(self.index() + 5)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::North => "NORTH",
            Side::NorthEast => "NORTH_EAST",
            Side::SouthEast => "SOUTH_EAST",
            Side::South => "SOUTH",
            Side::SouthWest => "SOUTH_WEST",
            Side::NorthWest => "NORTH_WEST",
        };
        f.write_str(name)
    }
}

/// Axial coordinate for a flat-topped hex grid.
///
/// In axial coordinates:
/// - `q` increases going south-east
/// - `r` increases going south
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Get the neighbor across a specific side
    pub fn neighbor(&self, side: Side) -> HexCoord {
        match side {
            Side::North => HexCoord::new(self.q, self.r - 1),
            Side::NorthEast => HexCoord::new(self.q + 1, self.r - 1),
            Side::SouthEast => HexCoord::new(self.q + 1, self.r),
            Side::South => HexCoord::new(self.q, self.r + 1),
            Side::SouthWest => HexCoord::new(self.q - 1, self.r + 1),
            Side::NorthWest => HexCoord::new(self.q - 1, self.r),
        }
    }

    /// The six neighbors in clockwise order starting from North
    pub fn neighbors(&self) -> [HexCoord; 6] {
        Side::ALL.map(|side| self.neighbor(side))
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Every hex within `radius` steps of this one, ring by ring.
    ///
    /// The first entry is `self`; each ring is listed clockwise.
    pub fn within_radius(&self, radius: u32) -> Vec<HexCoord> {
        let mut cells = vec![*self];
        for ring in 1..=radius as i32 {
            // Start at the ring's north-west corner and walk its six sides.
            let mut cell = HexCoord::new(self.q - ring, self.r);
            for side in [
                Side::NorthEast,
                Side::SouthEast,
                Side::South,
                Side::SouthWest,
                Side::NorthWest,
                Side::North,
            ] {
                for _ in 0..ring {
                    cell = cell.neighbor(side);
                    cells.push(cell);
                }
            }
        }
        cells
    }
}
