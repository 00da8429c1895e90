//! Geometry table: where a tile's neighbors, edges, and corners sit in pixels.
//!
//! Every function here depends only on the side (and the tile dimensions),
//! never on which tile asks. Two tiles sharing an edge or corner therefore
//! compute the same absolute position for it once the offset is added to
//! their own centers. The placement engine relies on that.
//!
//! Tiles are flat-topped. Screen y grows downward, so North is negative y.

use crate::error::LayoutError;
use crate::hex::Side;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A 2D point in board pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Same point up to accumulated rounding
    pub fn coincides(&self, other: Point) -> bool {
        let (dx, dy) = *self - other;
        dx.abs() <= POSITION_TOLERANCE && dy.abs() <= POSITION_TOLERANCE
    }
}

/// Largest distance, per axis, between two positions of the same entity
const POSITION_TOLERANCE: f64 = 1e-6;

impl Add<(f64, f64)> for Point {
    type Output = Point;

    fn add(self, (dx, dy): (f64, f64)) -> Point {
        self.translate(dx, dy)
    }
}

impl Sub for Point {
    type Output = (f64, f64);

    fn sub(self, other: Point) -> (f64, f64) {
        (self.x - other.x, self.y - other.y)
    }
}

/// How an edge sprite is laid down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeOrientation {
    /// North and South edges
    Horizontal,
    /// North-east and south-west edges
    Left,
    /// South-east and north-west edges
    Right,
}

/// Orientation of the edge on a given side.
pub const fn edge_orientation(side: Side) -> EdgeOrientation {
    match side {
        Side::North | Side::South => EdgeOrientation::Horizontal,
        Side::NorthEast | Side::SouthWest => EdgeOrientation::Left,
        Side::SouthEast | Side::NorthWest => EdgeOrientation::Right,
    }
}

/// Pixel dimensions of a tile sprite.
///
/// `width` is corner to corner, `height` is flat side to flat side, and
/// `horizontal_width` is the length of the flat top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileDimensions {
    width: f64,
    height: f64,
    horizontal_width: f64,
}

impl TileDimensions {
    /// TILE_WIDTH used by the board art
    pub const TILE_WIDTH: f64 = 256.0;
    /// TILE_HEIGHT used by the board art
    pub const TILE_HEIGHT: f64 = 222.0;
    /// TILE_HORIZONTAL_WIDTH used by the board art
    pub const TILE_HORIZONTAL_WIDTH: f64 = 128.0;

    /// Create validated dimensions.
    ///
    /// Positions stay bit-identical across discovery paths only when the
    /// offsets are exact in binary; integral pixel sizes always are.
    pub fn new(width: f64, height: f64, horizontal_width: f64) -> Result<Self, LayoutError> {
        let all_positive = [width, height, horizontal_width]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0);
        if !all_positive || horizontal_width >= width {
            return Err(LayoutError::InvalidDimensions {
                width,
                height,
                horizontal_width,
            });
        }
        Ok(Self {
            width,
            height,
            horizontal_width,
        })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn horizontal_width(&self) -> f64 {
        self.horizontal_width
    }

    /// Horizontal extent of one slanted side: (width - horizontal_width) / 2
    pub fn diagonal_width(&self) -> f64 {
        (self.width - self.horizontal_width) / 2.0
    }

    /// Horizontal distance between the centers of diagonal neighbors
    fn column_step(&self) -> f64 {
        self.width - self.diagonal_width()
    }

    /// Displacement from a tile's center to the center of its neighbor on `side`.
    pub fn tile_offset(&self, side: Side) -> (f64, f64) {
        let step = self.column_step();
        let h = self.height;
        match side {
            Side::North => (0.0, -h),
            Side::NorthEast => (step, -h / 2.0),
            Side::SouthEast => (step, h / 2.0),
            Side::South => (0.0, h),
            Side::SouthWest => (-step, h / 2.0),
            Side::NorthWest => (-step, -h / 2.0),
        }
    }

    /// Displacement from a tile's center to the midpoint of its edge on `side`.
    pub fn edge_offset(&self, side: Side) -> (f64, f64) {
        let (dx, dy) = self.tile_offset(side);
        (dx / 2.0, dy / 2.0)
    }

    /// Displacement from a tile's center to its corner at the clockwise end
    /// of the edge on `side`.
    pub fn intersection_offset(&self, side: Side) -> (f64, f64) {
        let half_w = self.width / 2.0;
        let half_top = self.horizontal_width / 2.0;
        let half_h = self.height / 2.0;
        match side {
            Side::North => (half_top, -half_h),
            Side::NorthEast => (half_w, 0.0),
            Side::SouthEast => (half_top, half_h),
            Side::South => (-half_top, half_h),
            Side::SouthWest => (-half_w, 0.0),
            Side::NorthWest => (-half_top, -half_h),
        }
    }
}

impl Default for TileDimensions {
    fn default() -> Self {
        Self {
            width: Self::TILE_WIDTH,
            height: Self::TILE_HEIGHT,
            horizontal_width: Self::TILE_HORIZONTAL_WIDTH,
        }
    }
}
