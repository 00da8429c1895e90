//! Errors raised while resolving a board snapshot into positions.

use crate::board::{EdgeId, IntersectionId, TileId};
use crate::hex::Side;
use thiserror::Error;

/// Errors that stop a snapshot from being laid out
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("malformed board graph: {0}")]
    MalformedGraph(#[from] GraphDefect),

    #[error("invalid tile dimensions {width}x{height} (horizontal width {horizontal_width})")]
    InvalidDimensions {
        width: f64,
        height: f64,
        horizontal_width: f64,
    },
}

/// The first reference problem found in a board graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphDefect {
    #[error("anchor tile {0} is not on the board")]
    MissingAnchor(TileId),

    #[error("tile {0} is not on the board")]
    MissingTile(TileId),

    #[error("tile {tile} references unknown edge {edge} on its {side} side")]
    UnknownEdge { tile: TileId, side: Side, edge: EdgeId },

    #[error("edge {edge} references unknown tile {tile}")]
    UnknownTile { edge: EdgeId, tile: TileId },

    #[error("edge {edge} must border one or two distinct tiles, found {count}")]
    EdgeArity { edge: EdgeId, count: usize },

    #[error("tile {tile} references edge {edge}, which does not list it")]
    EdgeNotLinked { tile: TileId, edge: EdgeId },

    #[error("edge {edge} should sit on the {side} side of tile {tile}")]
    SideMismatch { edge: EdgeId, tile: TileId, side: Side },

    #[error("intersection {intersection} does not fit the {side} corner of tile {tile}")]
    IntersectionSideMismatch {
        intersection: IntersectionId,
        tile: TileId,
        side: Side,
    },

    #[error("tile {neighbor} across the {side} side of {tile} was already placed elsewhere")]
    NeighborMisplaced {
        tile: TileId,
        side: Side,
        neighbor: TileId,
    },

    #[error("overlay references unknown edge {0}")]
    UnknownOverlayEdge(EdgeId),

    #[error("overlay references unknown intersection {0}")]
    UnknownOverlayIntersection(IntersectionId),
}
