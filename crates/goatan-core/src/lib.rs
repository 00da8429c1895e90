//! Goatan - hex board topology resolution and layout
//!
//! This crate turns a server-supplied board graph (tiles, edges and
//! intersections linked only by ids and sides) into screen positions, and
//! keeps a rendered frame in step with each new board snapshot.
//!
//! # Architecture
//!
//! The engine is platform-agnostic. It can be compiled to:
//! - Native Rust for the line-based viewer
//! - WebAssembly for the browser client
//!
//! # Modules
//!
//! - [`hex`]: Tile sides and axial coordinates
//! - [`geometry`]: Sprite dimensions and per-side offsets
//! - [`board`]: The board graph and its validation
//! - [`placement`]: Breadth-first placement from the anchor tile
//! - [`registry`]: Placed entities, one per id
//! - [`snapshot`]: Pieces, hints and turn state around the graph
//! - [`render`]: Render items and the sink they are drawn into
//! - [`redraw`]: Full redraw on every snapshot
//! - [`generator`]: Random board generation

pub mod actions;
pub mod board;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod hex;
pub mod placement;
pub mod player;
pub mod redraw;
pub mod registry;
pub mod render;
pub mod snapshot;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{PieceType, PlaceRequest};
pub use board::{
    BoardGraph, EdgeDefinition, EdgeId, IntersectionId, ResourceNumber, TileDefinition, TileId,
    TileType,
};
pub use error::{GraphDefect, LayoutError};
pub use generator::{graph_from_cells, BoardGenerator, Cell, StandardProvider, TileProvider};
pub use geometry::{EdgeOrientation, Point, TileDimensions};
pub use hex::{HexCoord, Side};
pub use placement::{Frontier, PlacementEngine};
pub use player::{PlayerColor, PlayerId};
pub use redraw::{compose_frame, Diagnostic, Frame, RedrawCycle, RedrawReport};
pub use registry::{EntityRegistry, PlacedEdge, PlacedIntersection, PlacedTile, Unreachable};
pub use render::{EntityRef, OverlayState, RenderItem, RenderSink, Tint, VisualKind};
pub use snapshot::{BoardSnapshot, Hints, Piece, PieceKind, Pieces};
