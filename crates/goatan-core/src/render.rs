//! What the layout hands to the renderer.
//!
//! The renderer itself (sprites, textures, input) lives outside this crate
//! behind [`RenderSink`]. Each redraw produces one [`RenderItem`] per placed
//! entity: its id, what to draw, where, and the overlay on top of it.

use crate::actions::PlaceRequest;
use crate::board::{EdgeId, IntersectionId, ResourceNumber, TileId, TileType};
use crate::geometry::{EdgeOrientation, Point};
use crate::player::PlayerId;
use crate::snapshot::PieceKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to any placed entity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityRef {
    Tile(TileId),
    Edge(EdgeId),
    Intersection(IntersectionId),
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Tile(id) => write!(f, "tile {}", id),
            EntityRef::Edge(id) => write!(f, "edge {}", id),
            EntityRef::Intersection(id) => write!(f, "intersection {}", id),
        }
    }
}

/// The visual to draw for an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "visual", rename_all = "snake_case")]
pub enum VisualKind {
    /// Terrain sprite with its number token, if any
    Tile {
        tile_type: TileType,
        resource_number: Option<ResourceNumber>,
    },
    /// Empty edge slot
    Edge { orientation: EdgeOrientation },
    /// Road lying along an edge
    Road { orientation: EdgeOrientation },
    /// Empty corner slot
    Intersection,
    House,
    /// Stand-in for anything without art
    Placeholder,
}

/// RGB color applied on top of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tint(pub u32);

impl Tint {
    /// Highlight for legal placement candidates
    pub const HINT: Tint = Tint(0xF1C40F);
    /// Pieces owned by players missing from the seating list
    pub const NEUTRAL: Tint = Tint(0x95A5A6);
}

/// Overlay state applied on top of a placed entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayState {
    /// Owner and kind of the piece sitting here
    pub piece: Option<(PlayerId, PieceKind)>,
    /// Receiving player may place a piece here
    pub hinted: bool,
    /// Piece belongs to the player whose turn it is
    pub active: bool,
}

/// One positioned entity, ready for the render sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderItem {
    pub entity: EntityRef,
    pub kind: VisualKind,
    pub position: Point,
    pub tint: Option<Tint>,
    pub overlay: OverlayState,
}

impl RenderItem {
    /// Message to send when the player activates this item
    pub fn activation(&self) -> Option<PlaceRequest> {
        if !self.overlay.hinted {
            return None;
        }
        match &self.entity {
            EntityRef::Edge(id) => Some(PlaceRequest::road(id)),
            EntityRef::Intersection(id) => Some(PlaceRequest::house(id)),
            EntityRef::Tile(_) => None,
        }
    }
}

/// Drawing surface the redraw cycle renders into.
///
/// Handles are owned by the sink; the redraw cycle only keeps them to
/// remove the previous frame.
pub trait RenderSink {
    type Handle;

    /// Draw an item (its visual, position, tint and overlay), returning a
    /// handle to it
    fn place(&mut self, item: &RenderItem) -> Self::Handle;

    /// Take a previously placed visual off the surface
    fn remove(&mut self, handle: Self::Handle);

    /// Make a visual clickable; activating it should send `request`
    fn on_activate(&mut self, handle: &Self::Handle, request: PlaceRequest);
}
