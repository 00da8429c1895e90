//! Board graph as delivered by the server.
//!
//! This module contains:
//! - Distinct identifier types for tiles, edges, and intersections
//! - Tile types and resource numbers
//! - Tile and edge definitions and the `BoardGraph` that holds them
//! - Reference validation, run before anything is placed
//!
//! The graph carries no positions. Tiles name their edges and
//! intersections by side; edges name the one or two tiles they border.

use crate::error::GraphDefect;
use crate::hex::Side;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

pub(crate) use id_type;

id_type!(
    /// Identifier of a hex tile
    TileId
);
id_type!(
    /// Identifier of an edge between tiles
    EdgeId
);
id_type!(
    /// Identifier of a corner shared by up to three tiles
    IntersectionId
);

/// Type of hex tile on the board.
///
/// Names the server sends that we have no art for are kept verbatim in
/// `Unknown` so they can be reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TileType {
    Brick,
    Stone,
    Wheat,
    Sheep,
    Wood,
    /// No production
    Desert,
    Unknown(String),
}

impl TileType {
    pub fn name(&self) -> &str {
        match self {
            TileType::Brick => "brick",
            TileType::Stone => "stone",
            TileType::Wheat => "wheat",
            TileType::Sheep => "sheep",
            TileType::Wood => "wood",
            TileType::Desert => "desert",
            TileType::Unknown(name) => name,
        }
    }

    /// Whether this tile produces a resource when its number is rolled
    pub fn is_productive(&self) -> bool {
        !matches!(self, TileType::Desert | TileType::Unknown(_))
    }
}

impl From<String> for TileType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "brick" => TileType::Brick,
            "stone" => TileType::Stone,
            "wheat" => TileType::Wheat,
            "sheep" => TileType::Sheep,
            "wood" => TileType::Wood,
            "desert" => TileType::Desert,
            _ => TileType::Unknown(name),
        }
    }
}

impl From<TileType> for String {
    fn from(tile_type: TileType) -> Self {
        match tile_type {
            TileType::Unknown(name) => name,
            known => known.name().to_string(),
        }
    }
}

/// A dice total other than 7 (2-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ResourceNumber(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{0} is not a resource number (expected 2-6 or 8-12)")]
pub struct InvalidResourceNumber(pub u8);

impl ResourceNumber {
    pub fn value(&self) -> u8 {
        self.0
    }

    /// 6 and 8 are the most likely totals and may not sit next to each other
    pub fn is_hot(&self) -> bool {
        matches!(self.0, 6 | 8)
    }
}

impl TryFrom<u8> for ResourceNumber {
    type Error = InvalidResourceNumber;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2..=6 | 8..=12 => Ok(Self(value)),
            _ => Err(InvalidResourceNumber(value)),
        }
    }
}

impl From<ResourceNumber> for u8 {
    fn from(number: ResourceNumber) -> Self {
        number.0
    }
}

/// A tile as described by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    #[serde(rename = "type")]
    pub tile_type: TileType,
    #[serde(default)]
    pub resource_number: Option<ResourceNumber>,
    /// Boundary tiles may omit sides
    #[serde(default)]
    pub edges: BTreeMap<Side, EdgeId>,
    #[serde(default)]
    pub intersections: BTreeMap<Side, IntersectionId>,
}

impl TileDefinition {
    pub fn new(tile_type: TileType, resource_number: Option<ResourceNumber>) -> Self {
        Self {
            tile_type,
            resource_number,
            edges: BTreeMap::new(),
            intersections: BTreeMap::new(),
        }
    }
}

/// An edge as described by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    /// One tile for a board-boundary edge, two otherwise
    pub tiles: Vec<TileId>,
}

impl EdgeDefinition {
    pub fn new(tiles: Vec<TileId>) -> Self {
        Self { tiles }
    }

    /// The tile on the far side of this edge, seen from `tile`
    pub fn other_tile(&self, tile: &TileId) -> Option<&TileId> {
        self.tiles.iter().find(|t| *t != tile)
    }

    pub fn is_boundary(&self) -> bool {
        self.tiles.len() == 1
    }
}

/// The complete adjacency graph of a board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardGraph {
    /// Tile placed at the coordinate origin
    pub anchor_tile: TileId,
    pub tiles: BTreeMap<TileId, TileDefinition>,
    pub edges: BTreeMap<EdgeId, EdgeDefinition>,
}

impl BoardGraph {
    /// Create a graph containing only its anchor's id; tiles and edges are
    /// added by the caller.
    pub fn new(anchor_tile: TileId) -> Self {
        Self {
            anchor_tile,
            tiles: BTreeMap::new(),
            edges: BTreeMap::new(),
        }
    }

    pub fn tile(&self, id: &TileId) -> Option<&TileDefinition> {
        self.tiles.get(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&EdgeDefinition> {
        self.edges.get(id)
    }

    /// Every intersection id referenced by at least one tile
    pub fn intersection_ids(&self) -> BTreeSet<&IntersectionId> {
        self.tiles
            .values()
            .flat_map(|tile| tile.intersections.values())
            .collect()
    }

    /// The tile bordering `tile` across its `side`, if both exist
    pub fn neighbor_across(&self, tile: &TileId, side: Side) -> Option<&TileId> {
        let edge = self.tiles.get(tile)?.edges.get(&side)?;
        self.edges.get(edge)?.other_tile(tile)
    }

    /// Check that every reference in the graph resolves and that tiles
    /// sharing an edge or intersection agree on which sides it sits on.
    ///
    /// Returns the first defect found, walking tiles then edges in id order.
    pub fn validate(&self) -> Result<(), GraphDefect> {
        if !self.tiles.contains_key(&self.anchor_tile) {
            return Err(GraphDefect::MissingAnchor(self.anchor_tile.clone()));
        }

        for (tile_id, tile) in &self.tiles {
            let mut seen = BTreeSet::new();
            for (side, edge_id) in &tile.edges {
                if !seen.insert(edge_id) {
                    return Err(GraphDefect::SideMismatch {
                        edge: edge_id.clone(),
                        tile: tile_id.clone(),
                        side: *side,
                    });
                }
                let edge = self.edges.get(edge_id).ok_or_else(|| GraphDefect::UnknownEdge {
                    tile: tile_id.clone(),
                    side: *side,
                    edge: edge_id.clone(),
                })?;
                if !edge.tiles.contains(tile_id) {
                    return Err(GraphDefect::EdgeNotLinked {
                        tile: tile_id.clone(),
                        edge: edge_id.clone(),
                    });
                }
            }
        }

        for (edge_id, edge) in &self.edges {
            let distinct: BTreeSet<_> = edge.tiles.iter().collect();
            if !(1..=2).contains(&edge.tiles.len()) || distinct.len() != edge.tiles.len() {
                return Err(GraphDefect::EdgeArity {
                    edge: edge_id.clone(),
                    count: edge.tiles.len(),
                });
            }
            if let Some(tile) = edge.tiles.iter().find(|t| !self.tiles.contains_key(*t)) {
                return Err(GraphDefect::UnknownTile {
                    edge: edge_id.clone(),
                    tile: tile.clone(),
                });
            }
        }

        self.validate_edge_sides()?;
        self.validate_intersection_sides()
    }

    /// A shared edge sits on `side` of one tile and `side.opposite()` of
    /// the other.
    fn validate_edge_sides(&self) -> Result<(), GraphDefect> {
        for (tile_id, tile) in &self.tiles {
            for (side, edge_id) in &tile.edges {
                let Some(other) = self.neighbor_across(tile_id, *side) else {
                    continue;
                };
                let expected = side.opposite();
                let named = self.tiles.get(other).and_then(|t| t.edges.get(&expected));
                if named != Some(edge_id) {
                    return Err(GraphDefect::SideMismatch {
                        edge: edge_id.clone(),
                        tile: other.clone(),
                        side: expected,
                    });
                }
            }
        }
        Ok(())
    }

    /// The corner on `side` of a tile is the corner on
    /// `side.opposite().previous()` of the tile across `side`, and on
    /// `side.next().opposite()` of the tile across `side.next()`. No other
    /// tile may name it.
    fn validate_intersection_sides(&self) -> Result<(), GraphDefect> {
        let mut named_by: BTreeMap<&IntersectionId, Vec<(&TileId, Side)>> = BTreeMap::new();
        for (tile_id, tile) in &self.tiles {
            for (side, corner) in &tile.intersections {
                named_by.entry(corner).or_default().push((tile_id, *side));
            }
        }

        for (corner, mentions) in &named_by {
            for &(tile_id, side) in mentions {
                let sharing = [
                    (side, side.opposite().previous()),
                    (side.next(), side.next().opposite()),
                ];

                for (across, at) in sharing {
                    let neighbor = self
                        .neighbor_across(tile_id, across)
                        .and_then(|id| self.tiles.get(id).map(|t| (id, t)));
                    if let Some((neighbor_id, neighbor)) = neighbor {
                        match neighbor.intersections.get(&at) {
                            Some(named) if named != *corner => {
                                return Err(GraphDefect::IntersectionSideMismatch {
                                    intersection: (*corner).clone(),
                                    tile: neighbor_id.clone(),
                                    side: at,
                                });
                            }
                            _ => {}
                        }
                    }
                }

                for &(other_id, other_side) in mentions {
                    if other_id == tile_id && other_side == side {
                        continue;
                    }
                    let fits = sharing.iter().any(|&(across, at)| {
                        other_side == at && self.neighbor_across(tile_id, across) == Some(other_id)
                    });
                    if !fits {
                        return Err(GraphDefect::IntersectionSideMismatch {
                            intersection: (*corner).clone(),
                            tile: other_id.clone(),
                            side: other_side,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
