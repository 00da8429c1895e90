//! Deduplicating store of placed board entities.
//!
//! A registry is produced by one placement pass and never patched
//! afterwards. Each id is placed once; placing it again is a no-op that
//! keeps the first position.
//!
//! Iteration follows discovery order, which is what the renderer draws in.

use crate::board::{BoardGraph, EdgeId, IntersectionId, ResourceNumber, TileId, TileType};
use crate::geometry::{EdgeOrientation, Point};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A tile with its final center position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub id: TileId,
    pub position: Point,
    pub tile_type: TileType,
    pub resource_number: Option<ResourceNumber>,
}

/// An edge with its final midpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedEdge {
    pub id: EdgeId,
    pub position: Point,
    pub orientation: EdgeOrientation,
}

/// An intersection with its final vertex position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedIntersection {
    pub id: IntersectionId,
    pub position: Point,
}

/// Everything placed by one pass, keyed by id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRegistry {
    tiles: IndexMap<TileId, PlacedTile>,
    edges: IndexMap<EdgeId, PlacedEdge>,
    intersections: IndexMap<IntersectionId, PlacedIntersection>,
}

impl EntityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tile(&self, id: &TileId) -> Option<&PlacedTile> {
        self.tiles.get(id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&PlacedEdge> {
        self.edges.get(id)
    }

    pub fn intersection(&self, id: &IntersectionId) -> Option<&PlacedIntersection> {
        self.intersections.get(id)
    }

    pub fn contains_tile(&self, id: &TileId) -> bool {
        self.tiles.contains_key(id)
    }

    pub fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.contains_key(id)
    }

    pub fn contains_intersection(&self, id: &IntersectionId) -> bool {
        self.intersections.contains_key(id)
    }

    /// Tiles in discovery order
    pub fn tiles(&self) -> impl Iterator<Item = &PlacedTile> {
        self.tiles.values()
    }

    /// Edges in discovery order
    pub fn edges(&self) -> impl Iterator<Item = &PlacedEdge> {
        self.edges.values()
    }

    /// Intersections in discovery order
    pub fn intersections(&self) -> impl Iterator<Item = &PlacedIntersection> {
        self.intersections.values()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.edges.is_empty() && self.intersections.is_empty()
    }

    /// Register a tile unless its id is already known.
    ///
    /// Returns `true` if the tile was newly placed.
    pub(crate) fn insert_tile(&mut self, tile: PlacedTile) -> bool {
        if self.tiles.contains_key(&tile.id) {
            return false;
        }
        self.tiles.insert(tile.id.clone(), tile);
        true
    }

    pub(crate) fn insert_edge(&mut self, edge: PlacedEdge) -> bool {
        if self.edges.contains_key(&edge.id) {
            return false;
        }
        self.edges.insert(edge.id.clone(), edge);
        true
    }

    pub(crate) fn insert_intersection(&mut self, intersection: PlacedIntersection) -> bool {
        if self.intersections.contains_key(&intersection.id) {
            return false;
        }
        self.intersections.insert(intersection.id.clone(), intersection);
        true
    }

    /// Ids in `graph` that this registry never placed, if any
    pub fn unreachable(&self, graph: &BoardGraph) -> Option<Unreachable> {
        let report = Unreachable {
            tiles: graph
                .tiles
                .keys()
                .filter(|id| !self.contains_tile(id))
                .cloned()
                .collect(),
            edges: graph
                .edges
                .keys()
                .filter(|id| !self.contains_edge(id))
                .cloned()
                .collect(),
            intersections: graph
                .intersection_ids()
                .into_iter()
                .filter(|id| !self.contains_intersection(id))
                .cloned()
                .collect(),
        };
        (!report.is_empty()).then_some(report)
    }
}

/// Graph entities a placement pass could not reach from the anchor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unreachable {
    pub tiles: Vec<TileId>,
    pub edges: Vec<EdgeId>,
    pub intersections: Vec<IntersectionId>,
}

impl Unreachable {
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.edges.is_empty() && self.intersections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tiles.len() + self.edges.len() + self.intersections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: &str, x: f64) -> PlacedTile {
        PlacedTile {
            id: id.into(),
            position: Point::new(x, 0.0),
            tile_type: TileType::Sheep,
            resource_number: None,
        }
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = EntityRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.tile_count(), 0);
    }

    #[test]
    fn test_first_placement_wins() {
        let mut registry = EntityRegistry::new();
        assert!(registry.insert_tile(tile("a", 1.0)));
        assert!(!registry.insert_tile(tile("a", 99.0)));

        assert_eq!(registry.tile_count(), 1);
        assert_eq!(registry.tile(&"a".into()).unwrap().position, Point::new(1.0, 0.0));
    }

    #[test]
    fn test_iterates_in_discovery_order() {
        let mut registry = EntityRegistry::new();
        for (id, x) in [("z", 0.0), ("a", 1.0), ("m", 2.0)] {
            registry.insert_tile(tile(id, x));
        }

        let order: Vec<_> = registry.tiles().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_kinds_do_not_collide() {
        let mut registry = EntityRegistry::new();
        registry.insert_tile(tile("x", 0.0));
        assert!(registry.insert_edge(PlacedEdge {
            id: "x".into(),
            position: Point::ORIGIN,
            orientation: EdgeOrientation::Horizontal,
        }));
        assert!(registry.insert_intersection(PlacedIntersection {
            id: "x".into(),
            position: Point::ORIGIN,
        }));

        assert!(registry.contains_tile(&"x".into()));
        assert!(registry.contains_edge(&"x".into()));
        assert!(registry.contains_intersection(&"x".into()));
    }
}
