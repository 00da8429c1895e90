//! Placement engine: walks the board graph and fixes every position.
//!
//! Starting from the anchor tile, the engine pops tiles off a frontier,
//! places each edge and intersection the tile names, and pushes every
//! newly discovered neighbor. Positions are derived from the popping tile's
//! own (already fixed) center through the geometry table, so the order in
//! which tiles are visited changes discovery order but never coordinates.

use crate::board::{BoardGraph, TileId};
use crate::error::{GraphDefect, LayoutError};
use crate::geometry::{edge_orientation, Point, TileDimensions};
use crate::registry::{EntityRegistry, PlacedEdge, PlacedIntersection, PlacedTile};
use std::collections::VecDeque;
use tracing::debug;

/// Pending tiles whose neighbors have not been explored yet.
pub trait Frontier {
    fn push(&mut self, tile: TileId);
    fn pop(&mut self) -> Option<TileId>;
}

/// Breadth-first order
impl Frontier for VecDeque<TileId> {
    fn push(&mut self, tile: TileId) {
        self.push_back(tile);
    }

    fn pop(&mut self) -> Option<TileId> {
        self.pop_front()
    }
}

/// Assigns pixel positions to a board graph
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlacementEngine {
    dimensions: TileDimensions,
    origin: Point,
}

impl PlacementEngine {
    pub fn new(dimensions: TileDimensions) -> Self {
        Self {
            dimensions,
            origin: Point::ORIGIN,
        }
    }

    /// Place the anchor tile somewhere other than (0, 0)
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Validate `graph` and place everything reachable from its anchor,
    /// breadth first.
    pub fn place(&self, graph: &BoardGraph) -> Result<EntityRegistry, LayoutError> {
        self.place_with_frontier(graph, VecDeque::new())
    }

    /// Like [`place`](Self::place), visiting tiles in the order `frontier` yields them.
    ///
    /// Nothing is returned unless the whole graph validates and every tile
    /// sits where each of its neighbors puts it.
    pub fn place_with_frontier<F: Frontier>(
        &self,
        graph: &BoardGraph,
        mut frontier: F,
    ) -> Result<EntityRegistry, LayoutError> {
        graph.validate()?;

        let mut registry = EntityRegistry::new();
        let anchor = self.tile_at(graph, &graph.anchor_tile, self.origin)?;
        registry.insert_tile(anchor);
        frontier.push(graph.anchor_tile.clone());

        while let Some(tile_id) = frontier.pop() {
            let tile = graph
                .tile(&tile_id)
                .ok_or_else(|| GraphDefect::MissingTile(tile_id.clone()))?;
            let center = match registry.tile(&tile_id) {
                Some(placed) => placed.position,
                None => continue,
            };

            for (side, edge_id) in &tile.edges {
                if !registry.contains_edge(edge_id) {
                    registry.insert_edge(PlacedEdge {
                        id: edge_id.clone(),
                        position: center + self.dimensions.edge_offset(*side),
                        orientation: edge_orientation(*side),
                    });
                }

                let edge = graph.edge(edge_id).ok_or_else(|| GraphDefect::UnknownEdge {
                    tile: tile_id.clone(),
                    side: *side,
                    edge: edge_id.clone(),
                })?;
                let Some(neighbor_id) = edge.other_tile(&tile_id) else {
                    continue;
                };
                let position = center + self.dimensions.tile_offset(*side);
                if let Some(placed) = registry.tile(neighbor_id) {
                    if !placed.position.coincides(position) {
                        return Err(GraphDefect::NeighborMisplaced {
                            tile: tile_id.clone(),
                            side: *side,
                            neighbor: neighbor_id.clone(),
                        }
                        .into());
                    }
                    continue;
                }

                registry.insert_tile(self.tile_at(graph, neighbor_id, position)?);
                frontier.push(neighbor_id.clone());
            }

            for (side, intersection_id) in &tile.intersections {
                if !registry.contains_intersection(intersection_id) {
                    registry.insert_intersection(PlacedIntersection {
                        id: intersection_id.clone(),
                        position: center + self.dimensions.intersection_offset(*side),
                    });
                }
            }
        }

        debug!(
            tiles = registry.tile_count(),
            edges = registry.edge_count(),
            intersections = registry.intersection_count(),
            "placement pass complete"
        );
        Ok(registry)
    }

    fn tile_at(
        &self,
        graph: &BoardGraph,
        id: &TileId,
        position: Point,
    ) -> Result<PlacedTile, GraphDefect> {
        let tile = graph
            .tile(id)
            .ok_or_else(|| GraphDefect::MissingTile(id.clone()))?;
        Ok(PlacedTile {
            id: id.clone(),
            position,
            tile_type: tile.tile_type.clone(),
            resource_number: tile.resource_number,
        })
    }
}
