//! Board generation: builds a complete board graph with fresh ids.
//!
//! Generation works on axial coordinates so that neighbors are known up
//! front; the coordinates are then thrown away and only the graph (tiles,
//! edges, intersections and their sides) is kept. Every shared edge and
//! intersection is created once and linked to each tile that touches it.

use crate::board::{
    BoardGraph, EdgeDefinition, EdgeId, IntersectionId, ResourceNumber, TileDefinition, TileId,
    TileType,
};
use crate::hex::{HexCoord, Side};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use std::collections::{HashMap, HashSet};
use tracing::debug;
use uuid::{Builder, Uuid};

/// Standard terrain pool: 4 wood, 4 sheep, 4 wheat, 3 brick, 3 stone, 1 desert
const STANDARD_TILES: [TileType; 19] = [
    TileType::Wood,
    TileType::Wood,
    TileType::Wood,
    TileType::Wood,
    TileType::Sheep,
    TileType::Sheep,
    TileType::Sheep,
    TileType::Sheep,
    TileType::Wheat,
    TileType::Wheat,
    TileType::Wheat,
    TileType::Wheat,
    TileType::Brick,
    TileType::Brick,
    TileType::Brick,
    TileType::Stone,
    TileType::Stone,
    TileType::Stone,
    TileType::Desert,
];

/// Standard number pool (one 2 and one 12, two of everything else but 7)
const STANDARD_NUMBERS: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// Attempts at dealing numbers before settling for adjacent 6s and 8s
const MAX_NUMBER_DEALS: usize = 100;

/// Source of terrain and numbers for generated tiles
pub trait TileProvider {
    fn next_tile(&mut self, rng: &mut dyn RngCore) -> (TileType, Option<ResourceNumber>);
}

/// Deals tiles from the standard shuffled pools.
///
/// Pools are refilled and reshuffled when they run out, so boards larger
/// than the standard one keep the standard proportions.
#[derive(Debug, Clone, Default)]
pub struct StandardProvider {
    tiles: Vec<TileType>,
    numbers: Vec<ResourceNumber>,
}

impl StandardProvider {
    pub fn new() -> Self {
        Self::default()
    }

    fn draw_tile(&mut self, rng: &mut dyn RngCore) -> TileType {
        if self.tiles.is_empty() {
            self.tiles = STANDARD_TILES.to_vec();
            self.tiles.shuffle(rng);
        }
        self.tiles.pop().unwrap_or(TileType::Desert)
    }

    fn draw_number(&mut self, rng: &mut dyn RngCore) -> Option<ResourceNumber> {
        if self.numbers.is_empty() {
            self.numbers = STANDARD_NUMBERS
                .iter()
                .filter_map(|n| ResourceNumber::try_from(*n).ok())
                .collect();
            self.numbers.shuffle(rng);
        }
        self.numbers.pop()
    }
}

impl TileProvider for StandardProvider {
    fn next_tile(&mut self, rng: &mut dyn RngCore) -> (TileType, Option<ResourceNumber>) {
        let tile_type = self.draw_tile(rng);
        let number = if tile_type.is_productive() {
            self.draw_number(rng)
        } else {
            None
        };
        (tile_type, number)
    }
}

/// Generates hexagonal boards of a given radius around a center tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGenerator {
    radius: u32,
}

impl BoardGenerator {
    /// Radius of the standard 19-tile board
    pub const STANDARD_RADIUS: u32 = 2;

    pub fn new(radius: u32) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Generate a board with the standard pools and a thread-local RNG
    pub fn generate(&self) -> BoardGraph {
        let mut rng = rand::thread_rng();
        self.generate_with_rng(&mut rng)
    }

    /// Generate a board with a provided RNG.
    /// This allows for deterministic board generation when needed
    pub fn generate_with_rng<R: Rng>(&self, rng: &mut R) -> BoardGraph {
        self.generate_with_provider(&mut StandardProvider::new(), rng)
    }

    pub fn generate_with_provider<P: TileProvider, R: Rng>(
        &self,
        provider: &mut P,
        rng: &mut R,
    ) -> BoardGraph {
        let coords = HexCoord::default().within_radius(self.radius);
        let mut cells: Vec<Cell> = coords
            .into_iter()
            .map(|coord| {
                let (tile_type, resource_number) = provider.next_tile(rng);
                Cell {
                    coord,
                    tile_type,
                    resource_number,
                }
            })
            .collect();

        separate_hot_numbers(&mut cells, rng);
        graph_from_cells(&cells, rng)
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new(Self::STANDARD_RADIUS)
    }
}

/// One tile of a board under construction
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub coord: HexCoord,
    pub tile_type: TileType,
    pub resource_number: Option<ResourceNumber>,
}

impl Cell {
    pub fn new(coord: HexCoord, tile_type: TileType) -> Self {
        Self {
            coord,
            tile_type,
            resource_number: None,
        }
    }
}

/// Redeal numbers among numbered cells until no 6 or 8 borders another.
///
/// Gives up after a fixed number of deals and keeps the last one.
fn separate_hot_numbers<R: Rng>(cells: &mut [Cell], rng: &mut R) {
    let numbered: Vec<usize> = (0..cells.len())
        .filter(|&i| cells[i].resource_number.is_some())
        .collect();
    let mut numbers: Vec<ResourceNumber> =
        numbered.iter().filter_map(|&i| cells[i].resource_number).collect();

    for attempt in 0..MAX_NUMBER_DEALS {
        if !has_adjacent_hot_numbers(cells) {
            debug!(attempt, "dealt resource numbers");
            return;
        }
        numbers.shuffle(rng);
        for (&i, number) in numbered.iter().zip(&numbers) {
            cells[i].resource_number = Some(*number);
        }
    }
}

fn has_adjacent_hot_numbers(cells: &[Cell]) -> bool {
    let hot: HashSet<HexCoord> = cells
        .iter()
        .filter(|c| c.resource_number.is_some_and(|n| n.is_hot()))
        .map(|c| c.coord)
        .collect();
    hot.iter()
        .any(|coord| coord.neighbors().iter().any(|n| hot.contains(n)))
}

/// Fresh id drawn from `rng`, formatted as a v4 UUID
fn random_id<R: Rng>(rng: &mut R) -> String {
    let uuid: Uuid = Builder::from_random_bytes(rng.gen()).into_uuid();
    uuid.to_string()
}

/// Build the board graph for a set of cells.
///
/// Cells bordering each other on the hex grid share an edge and two
/// intersections. The first cell becomes the anchor. Duplicate coordinates
/// keep their first cell.
pub fn graph_from_cells<R: Rng>(cells: &[Cell], rng: &mut R) -> BoardGraph {
    let mut order: Vec<HexCoord> = Vec::with_capacity(cells.len());
    let mut ids: HashMap<HexCoord, TileId> = HashMap::new();
    let mut tiles: HashMap<HexCoord, TileDefinition> = HashMap::new();
    for cell in cells {
        if ids.contains_key(&cell.coord) {
            continue;
        }
        order.push(cell.coord);
        ids.insert(cell.coord, TileId::new(random_id(rng)));
        tiles.insert(
            cell.coord,
            TileDefinition::new(cell.tile_type.clone(), cell.resource_number),
        );
    }

    let anchor = order
        .first()
        .and_then(|coord| ids.get(coord))
        .cloned()
        .unwrap_or_else(|| TileId::new(random_id(rng)));
    let mut graph = BoardGraph::new(anchor);

    for coord in &order {
        // Intersections first: each corner is shared with the neighbors
        // across `side` and across `side.next()`.
        for side in Side::ALL {
            if tiles[coord].intersections.contains_key(&side) {
                continue;
            }
            let intersection = IntersectionId::new(random_id(rng));
            let sharing = [
                (*coord, side),
                (coord.neighbor(side), side.opposite().previous()),
                (coord.neighbor(side.next()), side.next().opposite()),
            ];
            for (at, corner) in sharing {
                if let Some(tile) = tiles.get_mut(&at) {
                    tile.intersections.insert(corner, intersection.clone());
                }
            }
        }

        for side in Side::ALL {
            if tiles[coord].edges.contains_key(&side) {
                continue;
            }
            let edge = EdgeId::new(random_id(rng));
            let mut bordering = vec![ids[coord].clone()];
            let across = coord.neighbor(side);
            if let Some(neighbor) = tiles.get_mut(&across) {
                neighbor.edges.insert(side.opposite(), edge.clone());
                bordering.push(ids[&across].clone());
            }
            if let Some(tile) = tiles.get_mut(coord) {
                tile.edges.insert(side, edge.clone());
            }
            graph.edges.insert(edge, EdgeDefinition::new(bordering));
        }
    }

    for coord in order {
        if let (Some(id), Some(tile)) = (ids.remove(&coord), tiles.remove(&coord)) {
            graph.tiles.insert(id, tile);
        }
    }

    debug!(
        tiles = graph.tiles.len(),
        edges = graph.edges.len(),
        "generated board graph"
    );
    graph
}
