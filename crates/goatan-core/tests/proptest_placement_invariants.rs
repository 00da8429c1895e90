//! Property-based invariant tests for board placement.
//!
//! Boards are grown cell by cell from a center tile into arbitrary
//! connected shapes, then placed. These tests verify:
//!
//! 1. Every tile, edge and intersection is placed exactly once
//! 2. Shared edges and intersections agree with every tile naming them
//! 3. Visiting order never changes coordinates
//! 4. Moving the anchor translates the whole board
//! 5. Placement is idempotent
//! 6. Breaking any edge reference rejects the whole graph

use goatan_core::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

// ── Strategies ──────────────────────────────────────────────────────────

/// One growth step: pick an existing cell and grow across one of its sides.
fn growth_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((any::<usize>(), 0usize..6), 0..40)
}

const TERRAIN: [TileType; 6] = [
    TileType::Brick,
    TileType::Stone,
    TileType::Wheat,
    TileType::Sheep,
    TileType::Wood,
    TileType::Desert,
];

/// Build a connected board from growth steps, anchored at the center cell.
fn grow_board(steps: &[(usize, usize)], seed: u64) -> BoardGraph {
    let mut coords = vec![HexCoord::default()];
    let mut seen: HashSet<HexCoord> = coords.iter().copied().collect();
    for &(from, side) in steps {
        let next = coords[from % coords.len()].neighbor(Side::from_index(side));
        if seen.insert(next) {
            coords.push(next);
        }
    }

    let cells: Vec<Cell> = coords
        .iter()
        .enumerate()
        .map(|(i, coord)| Cell::new(*coord, TERRAIN[i % TERRAIN.len()].clone()))
        .collect();
    let mut rng = StdRng::seed_from_u64(seed);
    graph_from_cells(&cells, &mut rng)
}

/// Frontier that pops a random pending tile
struct ShuffledFrontier {
    pending: Vec<TileId>,
    rng: StdRng,
}

impl ShuffledFrontier {
    fn new(seed: u64) -> Self {
        Self {
            pending: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Frontier for ShuffledFrontier {
    fn push(&mut self, tile: TileId) {
        self.pending.push(tile);
    }

    fn pop(&mut self) -> Option<TileId> {
        if self.pending.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.pending.len());
        Some(self.pending.swap_remove(index))
    }
}

fn positions(registry: &EntityRegistry) -> Vec<(String, Point)> {
    let mut all: Vec<(String, Point)> = registry
        .tiles()
        .map(|t| (format!("tile {}", t.id), t.position))
        .chain(registry.edges().map(|e| (format!("edge {}", e.id), e.position)))
        .chain(
            registry
                .intersections()
                .map(|i| (format!("intersection {}", i.id), i.position)),
        )
        .collect();
    all.sort_by(|a, b| a.0.cmp(&b.0));
    all
}

// ═══════════════════════════════════════════════════════════════════════
// 1. Every entity placed exactly once
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn every_entity_placed_once(steps in growth_strategy(), seed in any::<u64>()) {
        let graph = grow_board(&steps, seed);
        let registry = PlacementEngine::default().place(&graph).unwrap();

        prop_assert_eq!(registry.tile_count(), graph.tiles.len());
        prop_assert_eq!(registry.edge_count(), graph.edges.len());
        prop_assert_eq!(registry.intersection_count(), graph.intersection_ids().len());
        prop_assert_eq!(registry.unreachable(&graph), None);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Geometric consistency from every referencing tile
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn shared_entities_agree_with_every_tile(steps in growth_strategy(), seed in any::<u64>()) {
        let graph = grow_board(&steps, seed);
        let dims = TileDimensions::default();
        let registry = PlacementEngine::new(dims).place(&graph).unwrap();

        for (id, tile) in &graph.tiles {
            let center = registry.tile(id).unwrap().position;
            for (side, edge) in &tile.edges {
                let placed = registry.edge(edge).unwrap();
                prop_assert_eq!(placed.position, center + dims.edge_offset(*side));
                prop_assert_eq!(placed.orientation, geometry::edge_orientation(*side));
            }
            for (side, intersection) in &tile.intersections {
                let placed = registry.intersection(intersection).unwrap();
                prop_assert_eq!(placed.position, center + dims.intersection_offset(*side));
            }
        }
    }

    #[test]
    fn neighbors_sit_one_offset_apart(steps in growth_strategy(), seed in any::<u64>()) {
        let graph = grow_board(&steps, seed);
        let dims = TileDimensions::default();
        let registry = PlacementEngine::new(dims).place(&graph).unwrap();

        for (id, tile) in &graph.tiles {
            let center = registry.tile(id).unwrap().position;
            for (side, edge) in &tile.edges {
                if let Some(other) = graph.edge(edge).and_then(|e| e.other_tile(id)) {
                    let neighbor = registry.tile(other).unwrap().position;
                    prop_assert_eq!(neighbor, center + dims.tile_offset(*side));
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Visiting order changes discovery order only
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn random_visit_order_yields_same_coordinates(
        steps in growth_strategy(),
        seed in any::<u64>(),
        order_seed in any::<u64>(),
    ) {
        let graph = grow_board(&steps, seed);
        let engine = PlacementEngine::default();

        let fifo = engine.place(&graph).unwrap();
        let shuffled = engine
            .place_with_frontier(&graph, ShuffledFrontier::new(order_seed))
            .unwrap();

        prop_assert_eq!(positions(&fifo), positions(&shuffled));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Anchor translation
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn moving_anchor_translates_board(
        steps in growth_strategy(),
        seed in any::<u64>(),
        dx in -4000i32..4000,
        dy in -4000i32..4000,
    ) {
        let graph = grow_board(&steps, seed);
        let (dx, dy) = (f64::from(dx), f64::from(dy));

        let base = PlacementEngine::default().place(&graph).unwrap();
        let moved = PlacementEngine::default()
            .with_origin(Point::new(dx, dy))
            .place(&graph)
            .unwrap();

        let expected: Vec<(String, Point)> = positions(&base)
            .into_iter()
            .map(|(id, p)| (id, p.translate(dx, dy)))
            .collect();
        prop_assert_eq!(positions(&moved), expected);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Idempotence
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn placement_is_idempotent(steps in growth_strategy(), seed in any::<u64>()) {
        let graph = grow_board(&steps, seed);
        let engine = PlacementEngine::default();
        prop_assert_eq!(engine.place(&graph), engine.place(&graph));
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Fail closed
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dropping_any_edge_rejects_graph(
        steps in growth_strategy(),
        seed in any::<u64>(),
        pick in any::<usize>(),
    ) {
        let mut graph = grow_board(&steps, seed);
        let victim = graph.edges.keys().nth(pick % graph.edges.len()).cloned().unwrap();
        graph.edges.remove(&victim);

        let result = PlacementEngine::default().place(&graph);
        let rejected = matches!(result, Err(LayoutError::MalformedGraph(_)));
        prop_assert!(rejected);
    }
}
