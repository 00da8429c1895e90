//! Integration tests for the Goatan layout engine.
//!
//! These tests run whole boards through generation, JSON, placement and
//! redraw, the way the viewer does.

use goatan_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn standard_board(seed: u64) -> BoardGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    BoardGenerator::default().generate_with_rng(&mut rng)
}

/// Sink that only counts what is on screen
#[derive(Default)]
struct CountingSink {
    next: u64,
    live: Vec<u64>,
    activatable: Vec<u64>,
}

impl RenderSink for CountingSink {
    type Handle = u64;

    fn place(&mut self, _item: &RenderItem) -> u64 {
        self.next += 1;
        self.live.push(self.next);
        self.next
    }

    fn remove(&mut self, handle: u64) {
        self.live.retain(|h| *h != handle);
        self.activatable.retain(|h| *h != handle);
    }

    fn on_activate(&mut self, handle: &u64, _request: PlaceRequest) {
        self.activatable.push(*handle);
    }
}

#[test]
fn test_standard_board_places_everything_once() {
    let graph = standard_board(1);
    let registry = PlacementEngine::default().place(&graph).unwrap();

    assert_eq!(registry.tile_count(), 19);
    assert_eq!(registry.edge_count(), 72);
    assert_eq!(registry.intersection_count(), 54);
    assert_eq!(registry.unreachable(&graph), None);
}

#[test]
fn test_standard_board_survives_json() {
    let graph = standard_board(2);
    let json = serde_json::to_string(&graph).unwrap();
    let parsed: BoardSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.board, graph);

    let engine = PlacementEngine::default();
    assert_eq!(engine.place(&parsed.board), engine.place(&graph));
}

#[test]
fn test_anchor_sits_at_origin_and_ring_one_surrounds_it() {
    let graph = standard_board(3);
    let registry = PlacementEngine::default().place(&graph).unwrap();

    let anchor = registry.tile(&graph.anchor_tile).unwrap();
    assert_eq!(anchor.position, Point::ORIGIN);

    let anchor_def = graph.tile(&graph.anchor_tile).unwrap();
    let dims = TileDimensions::default();
    for side in Side::ALL {
        assert!(anchor_def.edges.contains_key(&side));
        let neighbor = graph.neighbor_across(&graph.anchor_tile, side).unwrap();
        let placed = registry.tile(neighbor).unwrap();
        assert_eq!(placed.position, Point::ORIGIN + dims.tile_offset(side));
    }
}

#[test]
fn test_boundary_edge_is_placed_without_a_neighbor() {
    let json = r#"{
        "anchor_tile": "t1",
        "tiles": {
            "t1": {
                "type": "wheat",
                "resource_number": 6,
                "edges": { "SOUTH": "e1" },
                "intersections": { "SOUTH": "i1" }
            }
        },
        "edges": { "e1": { "tiles": ["t1"] } }
    }"#;
    let snapshot: BoardSnapshot = serde_json::from_str(json).unwrap();
    let registry = PlacementEngine::default().place(&snapshot.board).unwrap();

    assert_eq!(registry.tile_count(), 1);
    let edge = registry.edge(&EdgeId::from("e1")).unwrap();
    assert_eq!(edge.position, Point::new(0.0, 111.0));
    assert_eq!(edge.orientation, EdgeOrientation::Horizontal);
    let corner = registry.intersection(&IntersectionId::from("i1")).unwrap();
    assert_eq!(corner.position, Point::new(-64.0, 111.0));
}

#[test]
fn test_missing_edge_rejects_whole_graph() {
    let mut graph = standard_board(4);
    let victim = graph.edges.keys().next().cloned().unwrap();
    graph.edges.remove(&victim);

    let result = PlacementEngine::default().place(&graph);
    assert!(matches!(
        result,
        Err(LayoutError::MalformedGraph(GraphDefect::UnknownEdge { .. }))
    ));
}

#[test]
fn test_missing_anchor_rejects_graph() {
    let mut graph = standard_board(5);
    graph.anchor_tile = TileId::from("nowhere");
    assert_eq!(
        PlacementEngine::default().place(&graph),
        Err(LayoutError::MalformedGraph(GraphDefect::MissingAnchor(
            TileId::from("nowhere")
        )))
    );
}

#[test]
fn test_placement_is_idempotent() {
    let graph = standard_board(6);
    let engine = PlacementEngine::default();
    assert_eq!(engine.place(&graph), engine.place(&graph));
}

#[test]
fn test_redraw_cycle_replaces_frames() {
    let graph = standard_board(7);
    let mut snapshot = BoardSnapshot::from_board(graph);
    let hinted: Vec<IntersectionId> = snapshot
        .board
        .intersection_ids()
        .into_iter()
        .take(3)
        .cloned()
        .collect();
    snapshot.hints.intersections.extend(hinted);

    let mut cycle = RedrawCycle::new(PlacementEngine::default(), CountingSink::default());
    let report = cycle.redraw(&snapshot).unwrap();
    assert_eq!(report.tiles + report.edges + report.intersections, 19 + 72 + 54);
    assert_eq!(report.activatable, 3);
    assert_eq!(cycle.sink().live.len(), 145);
    assert_eq!(cycle.sink().activatable.len(), 3);

    snapshot.hints = Hints::default();
    let report = cycle.redraw(&snapshot).unwrap();
    assert_eq!(report.activatable, 0);
    assert_eq!(cycle.sink().live.len(), 145);
    assert!(cycle.sink().activatable.is_empty());
}

#[test]
fn test_rejected_snapshot_keeps_frame_on_screen() {
    let snapshot = BoardSnapshot::from_board(standard_board(8));
    let mut cycle = RedrawCycle::new(PlacementEngine::default(), CountingSink::default());
    cycle.redraw(&snapshot).unwrap();
    let before = cycle.sink().live.clone();

    let mut broken = snapshot.clone();
    broken.board.anchor_tile = TileId::from("gone");
    assert!(cycle.redraw(&broken).is_err());
    assert_eq!(cycle.sink().live, before);
}

#[test]
fn test_corner_named_on_wrong_side_rejects_board() {
    let mut graph = standard_board(9);
    let anchor = graph.anchor_tile.clone();
    if let Some(tile) = graph.tiles.get_mut(&anchor) {
        let north = tile.intersections.remove(&Side::North).unwrap();
        let north_east = tile.intersections.remove(&Side::NorthEast).unwrap();
        tile.intersections.insert(Side::North, north_east);
        tile.intersections.insert(Side::NorthEast, north);
    }

    assert!(matches!(
        PlacementEngine::default().place(&graph),
        Err(LayoutError::MalformedGraph(
            GraphDefect::IntersectionSideMismatch { .. }
        ))
    ));
}
