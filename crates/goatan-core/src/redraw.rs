//! Redraw cycle: turns each incoming snapshot into a fresh frame.
//!
//! A redraw validates the snapshot, runs one placement pass into a new
//! registry, composes render items with the piece and hint overlay, and
//! only then swaps the old frame out of the sink. A rejected snapshot
//! leaves the previous frame on screen untouched.

use crate::board::TileType;
use crate::error::LayoutError;
use crate::geometry::Point;
use crate::placement::PlacementEngine;
use crate::player::{PlayerColor, PlayerId};
use crate::registry::{EntityRegistry, Unreachable};
use crate::render::{EntityRef, OverlayState, RenderItem, RenderSink, Tint, VisualKind};
use crate::snapshot::{BoardSnapshot, Piece, PieceKind};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Non-fatal problems found while composing a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Entities the anchor cannot reach; they are never drawn
    Unreachable(Unreachable),
    /// Something without art, drawn as a placeholder
    UnknownVisualKind { entity: EntityRef, detail: String },
}

/// Summary of one successful redraw
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedrawReport {
    pub tiles: usize,
    pub edges: usize,
    pub intersections: usize,
    /// Items wired to send a placement request
    pub activatable: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// What is currently on screen
#[derive(Debug)]
pub struct Frame<H> {
    registry: EntityRegistry,
    items: Vec<RenderItem>,
    handles: Vec<H>,
}

impl<H> Frame<H> {
    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }
}

/// Owns the render sink and the frame currently drawn into it
pub struct RedrawCycle<S: RenderSink> {
    engine: PlacementEngine,
    sink: S,
    frame: Option<Frame<S::Handle>>,
}

impl<S: RenderSink> RedrawCycle<S> {
    pub fn new(engine: PlacementEngine, sink: S) -> Self {
        Self {
            engine,
            sink,
            frame: None,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn frame(&self) -> Option<&Frame<S::Handle>> {
        self.frame.as_ref()
    }

    /// Replace whatever is on screen with `snapshot`.
    ///
    /// On error nothing is torn down and nothing new is drawn.
    pub fn redraw(&mut self, snapshot: &BoardSnapshot) -> Result<RedrawReport, LayoutError> {
        let registry = snapshot
            .validate()
            .map_err(LayoutError::from)
            .and_then(|()| self.engine.place(&snapshot.board))
            .map_err(|e| {
                error!("rejecting snapshot: {}", e);
                e
            })?;

        let (items, diagnostics) = compose_frame(snapshot, &registry);
        for diagnostic in &diagnostics {
            match diagnostic {
                Diagnostic::Unreachable(missing) => warn!(
                    tiles = missing.tiles.len(),
                    edges = missing.edges.len(),
                    intersections = missing.intersections.len(),
                    "board has entities unreachable from anchor {}",
                    snapshot.board.anchor_tile
                ),
                Diagnostic::UnknownVisualKind { entity, detail } => {
                    warn!("no visual for {}: {}", entity, detail)
                }
            }
        }

        self.clear();

        let mut handles = Vec::with_capacity(items.len());
        let mut activatable = 0;
        for item in &items {
            let handle = self.sink.place(item);
            if let Some(request) = item.activation() {
                self.sink.on_activate(&handle, request);
                activatable += 1;
            }
            handles.push(handle);
        }

        let report = RedrawReport {
            tiles: registry.tile_count(),
            edges: registry.edge_count(),
            intersections: registry.intersection_count(),
            activatable,
            diagnostics,
        };
        info!(
            tiles = report.tiles,
            edges = report.edges,
            intersections = report.intersections,
            activatable = report.activatable,
            "redraw complete"
        );

        self.frame = Some(Frame {
            registry,
            items,
            handles,
        });
        Ok(report)
    }

    /// Remove every visual of the current frame from the sink
    pub fn clear(&mut self) {
        if let Some(frame) = self.frame.take() {
            for handle in frame.handles {
                self.sink.remove(handle);
            }
        }
    }
}

/// Build render items for everything in `registry`, in discovery order:
/// tiles, then edges, then intersections.
pub fn compose_frame(
    snapshot: &BoardSnapshot,
    registry: &EntityRegistry,
) -> (Vec<RenderItem>, Vec<Diagnostic>) {
    let mut items = Vec::with_capacity(
        registry.tile_count() + registry.edge_count() + registry.intersection_count(),
    );
    let mut diagnostics = Vec::new();

    if let Some(missing) = registry.unreachable(&snapshot.board) {
        diagnostics.push(Diagnostic::Unreachable(missing));
    }

    for tile in registry.tiles() {
        let entity = EntityRef::Tile(tile.id.clone());
        let kind = match &tile.tile_type {
            TileType::Unknown(name) => {
                diagnostics.push(Diagnostic::UnknownVisualKind {
                    entity: entity.clone(),
                    detail: format!("tile type {:?}", name),
                });
                VisualKind::Placeholder
            }
            tile_type => VisualKind::Tile {
                tile_type: tile_type.clone(),
                resource_number: tile.resource_number,
            },
        };
        items.push(RenderItem {
            entity,
            kind,
            position: tile.position,
            tint: None,
            overlay: OverlayState::default(),
        });
    }

    for edge in registry.edges() {
        let entity = EntityRef::Edge(edge.id.clone());
        let piece = snapshot.pieces.edges.get(&edge.id);
        let kind = match piece.map(|p| &p.kind) {
            None => VisualKind::Edge {
                orientation: edge.orientation,
            },
            Some(PieceKind::Road) => VisualKind::Road {
                orientation: edge.orientation,
            },
            Some(other) => {
                diagnostics.push(Diagnostic::UnknownVisualKind {
                    entity: entity.clone(),
                    detail: format!("piece {:?} on an edge", other.name()),
                });
                VisualKind::Placeholder
            }
        };
        let hinted = snapshot.hints.edges.contains(&edge.id);
        items.push(overlaid(snapshot, entity, kind, edge.position, piece, hinted));
    }

    for intersection in registry.intersections() {
        let entity = EntityRef::Intersection(intersection.id.clone());
        let piece = snapshot.pieces.intersections.get(&intersection.id);
        let kind = match piece.map(|p| &p.kind) {
            None => VisualKind::Intersection,
            Some(PieceKind::House) => VisualKind::House,
            Some(other) => {
                diagnostics.push(Diagnostic::UnknownVisualKind {
                    entity: entity.clone(),
                    detail: format!("piece {:?} on an intersection", other.name()),
                });
                VisualKind::Placeholder
            }
        };
        let hinted = snapshot.hints.intersections.contains(&intersection.id);
        items.push(overlaid(
            snapshot,
            entity,
            kind,
            intersection.position,
            piece,
            hinted,
        ));
    }

    (items, diagnostics)
}

fn overlaid(
    snapshot: &BoardSnapshot,
    entity: EntityRef,
    kind: VisualKind,
    position: Point,
    piece: Option<&Piece>,
    hinted: bool,
) -> RenderItem {
    let tint = match piece {
        Some(piece) => Some(seat_tint(snapshot, &piece.player)),
        None if hinted => Some(Tint::HINT),
        None => None,
    };
    RenderItem {
        entity,
        kind,
        position,
        tint,
        overlay: OverlayState {
            piece: piece.map(|p| (p.player.clone(), p.kind.clone())),
            hinted,
            active: piece.is_some_and(|p| snapshot.is_active(&p.player)),
        },
    }
}

fn seat_tint(snapshot: &BoardSnapshot, player: &PlayerId) -> Tint {
    snapshot
        .seat_of(player)
        .map(|seat| Tint(PlayerColor::for_seat(seat).hex_code()))
        .unwrap_or(Tint::NEUTRAL)
}
