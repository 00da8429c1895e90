//! Board snapshot as pushed by the server on every state change.
//!
//! A snapshot is complete: the board graph plus everything sitting on it
//! (pieces, placement hints) and the turn state the surrounding UI shows.
//! The layout engine reads the graph; the redraw cycle reads pieces and
//! hints; the rest passes through untouched.

use crate::board::{BoardGraph, EdgeId, IntersectionId};
use crate::error::GraphDefect;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Kind of piece sitting on the board.
///
/// Unrecognized kinds are kept verbatim so they can be reported and drawn
/// as placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PieceKind {
    House,
    Road,
    Unknown(String),
}

impl PieceKind {
    pub fn name(&self) -> &str {
        match self {
            PieceKind::House => "house",
            PieceKind::Road => "road",
            PieceKind::Unknown(name) => name,
        }
    }
}

impl From<String> for PieceKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "house" => PieceKind::House,
            "road" => PieceKind::Road,
            _ => PieceKind::Unknown(name),
        }
    }
}

impl From<PieceKind> for String {
    fn from(kind: PieceKind) -> Self {
        match kind {
            PieceKind::Unknown(name) => name,
            known => known.name().to_string(),
        }
    }
}

/// A player's piece on an edge or intersection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub player: PlayerId,
    #[serde(rename = "type")]
    pub kind: PieceKind,
}

/// Pieces on the board, keyed by location
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pieces {
    #[serde(default)]
    pub edges: BTreeMap<EdgeId, Piece>,
    #[serde(default)]
    pub intersections: BTreeMap<IntersectionId, Piece>,
}

/// Locations where the receiving player may place a piece right now
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hints {
    #[serde(default)]
    pub edges: BTreeSet<EdgeId>,
    #[serde(default)]
    pub intersections: BTreeSet<IntersectionId>,
}

impl Hints {
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.intersections.is_empty()
    }
}

/// Complete board and turn state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(flatten)]
    pub board: BoardGraph,
    #[serde(default)]
    pub pieces: Pieces,
    #[serde(default)]
    pub hints: Hints,
    /// Seating order
    #[serde(default)]
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub active_player: Option<PlayerId>,
    /// Faces of the last dice roll
    #[serde(default)]
    pub roll: Option<Vec<u8>>,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub expecting_roll: bool,
}

impl BoardSnapshot {
    /// A snapshot of a bare board with nothing on it
    pub fn from_board(board: BoardGraph) -> Self {
        Self {
            board,
            pieces: Pieces::default(),
            hints: Hints::default(),
            players: Vec::new(),
            active_player: None,
            roll: None,
            phase: None,
            expecting_roll: false,
        }
    }

    /// Seat index of a player, if seated
    pub fn seat_of(&self, player: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p == player)
    }

    pub fn is_active(&self, player: &PlayerId) -> bool {
        self.active_player.as_ref() == Some(player)
    }

    /// Validate the board graph and every piece and hint location.
    pub fn validate(&self) -> Result<(), GraphDefect> {
        self.board.validate()?;

        let edges = self.pieces.edges.keys().chain(self.hints.edges.iter());
        for edge in edges {
            if self.board.edge(edge).is_none() {
                return Err(GraphDefect::UnknownOverlayEdge(edge.clone()));
            }
        }

        let known = self.board.intersection_ids();
        let intersections = self
            .pieces
            .intersections
            .keys()
            .chain(self.hints.intersections.iter());
        for intersection in intersections {
            if !known.contains(intersection) {
                return Err(GraphDefect::UnknownOverlayIntersection(intersection.clone()));
            }
        }

        Ok(())
    }
}
