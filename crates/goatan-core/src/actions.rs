//! Messages sent back to the server when the player acts on the board.
//!
//! The only action the board itself originates is placing a piece on a
//! hinted edge or intersection. Everything else (rolling, trading, ending
//! the turn) belongs to the UI around it.

use crate::board::{EdgeId, IntersectionId};
use serde::{Deserialize, Serialize};

/// Kind of piece a placement request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceType {
    /// Goes on an edge
    Road,
    /// Goes on an intersection
    House,
}

/// Request to place a piece, sent after the player activates a hint.
///
/// Serializes as `{"piece_type": "road", "item": "<edge id>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceRequest {
    pub piece_type: PieceType,
    pub item: String,
}

impl PlaceRequest {
    pub fn road(edge: &EdgeId) -> Self {
        Self {
            piece_type: PieceType::Road,
            item: edge.as_str().to_string(),
        }
    }

    pub fn house(intersection: &IntersectionId) -> Self {
        Self {
            piece_type: PieceType::House,
            item: intersection.as_str().to_string(),
        }
    }

    /// The edge this request targets, if it is a road
    pub fn edge(&self) -> Option<EdgeId> {
        (self.piece_type == PieceType::Road).then(|| EdgeId::new(self.item.as_str()))
    }

    /// The intersection this request targets, if it is a house
    pub fn intersection(&self) -> Option<IntersectionId> {
        (self.piece_type == PieceType::House).then(|| IntersectionId::new(self.item.as_str()))
    }
}
