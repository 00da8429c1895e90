//! JSON-lines protocol between the viewer and its host.

use goatan_core::{BoardSnapshot, EntityRef, OverlayState, PlaceRequest, Tint, VisualKind};
use serde::{Deserialize, Serialize};

/// Messages read from the host, one per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum InboundMessage {
    /// Full board state; replaces whatever is on screen
    Snapshot(BoardSnapshot),

    /// The player clicked a previously placed visual
    Activate { handle: u64 },
}

impl InboundMessage {
    pub fn is_snapshot(&self) -> bool {
        matches!(self, InboundMessage::Snapshot(_))
    }
}

/// Messages written to the host, one per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum OutboundMessage {
    /// Draw a visual for a board entity
    Place {
        handle: u64,
        entity: EntityRef,
        kind: VisualKind,
        x: f64,
        y: f64,
        tint: Option<Tint>,
        overlay: OverlayState,
    },

    /// Take a visual off the surface
    Remove { handle: u64 },

    /// Visual now sends a placement request when clicked
    Activatable { handle: u64 },

    /// Placement request for the server
    PlacePiece(PlaceRequest),

    /// Snapshot was refused; the previous frame stays up
    Rejected { message: String },
}
