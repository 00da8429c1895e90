//! Player identity and seat colors.
//!
//! Players are opaque ids assigned by the server. Their color comes from
//! their seat, i.e. their position in the snapshot's player list.

use crate::board::id_type;

id_type!(
    /// Server-assigned player identifier
    PlayerId
);

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Orange,
    White,
}

impl PlayerColor {
    /// Get color for a seat index
    pub fn for_seat(seat: usize) -> Self {
        match seat % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Orange,
            _ => PlayerColor::White,
        }
    }

    /// Get hex color code for rendering
    pub fn hex_code(&self) -> u32 {
        match self {
            PlayerColor::Red => 0xE74C3C,
            PlayerColor::Blue => 0x3498DB,
            PlayerColor::Orange => 0xE67E22,
            PlayerColor::White => 0xECF0F1,
        }
    }
}
