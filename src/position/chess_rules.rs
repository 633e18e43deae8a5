//! Canonical chess-rule constants.
//!
//! Starting position, home squares for castling, and the draw thresholds used
//! by termination classification.

use crate::position::chess_types::{Color, Square};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const WHITE_KING_HOME: Square = 4;
pub const BLACK_KING_HOME: Square = 60;

pub const WHITE_KINGSIDE_ROOK_HOME: Square = 7;
pub const WHITE_QUEENSIDE_ROOK_HOME: Square = 0;
pub const BLACK_KINGSIDE_ROOK_HOME: Square = 63;
pub const BLACK_QUEENSIDE_ROOK_HOME: Square = 56;

/// Plies without a pawn move or capture that end the game (50 full moves).
pub const FIFTY_MOVE_RULE_PLIES: u16 = 100;

/// Occurrences of a signature that make a repetition draw.
pub const REPETITION_DRAW_COUNT: u32 = 3;

/// Squares that describe one castling move for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingGeometry {
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub empty_mask: u64,
    /// Square the king passes over (must not be attacked).
    pub king_transit: Square,
}

#[inline]
pub const fn king_home(color: Color) -> Square {
    match color {
        Color::White => WHITE_KING_HOME,
        Color::Black => BLACK_KING_HOME,
    }
}

pub const fn kingside_castling(color: Color) -> CastlingGeometry {
    match color {
        Color::White => CastlingGeometry {
            king_from: 4,
            king_to: 6,
            rook_from: 7,
            rook_to: 5,
            empty_mask: (1u64 << 5) | (1u64 << 6),
            king_transit: 5,
        },
        Color::Black => CastlingGeometry {
            king_from: 60,
            king_to: 62,
            rook_from: 63,
            rook_to: 61,
            empty_mask: (1u64 << 61) | (1u64 << 62),
            king_transit: 61,
        },
    }
}

pub const fn queenside_castling(color: Color) -> CastlingGeometry {
    match color {
        Color::White => CastlingGeometry {
            king_from: 4,
            king_to: 2,
            rook_from: 0,
            rook_to: 3,
            empty_mask: (1u64 << 1) | (1u64 << 2) | (1u64 << 3),
            king_transit: 3,
        },
        Color::Black => CastlingGeometry {
            king_from: 60,
            king_to: 58,
            rook_from: 56,
            rook_to: 59,
            empty_mask: (1u64 << 57) | (1u64 << 58) | (1u64 << 59),
            king_transit: 59,
        },
    }
}
