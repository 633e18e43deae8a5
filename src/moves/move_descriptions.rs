//! Packed move encoding.
//!
//! A `LegalMove` is one candidate transition packed into a `u64`:
//!
//! ```text
//! bits  0..6   from square
//! bits  6..12  to square
//! bits 12..15  moved piece kind
//! bits 15..18  captured piece kind (7 = none)
//! bits 18..21  promotion piece kind (7 = none)
//! bits 21..    flags
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::position::chess_types::{PieceKind, Square};
use crate::notation::algebraic::square_to_algebraic;

const FROM_SHIFT: u64 = 0;
const TO_SHIFT: u64 = 6;
const MOVED_PIECE_SHIFT: u64 = 12;
const CAPTURED_PIECE_SHIFT: u64 = 15;
const PROMOTION_PIECE_SHIFT: u64 = 18;

const SQUARE_MASK: u64 = 0x3F;
const PIECE_MASK: u64 = 0x7;
pub const NO_PIECE_CODE: u64 = 0x7;

pub const FLAG_CAPTURE: u64 = 1u64 << 21;
pub const FLAG_DOUBLE_PAWN_PUSH: u64 = 1u64 << 22;
pub const FLAG_EN_PASSANT: u64 = 1u64 << 23;
pub const FLAG_CASTLE_KINGSIDE: u64 = 1u64 << 24;
pub const FLAG_CASTLE_QUEENSIDE: u64 = 1u64 << 25;
pub const FLAG_CASTLING: u64 = FLAG_CASTLE_KINGSIDE | FLAG_CASTLE_QUEENSIDE;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMove(u64);

impl LegalMove {
    #[inline]
    pub fn new(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: Option<PieceKind>,
        promotion_piece: Option<PieceKind>,
        flags: u64,
    ) -> Self {
        let mut out = 0u64;
        out |= u64::from(from) << FROM_SHIFT;
        out |= u64::from(to) << TO_SHIFT;
        out |= piece_kind_to_code(moved_piece) << MOVED_PIECE_SHIFT;
        out |= captured_piece
            .map(piece_kind_to_code)
            .unwrap_or(NO_PIECE_CODE)
            << CAPTURED_PIECE_SHIFT;
        out |= promotion_piece
            .map(piece_kind_to_code)
            .unwrap_or(NO_PIECE_CODE)
            << PROMOTION_PIECE_SHIFT;
        out |= flags;
        Self(out)
    }

    #[inline]
    pub fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    /// Moved piece as it stood on the origin square (a promoting move reports `Pawn`).
    #[inline]
    pub fn moved_piece(self) -> PieceKind {
        piece_kind_from_code((self.0 >> MOVED_PIECE_SHIFT) & PIECE_MASK).unwrap_or(PieceKind::Pawn)
    }

    #[inline]
    pub fn captured(self) -> Option<PieceKind> {
        piece_kind_from_code((self.0 >> CAPTURED_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub fn promotion(self) -> Option<PieceKind> {
        piece_kind_from_code((self.0 >> PROMOTION_PIECE_SHIFT) & PIECE_MASK)
    }

    #[inline]
    pub fn is_capture(self) -> bool {
        self.0 & FLAG_CAPTURE != 0
    }

    #[inline]
    pub fn is_double_pawn_push(self) -> bool {
        self.0 & FLAG_DOUBLE_PAWN_PUSH != 0
    }

    #[inline]
    pub fn is_en_passant(self) -> bool {
        self.0 & FLAG_EN_PASSANT != 0
    }

    #[inline]
    pub fn is_castle_king_side(self) -> bool {
        self.0 & FLAG_CASTLE_KINGSIDE != 0
    }

    #[inline]
    pub fn is_castle_queen_side(self) -> bool {
        self.0 & FLAG_CASTLE_QUEENSIDE != 0
    }

    #[inline]
    pub fn is_castling(self) -> bool {
        self.0 & FLAG_CASTLING != 0
    }

    /// Whether this move answers a `(from, to, promotion)` request.
    #[inline]
    pub fn matches(self, from: Square, to: Square, promotion: Option<PieceKind>) -> bool {
        self.from() == from && self.to() == to && self.promotion() == promotion
    }
}

impl fmt::Debug for LegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegalMove")
            .field("from", &square_to_algebraic(self.from()))
            .field("to", &square_to_algebraic(self.to()))
            .field("piece", &self.moved_piece())
            .field("captured", &self.captured())
            .field("promotion", &self.promotion())
            .field("en_passant", &self.is_en_passant())
            .field("castling", &self.is_castling())
            .finish()
    }
}

#[inline]
fn piece_kind_to_code(piece_kind: PieceKind) -> u64 {
    piece_kind.index() as u64
}

#[inline]
fn piece_kind_from_code(code: u64) -> Option<PieceKind> {
    match code {
        0 => Some(PieceKind::Pawn),
        1 => Some(PieceKind::Knight),
        2 => Some(PieceKind::Bishop),
        3 => Some(PieceKind::Rook),
        4 => Some(PieceKind::Queen),
        5 => Some(PieceKind::King),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_fields_read_back() {
        let mv = LegalMove::new(
            52,
            61,
            PieceKind::Pawn,
            Some(PieceKind::Rook),
            Some(PieceKind::Knight),
            FLAG_CAPTURE,
        );
        assert_eq!(mv.from(), 52);
        assert_eq!(mv.to(), 61);
        assert_eq!(mv.moved_piece(), PieceKind::Pawn);
        assert_eq!(mv.captured(), Some(PieceKind::Rook));
        assert_eq!(mv.promotion(), Some(PieceKind::Knight));
        assert!(mv.is_capture());
        assert!(!mv.is_en_passant());
        assert!(!mv.is_castling());
    }

    #[test]
    fn castle_side_flags_are_distinct() {
        let short = LegalMove::new(4, 6, PieceKind::King, None, None, FLAG_CASTLE_KINGSIDE);
        let long = LegalMove::new(4, 2, PieceKind::King, None, None, FLAG_CASTLE_QUEENSIDE);
        assert!(short.is_castle_king_side() && !short.is_castle_queen_side());
        assert!(long.is_castle_queen_side() && !long.is_castle_king_side());
        assert!(short.matches(4, 6, None));
        assert!(!short.matches(4, 6, Some(PieceKind::Queen)));
    }
}
