//! Primitive chess value types shared by every layer of the rules engine.
//!
//! Colors, piece kinds, and colored pieces are small `Copy` values. Squares are
//! plain indices in bitboard order and castling rights are a packed bitmask.

use serde::{Deserialize, Serialize};

/// Side to move / piece owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank index (`0..=7`) pawns of this color promote on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank index pawns of this color start on.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Uppercase SAN letter; pawns have none.
    pub const fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }

    pub fn from_san_letter(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Promotion choices, in the order candidates are generated.
pub const PROMOTION_PIECE_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub fn fen_char(self) -> char {
        let base = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else if ch.is_ascii_lowercase() {
            Color::Black
        } else {
            return None;
        };

        let kind = match ch.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };

        Some(Self { color, kind })
    }
}

/// Board square index (`0..=63`): a1 = 0, h1 = 7, a8 = 56, h8 = 63.
pub type Square = u8;

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square / 8
}

/// Castling rights: four independent flags packed in one byte.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE;

#[inline]
pub const fn kingside_right(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_KINGSIDE,
        Color::Black => CASTLE_BLACK_KINGSIDE,
    }
}

#[inline]
pub const fn queenside_right(color: Color) -> CastlingRights {
    match color {
        Color::White => CASTLE_WHITE_QUEENSIDE,
        Color::Black => CASTLE_BLACK_QUEENSIDE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_chars_round_trip_for_every_piece() {
        for color in [Color::White, Color::Black] {
            for kind in ALL_PIECE_KINDS {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_fen_char(piece.fen_char()), Some(piece));
            }
        }
        assert_eq!(Piece::from_fen_char('x'), None);
        assert_eq!(Piece::from_fen_char('3'), None);
    }

    #[test]
    fn castling_flags_are_independent_bits() {
        assert_eq!(CASTLE_ALL.count_ones(), 4);
        assert_eq!(kingside_right(Color::Black), CASTLE_BLACK_KINGSIDE);
        assert_eq!(queenside_right(Color::White), CASTLE_WHITE_QUEENSIDE);
    }
}
