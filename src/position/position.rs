//! Immutable position value consumed and produced by every engine operation.
//!
//! `Position` stores one bitboard per (color, piece kind) plus occupancy
//! caches, side to move, castling rights, en-passant target, and the two move
//! clocks. Engine operations never mutate a position that a caller holds: a
//! transition clones the value and edits the clone.

use serde::{Deserialize, Serialize};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::position::chess_types::*;
use crate::notation::fen_generator::generate_fen;
use crate::notation::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Position {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position, White to move.
    pub fn new_game() -> Self {
        let mut position = Self::new_empty();
        for (file, kind) in BACK_RANK.iter().enumerate() {
            let file = file as Square;
            position.put_piece(file, Piece::new(Color::White, *kind));
            position.put_piece(8 + file, Piece::new(Color::White, PieceKind::Pawn));
            position.put_piece(48 + file, Piece::new(Color::Black, PieceKind::Pawn));
            position.put_piece(56 + file, Piece::new(Color::Black, *kind));
        }
        position.castling_rights = CASTLE_ALL;
        position
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        generate_fen(self)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }

        for color in [Color::White, Color::Black] {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in ALL_PIECE_KINDS {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    /// The 64-slot board view, indexed by `Square`.
    pub fn board(&self) -> [Option<Piece>; 64] {
        let mut board = [None; 64];
        for (square, slot) in board.iter_mut().enumerate() {
            *slot = self.piece_at(square as Square);
        }
        board
    }

    #[inline]
    pub fn pieces_of(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    /// Places a piece, replacing whatever stood on the square.
    pub fn put_piece(&mut self, square: Square, piece: Piece) {
        self.clear_square(square);
        let mask = 1u64 << square;
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    pub fn clear_square(&mut self, square: Square) {
        let keep = !(1u64 << square);
        for color_boards in self.pieces.iter_mut() {
            for bb in color_boards.iter_mut() {
                *bb &= keep;
            }
        }
        self.occupancy_by_color[0] &= keep;
        self.occupancy_by_color[1] &= keep;
        self.occupancy_all &= keep;
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.pieces_of(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(kings.trailing_zeros() as Square)
        }
    }

    /// Checks the invariants the engine relies on: one king per color and
    /// consistent occupancy caches.
    pub fn validate(&self) -> ChessResult<()> {
        for color in [Color::White, Color::Black] {
            let kings = self.pieces_of(color, PieceKind::King).count_ones();
            if kings != 1 {
                return Err(ChessErrors::MalformedPosition(format!(
                    "{color:?} has {kings} kings, expected exactly one"
                )));
            }
        }

        let mut seen = 0u64;
        for color in [Color::White, Color::Black] {
            let mut color_occ = 0u64;
            for bb in self.pieces[color.index()] {
                if seen & bb != 0 {
                    return Err(ChessErrors::MalformedPosition(
                        "two pieces share a square".to_owned(),
                    ));
                }
                seen |= bb;
                color_occ |= bb;
            }
            if color_occ != self.occupancy_by_color[color.index()] {
                return Err(ChessErrors::MalformedPosition(format!(
                    "{color:?} occupancy cache is stale"
                )));
            }
        }
        if seen != self.occupancy_all {
            return Err(ChessErrors::MalformedPosition(
                "occupancy cache is stale".to_owned(),
            ));
        }

        Ok(())
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in [Color::White, Color::Black] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[0] | self.occupancy_by_color[1];
    }
}
