//! Long algebraic (coordinate) move text: `e2e4`, `e7e8q`, castling as `e1g1`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::moves::move_descriptions::LegalMove;
use crate::notation::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::position::chess_types::{PieceKind, Square};

pub fn move_to_long_algebraic(mv: LegalMove) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from()));
    out.push_str(&square_to_algebraic(mv.to()));
    if let Some(promotion) = mv.promotion() {
        out.push(promotion_to_char(promotion));
    }
    out
}

/// Splits coordinate text into `(from, to, promotion)`. Says nothing about
/// legality; the result still has to pass the legal-move gate.
pub fn parse_long_algebraic(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(ChessErrors::InvalidNotation(text.to_owned()));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        Some(ch) => Some(
            char_to_promotion(ch).ok_or_else(|| ChessErrors::InvalidNotation(text.to_owned()))?,
        ),
        None => None,
    };

    Ok((from, to, promotion))
}

pub fn promotion_to_char(piece_kind: PieceKind) -> char {
    match piece_kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

fn char_to_promotion(ch: char) -> Option<PieceKind> {
    match ch.to_ascii_lowercase() {
        'n' => Some(PieceKind::Knight),
        'b' => Some(PieceKind::Bishop),
        'r' => Some(PieceKind::Rook),
        'q' => Some(PieceKind::Queen),
        _ => None,
    }
}
