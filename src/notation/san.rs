//! Standard Algebraic Notation.
//!
//! Rendering follows the usual rules: piece letter (none for pawns), origin
//! file / rank / square only when another piece of the same kind can legally
//! reach the same target, `x` on captures (en passant included), `=Q` style
//! promotion, and a `+` / `#` suffix computed on the resulting position.
//! Parsing resolves a SAN token by rendering every legal move and matching.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::move_generation::legal_move_generator::{generate_legal_moves, MoveAnnotations};
use crate::moves::move_descriptions::LegalMove;
use crate::notation::algebraic::{file_char, rank_char, square_to_algebraic};
use crate::position::chess_types::*;
use crate::position::position::Position;

/// SAN with check / mate suffix. `legal_moves` must be the legal moves of the
/// position `mv` is played from; `annotations` describe the position after it.
pub fn move_to_san(mv: LegalMove, legal_moves: &[LegalMove], annotations: MoveAnnotations) -> String {
    let mut san = san_without_suffix(mv, legal_moves);
    if annotations.is_checkmate {
        san.push('#');
    } else if annotations.gives_check {
        san.push('+');
    }
    san
}

fn san_without_suffix(mv: LegalMove, legal_moves: &[LegalMove]) -> String {
    if mv.is_castle_king_side() {
        return "O-O".to_owned();
    }
    if mv.is_castle_queen_side() {
        return "O-O-O".to_owned();
    }

    let mut san = String::with_capacity(8);
    let kind = mv.moved_piece();

    match kind.san_letter() {
        Some(letter) => {
            san.push(letter);
            san.push_str(&disambiguation(mv, legal_moves));
        }
        None if mv.is_capture() => san.push(file_char(mv.from())),
        None => {}
    }

    if mv.is_capture() {
        san.push('x');
    }
    san.push_str(&square_to_algebraic(mv.to()));

    if let Some(letter) = mv.promotion().and_then(PieceKind::san_letter) {
        san.push('=');
        san.push(letter);
    }

    san
}

fn disambiguation(mv: LegalMove, legal_moves: &[LegalMove]) -> String {
    let rivals: Vec<Square> = legal_moves
        .iter()
        .filter(|other| {
            other.to() == mv.to()
                && other.from() != mv.from()
                && other.moved_piece() == mv.moved_piece()
        })
        .map(|other| other.from())
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let from = mv.from();
    if rivals.iter().all(|sq| square_file(*sq) != square_file(from)) {
        file_char(from).to_string()
    } else if rivals.iter().all(|sq| square_rank(*sq) != square_rank(from)) {
        rank_char(from).to_string()
    } else {
        square_to_algebraic(from)
    }
}

/// Resolves a SAN token (`Nf3`, `exd6`, `e8=Q+`, `O-O`, `0-0-0`) to the legal
/// move it names in `position`.
pub fn san_to_move(position: &Position, san: &str) -> ChessResult<LegalMove> {
    let wanted = normalize_san(san);
    if wanted.is_empty() {
        return Err(ChessErrors::InvalidNotation(san.to_owned()));
    }

    let legal_moves = generate_legal_moves(position);
    let mut found = legal_moves
        .iter()
        .copied()
        .filter(|mv| normalize_san(&san_without_suffix(*mv, &legal_moves)) == wanted);

    match (found.next(), found.next()) {
        (Some(mv), None) => Ok(mv),
        _ => Err(ChessErrors::InvalidNotation(san.to_owned())),
    }
}

fn normalize_san(san: &str) -> String {
    san.trim()
        .trim_end_matches(['+', '#', '!', '?'])
        .replace('0', "O")
        .replace('=', "")
}
