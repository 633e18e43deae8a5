//! Full legal move generation pipeline.
//!
//! Collects pseudo-legal candidates from the per-piece generators, drops
//! castling out of or through check up front, then applies each remaining
//! candidate and discards it if the mover's own king is attacked afterwards.

use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_sliders::{
    generate_bishop_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::move_descriptions::LegalMove;
use crate::position::chess_rules::{kingside_castling, queenside_castling};
use crate::position::chess_types::Square;
use crate::position::position::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// A legal move together with the position it produces.
#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub mv: LegalMove,
    pub position_after: Position,
    pub annotations: MoveAnnotations,
}

/// Pseudo-legal moves of the side to move whose origin lies in `origin_mask`.
pub fn generate_pseudo_legal_moves(position: &Position, origin_mask: u64) -> Vec<LegalMove> {
    let mut pseudo = Vec::<LegalMove>::with_capacity(64);

    generate_pawn_moves(position, origin_mask, &mut pseudo);
    generate_knight_moves(position, origin_mask, &mut pseudo);
    generate_bishop_moves(position, origin_mask, &mut pseudo);
    generate_rook_moves(position, origin_mask, &mut pseudo);
    generate_queen_moves(position, origin_mask, &mut pseudo);
    generate_king_moves(position, origin_mask, &mut pseudo);

    pseudo
}

pub fn generate_legal_moves(position: &Position) -> Vec<LegalMove> {
    legal_moves_from_mask(position, u64::MAX)
}

/// Legal moves of the piece on `square`; empty if it is not the mover's piece.
pub fn generate_legal_moves_from(position: &Position, square: Square) -> Vec<LegalMove> {
    legal_moves_from_mask(position, 1u64 << square)
}

fn legal_moves_from_mask(position: &Position, origin_mask: u64) -> Vec<LegalMove> {
    generate_pseudo_legal_moves(position, origin_mask)
        .into_iter()
        .filter(|mv| castling_path_is_safe(position, *mv))
        .filter(|mv| !is_king_in_check(&make_move(position, *mv), position.side_to_move))
        .collect()
}

/// Legal moves with their resulting positions. With `annotate`, each entry also
/// records whether it checks, mates, or stalemates the opponent.
pub fn generate_legal_moves_with_positions(position: &Position, annotate: bool) -> Vec<GeneratedMove> {
    let mut legal = Vec::<GeneratedMove>::with_capacity(48);

    for mv in generate_pseudo_legal_moves(position, u64::MAX) {
        if !castling_path_is_safe(position, mv) {
            continue;
        }

        let next = make_move(position, mv);
        if is_king_in_check(&next, position.side_to_move) {
            continue;
        }

        let annotations = if annotate {
            classify_move_annotations(&next)
        } else {
            MoveAnnotations::default()
        };

        legal.push(GeneratedMove {
            mv,
            position_after: next,
            annotations,
        });
    }

    legal
}

/// Whether the side to move has at least one legal move. Stops at the first.
pub fn has_legal_move(position: &Position) -> bool {
    generate_pseudo_legal_moves(position, u64::MAX)
        .into_iter()
        .any(|mv| {
            castling_path_is_safe(position, mv)
                && !is_king_in_check(&make_move(position, mv), position.side_to_move)
        })
}

/// Check / mate / stalemate status of the side to move in `next`, which is the
/// position right after the mover played.
pub fn classify_move_annotations(next: &Position) -> MoveAnnotations {
    let gives_check = is_king_in_check(next, next.side_to_move);
    let can_reply = has_legal_move(next);

    MoveAnnotations {
        gives_check,
        is_checkmate: gives_check && !can_reply,
        is_stalemate: !gives_check && !can_reply,
    }
}

/// Castling may not start from, pass over, or land on an attacked square.
fn castling_path_is_safe(position: &Position, mv: LegalMove) -> bool {
    if !mv.is_castling() {
        return true;
    }

    let side = position.side_to_move;
    let geometry = if mv.is_castle_king_side() {
        kingside_castling(side)
    } else {
        queenside_castling(side)
    };

    [geometry.king_from, geometry.king_transit, geometry.king_to]
        .into_iter()
        .all(|square| !is_square_attacked(position, square, side.opposite()))
}
