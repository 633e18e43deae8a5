//! Pseudo-legal bishop, rook, and queen moves.
//!
//! Every ray stops at the first occupied square; that square is a capture
//! target only when it holds an enemy piece.

use crate::move_generation::legal_move_shared::{emit_targets, squares_of};
use crate::moves::move_descriptions::LegalMove;
use crate::moves::slider_rays::{bishop_attacks, queen_attacks, rook_attacks};
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn generate_bishop_moves(position: &Position, origin_mask: u64, out: &mut Vec<LegalMove>) {
    generate_slider_moves(position, origin_mask, PieceKind::Bishop, bishop_attacks, out);
}

pub fn generate_rook_moves(position: &Position, origin_mask: u64, out: &mut Vec<LegalMove>) {
    generate_slider_moves(position, origin_mask, PieceKind::Rook, rook_attacks, out);
}

pub fn generate_queen_moves(position: &Position, origin_mask: u64, out: &mut Vec<LegalMove>) {
    generate_slider_moves(position, origin_mask, PieceKind::Queen, queen_attacks, out);
}

fn generate_slider_moves(
    position: &Position,
    origin_mask: u64,
    kind: PieceKind,
    attacks: fn(Square, u64) -> u64,
    out: &mut Vec<LegalMove>,
) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];
    let sliders = position.pieces_of(side, kind) & origin_mask;

    for from in squares_of(sliders) {
        let targets = attacks(from, position.occupancy_all) & !own_occ;
        emit_targets(position, from, kind, targets, out);
    }
}
