//! Pseudo-legal king steps and castling candidates.
//!
//! Castling is emitted when the right is held, the king and rook stand on
//! their home squares, and the squares between them are empty. Whether the
//! king starts in, passes through, or lands on an attacked square is checked by
//! the legal filter.

use crate::move_generation::legal_move_shared::emit_targets;
use crate::moves::move_descriptions::{LegalMove, FLAG_CASTLE_KINGSIDE, FLAG_CASTLE_QUEENSIDE};
use crate::moves::step_tables::king_attacks;
use crate::position::chess_rules::{kingside_castling, queenside_castling, CastlingGeometry};
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn generate_king_moves(position: &Position, origin_mask: u64, out: &mut Vec<LegalMove>) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];
    let king_bb = position.pieces_of(side, PieceKind::King) & origin_mask;
    if king_bb == 0 {
        return;
    }

    let from = king_bb.trailing_zeros() as Square;
    emit_targets(position, from, PieceKind::King, king_attacks(from) & !own_occ, out);

    generate_castling_moves(position, from, out);
}

fn generate_castling_moves(position: &Position, king_from: Square, out: &mut Vec<LegalMove>) {
    let side = position.side_to_move;

    let candidates = [
        (kingside_right(side), kingside_castling(side), FLAG_CASTLE_KINGSIDE),
        (queenside_right(side), queenside_castling(side), FLAG_CASTLE_QUEENSIDE),
    ];

    for (right, geometry, flag) in candidates {
        if position.castling_rights & right == 0 {
            continue;
        }
        if castling_path_is_open(position, side, king_from, &geometry) {
            out.push(LegalMove::new(
                geometry.king_from,
                geometry.king_to,
                PieceKind::King,
                None,
                None,
                flag,
            ));
        }
    }
}

fn castling_path_is_open(
    position: &Position,
    side: Color,
    king_from: Square,
    geometry: &CastlingGeometry,
) -> bool {
    let rook_home = 1u64 << geometry.rook_from;
    king_from == geometry.king_from
        && position.pieces_of(side, PieceKind::Rook) & rook_home != 0
        && position.occupancy_all & geometry.empty_mask == 0
}
