use crate::move_generation::legal_move_shared::{emit_targets, squares_of};
use crate::moves::move_descriptions::LegalMove;
use crate::moves::step_tables::knight_attacks;
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn generate_knight_moves(position: &Position, origin_mask: u64, out: &mut Vec<LegalMove>) {
    let side = position.side_to_move;
    let own_occ = position.occupancy_by_color[side.index()];
    let knights = position.pieces_of(side, PieceKind::Knight) & origin_mask;

    for from in squares_of(knights) {
        emit_targets(position, from, PieceKind::Knight, knight_attacks(from) & !own_occ, out);
    }
}
