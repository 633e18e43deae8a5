//! Helpers shared by the per-piece pseudo-legal generators.

use crate::moves::move_descriptions::{LegalMove, FLAG_CAPTURE};
use crate::position::chess_types::*;
use crate::position::position::Position;

/// Kind of the enemy piece (relative to the side to move) on `square`.
#[inline]
pub fn enemy_piece_on(position: &Position, square: Square) -> Option<PieceKind> {
    position
        .piece_at(square)
        .filter(|piece| piece.color != position.side_to_move)
        .map(|piece| piece.kind)
}

/// Emits one quiet move or capture per target bit. `targets` must already
/// exclude squares held by the side to move.
pub fn emit_targets(
    position: &Position,
    from: Square,
    kind: PieceKind,
    mut targets: u64,
    out: &mut Vec<LegalMove>,
) {
    while targets != 0 {
        let to = targets.trailing_zeros() as Square;
        let captured = enemy_piece_on(position, to);
        let flags = if captured.is_some() { FLAG_CAPTURE } else { 0 };
        out.push(LegalMove::new(from, to, kind, captured, None, flags));
        targets &= targets - 1;
    }
}

/// Iterates the squares of a bitboard from a1 upward.
pub fn squares_of(mut bitboard: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bitboard == 0 {
            return None;
        }
        let square = bitboard.trailing_zeros() as Square;
        bitboard &= bitboard - 1;
        Some(square)
    })
}
