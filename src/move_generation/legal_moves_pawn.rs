//! Pseudo-legal pawn moves: pushes, double pushes, diagonal captures,
//! en passant, and promotions (one candidate per promotion piece).

use crate::move_generation::legal_move_shared::{enemy_piece_on, squares_of};
use crate::moves::move_descriptions::{
    LegalMove, FLAG_CAPTURE, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};
use crate::moves::step_tables::pawn_attacks;
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn generate_pawn_moves(position: &Position, origin_mask: u64, out: &mut Vec<LegalMove>) {
    let side = position.side_to_move;
    let pawns = position.pieces_of(side, PieceKind::Pawn) & origin_mask;
    let enemy_occ = position.occupancy_by_color[side.opposite().index()];
    let enemy_pawns = position.pieces_of(side.opposite(), PieceKind::Pawn);
    let empty = !position.occupancy_all;

    for from in squares_of(pawns) {
        if let Some(to) = forward(side, from) {
            if (1u64 << to) & empty != 0 {
                push_pawn_move(side, from, to, None, 0, out);

                if square_rank(from) == side.pawn_start_rank() {
                    if let Some(two_step) = forward(side, to) {
                        if (1u64 << two_step) & empty != 0 {
                            out.push(LegalMove::new(
                                from,
                                two_step,
                                PieceKind::Pawn,
                                None,
                                None,
                                FLAG_DOUBLE_PAWN_PUSH,
                            ));
                        }
                    }
                }
            }
        }

        for to in squares_of(pawn_attacks(side, from)) {
            let to_mask = 1u64 << to;
            if to_mask & enemy_occ != 0 {
                let captured = enemy_piece_on(position, to);
                push_pawn_move(side, from, to, captured, FLAG_CAPTURE, out);
            } else if position.en_passant_square == Some(to)
                && en_passant_victim(side, to).is_some_and(|sq| (1u64 << sq) & enemy_pawns != 0)
            {
                out.push(LegalMove::new(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

/// Square of the pawn an en-passant capture onto `target` removes.
#[inline]
fn en_passant_victim(side: Color, target: Square) -> Option<Square> {
    forward(side.opposite(), target)
}

/// One square toward the opponent, if still on the board.
#[inline]
pub fn forward(side: Color, square: Square) -> Option<Square> {
    match side {
        Color::White => (square < 56).then(|| square + 8),
        Color::Black => square.checked_sub(8),
    }
}

fn push_pawn_move(
    side: Color,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u64,
    out: &mut Vec<LegalMove>,
) {
    if square_rank(to) == side.promotion_rank() {
        for promo in PROMOTION_PIECE_KINDS {
            out.push(LegalMove::new(from, to, PieceKind::Pawn, captured, Some(promo), flags));
        }
    } else {
        out.push(LegalMove::new(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_pawn_moves;
    use crate::moves::move_descriptions::LegalMove;
    use crate::position::chess_types::PieceKind;
    use crate::position::position::Position;

    fn pawn_moves(fen: &str) -> Vec<LegalMove> {
        let position = Position::from_fen(fen).expect("FEN should parse");
        let mut out = Vec::new();
        generate_pawn_moves(&position, u64::MAX, &mut out);
        out
    }

    #[test]
    fn start_rank_pawn_has_single_and_double_push() {
        let moves = pawn_moves("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert_eq!(moves.len(), 2);
        assert!(moves.iter().any(|mv| mv.to() == 28 && mv.is_double_pawn_push()));
    }

    #[test]
    fn blocked_intermediate_square_prevents_double_push() {
        // Knight on e3 blocks both pushes of the e2 pawn.
        let moves = pawn_moves("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
        assert!(moves.is_empty());

        // Piece on e4 only blocks the double push.
        let moves = pawn_moves("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1");
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].to(), 20);
    }

    #[test]
    fn promotion_capture_enumerates_all_four_pieces() {
        // b7 pawn can push to b8 or capture on a8 / c8.
        let moves = pawn_moves("r1n1k3/1P6/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(moves.len(), 12);
        let captures_on_a8: Vec<_> = moves.iter().filter(|mv| mv.to() == 56).collect();
        assert_eq!(captures_on_a8.len(), 4);
        assert!(captures_on_a8
            .iter()
            .all(|mv| mv.captured() == Some(PieceKind::Rook) && mv.promotion().is_some()));
    }

    #[test]
    fn en_passant_only_against_recorded_target() {
        let with_target = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        assert!(with_target.iter().any(|mv| mv.is_en_passant() && mv.to() == 43));

        let without_target = pawn_moves("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1");
        assert!(without_target.iter().all(|mv| !mv.is_en_passant()));
    }

    #[test]
    fn en_passant_needs_an_enemy_pawn_behind_the_target() {
        // Built by hand: the FEN parser already refuses this target square.
        let mut position =
            Position::from_fen("4k3/8/8/8/8/8/3PP3/4K3 w - - 0 1").expect("FEN should parse");
        position.en_passant_square = Some(20);

        let mut out = Vec::new();
        generate_pawn_moves(&position, u64::MAX, &mut out);
        assert!(out.iter().all(|mv| !mv.is_en_passant()));
        assert!(out.iter().all(|mv| mv.to() != 20 || mv.from() == 12));
    }

    #[test]
    fn black_pawns_move_down_the_board() {
        let moves = pawn_moves("4k3/4p3/8/8/8/8/8/4K3 b - - 0 1");
        let mut targets: Vec<u8> = moves.iter().map(|mv| mv.to()).collect();
        targets.sort_unstable();
        assert_eq!(targets, vec![36, 44]);
    }
}
