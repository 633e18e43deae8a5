//! Move application.
//!
//! `make_move` is the copy-and-modify transition: it clones the input position,
//! edits the clone, and returns it. It trusts the move (legality is decided by
//! `legal_move_generator`), so it is only reachable with moves the generator
//! produced.

use crate::moves::move_descriptions::LegalMove;
use crate::position::chess_rules::*;
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn make_move(position: &Position, mv: LegalMove) -> Position {
    let from = mv.from();
    let to = mv.to();
    let moving_color = position.side_to_move;
    let moved_piece = mv.moved_piece();

    let mut next = position.clone();

    next.clear_square(from);

    if mv.is_en_passant() {
        // The captured pawn sits beside the mover, one rank behind the target.
        let capture_sq = match moving_color {
            Color::White => to - 8,
            Color::Black => to + 8,
        };
        next.clear_square(capture_sq);
    }

    let placed = mv.promotion().unwrap_or(moved_piece);
    next.put_piece(to, Piece::new(moving_color, placed));

    if mv.is_castling() {
        let geometry = if mv.is_castle_king_side() {
            kingside_castling(moving_color)
        } else {
            queenside_castling(moving_color)
        };
        next.clear_square(geometry.rook_from);
        next.put_piece(geometry.rook_to, Piece::new(moving_color, PieceKind::Rook));
    }

    update_castling_rights(&mut next, moving_color, from, to, moved_piece);

    next.en_passant_square = if mv.is_double_pawn_push() {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Black {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = moving_color.opposite();

    next
}

/// Drops rights when the king moves, when a rook leaves its home square, and
/// when anything lands on a rook home square. The last case keys on the
/// square, not on the piece standing there.
fn update_castling_rights(
    position: &mut Position,
    moving_color: Color,
    from: Square,
    to: Square,
    moved_piece: PieceKind,
) {
    if moved_piece == PieceKind::King {
        position.castling_rights &= !(kingside_right(moving_color) | queenside_right(moving_color));
    }

    for square in [from, to] {
        position.castling_rights &= !rook_home_right(square);
    }
}

#[inline]
fn rook_home_right(square: Square) -> CastlingRights {
    match square {
        WHITE_QUEENSIDE_ROOK_HOME => CASTLE_WHITE_QUEENSIDE,
        WHITE_KINGSIDE_ROOK_HOME => CASTLE_WHITE_KINGSIDE,
        BLACK_QUEENSIDE_ROOK_HOME => CASTLE_BLACK_QUEENSIDE,
        BLACK_KINGSIDE_ROOK_HOME => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::make_move;
    use crate::moves::move_descriptions::*;
    use crate::position::chess_types::*;
    use crate::position::position::Position;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("FEN should parse")
    }

    #[test]
    fn double_push_sets_target_and_quiet_move_clears_it() {
        let start = Position::new_game();
        let e4 = LegalMove::new(12, 28, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH);
        let after = make_move(&start, e4);
        assert_eq!(after.en_passant_square, Some(20));
        assert_eq!(after.side_to_move, Color::Black);
        assert_eq!(after.fullmove_number, 1);

        let nf6 = LegalMove::new(62, 45, PieceKind::Knight, None, None, 0);
        let after = make_move(&after, nf6);
        assert_eq!(after.en_passant_square, None);
        assert_eq!(after.fullmove_number, 2);
        assert_eq!(after.halfmove_clock, 1);
    }

    #[test]
    fn en_passant_removes_the_pawn_beside_the_mover() {
        let before = position("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let exd6 = LegalMove::new(
            36,
            43,
            PieceKind::Pawn,
            Some(PieceKind::Pawn),
            None,
            FLAG_CAPTURE | FLAG_EN_PASSANT,
        );
        let after = make_move(&before, exd6);
        assert_eq!(after.piece_at(35), None);
        assert_eq!(after.piece_at(43), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn castling_moves_the_rook_and_drops_both_rights() {
        let before = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10");
        let castle = LegalMove::new(4, 2, PieceKind::King, None, None, FLAG_CASTLE_QUEENSIDE);
        let after = make_move(&before, castle);
        assert_eq!(after.piece_at(2), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(after.piece_at(3), Some(Piece::new(Color::White, PieceKind::Rook)));
        assert_eq!(after.piece_at(0), None);
        assert_eq!(after.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_eq!(after.halfmove_clock, 4);
    }

    #[test]
    fn capturing_on_a_rook_home_square_clears_that_right() {
        // White rook takes the h8 rook: both the mover's and the victim's rights go.
        let before = position("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let rxh8 = LegalMove::new(7, 63, PieceKind::Rook, Some(PieceKind::Rook), None, FLAG_CAPTURE);
        let after = make_move(&before, rxh8);
        assert_eq!(after.castling_rights, CASTLE_WHITE_QUEENSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn capture_on_home_square_clears_right_even_if_a_promoted_piece_stands_there() {
        // A black queen stands on a1 while White still records the queenside
        // right; a capture landing on a1 clears it.
        let before = position("4k3/8/8/8/8/8/1n6/q3K2R b KQ - 0 1");
        let nxa1 = LegalMove::new(9, 0, PieceKind::Knight, Some(PieceKind::Queen), None, FLAG_CAPTURE);
        let after = make_move(&before, nxa1);
        assert_eq!(after.castling_rights, CASTLE_WHITE_KINGSIDE);
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let before = position("4k3/P7/8/8/8/8/8/4K3 w - - 5 40");
        let a8n = LegalMove::new(48, 56, PieceKind::Pawn, None, Some(PieceKind::Knight), 0);
        let after = make_move(&before, a8n);
        assert_eq!(after.piece_at(56), Some(Piece::new(Color::White, PieceKind::Knight)));
        assert_eq!(after.pieces_of(Color::White, PieceKind::Pawn), 0);
        assert_eq!(after.halfmove_clock, 0);
    }

    #[test]
    fn input_position_is_left_untouched() {
        let start = Position::new_game();
        let snapshot = start.clone();
        let _ = make_move(&start, LegalMove::new(6, 21, PieceKind::Knight, None, None, 0));
        assert_eq!(start, snapshot);
    }
}
