//! Attack detection.
//!
//! `is_square_attacked` is the single answer to "is square S attacked by color
//! C". It looks outward from the target square with each piece's movement rule
//! reversed and is used for check detection, castling path validation, and
//! checkmate / stalemate classification.

use crate::moves::slider_rays::{bishop_attacks, rook_attacks};
use crate::moves::step_tables::{king_attacks, knight_attacks, pawn_attacks};
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn is_square_attacked(position: &Position, square: Square, attacker: Color) -> bool {
    // A pawn of `attacker` hits `square` exactly when a pawn of the other color
    // standing on `square` would hit the attacker's pawn.
    if pawn_attacks(attacker.opposite(), square) & position.pieces_of(attacker, PieceKind::Pawn) != 0 {
        return true;
    }

    if knight_attacks(square) & position.pieces_of(attacker, PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & position.pieces_of(attacker, PieceKind::King) != 0 {
        return true;
    }

    let queens = position.pieces_of(attacker, PieceKind::Queen);

    let diagonal = position.pieces_of(attacker, PieceKind::Bishop) | queens;
    if bishop_attacks(square, position.occupancy_all) & diagonal != 0 {
        return true;
    }

    let straight = position.pieces_of(attacker, PieceKind::Rook) | queens;
    rook_attacks(square, position.occupancy_all) & straight != 0
}

/// Whether `color`'s king is attacked. A position without that king reports
/// `false`; such positions are rejected earlier by `Position::validate`.
#[inline]
pub fn is_king_in_check(position: &Position, color: Color) -> bool {
    let Some(king_sq) = position.king_square(color) else {
        return false;
    };
    is_square_attacked(position, king_sq, color.opposite())
}

#[cfg(test)]
mod tests {
    use super::{is_king_in_check, is_square_attacked};
    use crate::notation::algebraic::algebraic_to_square;
    use crate::position::chess_types::Color;
    use crate::position::position::Position;

    fn sq(name: &str) -> u8 {
        algebraic_to_square(name).expect("square should parse")
    }

    #[test]
    fn pawn_attacks_use_the_reverse_direction() {
        let position = Position::from_fen("4k3/8/8/8/3p4/8/8/4K3 w - - 0 1").expect("FEN");
        // Black pawn on d4 attacks c3 and e3, not c5 / e5 or d3.
        assert!(is_square_attacked(&position, sq("c3"), Color::Black));
        assert!(is_square_attacked(&position, sq("e3"), Color::Black));
        assert!(!is_square_attacked(&position, sq("e5"), Color::Black));
        assert!(!is_square_attacked(&position, sq("d3"), Color::Black));
    }

    #[test]
    fn sliders_are_blocked_by_any_piece() {
        let position = Position::from_fen("4k3/8/8/8/8/8/r3P3/4K3 w - - 0 1").expect("FEN");
        assert!(is_square_attacked(&position, sq("d2"), Color::Black));
        assert!(is_square_attacked(&position, sq("e2"), Color::Black));
        assert!(!is_square_attacked(&position, sq("f2"), Color::Black));
    }

    #[test]
    fn knight_and_king_attacks() {
        let position = Position::from_fen("4k3/8/8/8/8/5n2/8/4K3 w - - 0 1").expect("FEN");
        assert!(is_king_in_check(&position, Color::White));
        assert!(!is_king_in_check(&position, Color::Black));
        assert!(is_square_attacked(&position, sq("d2"), Color::White));
    }

    #[test]
    fn start_position_has_no_checks() {
        let position = Position::new_game();
        assert!(!is_king_in_check(&position, Color::White));
        assert!(!is_king_in_check(&position, Color::Black));
        assert!(is_square_attacked(&position, sq("f3"), Color::White));
        assert!(!is_square_attacked(&position, sq("e4"), Color::White));
    }
}
