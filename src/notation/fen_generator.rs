//! FEN output and the repetition signature.
//!
//! The signature is the first four FEN fields (placement, side, castling, en
//! passant). It leaves out both clocks, so it identifies a position for
//! repetition counting.

use crate::notation::algebraic::square_to_algebraic;
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn generate_fen(position: &Position) -> String {
    format!(
        "{} {} {}",
        position_signature(position),
        position.halfmove_clock,
        position.fullmove_number
    )
}

/// Repetition key: FEN without the halfmove clock and fullmove number.
pub fn position_signature(position: &Position) -> String {
    format!(
        "{} {} {} {}",
        generate_board_field(position),
        side_to_move_field(position.side_to_move),
        generate_castling_field(position.castling_rights),
        generate_en_passant_field(position.en_passant_square)
    )
}

fn generate_board_field(position: &Position) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match position.piece_at(rank * 8 + file) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn side_to_move_field(color: Color) -> &'static str {
    match color {
        Color::White => "w",
        Color::Black => "b",
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CASTLE_WHITE_KINGSIDE, 'K'),
        (CASTLE_WHITE_QUEENSIDE, 'Q'),
        (CASTLE_BLACK_KINGSIDE, 'k'),
        (CASTLE_BLACK_QUEENSIDE, 'q'),
    ]
    .into_iter()
    .filter(|(flag, _)| rights & flag != 0)
    .map(|(_, ch)| ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}

fn generate_en_passant_field(square: Option<Square>) -> String {
    square.map_or_else(|| "-".to_owned(), square_to_algebraic)
}

#[cfg(test)]
mod tests {
    use super::{generate_fen, position_signature};
    use crate::position::chess_rules::STARTING_POSITION_FEN;
    use crate::position::position::Position;

    #[test]
    fn start_position_serializes_to_standard_fen() {
        assert_eq!(generate_fen(&Position::new_game()), STARTING_POSITION_FEN);
    }

    #[test]
    fn custom_position_round_trips() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let parsed = Position::from_fen(fen).expect("custom FEN should parse");
        assert_eq!(generate_fen(&parsed), fen);
    }

    #[test]
    fn signature_ignores_clocks_but_not_en_passant() {
        let a = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1").expect("FEN");
        let b = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 37 60").expect("FEN");
        let c = Position::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1").expect("FEN");
        assert_eq!(position_signature(&a), position_signature(&b));
        assert_ne!(position_signature(&a), position_signature(&c));
        assert_eq!(position_signature(&c), "4k3/8/8/8/4P3/8/8/4K3 b - -");
    }
}
