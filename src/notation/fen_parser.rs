//! FEN-to-Position parser.
//!
//! Builds a fully populated position (bitboards, occupancy caches, rights,
//! clocks) from a Forsyth-Edwards Notation string. The parser checks syntax
//! only; king counts are checked by `Position::validate`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::notation::algebraic::algebraic_to_square;
use crate::position::chess_types::*;
use crate::position::position::Position;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut position = Position::new_empty();

    parse_board(board_part, &mut position)?;
    position.side_to_move = parse_side_to_move(side_part)?;
    position.castling_rights = parse_castling_rights(castling_part)?;
    position.en_passant_square = parse_en_passant_square(en_passant_part, position.side_to_move)?;
    position.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock '{halfmove_part}'")))?;
    position.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number '{fullmove_part}'")))?;

    position.recalc_occupancy();

    Ok(position)
}

fn invalid(detail: &str) -> ChessErrors {
    ChessErrors::InvalidFen(detail.to_owned())
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid(&format!("rank '{rank_str}' has more than 8 files")));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid(&format!("rank '{rank_str}' has more than 8 files")));
            }

            let sq = board_rank * 8 + file;
            position.pieces[piece.color.index()][piece.kind.index()] |= 1u64 << sq;
            file += 1;
        }

        if file != 8 {
            return Err(invalid(&format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("side to move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;

    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(invalid(&format!("castling rights character '{ch}'"))),
        }
    }

    Ok(rights)
}

/// The target lies behind a pawn the opponent just pushed two squares: on the
/// 6th rank when White is to move, on the 3rd when Black is.
fn parse_en_passant_square(
    en_passant_part: &str,
    side_to_move: Color,
) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(&format!("en-passant square '{en_passant_part}'")))?;
    let (expected_rank, rank_name) = match side_to_move {
        Color::White => (5, "6th"),
        Color::Black => (2, "3rd"),
    };
    if square_rank(square) != expected_rank {
        return Err(invalid(&format!(
            "en-passant square '{en_passant_part}' must be on the {rank_name} rank \
             with {side_to_move:?} to move"
        )));
    }
    Ok(Some(square))
}
