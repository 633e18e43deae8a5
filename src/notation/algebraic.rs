//! Square conversions between algebraic coordinates and internal indices.
//!
//! The engine boundary speaks `"e4"`; everything inside uses `Square` indices
//! with a1 = 0. The mapping is a bijection over `0..=63`.

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::position::chess_types::{square_file, square_rank, Square};

/// Convert algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ChessErrors::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    let mut out = String::with_capacity(2);
    out.push(file_char(square));
    out.push(rank_char(square));
    out
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + square_file(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + square_rank(square))
}
