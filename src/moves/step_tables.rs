//! Attack sets for the non-sliding pieces.
//!
//! Knight, king, and pawn attacks depend only on the origin square, so they are
//! built once at compile time from fixed `(file, rank)` offset tables and
//! clipped to the board.

use crate::position::chess_types::{Color, Square};

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const WHITE_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_CAPTURE_OFFSETS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

pub const KNIGHT_ATTACKS: [u64; 64] = build_step_table(&KNIGHT_OFFSETS);
pub const KING_ATTACKS: [u64; 64] = build_step_table(&KING_OFFSETS);
pub const WHITE_PAWN_ATTACKS: [u64; 64] = build_step_table(&WHITE_PAWN_CAPTURE_OFFSETS);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = build_step_table(&BLACK_PAWN_CAPTURE_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square as usize]
}

/// Squares a pawn of `color` standing on `square` attacks diagonally.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square as usize],
        Color::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

const fn build_step_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            let (df, dr) = offsets[i];
            attacks |= square_bit_if_on_board(file + df, rank + dr);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn square_bit_if_on_board(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }
    1u64 << (rank * 8 + file)
}
