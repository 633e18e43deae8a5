//! Ray-walk attack sets for bishops, rooks, and queens.
//!
//! Each ray stops at the first occupied square and includes it; whether that
//! blocker may be captured is decided by the caller from color occupancy.

use crate::position::chess_types::Square;

pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &BISHOP_DIRECTIONS)
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    slider_attacks(square, occupancy, &ROOK_DIRECTIONS)
}

#[inline]
pub fn queen_attacks(square: Square, occupancy: u64) -> u64 {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

pub fn slider_attacks(square: Square, occupancy: u64, directions: &[(i32, i32)]) -> u64 {
    directions
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: u64) -> u64 {
    let mut file = i32::from(square % 8) + file_step;
    let mut rank = i32::from(square / 8) + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if occupancy & bit != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}
