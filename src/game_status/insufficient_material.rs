//! Dead-position detection for the material combinations where neither side
//! can ever deliver mate: bare kings, a single minor piece, or bishops that
//! all stand on squares of one color.

use crate::position::chess_types::*;
use crate::position::position::Position;

/// b1, d1, ..., a2, c2, ...; a1 is a dark square.
pub const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;
pub const DARK_SQUARES: u64 = !LIGHT_SQUARES;

pub fn is_insufficient_material(position: &Position) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
        .into_iter()
        .any(|kind| pieces_of_both(position, kind) != 0);
    if heavy_or_pawn {
        return false;
    }

    let knights = pieces_of_both(position, PieceKind::Knight);
    let bishops = pieces_of_both(position, PieceKind::Bishop);
    let minors = knights.count_ones() + bishops.count_ones();

    if minors <= 1 {
        return true;
    }

    knights == 0 && (bishops & LIGHT_SQUARES == 0 || bishops & DARK_SQUARES == 0)
}

fn pieces_of_both(position: &Position, kind: PieceKind) -> u64 {
    position.pieces_of(Color::White, kind) | position.pieces_of(Color::Black, kind)
}
