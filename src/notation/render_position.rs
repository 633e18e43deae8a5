//! Terminal-oriented Unicode board renderer for debugging and diagnostics.

use crate::position::chess_types::*;
use crate::position::position::Position;

/// Render the board with White at the bottom, followed by a status line with
/// the side to move and the FEN.
pub fn render_position(position: &Position) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match position.piece_at(rank * 8 + file) {
                Some(piece) => out.push(piece_to_unicode(piece)),
                None => out.push('·'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    let side = match position.side_to_move {
        Color::White => "White",
        Color::Black => "Black",
    };
    out.push_str(&format!("{side} to move | {}", position.to_fen()));

    out
}

fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::King) => '♔',
        (Color::Black, PieceKind::Pawn) => '♟',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::render_position;
    use crate::position::position::Position;

    #[test]
    fn start_position_rows() {
        let rendered = render_position(&Position::new_game());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8");
        assert_eq!(lines[5], "4 · · · · · · · · 4");
        assert_eq!(lines[8], "1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1");
        assert!(lines[10].starts_with("White to move | rnbqkbnr/"));
    }
}
