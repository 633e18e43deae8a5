//! The engine boundary.
//!
//! Every function here is a pure function of its arguments: no state is kept
//! between calls and squares cross the boundary as algebraic text (`"e4"`).
//! `apply_move` is the only way a position advances; the notation wrappers
//! (`apply_san`, `apply_long_algebraic`, `apply_move_default_promotion`) all
//! end up there.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chess_errors::{ChessErrors, ChessResult};
use crate::move_generation::legal_move_apply::make_move;
use crate::move_generation::legal_move_checks;
use crate::move_generation::legal_move_generator::{
    self, classify_move_annotations, generate_legal_moves_from,
};
use crate::moves::move_descriptions::LegalMove;
use crate::notation::algebraic::{algebraic_to_square, square_to_algebraic};
use crate::notation::fen_generator::generate_fen;
use crate::notation::fen_parser::parse_fen;
use crate::notation::long_algebraic::{move_to_long_algebraic, parse_long_algebraic};
use crate::notation::san::{move_to_san, san_to_move};
use crate::position::chess_types::{Color, PieceKind};
use crate::position::position::Position;

pub use crate::game_status::insufficient_material::is_insufficient_material;
pub use crate::game_status::termination::{evaluate_termination, GameStatus, GameTermination};
pub use crate::notation::fen_generator::position_signature;
pub use crate::notation::pgn::{build_pgn, read_pgn, PgnGame, PgnMetadata};

/// A caller's request to move a piece, as relayed from a UI or a peer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: &str, to: &str, promotion: Option<PieceKind>) -> Self {
        Self {
            from: from.to_owned(),
            to: to.to_owned(),
            promotion,
        }
    }

    fn from_legal_move(mv: LegalMove) -> Self {
        Self {
            from: square_to_algebraic(mv.from()),
            to: square_to_algebraic(mv.to()),
            promotion: mv.promotion(),
        }
    }
}

/// Permanent record of an executed move. `move_number` and `color` describe
/// the position the move was played from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDescriptor {
    pub from: String,
    pub to: String,
    pub piece: PieceKind,
    pub promotion: Option<PieceKind>,
    pub captured: Option<PieceKind>,
    pub is_en_passant: bool,
    pub is_castle_king_side: bool,
    pub is_castle_queen_side: bool,
    pub san: String,
    pub long_algebraic: String,
    pub resulting_position: Position,
    pub move_number: u16,
    pub color: Color,
    pub is_capture: bool,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

pub fn create_initial_position() -> Position {
    Position::new_game()
}

/// All legal moves, or only those of the piece on `from`. A square without a
/// piece of the side to move yields an empty list.
pub fn generate_legal_moves(position: &Position, from: Option<&str>) -> ChessResult<Vec<LegalMove>> {
    match from {
        Some(square) => Ok(generate_legal_moves_from(position, algebraic_to_square(square)?)),
        None => Ok(legal_move_generator::generate_legal_moves(position)),
    }
}

/// Validates `request` against the legal move list and plays it.
///
/// A pawn move to the last rank without a promotion piece is rejected with
/// `PromotionRequired`; no piece is ever chosen on the caller's behalf here.
pub fn apply_move(position: &Position, request: &MoveRequest) -> ChessResult<MoveDescriptor> {
    if let Err(err) = position.validate() {
        warn!(fen = %generate_fen(position), %err, "refusing to move on a malformed position");
        return Err(err);
    }

    let from = algebraic_to_square(&request.from)?;
    let to = algebraic_to_square(&request.to)?;
    let legal_moves = legal_move_generator::generate_legal_moves(position);

    let Some(mv) = legal_moves
        .iter()
        .copied()
        .find(|mv| mv.matches(from, to, request.promotion))
    else {
        let needs_promotion = request.promotion.is_none()
            && legal_moves
                .iter()
                .any(|mv| mv.from() == from && mv.to() == to && mv.promotion().is_some());

        debug!(
            from = %request.from,
            to = %request.to,
            promotion = ?request.promotion,
            needs_promotion,
            "rejected move request"
        );

        return Err(if needs_promotion {
            ChessErrors::PromotionRequired {
                from: request.from.clone(),
                to: request.to.clone(),
            }
        } else {
            ChessErrors::IllegalMove {
                from: request.from.clone(),
                to: request.to.clone(),
                promotion: request.promotion,
            }
        });
    };

    Ok(describe_move(position, mv, &legal_moves))
}

/// Convenience wrapper that promotes to a queen when the bare request turns
/// out to be a promotion. Anything else behaves exactly like `apply_move`.
pub fn apply_move_default_promotion(position: &Position, from: &str, to: &str) -> ChessResult<MoveDescriptor> {
    match apply_move(position, &MoveRequest::new(from, to, None)) {
        Err(ChessErrors::PromotionRequired { .. }) => {
            apply_move(position, &MoveRequest::new(from, to, Some(PieceKind::Queen)))
        }
        other => other,
    }
}

pub fn apply_san(position: &Position, san: &str) -> ChessResult<MoveDescriptor> {
    let mv = san_to_move(position, san)?;
    apply_move(position, &MoveRequest::from_legal_move(mv))
}

pub fn apply_long_algebraic(position: &Position, text: &str) -> ChessResult<MoveDescriptor> {
    let (from, to, promotion) = parse_long_algebraic(text)?;
    apply_move(
        position,
        &MoveRequest {
            from: square_to_algebraic(from),
            to: square_to_algebraic(to),
            promotion,
        },
    )
}

pub fn is_square_attacked(position: &Position, square: &str, by: Color) -> ChessResult<bool> {
    Ok(legal_move_checks::is_square_attacked(
        position,
        algebraic_to_square(square)?,
        by,
    ))
}

pub fn serialize_position(position: &Position) -> String {
    generate_fen(position)
}

/// FEN parser that also insists on exactly one king per side.
pub fn parse_position(fen: &str) -> ChessResult<Position> {
    let position = parse_fen(fen)?;
    position.validate()?;
    Ok(position)
}

fn describe_move(position: &Position, mv: LegalMove, legal_moves: &[LegalMove]) -> MoveDescriptor {
    let resulting_position = make_move(position, mv);
    let annotations = classify_move_annotations(&resulting_position);

    MoveDescriptor {
        from: square_to_algebraic(mv.from()),
        to: square_to_algebraic(mv.to()),
        piece: mv.moved_piece(),
        promotion: mv.promotion(),
        captured: mv.captured(),
        is_en_passant: mv.is_en_passant(),
        is_castle_king_side: mv.is_castle_king_side(),
        is_castle_queen_side: mv.is_castle_queen_side(),
        san: move_to_san(mv, legal_moves, annotations),
        long_algebraic: move_to_long_algebraic(mv),
        resulting_position,
        move_number: position.fullmove_number,
        color: position.side_to_move,
        is_capture: mv.is_capture(),
        is_check: annotations.gives_check,
        is_checkmate: annotations.is_checkmate,
        is_stalemate: annotations.is_stalemate,
    }
}
