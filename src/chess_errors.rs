//! Errors used throughout the rules engine.
//!
//! `ChessErrors` is the single error type of the crate. Reaching checkmate,
//! stalemate, or a draw is never an error; only requests that cannot be
//! executed as chess moves, or inputs that cannot be parsed, fail.
//!
//! - `IllegalMove` and `PromotionRequired` are recoverable rejections: the
//!   caller drops the request (UI toast, ignored relay payload) and keeps its
//!   state untouched.
//! - `InvalidSquare`, `InvalidFen`, `InvalidNotation`, and `InvalidPgn` are
//!   input errors suitable for showing to a user.
//! - `MalformedPosition` means upstream state is corrupt (missing king, stale
//!   occupancy). It is not meant to be retried.

use thiserror::Error;

use crate::position::chess_types::PieceKind;

pub type ChessResult<T> = Result<T, ChessErrors>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessErrors {
    /// The requested `(from, to, promotion)` is not in the legal move list.
    #[error("illegal move {from}{to}{}", promotion_suffix(.promotion))]
    IllegalMove {
        from: String,
        to: String,
        promotion: Option<PieceKind>,
    },

    /// A pawn reaches the last rank but no promotion piece was supplied.
    #[error("move {from}{to} promotes a pawn and needs a promotion piece")]
    PromotionRequired { from: String, to: String },

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// SAN or long algebraic text that does not name a legal move.
    #[error("invalid move notation: {0}")]
    InvalidNotation(String),

    #[error("invalid PGN: {0}")]
    InvalidPgn(String),

    #[error("malformed position: {0}")]
    MalformedPosition(String),
}

fn promotion_suffix(promotion: &Option<PieceKind>) -> String {
    match promotion.and_then(PieceKind::san_letter) {
        Some(letter) => format!("={letter}"),
        None => String::new(),
    }
}
