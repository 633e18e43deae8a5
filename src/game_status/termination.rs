//! Game termination classification.
//!
//! Order of evaluation: no legal moves (checkmate or stalemate), then the
//! fifty-move rule, then repetition, else active. Dead material is a separate
//! query (`is_insufficient_material`) and never changes the status returned
//! here. Agreement and resignation belong to the session layer and are not
//! modelled here.

use serde::{Deserialize, Serialize};

use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::position::chess_rules::{FIFTY_MOVE_RULE_PLIES, REPETITION_DRAW_COUNT};
use crate::position::chess_types::Color;
use crate::position::position::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameStatus {
    Active,
    Checkmate,
    Stalemate,
    DrawFiftyMove,
    DrawRepetition,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Active)
    }

    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate | GameStatus::DrawFiftyMove | GameStatus::DrawRepetition
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameTermination {
    pub status: GameStatus,
    /// Set only for checkmate.
    pub winner: Option<Color>,
    pub reason: String,
}

impl GameTermination {
    fn new(status: GameStatus, winner: Option<Color>, reason: &str) -> Self {
        Self {
            status,
            winner,
            reason: reason.to_owned(),
        }
    }

    /// PGN result token for this state: `1-0`, `0-1`, `1/2-1/2` or `*`.
    pub fn result_token(&self) -> &'static str {
        match (self.status, self.winner) {
            (GameStatus::Checkmate, Some(Color::White)) => "1-0",
            (GameStatus::Checkmate, Some(Color::Black)) => "0-1",
            (status, _) if status.is_draw() => "1/2-1/2",
            _ => "*",
        }
    }
}

/// `repetition_count` is how often the caller has seen this position's
/// signature, this occurrence included.
pub fn evaluate_termination(position: &Position, repetition_count: u32) -> GameTermination {
    let side = position.side_to_move;

    if !has_legal_move(position) {
        return if is_king_in_check(position, side) {
            GameTermination::new(
                GameStatus::Checkmate,
                Some(side.opposite()),
                "checkmate",
            )
        } else {
            GameTermination::new(GameStatus::Stalemate, None, "stalemate")
        };
    }

    if position.halfmove_clock >= FIFTY_MOVE_RULE_PLIES {
        return GameTermination::new(GameStatus::DrawFiftyMove, None, "fifty-move rule");
    }

    if repetition_count >= REPETITION_DRAW_COUNT {
        return GameTermination::new(GameStatus::DrawRepetition, None, "threefold repetition");
    }

    GameTermination::new(GameStatus::Active, None, "in progress")
}
