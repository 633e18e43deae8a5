//! Crate root module declarations for the chess rules engine.
//!
//! The engine is layered: the position model, attack tables, move generation
//! (pseudo-legal generators, attack detector, legal filter and applicator),
//! notation, and termination. `engine` is the narrow boundary the session,
//! relay, persistence and UI collaborators call into.

pub mod position {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod position;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod slider_rays;
    pub mod step_tables;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_sliders;
    pub mod perft;
}

pub mod notation {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_position;
    pub mod san;
}

pub mod game_status {
    pub mod insufficient_material;
    pub mod termination;
}

pub mod chess_errors;
pub mod engine;

pub use chess_errors::{ChessErrors, ChessResult};
pub use engine::{
    apply_long_algebraic, apply_move, apply_move_default_promotion, apply_san, build_pgn,
    create_initial_position, evaluate_termination, generate_legal_moves, is_insufficient_material,
    is_square_attacked, parse_position, position_signature, read_pgn, serialize_position,
    GameStatus, GameTermination, MoveDescriptor, MoveRequest, PgnGame, PgnMetadata,
};
pub use moves::move_descriptions::LegalMove;
pub use position::chess_types::{Color, Piece, PieceKind};
pub use position::position::Position;
