//! Perft: exhaustive legal move tree counting.
//!
//! Leaf totals at a given depth are compared against published reference
//! counts to validate move generation end to end.

use std::thread;

use crate::move_generation::legal_move_generator::{
    generate_legal_moves, generate_legal_moves_with_positions, GeneratedMove,
};
use crate::move_generation::legal_move_apply::make_move;
use crate::notation::long_algebraic::move_to_long_algebraic;
use crate::position::position::Position;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, generated: &GeneratedMove) {
        let mv = generated.mv;
        self.nodes += 1;
        self.captures += u64::from(mv.is_capture());
        self.en_passant += u64::from(mv.is_en_passant());
        self.castles += u64::from(mv.is_castling());
        self.promotions += u64::from(mv.promotion().is_some());
        self.checks += u64::from(generated.annotations.gives_check);
        self.checkmates += u64::from(generated.annotations.is_checkmate);
    }
}

/// Leaf count only. Cheaper than `perft` because leaves are not annotated.
pub fn perft_nodes(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| perft_nodes(&make_move(position, mv), depth - 1))
        .sum()
}

/// Leaf count with the capture / en passant / castle / promotion / check /
/// mate breakdown of the moves that reach depth `depth`.
pub fn perft(position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }

    let mut total = PerftCounts::default();
    for generated in generate_legal_moves_with_positions(position, depth == 1) {
        if depth == 1 {
            total.record_leaf(&generated);
        } else {
            total.merge(perft(&generated.position_after, depth - 1));
        }
    }
    total
}

/// `perft` with one scoped worker thread per root move. Positions are plain
/// values, so the subtrees share nothing.
pub fn perft_parallel(position: &Position, depth: u8) -> PerftCounts {
    if depth <= 1 {
        return perft(position, depth);
    }

    let roots = generate_legal_moves_with_positions(position, false);
    thread::scope(|scope| {
        let handles: Vec<_> = roots
            .iter()
            .map(|generated| scope.spawn(move || perft(&generated.position_after, depth - 1)))
            .collect();

        let mut total = PerftCounts::default();
        for handle in handles {
            let counts = handle
                .join()
                .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
            total.merge(counts);
        }
        total
    })
}

/// Per-root-move node counts, keyed by long algebraic text, for diffing
/// against another move generator.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(String, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut out: Vec<(String, u64)> = generate_legal_moves_with_positions(position, false)
        .into_iter()
        .map(|generated| {
            let lan = move_to_long_algebraic(generated.mv);
            (lan, perft_nodes(&generated.position_after, depth - 1))
        })
        .collect();
    out.sort();
    out
}
