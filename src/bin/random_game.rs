//! Plays a seeded random game through the public engine API and prints the
//! final board, the termination state and the PGN.
//!
//! Usage:
//! `cargo run --bin random_game`
//! `cargo run --bin random_game -- --plies 120 --seed 7`
//! `RUST_LOG=debug cargo run --bin random_game`

use std::collections::HashMap;
use std::str::FromStr;

use chrono::Local;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_rules::notation::algebraic::square_to_algebraic;
use chess_rules::notation::render_position::render_position;
use chess_rules::{
    apply_move, build_pgn, create_initial_position, evaluate_termination, generate_legal_moves,
    is_insufficient_material, position_signature, ChessErrors, GameStatus, MoveRequest,
    PgnMetadata,
};

/// Value following `flag`, or `default` when the flag is absent or unparsable.
fn parse_arg<T: FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|idx| args.get(idx + 1))
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}

fn main() -> Result<(), ChessErrors> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let max_plies: usize = parse_arg(&args, "--plies", 200);
    let seed: u64 = parse_arg(&args, "--seed", 1234);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut position = create_initial_position();
    let mut seen = HashMap::<String, u32>::new();
    seen.insert(position_signature(&position), 1);
    let mut history = Vec::new();
    let mut termination = evaluate_termination(&position, 1);

    info!(max_plies, seed, "starting random game");

    while history.len() < max_plies && termination.status == GameStatus::Active {
        if is_insufficient_material(&position) {
            info!(ply = history.len(), "neither side has mating material");
            break;
        }


        let legal = generate_legal_moves(&position, None)?;
        let Some(mv) = legal.choose(&mut rng) else {
            break;
        };

        let descriptor = apply_move(
            &position,
            &MoveRequest {
                from: square_to_algebraic(mv.from()),
                to: square_to_algebraic(mv.to()),
                promotion: mv.promotion(),
            },
        )?;

        position = descriptor.resulting_position.clone();
        let count = seen.entry(position_signature(&position)).or_insert(0);
        *count += 1;
        termination = evaluate_termination(&position, *count);
        history.push(descriptor);
    }

    info!(
        plies = history.len(),
        status = ?termination.status,
        reason = %termination.reason,
        "game finished"
    );

    let metadata = PgnMetadata {
        event: "Random playout".to_owned(),
        date: Some(Local::now().date_naive()),
        white: "random".to_owned(),
        black: "random".to_owned(),
        result: termination.result_token().to_owned(),
        ..PgnMetadata::default()
    };

    println!("{}\n", render_position(&position));
    println!("{}", build_pgn(&metadata, &history));
    Ok(())
}
