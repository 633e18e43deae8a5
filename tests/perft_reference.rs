use chess_rules::move_generation::perft::{perft, perft_nodes, perft_parallel, PerftCounts};
use chess_rules::Position;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ROOK_ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const DISCOVERED_CHECKS: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

fn position(fen: &str) -> Position {
    Position::from_fen(fen).expect("reference FEN should parse")
}

fn assert_nodes(fen: &str, expected: &[u64]) {
    let root = position(fen);
    for (idx, nodes) in expected.iter().enumerate() {
        let depth = (idx + 1) as u8;
        assert_eq!(perft_nodes(&root, depth), *nodes, "{fen} depth {depth}");
    }
}

#[test]
fn start_position() {
    assert_nodes(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        &[20, 400, 8902],
    );
}

#[test]
fn kiwipete() {
    assert_nodes(KIWIPETE, &[48, 2039]);
    assert_eq!(
        perft(&position(KIWIPETE), 2),
        PerftCounts {
            nodes: 2039,
            captures: 351,
            en_passant: 1,
            castles: 91,
            promotions: 0,
            checks: 3,
            checkmates: 0,
        }
    );
}

#[test]
fn rook_endgame_with_en_passant_pins() {
    assert_nodes(ROOK_ENDGAME, &[14, 191, 2812]);
    assert_eq!(
        perft(&position(ROOK_ENDGAME), 3),
        PerftCounts {
            nodes: 2812,
            captures: 209,
            en_passant: 2,
            castles: 0,
            promotions: 0,
            checks: 267,
            checkmates: 0,
        }
    );
}

#[test]
fn promotion_heavy_position() {
    assert_nodes(PROMOTIONS, &[6, 264, 9467]);
    assert_eq!(
        perft(&position(PROMOTIONS), 2),
        PerftCounts {
            nodes: 264,
            captures: 87,
            en_passant: 0,
            castles: 6,
            promotions: 48,
            checks: 10,
            checkmates: 0,
        }
    );
}

#[test]
fn discovered_check_position() {
    assert_nodes(DISCOVERED_CHECKS, &[44, 1486]);
}

#[test]
fn parallel_perft_agrees() {
    let root = position(KIWIPETE);
    assert_eq!(perft_parallel(&root, 2), perft(&root, 2));
}
