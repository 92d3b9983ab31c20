//! Perft node counts for well-known test positions.
//!
//! The deeper counts take a while in debug builds; the slowest ones are
//! ignored by default. Run them with:
//! `cargo test -p chess-rules --release --test perft -- --ignored`

use chess_rules::{perft, perft_divide, CastlingMode, Position};

fn check(fen: &str, mode: CastlingMode, nodes_per_depth: &[u64]) {
    let position = Position::from_fen_with(fen, mode).expect("fixture FEN is legal");
    for (depth, &expected) in (1..).zip(nodes_per_depth) {
        assert_eq!(
            perft(&position, depth),
            expected,
            "perft({}) of {}",
            depth,
            fen
        );
    }
}

#[test]
fn test_startpos() {
    check(
        Position::STARTPOS_FEN,
        CastlingMode::Standard,
        &[20, 400, 8902, 197281],
    );
}

#[test]
#[ignore = "slow in debug builds"]
fn test_startpos_depth_5() {
    assert_eq!(perft(&Position::startpos(), 5), 4865609);
}

#[test]
fn test_kiwipete() {
    check(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        CastlingMode::Standard,
        &[48, 2039, 97862],
    );
}

#[test]
fn test_rook_endgame() {
    check(
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        CastlingMode::Standard,
        &[14, 191, 2812, 43238],
    );
}

#[test]
fn test_promotions_and_pins() {
    check(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        CastlingMode::Standard,
        &[6, 264, 9467],
    );
}

#[test]
fn test_promotions_and_pins_mirrored() {
    check(
        "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        CastlingMode::Standard,
        &[6, 264, 9467],
    );
}

#[test]
fn test_position_5() {
    check(
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        CastlingMode::Standard,
        &[44, 1486, 62379],
    );
}

#[test]
fn test_position_6() {
    check(
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        CastlingMode::Standard,
        &[46, 2079, 89890],
    );
}

#[test]
#[ignore = "slow in debug builds"]
fn test_deep_counts() {
    check(
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        CastlingMode::Standard,
        &[14, 191, 2812, 43238, 674624],
    );
    check(
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        CastlingMode::Standard,
        &[6, 264, 9467, 422333],
    );
}

#[test]
fn test_chess960_positions() {
    check(
        "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9",
        CastlingMode::Chess960,
        &[21, 528, 12189],
    );
    check(
        "2nnrbkr/p1qppppp/8/1ppb4/6PP/3PP3/PPP2P2/BQNNRBKR w HEhe - 1 9",
        CastlingMode::Chess960,
        &[21, 807, 18002],
    );
    check(
        "b1q1rrkb/pppppppp/3nn3/8/P7/1PPP4/4PPPP/BQNNRKRB w GE - 1 9",
        CastlingMode::Chess960,
        &[20, 479, 10471],
    );
}

#[test]
fn test_divide_matches_total() {
    let position = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let divide = perft_divide(&position, 3);
    assert_eq!(divide.len(), 48);
    assert_eq!(divide.iter().map(|(_, n)| n).sum::<u64>(), 97862);
    assert!(divide.windows(2).all(|w| w[0].0 < w[1].0));
}
