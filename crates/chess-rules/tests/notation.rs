//! Decoding the same move in all three notations.

use chess_rules::notation::{AlgebraicNotation, LongAlgebraicNotation, Notation, UciNotation};
use chess_rules::{ErrorKind, Position};

struct Case {
    before: &'static str,
    san: &'static str,
    long: &'static str,
    uci: &'static str,
    after: &'static str,
}

const CASES: &[Case] = &[
    Case {
        before: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        san: "e4",
        long: "e2e4",
        uci: "e2e4",
        after: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
    },
    Case {
        before: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        san: "Nf3",
        long: "Ng1f3",
        uci: "g1f3",
        after: "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b KQkq - 1 1",
    },
    Case {
        before: "r2qk2r/pp1n1ppp/2pbpn2/3p4/2PP4/1PNQPN2/P4PPP/R1B1K2R w KQkq - 1 9",
        san: "O-O",
        long: "O-O",
        uci: "e1g1",
        after: "r2qk2r/pp1n1ppp/2pbpn2/3p4/2PP4/1PNQPN2/P4PPP/R1B2RK1 b kq - 2 9",
    },
    Case {
        before: "r3k2r/ppqn1ppp/2pbpn2/3p4/2PP4/1PNQPN2/P2B1PPP/R3K2R w KQkq - 3 10",
        san: "O-O-O",
        long: "O-O-O",
        uci: "e1c1",
        after: "r3k2r/ppqn1ppp/2pbpn2/3p4/2PP4/1PNQPN2/P2B1PPP/2KR3R b kq - 4 10",
    },
    Case {
        before: "r1bqkbnr/ppp1pppp/2n5/3p4/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        san: "exd5",
        long: "e4xd5",
        uci: "e4d5",
        after: "r1bqkbnr/ppp1pppp/2n5/3P4/8/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 3",
    },
    Case {
        before: "r1bqkbnr/ppp1p1pp/2n5/3pPp2/8/5N2/PPPP1PPP/RNBQKB1R w KQkq f6 0 4",
        san: "exf6",
        long: "e5xf6",
        uci: "e5f6",
        after: "r1bqkbnr/ppp1p1pp/2n2P2/3p4/8/5N2/PPPP1PPP/RNBQKB1R b KQkq - 0 4",
    },
    Case {
        before: "r1bqkbnr/ppp1p1pp/2n5/3pPp2/3N4/8/PPPP1PPP/RNBQKB1R b KQkq - 1 4",
        san: "Nxd4",
        long: "Nc6xd4",
        uci: "c6d4",
        after: "r1bqkbnr/ppp1p1pp/8/3pPp2/3n4/8/PPPP1PPP/RNBQKB1R w KQkq - 0 5",
    },
    Case {
        before: "2r3k1/1q1nbppp/r3p3/3pP3/pPpP4/P1Q2N2/2RN1PPP/2R4K b - b3 0 23",
        san: "axb3",
        long: "a4xb3",
        uci: "a4b3",
        after: "2r3k1/1q1nbppp/r3p3/3pP3/2pP4/PpQ2N2/2RN1PPP/2R4K w - - 0 24",
    },
    Case {
        before: "K6k/8/8/8/8/8/p7/8 b - - 0 1",
        san: "a1=Q+",
        long: "a2a1=Q+",
        uci: "a2a1q",
        after: "K6k/8/8/8/8/8/8/q7 w - - 0 2",
    },
    Case {
        before: "rn1qkb1r/pp3ppp/2p1pn2/3p4/2PP4/2NQPN2/PP3PPP/R1B1K2R b KQkq - 0 7",
        san: "Nbd7",
        long: "Nb8d7",
        uci: "b8d7",
        after: "r2qkb1r/pp1n1ppp/2p1pn2/3p4/2PP4/2NQPN2/PP3PPP/R1B1K2R w KQkq - 1 8",
    },
    Case {
        before: "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2",
        san: "Qh4#",
        long: "Qd8h4#",
        uci: "d8h4",
        after: "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    },
];

#[test]
fn test_all_notations_decode_to_same_update() {
    let notations: [(&dyn Notation, fn(&Case) -> &'static str); 3] = [
        (&AlgebraicNotation, |c: &Case| c.san),
        (&LongAlgebraicNotation, |c: &Case| c.long),
        (&UciNotation, |c: &Case| c.uci),
    ];

    for case in CASES {
        let before = Position::from_fen(case.before).unwrap();
        for (notation, text) in &notations {
            let text = text(case);
            let m = notation
                .decode(&before, text)
                .unwrap_or_else(|e| panic!("{} in {}: {}", text, case.before, e));
            assert_eq!(before.update(&m).to_fen(), case.after, "{}", text);
            assert_eq!(notation.encode(&before, &m), text);
        }
    }
}

#[test]
fn test_invalid_decodes() {
    let startpos = Position::startpos();
    let two_knights = Position::from_fen(
        "rn1qkb1r/pp3ppp/2p1pn2/3p4/2PP4/2NQPN2/PP3PPP/R1B1K2R b KQkq - 0 7",
    )
    .unwrap();
    let castling =
        Position::from_fen("r2qk2r/pp1n1ppp/2pbpn2/3p4/2PP4/1PNQPN2/P4PPP/R1B1K2R w KQkq - 1 9")
            .unwrap();

    // Black's reply from the white side
    assert_eq!(
        AlgebraicNotation.decode(&startpos, "e5").unwrap_err().kind(),
        ErrorKind::Unresolvable
    );
    // Both knights reach d7
    assert_eq!(
        AlgebraicNotation.decode(&two_knights, "Nd7").unwrap_err().kind(),
        ErrorKind::Unresolvable
    );
    assert_eq!(
        AlgebraicNotation.decode(&castling, "O-O-O-O").unwrap_err().kind(),
        ErrorKind::Malformed
    );
    assert_eq!(
        AlgebraicNotation.decode(&castling, "O-O-O").unwrap_err().kind(),
        ErrorKind::Unresolvable
    );
    assert!(UciNotation.decode(&startpos, "e2e5").is_err());
    assert!(LongAlgebraicNotation.decode(&startpos, "e4").is_err());
}

#[test]
fn test_every_legal_move_round_trips() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ];
    let notations: [&dyn Notation; 3] = [&AlgebraicNotation, &LongAlgebraicNotation, &UciNotation];

    for fen in fens {
        let position = Position::from_fen(fen).unwrap();
        for notation in notations {
            for m in position.legal_moves() {
                let text = notation.encode(&position, m);
                let decoded = notation.decode(&position, &text).unwrap();
                assert_eq!(&decoded, m, "{} in {}", text, fen);
            }
        }
    }
}
