//! Leaf-node counting over the legal move tree.
//!
//! Published counts for well-known positions pin down the generator: any
//! missing or extra move shows up as a wrong total.

use crate::Position;

/// Number of move sequences of exactly `depth` plies.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|m| perft(&position.update(m), depth - 1))
        .sum()
}

/// Node counts per root move, sorted by UCI text.
///
/// Comparing this against another engine's divide output narrows a wrong
/// total down to the move whose subtree disagrees.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = position
        .legal_moves()
        .iter()
        .map(|m| {
            let nodes = if depth > 1 {
                perft(&position.update(m), depth - 1)
            } else {
                1
            };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    for (uci, nodes) in &results {
        tracing::trace!(%uci, nodes, depth, "perft divide");
    }
    results
}
