//! Move notations.
//!
//! Every notation turns a legal move into text relative to the position it
//! is played from, and turns text back into one of that position's legal
//! moves. Encoding never validates; decoding only ever returns a move from
//! [`Position::legal_moves`], carrying the generator's tags.
//!
//! ```
//! use chess_rules::notation::{AlgebraicNotation, LongAlgebraicNotation, Notation, UciNotation};
//! use chess_rules::Position;
//!
//! let position = Position::startpos();
//! let m = AlgebraicNotation.decode(&position, "Nf3").unwrap();
//! assert_eq!(UciNotation.encode(&position, &m), "g1f3");
//! assert_eq!(LongAlgebraicNotation.encode(&position, &m), "Ng1f3");
//! ```

mod algebraic;
mod uci;

pub use algebraic::{AlgebraicNotation, LongAlgebraicNotation};
pub use uci::UciNotation;

use crate::{NotationError, Position};
use chess_core::Move;

/// A textual move format.
pub trait Notation {
    /// Short name used in error messages.
    fn name(&self) -> &'static str;

    /// Writes `m` as played from `position`.
    fn encode(&self, position: &Position, m: &Move) -> String;

    /// Finds the legal move of `position` that `text` describes.
    fn decode(&self, position: &Position, text: &str) -> Result<Move, NotationError>;
}

/// Drops annotation glyphs (`!`, `?`) and surrounding whitespace.
pub(crate) fn sanitize(text: &str) -> String {
    text.trim().chars().filter(|c| !matches!(c, '!' | '?')).collect()
}

pub(crate) fn invalid_format<N: Notation + ?Sized>(notation: &N, text: &str) -> NotationError {
    let err = NotationError::InvalidFormat {
        notation: notation.name(),
        text: text.to_string(),
    };
    tracing::debug!(error = %err, "rejected move text");
    err
}

/// Returns the legal move among `candidates` whose encoding is `text`,
/// `text` followed by `+`, or `text` followed by `#`.
pub(crate) fn resolve<N, F>(
    notation: &N,
    position: &Position,
    text: &str,
    candidate: F,
) -> Result<Move, NotationError>
where
    N: Notation + ?Sized,
    F: Fn(&Move) -> bool,
{
    let found = position
        .legal_moves()
        .iter()
        .filter(|m| candidate(m))
        .find(|m| {
            let encoded = notation.encode(position, m);
            encoded
                .strip_prefix(text)
                .is_some_and(|rest| matches!(rest, "" | "+" | "#"))
        })
        .copied();

    found.ok_or_else(|| {
        let err = NotationError::NoMatchingMove {
            notation: notation.name(),
            text: text.to_string(),
        };
        tracing::debug!(fen = %position, error = %err, "rejected move text");
        err
    })
}
