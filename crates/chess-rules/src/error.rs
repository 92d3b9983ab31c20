//! Error types for position decoding and move notation.

use chess_core::FenError;
use thiserror::Error;

/// Broad classification shared by every error in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input does not follow the format's grammar.
    Malformed,
    /// The input is well formed but describes an impossible position.
    Illegal,
    /// Well-formed move text that matches no legal move.
    Unresolvable,
}

/// Errors raised when decoding a position from FEN or binary data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("invalid binary position: {0}")]
    InvalidBinary(String),

    #[error("illegal position: {0}")]
    Illegal(String),
}

impl PositionError {
    /// Returns whether the input was malformed or merely illegal.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PositionError::Fen(_) | PositionError::InvalidBinary(_) => ErrorKind::Malformed,
            PositionError::Illegal(_) => ErrorKind::Illegal,
        }
    }
}

/// Errors raised when decoding move text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid {notation} notation: '{text}'")]
    InvalidFormat {
        notation: &'static str,
        text: String,
    },

    #[error("no legal move matches {notation} '{text}'")]
    NoMatchingMove {
        notation: &'static str,
        text: String,
    },
}

impl NotationError {
    /// Returns `Malformed` for grammar failures and `Unresolvable` otherwise.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NotationError::InvalidFormat { .. } => ErrorKind::Malformed,
            NotationError::NoMatchingMove { .. } => ErrorKind::Unresolvable,
        }
    }
}
