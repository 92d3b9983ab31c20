//! Syntactic FEN (Forsyth-Edwards Notation) field parsing.
//!
//! [`FenParser`] only checks that each of the six fields is well formed.
//! Whether the described position is legal (king counts, castling pieces in
//! place, en-passant pawn present, king not capturable) is decided by the
//! rules crate when it turns these fields into a position.

use crate::{Color, Square};
use thiserror::Error;

/// Errors for FEN text that is not well formed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 fields, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// The six fields of a FEN record after syntax checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement, e.g. "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR".
    pub piece_placement: String,
    /// Side to move.
    pub active_color: Color,
    /// Castling field, e.g. "KQkq", "HAha" or "-".
    pub castling: String,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Halfmove clock (moves since the last pawn move or capture).
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1.
    pub fullmove_number: u32,
}

impl FenParser {
    /// Splits and syntax-checks a FEN string.
    ///
    /// Fields are separated by single spaces; a doubled space or a tab
    /// changes the field count and is rejected.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.trim().split(' ').collect();
        let [placement, turn, castling, en_passant, halfmove, fullmove] = fields[..] else {
            return Err(FenError::InvalidPartCount(fields.len()));
        };

        Self::validate_piece_placement(placement)?;
        Self::validate_castling(castling)?;

        Ok(FenParser {
            piece_placement: placement.to_string(),
            active_color: Color::from_fen(turn)
                .ok_or_else(|| FenError::InvalidActiveColor(turn.to_string()))?,
            castling: castling.to_string(),
            en_passant: Self::parse_en_passant(en_passant)?,
            halfmove_clock: halfmove
                .parse()
                .map_err(|_| FenError::InvalidHalfmoveClock(halfmove.to_string()))?,
            fullmove_number: fullmove
                .parse()
                .ok()
                .filter(|&n: &u32| n >= 1)
                .ok_or_else(|| FenError::InvalidFullmoveNumber(fullmove.to_string()))?,
        })
    }

    /// Checks the placement grammar: 8 ranks of piece letters and digits 1-8,
    /// each exactly 8 squares wide.
    pub fn validate_piece_placement(placement: &str) -> Result<(), FenError> {
        let invalid = |reason: String| Err(FenError::InvalidPiecePlacement(reason));

        let rows = placement.split('/').count();
        if rows != 8 {
            return invalid(format!("expected 8 ranks, got {rows}"));
        }

        for (row, rank) in placement.split('/').zip((1..=8).rev()) {
            let mut width = 0;
            for c in row.chars() {
                width += match c {
                    '1'..='8' => c as u32 - '0' as u32,
                    'p' | 'n' | 'b' | 'r' | 'q' | 'k' | 'P' | 'N' | 'B' | 'R' | 'Q' | 'K' => 1,
                    _ => return invalid(format!("invalid character '{c}' in rank {rank}")),
                };
            }
            if width != 8 {
                return invalid(format!("rank {rank} has {width} squares, expected 8"));
            }
        }

        Ok(())
    }

    /// `-`, or up to four distinct letters from `KQkq`, `A-H` and `a-h`.
    pub fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }
        if castling.is_empty() {
            return Err(FenError::InvalidCastlingRights("empty field".to_string()));
        }

        let mut seen = Vec::with_capacity(4);
        for c in castling.chars() {
            let reason = if !matches!(c, 'K' | 'Q' | 'k' | 'q' | 'A'..='H' | 'a'..='h') {
                format!("invalid character '{c}'")
            } else if seen.contains(&c) {
                format!("'{castling}' repeats '{c}'")
            } else if seen.len() == 4 {
                format!("'{castling}' has more than 4 letters")
            } else {
                seen.push(c);
                continue;
            };
            return Err(FenError::InvalidCastlingRights(reason));
        }

        Ok(())
    }

    fn parse_en_passant(ep: &str) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        match Square::from_algebraic(ep) {
            Some(sq) if matches!(sq.rank().to_char(), '3' | '6') => Ok(Some(sq)),
            _ => Err(FenError::InvalidEnPassantSquare(ep.to_string())),
        }
    }
}
