//! Piece kinds and their letters.

use crate::Color;
use serde::{Deserialize, Serialize};

/// The six kinds of chess pieces. A colored piece is `(Piece, Color)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Lowercase letter per piece, indexed by [`Piece::index`].
const LETTERS: [char; 6] = ['p', 'n', 'b', 'r', 'q', 'k'];

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Pieces a pawn may promote to, in generation order.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::ALL.len() {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    const fn from_letter(c: char) -> Option<Self> {
        let mut i = 0;
        while i < LETTERS.len() {
            if LETTERS[i] == c {
                return Some(Self::ALL[i]);
            }
            i += 1;
        }
        None
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = LETTERS[self.index()];
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Reads a FEN piece letter; the case gives the color.
    pub const fn from_fen_char(c: char) -> Option<(Piece, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        match Self::from_letter(c.to_ascii_lowercase()) {
            Some(piece) => Some((piece, color)),
            None => None,
        }
    }

    /// The letter used in algebraic notation; pawns have none.
    pub const fn san_char(self) -> Option<char> {
        match self {
            Piece::Pawn => None,
            _ => Some(self.to_fen_char(Color::White)),
        }
    }

    /// The lowercase letter used for promotions in UCI notation.
    pub const fn uci_char(self) -> char {
        LETTERS[self.index()]
    }

    /// Parses a UCI promotion letter (`q`, `r`, `b` or `n`).
    pub const fn from_uci_promotion(c: char) -> Option<Piece> {
        match Self::from_letter(c) {
            Some(piece @ (Piece::Queen | Piece::Rook | Piece::Bishop | Piece::Knight)) => {
                Some(piece)
            }
            _ => None,
        }
    }
}
