//! Move representation.

use crate::{Piece, Square};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Properties of a move, filled in by the move generator.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct MoveTags: u8 {
        /// An enemy piece is removed (including en passant).
        const CAPTURE = 0b0000_0001;
        /// A pawn captures the pawn that just double-stepped past it.
        const EN_PASSANT = 0b0000_0010;
        /// The move attacks the opponent's king.
        const CHECK = 0b0000_0100;
        /// King-side castling (O-O).
        const KING_SIDE_CASTLE = 0b0000_1000;
        /// Queen-side castling (O-O-O).
        const QUEEN_SIDE_CASTLE = 0b0001_0000;
    }
}

/// A chess move.
///
/// A move is only meaningful relative to the position it was generated
/// from: it carries the origin, destination, optional promotion piece and
/// the tags computed by the generator, but no reference back to the board.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Piece>,
    tags: MoveTags,
}

impl Move {
    /// Creates an untagged move.
    #[inline]
    pub const fn new(from: Square, to: Square, promotion: Option<Piece>) -> Self {
        Move {
            from,
            to,
            promotion,
            tags: MoveTags::empty(),
        }
    }

    /// Creates a move without promotion or tags.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, None)
    }

    /// Returns a copy of this move with `tags` added.
    #[inline]
    pub const fn with_tags(self, tags: MoveTags) -> Self {
        Move {
            tags: self.tags.union(tags),
            ..self
        }
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the promotion piece, if any.
    #[inline]
    pub const fn promotion(self) -> Option<Piece> {
        self.promotion
    }

    /// Returns the tag set.
    #[inline]
    pub const fn tags(self) -> MoveTags {
        self.tags
    }

    /// Returns true if every tag in `tags` is present.
    #[inline]
    pub const fn has_tag(self, tags: MoveTags) -> bool {
        self.tags.contains(tags)
    }

    /// Returns true for either castling tag.
    #[inline]
    pub const fn is_castle(self) -> bool {
        self.tags
            .intersects(MoveTags::KING_SIDE_CASTLE.union(MoveTags::QUEEN_SIDE_CASTLE))
    }

    /// Returns true if this move removes an enemy piece.
    #[inline]
    pub const fn is_capture(self) -> bool {
        self.tags.contains(MoveTags::CAPTURE)
    }

    /// Returns the UCI notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(piece) => format!("{}{}{}", self.from, self.to, piece.uci_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses the squares and promotion of a UCI move.
    ///
    /// The result carries no tags; a legal, tagged move is only obtained by
    /// matching it against a position's legal moves.
    pub fn from_uci(s: &str) -> Option<Self> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(Piece::from_uci_promotion(c)?),
            None => None,
        };
        Some(Move::new(from, to, promotion))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.to_uci())?;
        if !self.tags.is_empty() {
            write!(f, " {:?}", self.tags)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
