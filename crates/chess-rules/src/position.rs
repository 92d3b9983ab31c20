//! Immutable chess positions.

use crate::movegen::{self, Status};
use crate::{Bitboard, Board, CastleRights, PositionError};
use chess_core::{Color, Move, MoveTags, Piece, Rank, Square};
use md5::{Digest, Md5};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A complete game state: placement, side to move, castling rights,
/// en-passant target and move clocks.
///
/// Positions never change once built. [`Position::update`] returns a new
/// position; the legal moves are computed on first request and cached.
/// Every position obtained from a decoder or from `update` with a legal
/// move has the side that just moved out of check.
#[derive(Clone)]
pub struct Position {
    board: Board,
    turn: Color,
    castle_rights: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    in_check: bool,
    legal_moves: OnceLock<Vec<Move>>,
}

impl Position {
    /// The standard starting position FEN.
    pub const STARTPOS_FEN: &'static str =
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Returns the standard starting position.
    pub fn startpos() -> Self {
        Position {
            board: Board::startpos(),
            turn: Color::White,
            castle_rights: CastleRights::standard(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            in_check: false,
            legal_moves: OnceLock::new(),
        }
    }

    /// Builds a position from its parts, rejecting illegal combinations.
    ///
    /// Checks that each side has exactly one king, that no pawn stands on
    /// the first or last rank, that every castling right is backed by its
    /// king and rook, that the en-passant target fits the side to move and
    /// has the double-pushed pawn in front of it, and that the side not to
    /// move is not in check.
    pub fn new(
        board: Board,
        turn: Color,
        castle_rights: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Result<Self, PositionError> {
        let illegal = |reason: String| PositionError::Illegal(reason);

        for color in Color::ALL {
            let kings = board.pieces(Piece::King, color).count();
            if kings != 1 {
                return Err(illegal(format!("{} has {} kings, expected 1", color, kings)));
            }
        }

        let back_ranks = Bitboard::rank(Rank::R1) | Bitboard::rank(Rank::R8);
        for color in Color::ALL {
            if (board.pieces(Piece::Pawn, color) & back_ranks).is_not_empty() {
                return Err(illegal(format!("{} pawn on the first or last rank", color)));
            }
        }

        castle_rights.validate(&board).map_err(illegal)?;

        if let Some(ep) = en_passant {
            let them = turn.opposite();
            let expected_rank = match turn {
                Color::White => Rank::R6,
                Color::Black => Rank::R3,
            };
            if ep.rank() != expected_rank {
                return Err(illegal(format!(
                    "en passant square {} does not fit {} to move",
                    ep, turn
                )));
            }
            let pushed = ep.offset(0, them.pawn_direction());
            if pushed.and_then(|sq| board.piece_at(sq)) != Some((Piece::Pawn, them)) {
                return Err(illegal(format!(
                    "en passant square {} has no {} pawn in front of it",
                    ep, them
                )));
            }
        }

        if fullmove_number < 1 {
            return Err(illegal("fullmove number must be at least 1".to_string()));
        }

        if board.is_king_attacked(turn.opposite()) {
            return Err(illegal(format!(
                "{} king can be captured, {} is to move",
                turn.opposite(),
                turn
            )));
        }

        Ok(Position {
            in_check: board.is_king_attacked(turn),
            board,
            turn,
            castle_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
            legal_moves: OnceLock::new(),
        })
    }

    /// Returns the piece placement.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the castling rights.
    #[inline]
    pub fn castle_rights(&self) -> &CastleRights {
        &self.castle_rights
    }

    /// Returns the square a pawn may capture onto en passant.
    ///
    /// Set after every double pawn push, whether or not a capture is
    /// actually possible.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Returns the number of half-moves since the last pawn move or capture.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the full-move number, starting at 1.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns true if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Returns the legal moves, computing them on first use.
    pub fn legal_moves(&self) -> &[Move] {
        self.legal_moves.get_or_init(|| movegen::legal_moves(self))
    }

    /// Returns check, checkmate, stalemate or in progress.
    pub fn status(&self) -> Status {
        movegen::status(self)
    }

    /// Returns the position after `m`.
    ///
    /// The move is not validated; it should come from
    /// [`Position::legal_moves`] or a notation decoder. The new position's
    /// check flag is taken from the move's `CHECK` tag.
    pub fn update(&self, m: &Move) -> Position {
        let moved = self.board.piece_at(m.from());
        let is_pawn = matches!(moved, Some((Piece::Pawn, _)));
        let direction = self.turn.pawn_direction();

        let halfmove_clock = if is_pawn || m.is_capture() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        let fullmove_number = match self.turn {
            Color::White => self.fullmove_number,
            Color::Black => self.fullmove_number.saturating_add(1),
        };
        let en_passant = if is_pawn
            && m.from().rank() == self.turn.pawn_rank()
            && m.from().offset(0, 2 * direction) == Some(m.to())
        {
            m.from().offset(0, direction)
        } else {
            None
        };

        Position {
            board: self.board.apply(m),
            turn: self.turn.opposite(),
            castle_rights: self.castle_rights.update(&self.board, m),
            en_passant,
            halfmove_clock,
            fullmove_number,
            in_check: m.has_tag(MoveTags::CHECK),
            legal_moves: OnceLock::new(),
        }
    }

    /// MD5 digest of the binary encoding.
    ///
    /// Includes both move clocks, so positions that differ only in their
    /// clocks hash differently. Use [`Position::repetition_key`] to detect
    /// repetitions.
    pub fn hash(&self) -> [u8; 16] {
        Md5::digest(self.to_binary()).into()
    }

    /// MD5 digest of the binary encoding with both clocks zeroed.
    ///
    /// Equal keys mean the same placement, side to move, castling rights
    /// and en-passant target.
    pub fn repetition_key(&self) -> [u8; 16] {
        let mut bytes = self.to_binary();
        bytes[crate::binary::CLOCKS].fill(0);
        Md5::digest(bytes).into()
    }

    /// Returns true if both positions have the same placement, side to
    /// move, castling rights and en-passant target. Clocks are ignored.
    pub fn same_position(&self, other: &Position) -> bool {
        self.board == other.board
            && self.turn == other.turn
            && self.castle_rights == other.castle_rights
            && self.en_passant == other.en_passant
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

/// Compares everything but the move cache.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.same_position(other)
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Position {}

/// Parses standard FEN. Use [`Position::from_fen_with`] for Chess960.
impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
