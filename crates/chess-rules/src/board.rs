//! Piece placement.

use crate::movegen::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use crate::Bitboard;
use chess_core::{Color, FenError, FenParser, File, Move, MoveTags, Piece, Rank, Square};
use std::fmt;

/// Number of bytes in the binary board encoding.
pub const BOARD_BYTES: usize = 64;

/// A placement of pieces on the 64 squares.
///
/// Pieces are stored twice: as a mailbox for square lookups and as one
/// bitboard per color and piece kind for attack tests. Both views are kept
/// in sync by [`Board::put`] and [`Board::remove`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<(Piece, Color)>; 64],
    pieces: [[Bitboard; 6]; 2],
    occupied: [Bitboard; 2],
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
        }
    }

    /// Returns the standard starting placement.
    pub fn startpos() -> Self {
        const BACK_RANK: [Piece; 8] = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, piece) in File::ALL.into_iter().zip(BACK_RANK) {
                board.put(Square::new(file, color.back_rank()), piece, color);
                board.put(Square::new(file, color.pawn_rank()), Piece::Pawn, color);
            }
        }
        board
    }

    /// Returns the piece on a square.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize]
    }

    /// Places a piece, replacing whatever stood on the square.
    pub fn put(&mut self, sq: Square, piece: Piece, color: Color) {
        self.remove(sq);
        self.squares[sq.index() as usize] = Some((piece, color));
        self.pieces[color.index()][piece.index()].set(sq);
        self.occupied[color.index()].set(sq);
    }

    /// Removes and returns the piece on a square.
    pub fn remove(&mut self, sq: Square) -> Option<(Piece, Color)> {
        let taken = self.squares[sq.index() as usize].take();
        if let Some((piece, color)) = taken {
            self.pieces[color.index()][piece.index()].clear(sq);
            self.occupied[color.index()].clear(sq);
        }
        taken
    }

    /// Returns the squares holding `piece` of `color`.
    #[inline]
    pub fn pieces(&self, piece: Piece, color: Color) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    /// Returns every square occupied by `color`.
    #[inline]
    pub fn pieces_of_color(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    /// Returns every occupied square.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    /// Returns the square of the king of `color`, if present.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(Piece::King, color).first()
    }

    /// Returns true if a piece of `by` attacks `sq`.
    ///
    /// The square's own occupant is irrelevant: pawns attack diagonally
    /// whether or not the square is empty, and sliders stop at the first
    /// blocker on each ray.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        let occupied = self.occupied();
        let queens = self.pieces(Piece::Queen, by);

        (pawn_attacks(sq, by.opposite()) & self.pieces(Piece::Pawn, by)).is_not_empty()
            || (knight_attacks(sq) & self.pieces(Piece::Knight, by)).is_not_empty()
            || (king_attacks(sq) & self.pieces(Piece::King, by)).is_not_empty()
            || (bishop_attacks(sq, occupied) & (self.pieces(Piece::Bishop, by) | queens))
                .is_not_empty()
            || (rook_attacks(sq, occupied) & (self.pieces(Piece::Rook, by) | queens))
                .is_not_empty()
    }

    /// Returns true if the king of `color` is attacked.
    pub fn is_king_attacked(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked(king, color.opposite()))
    }

    /// Returns the board after `m`, leaving `self` untouched.
    ///
    /// The move is not validated. A move from an empty square yields an
    /// unchanged copy.
    pub fn apply(&self, m: &Move) -> Board {
        let mut board = self.clone();
        let Some((piece, color)) = self.piece_at(m.from()) else {
            return board;
        };

        if m.is_castle() {
            let king_side = m.has_tag(MoveTags::KING_SIDE_CASTLE);
            let rank = m.from().rank();
            let rook_from = match self.piece_at(m.to()) {
                Some((Piece::Rook, c)) if c == color => m.to(),
                _ if king_side => Square::new(File::H, rank),
                _ => Square::new(File::A, rank),
            };
            let (king_to, rook_to) = if king_side {
                (File::G, File::F)
            } else {
                (File::C, File::D)
            };
            board.remove(m.from());
            board.remove(rook_from);
            board.put(Square::new(king_to, rank), Piece::King, color);
            board.put(Square::new(rook_to, rank), Piece::Rook, color);
            return board;
        }

        if m.has_tag(MoveTags::EN_PASSANT) {
            board.remove(m.to().with_rank(m.from().rank()));
        }
        board.remove(m.from());
        board.put(m.to(), m.promotion().unwrap_or(piece), color);
        board
    }

    /// Builds a board from a FEN piece-placement field.
    pub fn from_fen_placement(placement: &str) -> Result<Self, FenError> {
        FenParser::validate_piece_placement(placement)?;

        let mut board = Board::empty();
        for (rank, row) in Rank::ALL.into_iter().rev().zip(placement.split('/')) {
            let mut file = 0u8;
            for c in row.chars() {
                match (c.to_digit(10), Piece::from_fen_char(c)) {
                    (Some(skip), _) => file += skip as u8,
                    (None, Some((piece, color))) => {
                        if let Some(f) = File::from_index(file) {
                            board.put(Square::new(f, rank), piece, color);
                        }
                        file += 1;
                    }
                    (None, None) => {}
                }
            }
        }
        Ok(board)
    }

    /// Encodes the board as one byte per square, a1 first.
    ///
    /// Empty squares are 0; white pawn to king are 1-6 and black 7-12.
    pub fn to_bytes(&self) -> [u8; BOARD_BYTES] {
        let mut bytes = [0u8; BOARD_BYTES];
        for (byte, square) in bytes.iter_mut().zip(self.squares.iter()) {
            if let Some((piece, color)) = square {
                *byte = (color.index() * 6 + piece.index() + 1) as u8;
            }
        }
        bytes
    }

    /// Decodes the one-byte-per-square encoding, rejecting unknown codes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != BOARD_BYTES {
            return None;
        }
        let mut board = Board::empty();
        for (sq, &code) in Square::all().zip(bytes) {
            if code == 0 {
                continue;
            }
            let code = usize::from(code - 1);
            let color = match code / 6 {
                0 => Color::White,
                1 => Color::Black,
                _ => return None,
            };
            board.put(sq, Piece::from_index(code % 6)?, color);
        }
        Some(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::startpos()
    }
}

/// Renders the FEN piece-placement field.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rank) in Rank::ALL.into_iter().rev().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for file in File::ALL {
                match self.piece_at(Square::new(file, rank)) {
                    Some((piece, color)) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.to_fen_char(color))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self)
    }
}
