//! Castling rights for standard chess and Chess960.

use crate::{Board, PositionError};
use bitflags::bitflags;
use chess_core::{Color, FenError, FenParser, File, Move, Piece, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// The four castling permissions. Bit values match the binary encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct CastleFlags: u8 {
        const WHITE_KING_SIDE = 0b0001;
        const WHITE_QUEEN_SIDE = 0b0010;
        const BLACK_KING_SIDE = 0b0100;
        const BLACK_QUEEN_SIDE = 0b1000;
    }
}

impl CastleFlags {
    /// Returns the flag for one color and side.
    pub const fn of(color: Color, side: CastleSide) -> Self {
        match (color, side) {
            (Color::White, CastleSide::King) => CastleFlags::WHITE_KING_SIDE,
            (Color::White, CastleSide::Queen) => CastleFlags::WHITE_QUEEN_SIDE,
            (Color::Black, CastleSide::King) => CastleFlags::BLACK_KING_SIDE,
            (Color::Black, CastleSide::Queen) => CastleFlags::BLACK_QUEEN_SIDE,
        }
    }

    /// Returns both flags of a color.
    pub const fn both(color: Color) -> Self {
        CastleFlags::of(color, CastleSide::King).union(CastleFlags::of(color, CastleSide::Queen))
    }
}

/// The wing a king castles towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// Towards the h-file (O-O).
    King,
    /// Towards the a-file (O-O-O).
    Queen,
}

impl CastleSide {
    /// Both sides, king side first.
    pub const ALL: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// The file the king lands on.
    pub const fn king_target(self) -> File {
        match self {
            CastleSide::King => File::G,
            CastleSide::Queen => File::C,
        }
    }

    /// The file the rook lands on.
    pub const fn rook_target(self) -> File {
        match self {
            CastleSide::King => File::F,
            CastleSide::Queen => File::D,
        }
    }

    /// The rook's starting file in standard chess.
    pub const fn standard_rook_file(self) -> File {
        match self {
            CastleSide::King => File::H,
            CastleSide::Queen => File::A,
        }
    }

    fn is_outward(self, file: File, king: File) -> bool {
        match self {
            CastleSide::King => file > king,
            CastleSide::Queen => file < king,
        }
    }
}

/// Which castling rules a position follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CastlingMode {
    /// King on e1/e8, rooks on the a- and h-files, `KQkq` notation.
    #[default]
    Standard,
    /// Fischer random: rooks on any file either side of the king,
    /// Shredder-FEN or X-FEN notation.
    Chess960,
}

/// Castling permissions plus the rook starting files they refer to.
///
/// In Chess960 mode the king-side and queen-side rook files are shared by
/// both colors and may be unresolved when no right ever named them. Standard
/// mode never records rook files; they are implicitly h and a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CastleRights {
    flags: CastleFlags,
    mode: CastlingMode,
    king_side_rook: Option<File>,
    queen_side_rook: Option<File>,
}

impl CastleRights {
    /// No castling rights.
    pub const fn none(mode: CastlingMode) -> Self {
        CastleRights {
            flags: CastleFlags::empty(),
            mode,
            king_side_rook: None,
            queen_side_rook: None,
        }
    }

    /// All four standard rights (`KQkq`).
    pub const fn standard() -> Self {
        CastleRights {
            flags: CastleFlags::all(),
            ..CastleRights::none(CastlingMode::Standard)
        }
    }

    /// Assembles rights from raw parts. Rook files are discarded in
    /// standard mode.
    pub fn from_parts(
        flags: CastleFlags,
        mode: CastlingMode,
        king_side_rook: Option<File>,
        queen_side_rook: Option<File>,
    ) -> Self {
        match mode {
            CastlingMode::Standard => CastleRights {
                flags,
                ..CastleRights::none(mode)
            },
            CastlingMode::Chess960 => CastleRights {
                flags,
                mode,
                king_side_rook,
                queen_side_rook,
            },
        }
    }

    /// Returns true if `color` still holds the right to castle on `side`.
    #[inline]
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        self.flags.contains(CastleFlags::of(color, side))
    }

    /// Returns the raw permission flags.
    #[inline]
    pub fn flags(&self) -> CastleFlags {
        self.flags
    }

    /// Returns the castling rules these rights follow.
    #[inline]
    pub fn mode(&self) -> CastlingMode {
        self.mode
    }

    /// Returns true in Chess960 mode.
    #[inline]
    pub fn is_chess960(&self) -> bool {
        self.mode == CastlingMode::Chess960
    }

    /// Returns the recorded Chess960 rook file for `side`.
    ///
    /// Always `None` in standard mode; see [`CastleRights::rook_file`].
    #[inline]
    pub fn recorded_rook_file(&self, side: CastleSide) -> Option<File> {
        match side {
            CastleSide::King => self.king_side_rook,
            CastleSide::Queen => self.queen_side_rook,
        }
    }

    /// Returns the starting file of the rook that castles on `side`.
    pub fn rook_file(&self, side: CastleSide) -> Option<File> {
        match self.mode {
            CastlingMode::Standard => Some(side.standard_rook_file()),
            CastlingMode::Chess960 => self.recorded_rook_file(side),
        }
    }

    /// Returns the starting square of the castling rook of `color` on `side`.
    pub fn rook_square(&self, color: Color, side: CastleSide) -> Option<Square> {
        self.rook_file(side)
            .map(|file| Square::new(file, color.back_rank()))
    }

    /// Parses a FEN castling field against the board it belongs to.
    ///
    /// Standard mode accepts only `KQkq` letters and requires king and rook
    /// on their home squares. Chess960 mode accepts Shredder-FEN file
    /// letters and X-FEN `KQkq` letters (outermost rook on that side).
    pub fn parse(field: &str, mode: CastlingMode, board: &Board) -> Result<Self, PositionError> {
        let mut rights = CastleRights::none(mode);
        if field == "-" {
            return Ok(rights);
        }

        let malformed = |reason: &str| {
            PositionError::Fen(FenError::InvalidCastlingRights(format!(
                "'{}': {}",
                field, reason
            )))
        };
        let illegal = |reason: &str| {
            PositionError::Illegal(format!("castling rights '{}': {}", field, reason))
        };

        FenParser::validate_castling(field)?;

        match mode {
            CastlingMode::Standard => {
                for c in field.chars() {
                    let (color, side) = match c {
                        'K' => (Color::White, CastleSide::King),
                        'Q' => (Color::White, CastleSide::Queen),
                        'k' => (Color::Black, CastleSide::King),
                        'q' => (Color::Black, CastleSide::Queen),
                        _ => return Err(malformed("standard chess only allows KQkq")),
                    };
                    let rank = color.back_rank();
                    let king = Square::new(File::E, rank);
                    let rook = Square::new(side.standard_rook_file(), rank);
                    if board.piece_at(king) != Some((Piece::King, color))
                        || board.piece_at(rook) != Some((Piece::Rook, color))
                    {
                        return Err(illegal(&format!("{} king or rook has moved", color)));
                    }
                    rights.flags |= CastleFlags::of(color, side);
                }
            }
            CastlingMode::Chess960 => {
                let mut king_file: Option<File> = None;
                for c in field.chars() {
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let rank = color.back_rank();
                    let king = board
                        .king_square(color)
                        .ok_or_else(|| illegal(&format!("{} has no king", color)))?;
                    if king.rank() != rank {
                        return Err(illegal(&format!("{} king is off its back rank", color)));
                    }
                    if matches!(king.file(), File::A | File::H) {
                        return Err(illegal(&format!("{} king stands in a corner", color)));
                    }
                    if king_file.is_some_and(|f| f != king.file()) {
                        return Err(illegal("kings must share a file when both may castle"));
                    }
                    king_file = Some(king.file());

                    let is_own_rook =
                        |file: File| board.piece_at(Square::new(file, rank)) == Some((Piece::Rook, color));

                    let (side, rook_file) = match c.to_ascii_lowercase() {
                        'k' => {
                            let file = File::ALL
                                .into_iter()
                                .rev()
                                .filter(|&f| f > king.file())
                                .find(|&f| is_own_rook(f))
                                .ok_or_else(|| illegal(&format!("no {} king-side rook", color)))?;
                            (CastleSide::King, file)
                        }
                        'q' => {
                            let file = File::ALL
                                .into_iter()
                                .filter(|&f| f < king.file())
                                .find(|&f| is_own_rook(f))
                                .ok_or_else(|| illegal(&format!("no {} queen-side rook", color)))?;
                            (CastleSide::Queen, file)
                        }
                        letter => {
                            let file = File::from_char(letter)
                                .ok_or_else(|| malformed("unknown letter"))?;
                            let side = if file > king.file() {
                                CastleSide::King
                            } else if file < king.file() {
                                CastleSide::Queen
                            } else {
                                return Err(illegal("a rook cannot start on the king's file"));
                            };
                            if !is_own_rook(file) {
                                return Err(illegal(&format!("no {} rook on the {}-file", color, file)));
                            }
                            (side, file)
                        }
                    };

                    let flag = CastleFlags::of(color, side);
                    if rights.flags.contains(flag) {
                        return Err(illegal(&format!("{} {:?}-side right given twice", color, side)));
                    }
                    let recorded = match side {
                        CastleSide::King => &mut rights.king_side_rook,
                        CastleSide::Queen => &mut rights.queen_side_rook,
                    };
                    if recorded.is_some_and(|f| f != rook_file) {
                        return Err(illegal("white and black rooks start on different files"));
                    }
                    *recorded = Some(rook_file);
                    rights.flags |= flag;
                }
            }
        }

        Ok(rights)
    }

    /// Checks that every granted right is backed by a king and rook on
    /// their starting squares.
    pub fn validate(&self, board: &Board) -> Result<(), String> {
        let mut king_file: Option<File> = None;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if !self.can_castle(color, side) {
                    continue;
                }
                let king = board
                    .king_square(color)
                    .filter(|k| k.rank() == color.back_rank())
                    .ok_or_else(|| format!("{} king is off its back rank", color))?;
                let rook_file = self
                    .rook_file(side)
                    .ok_or_else(|| format!("{:?}-side rook file is unknown", side))?;
                let rook = Square::new(rook_file, color.back_rank());
                if board.piece_at(rook) != Some((Piece::Rook, color)) {
                    return Err(format!("no {} rook on {}", color, rook));
                }
                match self.mode {
                    CastlingMode::Standard if king.file() != File::E => {
                        return Err(format!("{} king is not on the e-file", color));
                    }
                    CastlingMode::Chess960 => {
                        if !side.is_outward(rook_file, king.file()) {
                            return Err(format!("{} rook on {} is on the wrong side", color, rook));
                        }
                        if king_file.is_some_and(|f| f != king.file()) {
                            return Err("kings must share a file when both may castle".into());
                        }
                        king_file = Some(king.file());
                    }
                    CastlingMode::Standard => {}
                }
            }
        }
        Ok(())
    }

    /// Returns the rights after `m` is played on `board`.
    ///
    /// A king move drops both rights of its color. Any move from or onto a
    /// right's rook starting square drops that right.
    pub fn update(&self, board: &Board, m: &Move) -> Self {
        let mut next = *self;
        if let Some((Piece::King, color)) = board.piece_at(m.from()) {
            next.flags.remove(CastleFlags::both(color));
        }
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if let Some(rook) = self.rook_square(color, side) {
                    if m.from() == rook || m.to() == rook {
                        next.flags.remove(CastleFlags::of(color, side));
                    }
                }
            }
        }
        // Drop rook files no right refers to any more
        for side in CastleSide::ALL {
            if !Color::ALL.into_iter().any(|color| next.can_castle(color, side)) {
                match side {
                    CastleSide::King => next.king_side_rook = None,
                    CastleSide::Queen => next.queen_side_rook = None,
                }
            }
        }
        next
    }

    /// Returns the X-FEN castling field for `board`.
    ///
    /// Standard mode prints `KQkq`. In Chess960 mode a right is written as
    /// `K`/`Q` (or `k`/`q`) unless another rook of that color stands further
    /// outside on the same wing, in which case the file letter is used.
    pub fn to_xfen(&self, board: &Board) -> String {
        if !self.is_chess960() {
            return self.to_string();
        }

        let mut out = String::new();
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if !self.can_castle(color, side) {
                    continue;
                }
                let Some(file) = self.rook_file(side) else {
                    continue;
                };
                let ambiguous = File::ALL.into_iter().any(|f| {
                    side.is_outward(f, file)
                        && board.piece_at(Square::new(f, color.back_rank()))
                            == Some((Piece::Rook, color))
                });
                let letter = match (ambiguous, side) {
                    (true, _) => file.to_char(),
                    (false, CastleSide::King) => 'k',
                    (false, CastleSide::Queen) => 'q',
                };
                out.push(match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                });
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }
}

/// Writes the FEN castling field: `KQkq` letters in standard mode and
/// Shredder-FEN file letters in Chess960 mode.
impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut any = false;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if !self.can_castle(color, side) {
                    continue;
                }
                let letter = match self.mode {
                    CastlingMode::Standard => match side {
                        CastleSide::King => 'k',
                        CastleSide::Queen => 'q',
                    },
                    CastlingMode::Chess960 => match self.rook_file(side) {
                        Some(file) => file.to_char(),
                        None => continue,
                    },
                };
                let letter = match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                };
                write!(f, "{}", letter)?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }
        Ok(())
    }
}
