//! Fixed-width binary encoding of positions.
//!
//! Layout (71 bytes):
//!
//! | bytes  | content                                                    |
//! |--------|------------------------------------------------------------|
//! | 0..64  | piece code per square, a1 first (see [`Board::to_bytes`]) |
//! | 64     | half-move clock, saturating at 255                         |
//! | 65..67 | full-move number, big-endian, saturating at 65535          |
//! | 67     | en-passant square index, `0xFF` when absent                |
//! | 68     | king-side rook file (Chess960), `0xFF` when absent         |
//! | 69     | queen-side rook file (Chess960), `0xFF` when absent        |
//! | 70     | state flags                                                |

use crate::board::BOARD_BYTES;
use crate::{Board, CastleFlags, CastleRights, CastleSide, CastlingMode, Position, PositionError};
use bitflags::bitflags;
use chess_core::{Color, File, Square};
use std::ops::Range;

/// Length of the binary position encoding.
pub const BINARY_LEN: usize = 71;

/// Bytes holding the two move clocks.
pub(crate) const CLOCKS: Range<usize> = 64..67;

const ABSENT: u8 = 0xFF;

bitflags! {
    /// The last byte of the encoding. The low four bits match [`CastleFlags`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct StateFlags: u8 {
        const WHITE_KING_SIDE = 1 << 0;
        const WHITE_QUEEN_SIDE = 1 << 1;
        const BLACK_KING_SIDE = 1 << 2;
        const BLACK_QUEEN_SIDE = 1 << 3;
        const BLACK_TO_MOVE = 1 << 4;
        const HAS_EN_PASSANT = 1 << 5;
        const CHESS960 = 1 << 6;
    }
}

fn encode_file(file: Option<File>) -> u8 {
    file.map_or(ABSENT, File::index)
}

fn decode_file(byte: u8) -> Result<Option<File>, PositionError> {
    if byte == ABSENT {
        return Ok(None);
    }
    File::from_index(byte)
        .map(Some)
        .ok_or_else(|| PositionError::InvalidBinary(format!("invalid rook file byte {:#04x}", byte)))
}

impl Position {
    /// Encodes the position in the fixed 71-byte layout.
    ///
    /// The layout is lossy for long games: a half-move clock above 255 is
    /// stored as 255 and a full-move number above 65535 as 65535, so
    /// [`Position::from_binary`] returns those capped values.
    pub fn to_binary(&self) -> [u8; BINARY_LEN] {
        let mut bytes = [0u8; BINARY_LEN];
        bytes[..BOARD_BYTES].copy_from_slice(&self.board().to_bytes());
        bytes[64] = u8::try_from(self.halfmove_clock()).unwrap_or(u8::MAX);
        let fullmove = u16::try_from(self.fullmove_number()).unwrap_or(u16::MAX);
        bytes[65..67].copy_from_slice(&fullmove.to_be_bytes());
        bytes[67] = self.en_passant().map_or(ABSENT, Square::index);

        let rights = self.castle_rights();
        bytes[68] = encode_file(rights.recorded_rook_file(CastleSide::King));
        bytes[69] = encode_file(rights.recorded_rook_file(CastleSide::Queen));

        let mut flags = StateFlags::from_bits_truncate(rights.flags().bits());
        flags.set(StateFlags::BLACK_TO_MOVE, self.turn() == Color::Black);
        flags.set(StateFlags::HAS_EN_PASSANT, self.en_passant().is_some());
        flags.set(StateFlags::CHESS960, rights.is_chess960());
        bytes[70] = flags.bits();
        bytes
    }

    /// Decodes the 71-byte layout, applying the same legality checks as
    /// FEN decoding.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, PositionError> {
        let result = Self::decode_binary(bytes);
        if let Err(err) = &result {
            tracing::debug!(len = bytes.len(), error = %err, "rejected binary position");
        }
        result
    }

    fn decode_binary(bytes: &[u8]) -> Result<Self, PositionError> {
        let invalid = |reason: String| PositionError::InvalidBinary(reason);

        if bytes.len() != BINARY_LEN {
            return Err(invalid(format!(
                "expected {} bytes, got {}",
                BINARY_LEN,
                bytes.len()
            )));
        }

        let board = Board::from_bytes(&bytes[..BOARD_BYTES])
            .ok_or_else(|| invalid("unknown piece code".to_string()))?;
        let halfmove_clock = u32::from(bytes[64]);
        let fullmove_number = u32::from(u16::from_be_bytes([bytes[65], bytes[66]]));
        if fullmove_number == 0 {
            return Err(invalid("fullmove number is 0".to_string()));
        }

        let flags = StateFlags::from_bits(bytes[70])
            .ok_or_else(|| invalid(format!("unknown flag bits {:#04x}", bytes[70])))?;

        let en_passant = match (bytes[67], flags.contains(StateFlags::HAS_EN_PASSANT)) {
            (ABSENT, false) => None,
            (index, true) => Some(
                Square::from_index(index)
                    .ok_or_else(|| invalid(format!("invalid en passant byte {:#04x}", index)))?,
            ),
            (index, false) => {
                return Err(invalid(format!(
                    "en passant byte {:#04x} without its flag",
                    index
                )))
            }
        };

        let mode = if flags.contains(StateFlags::CHESS960) {
            CastlingMode::Chess960
        } else {
            CastlingMode::Standard
        };
        let king_side_rook = decode_file(bytes[68])?;
        let queen_side_rook = decode_file(bytes[69])?;
        if mode == CastlingMode::Standard && (king_side_rook.is_some() || queen_side_rook.is_some())
        {
            return Err(invalid("rook files in a standard position".to_string()));
        }
        let castle_rights = CastleRights::from_parts(
            CastleFlags::from_bits_truncate(flags.bits()),
            mode,
            king_side_rook,
            queen_side_rook,
        );

        let turn = if flags.contains(StateFlags::BLACK_TO_MOVE) {
            Color::Black
        } else {
            Color::White
        };

        Position::new(
            board,
            turn,
            castle_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
        )
    }
}
