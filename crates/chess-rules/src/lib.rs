//! Chess rules: legal moves, immutable positions and their encodings.
//!
//! This crate provides:
//! - [`Position`] - Complete game state with a lazily cached legal-move list
//! - [`Board`] - Piece placement with attack detection and move application
//! - [`CastleRights`] - Castling permissions for standard chess and Chess960
//! - FEN, Shredder-FEN, X-FEN and a 71-byte binary encoding
//! - [`notation`] - UCI, SAN and long algebraic move text
//! - [`movegen::perft`] - Leaf-node counting for move generator validation
//!
//! # Example
//!
//! ```
//! use chess_rules::notation::{AlgebraicNotation, Notation};
//! use chess_rules::{Position, Status};
//!
//! let mut position = Position::startpos();
//! for san in ["f3", "e5", "g4", "Qh4#"] {
//!     let m = AlgebraicNotation.decode(&position, san).unwrap();
//!     position = position.update(&m);
//! }
//! assert_eq!(position.status(), Status::Checkmate);
//! assert_eq!(
//!     position.to_fen(),
//!     "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"
//! );
//! ```

mod binary;
mod bitboard;
mod board;
mod castle;
mod error;
mod fen;
pub mod movegen;
pub mod notation;
mod position;

pub use binary::BINARY_LEN;
pub use bitboard::{Bitboard, BitboardIter};
pub use board::{Board, BOARD_BYTES};
pub use castle::{CastleFlags, CastleRights, CastleSide, CastlingMode};
pub use error::{ErrorKind, NotationError, PositionError};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{legal_moves, status, Status};
pub use position::Position;
