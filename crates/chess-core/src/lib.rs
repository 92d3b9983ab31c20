//! Core types for chess.
//!
//! This crate provides the value types shared by the rules engine and its
//! callers:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] and [`MoveTags`] for move representation
//! - [`FenParser`] for syntactic FEN field parsing

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, MoveTags};
pub use piece::Piece;
pub use square::{File, Rank, Square};
