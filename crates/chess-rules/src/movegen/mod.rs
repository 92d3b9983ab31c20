//! Legal move generation.
//!
//! Candidates are produced per piece kind from the attack tables, then each
//! one is applied to a copy of the board and dropped if it leaves the
//! mover's king attacked. Survivors are tagged with `CHECK` when they attack
//! the opponent's king.

mod attacks;
pub mod perft;

use crate::{Bitboard, CastleSide, Position};
use chess_core::{Color, Move, MoveTags, Piece, Square};
use serde::{Deserialize, Serialize};

pub use attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks,
};

/// The state of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Not in check, with legal moves available.
    InProgress,
    /// In check, with legal moves available.
    Check,
    /// In check with no legal moves.
    Checkmate,
    /// Not in check with no legal moves.
    Stalemate,
}

impl Status {
    /// Returns true for checkmate and stalemate.
    pub fn is_game_over(self) -> bool {
        matches!(self, Status::Checkmate | Status::Stalemate)
    }
}

/// Generates all legal moves for the side to move.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let board = position.board();
    let us = position.turn();
    let them = us.opposite();

    let mut candidates = Vec::with_capacity(64);
    generate_pawn_moves(position, &mut candidates);
    generate_piece_moves(position, &mut candidates);
    generate_castling_moves(position, &mut candidates);

    let moves: Vec<Move> = candidates
        .into_iter()
        .filter_map(|m| {
            let after = board.apply(&m);
            if after.is_king_attacked(us) {
                None
            } else if after.is_king_attacked(them) {
                Some(m.with_tags(MoveTags::CHECK))
            } else {
                Some(m)
            }
        })
        .collect();

    tracing::trace!(count = moves.len(), "generated legal moves");
    moves
}

/// Classifies the side to move from its check flag and legal moves.
pub fn status(position: &Position) -> Status {
    match (position.in_check(), position.legal_moves().is_empty()) {
        (true, true) => Status::Checkmate,
        (false, true) => Status::Stalemate,
        (true, false) => Status::Check,
        (false, false) => Status::InProgress,
    }
}

fn push_pawn_move(from: Square, to: Square, tags: MoveTags, us: Color, moves: &mut Vec<Move>) {
    if to.rank() == us.promotion_rank() {
        for piece in Piece::PROMOTIONS {
            moves.push(Move::new(from, to, Some(piece)).with_tags(tags));
        }
    } else {
        moves.push(Move::normal(from, to).with_tags(tags));
    }
}

/// Pushes, double pushes, captures, promotions and en passant.
fn generate_pawn_moves(position: &Position, moves: &mut Vec<Move>) {
    let board = position.board();
    let us = position.turn();
    let them = us.opposite();
    let direction = us.pawn_direction();
    let enemies = board.pieces_of_color(them);

    for from in board.pieces(Piece::Pawn, us) {
        if let Some(one) = from.offset(0, direction) {
            if board.piece_at(one).is_none() {
                push_pawn_move(from, one, MoveTags::empty(), us, moves);
                if from.rank() == us.pawn_rank() {
                    if let Some(two) = one.offset(0, direction) {
                        if board.piece_at(two).is_none() {
                            moves.push(Move::normal(from, two));
                        }
                    }
                }
            }
        }

        for to in pawn_attacks(from, us) {
            if enemies.contains(to) {
                push_pawn_move(from, to, MoveTags::CAPTURE, us, moves);
            } else if position.en_passant() == Some(to)
                && board.piece_at(to.with_rank(from.rank())) == Some((Piece::Pawn, them))
            {
                moves.push(
                    Move::normal(from, to).with_tags(MoveTags::CAPTURE | MoveTags::EN_PASSANT),
                );
            }
        }
    }
}

/// Knight, bishop, rook, queen and plain king moves.
fn generate_piece_moves(position: &Position, moves: &mut Vec<Move>) {
    let board = position.board();
    let us = position.turn();
    let own = board.pieces_of_color(us);
    let enemies = board.pieces_of_color(us.opposite());
    let occupied = board.occupied();

    for piece in [
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ] {
        for from in board.pieces(piece, us) {
            let targets = match piece {
                Piece::Knight => knight_attacks(from),
                Piece::Bishop => bishop_attacks(from, occupied),
                Piece::Rook => rook_attacks(from, occupied),
                Piece::Queen => queen_attacks(from, occupied),
                Piece::King => king_attacks(from),
                Piece::Pawn => Bitboard::EMPTY,
            };
            for to in targets & !own {
                let tags = if enemies.contains(to) {
                    MoveTags::CAPTURE
                } else {
                    MoveTags::empty()
                };
                moves.push(Move::normal(from, to).with_tags(tags));
            }
        }
    }
}

/// Squares on the rank from `a` to `b`, both included.
fn rank_span(a: Square, b: Square) -> Bitboard {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    (low.index()..=high.index())
        .filter_map(Square::from_index)
        .collect()
}

/// Castling in both standard chess and Chess960.
///
/// Standard castles are encoded as the king's two-square step; Chess960
/// castles as the king moving onto its own rook.
fn generate_castling_moves(position: &Position, moves: &mut Vec<Move>) {
    let board = position.board();
    let rights = position.castle_rights();
    let us = position.turn();
    let them = us.opposite();
    let rank = us.back_rank();

    let Some(king) = board.king_square(us) else {
        return;
    };
    if king.rank() != rank {
        return;
    }

    for side in CastleSide::ALL {
        if !rights.can_castle(us, side) {
            continue;
        }
        let Some(rook) = rights.rook_square(us, side) else {
            continue;
        };
        if board.piece_at(rook) != Some((Piece::Rook, us)) {
            continue;
        }

        let king_to = Square::new(side.king_target(), rank);
        let rook_to = Square::new(side.rook_target(), rank);
        let king_path = rank_span(king, king_to);

        let mut must_be_empty = king_path | rank_span(rook, rook_to);
        must_be_empty.clear(king);
        must_be_empty.clear(rook);
        if (must_be_empty & board.occupied()).is_not_empty() {
            continue;
        }
        if king_path.into_iter().any(|sq| board.is_attacked(sq, them)) {
            continue;
        }

        let to = if rights.is_chess960() { rook } else { king_to };
        let tag = match side {
            CastleSide::King => MoveTags::KING_SIDE_CASTLE,
            CastleSide::Queen => MoveTags::QUEEN_SIDE_CASTLE,
        };
        moves.push(Move::normal(king, to).with_tags(tag));
    }
}
