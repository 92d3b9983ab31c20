//! Standard Algebraic Notation (SAN) and its long form.
//!
//! SAN examples: `e4`, `Nf3`, `Bxc6`, `O-O`, `e8=Q`, `Nbd2`, `R1e1`, `Qh4#`.
//! Long algebraic always names the origin square: `e2e4`, `Ng1f3`, `e4xd5`.

use super::{invalid_format, resolve, sanitize, Notation};
use crate::{CastleSide, NotationError, Position, Status};
use chess_core::{Move, MoveTags, Piece, Square};
use serde::{Deserialize, Serialize};

/// Standard Algebraic Notation as used in PGN.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlgebraicNotation;

/// Algebraic notation with the full origin square on every piece move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LongAlgebraicNotation;

impl Notation for AlgebraicNotation {
    fn name(&self) -> &'static str {
        "SAN"
    }

    fn encode(&self, position: &Position, m: &Move) -> String {
        write_move(position, m, false)
    }

    /// Accepts `0-0`/`0-0-0` for castling, an `e.p.` suffix and annotation
    /// glyphs. A check or mate suffix may be omitted.
    fn decode(&self, position: &Position, text: &str) -> Result<Move, NotationError> {
        let (cleaned, target) = parse(text, false).ok_or_else(|| invalid_format(self, text))?;
        resolve(self, position, &cleaned, |m| target.admits(m))
    }
}

impl Notation for LongAlgebraicNotation {
    fn name(&self) -> &'static str {
        "long algebraic"
    }

    fn encode(&self, position: &Position, m: &Move) -> String {
        write_move(position, m, true)
    }

    fn decode(&self, position: &Position, text: &str) -> Result<Move, NotationError> {
        let (cleaned, target) = parse(text, true).ok_or_else(|| invalid_format(self, text))?;
        resolve(self, position, &cleaned, |m| target.admits(m))
    }
}

/// What a grammatical piece of move text points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Castle(CastleSide),
    Square(Square),
}

impl Target {
    fn admits(self, m: &Move) -> bool {
        match self {
            Target::Castle(CastleSide::King) => m.has_tag(MoveTags::KING_SIDE_CASTLE),
            Target::Castle(CastleSide::Queen) => m.has_tag(MoveTags::QUEEN_SIDE_CASTLE),
            Target::Square(to) => !m.is_castle() && m.to() == to,
        }
    }
}

/// Normalizes move text and checks it against the algebraic grammar.
///
/// Returns the text to compare with encoded moves, check suffix included.
fn parse(text: &str, full_origin: bool) -> Option<(String, Target)> {
    let mut cleaned = sanitize(text).replace("e.p.", "");
    if cleaned.starts_with("0-0") {
        cleaned = cleaned.replace('0', "O");
    }

    let body = cleaned.trim_end_matches(['+', '#']);
    let target = match body {
        "O-O" => Target::Castle(CastleSide::King),
        "O-O-O" => Target::Castle(CastleSide::Queen),
        _ => Target::Square(parse_piece_move(body, full_origin)?),
    };
    Some((cleaned, target))
}

/// `[KQRBNP]? file? rank? x? square (=[QRBN])?`, returning the destination.
fn parse_piece_move(body: &str, full_origin: bool) -> Option<Square> {
    if !body.is_ascii() {
        return None;
    }
    let mut rest = body.strip_prefix(['K', 'Q', 'R', 'B', 'N', 'P']).unwrap_or(body);

    if let Some((head, promotion)) = rest.split_once('=') {
        if !matches!(promotion, "Q" | "R" | "B" | "N") {
            return None;
        }
        rest = head;
    }

    let split = rest.len().checked_sub(2)?;
    let (origin, destination) = rest.split_at(split);
    let to = Square::from_algebraic(destination)?;

    let origin = origin.strip_suffix('x').unwrap_or(origin);
    let mut chars = origin.chars().peekable();
    let has_file = chars.next_if(|&c| matches!(c, 'a'..='h')).is_some();
    let has_rank = chars.next_if(|&c| matches!(c, '1'..='8')).is_some();
    if chars.next().is_some() || (full_origin && !(has_file && has_rank)) {
        return None;
    }
    Some(to)
}

fn write_move(position: &Position, m: &Move, long: bool) -> String {
    let mut out = String::new();

    if m.has_tag(MoveTags::KING_SIDE_CASTLE) {
        out.push_str("O-O");
    } else if m.has_tag(MoveTags::QUEEN_SIDE_CASTLE) {
        out.push_str("O-O-O");
    } else {
        let piece = position.board().piece_at(m.from()).map(|(piece, _)| piece);
        let is_pawn = piece == Some(Piece::Pawn);

        if let Some(letter) = piece.and_then(Piece::san_char) {
            out.push(letter);
        }
        if long {
            out.push_str(&m.from().to_algebraic());
        } else if !is_pawn {
            out.push_str(&disambiguation(position, m));
        }
        if m.is_capture() || m.has_tag(MoveTags::EN_PASSANT) {
            if is_pawn && !long {
                out.push(m.from().file().to_char());
            }
            out.push('x');
        }
        out.push_str(&m.to().to_algebraic());
        if let Some(letter) = m.promotion().and_then(Piece::san_char) {
            out.push('=');
            out.push(letter);
        }
    }

    out.push_str(check_suffix(position, m));
    out
}

/// Origin file and/or rank needed to tell `m` apart from other legal moves
/// of the same piece to the same square.
fn disambiguation(position: &Position, m: &Move) -> String {
    let board = position.board();
    let mover = board.piece_at(m.from());

    let mut needed = false;
    let mut file_needed = false;
    let mut rank_needed = false;
    for other in position.legal_moves() {
        if other.from() != m.from() && other.to() == m.to() && board.piece_at(other.from()) == mover
        {
            needed = true;
            rank_needed |= other.from().file() == m.from().file();
            file_needed |= other.from().rank() == m.from().rank();
        }
    }

    let mut out = String::new();
    if file_needed || (needed && !rank_needed) {
        out.push(m.from().file().to_char());
    }
    if rank_needed {
        out.push(m.from().rank().to_char());
    }
    out
}

fn check_suffix(position: &Position, m: &Move) -> &'static str {
    if !m.has_tag(MoveTags::CHECK) {
        return "";
    }
    match position.update(m).status() {
        Status::Checkmate => "#",
        _ => "+",
    }
}
