//! UCI long-form coordinates: `e2e4`, `e7e8q`.

use super::{invalid_format, resolve, sanitize, Notation};
use crate::{NotationError, Position};
use chess_core::Move;
use serde::{Deserialize, Serialize};

/// Origin square, destination square and an optional lowercase promotion
/// letter, as spoken by UCI engines.
///
/// Chess960 castles are written king-onto-rook (`b1a1`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UciNotation;

impl Notation for UciNotation {
    fn name(&self) -> &'static str {
        "UCI"
    }

    fn encode(&self, _position: &Position, m: &Move) -> String {
        m.to_uci()
    }

    fn decode(&self, position: &Position, text: &str) -> Result<Move, NotationError> {
        let text = sanitize(text);
        let parsed = Move::from_uci(&text).ok_or_else(|| invalid_format(self, &text))?;

        resolve(self, position, &text, |m| {
            m.from() == parsed.from() && m.to() == parsed.to() && m.promotion() == parsed.promotion()
        })
    }
}
