//! FEN, Shredder-FEN and X-FEN for positions.

use crate::{Board, CastleRights, CastlingMode, Position, PositionError};
use chess_core::{Color, FenParser, Piece};

impl Position {
    /// Parses a standard FEN string.
    ///
    /// # Example
    ///
    /// ```
    /// use chess_rules::Position;
    ///
    /// let position = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
    /// assert_eq!(position.legal_moves().len(), 20);
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        Self::from_fen_with(fen, CastlingMode::Standard)
    }

    /// Parses FEN with the given castling rules.
    ///
    /// In [`CastlingMode::Chess960`] the castling field may be Shredder-FEN
    /// (rook file letters) or X-FEN (`KQkq` for the outermost rook).
    pub fn from_fen_with(fen: &str, mode: CastlingMode) -> Result<Self, PositionError> {
        let result = Self::decode_fen(fen, mode);
        if let Err(err) = &result {
            tracing::debug!(%fen, ?mode, error = %err, "rejected FEN");
        }
        result
    }

    fn decode_fen(fen: &str, mode: CastlingMode) -> Result<Self, PositionError> {
        let fields = FenParser::parse(fen)?;
        let board = Board::from_fen_placement(&fields.piece_placement)?;
        for (letter, color) in [('K', Color::White), ('k', Color::Black)] {
            if board.pieces(Piece::King, color).count() != 1 {
                return Err(PositionError::Illegal(format!(
                    "board must have exactly one '{}'",
                    letter
                )));
            }
        }
        let castle_rights = CastleRights::parse(&fields.castling, mode, &board)?;

        Position::new(
            board,
            fields.active_color,
            castle_rights,
            fields.en_passant,
            fields.halfmove_clock,
            fields.fullmove_number,
        )
    }

    /// Returns the FEN string. Chess960 positions use Shredder-FEN
    /// castling letters.
    pub fn to_fen(&self) -> String {
        let en_passant = self
            .en_passant()
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());
        self.format_fen(&self.castle_rights().to_string(), &en_passant)
    }

    /// Returns the X-FEN string.
    ///
    /// Castling letters fall back to `KQkq` where unambiguous, and the
    /// en-passant square is only written when a pawn of the side to move
    /// stands ready to capture onto it.
    pub fn to_xfen(&self) -> String {
        let board = self.board();
        let us = self.turn();
        let en_passant = self
            .en_passant()
            .filter(|ep| {
                [-1, 1].into_iter().any(|df| {
                    ep.offset(df, -us.pawn_direction())
                        .and_then(|sq| board.piece_at(sq))
                        == Some((Piece::Pawn, us))
                })
            })
            .map_or_else(|| "-".to_string(), |sq| sq.to_algebraic());
        self.format_fen(&self.castle_rights().to_xfen(board), &en_passant)
    }

    fn format_fen(&self, castling: &str, en_passant: &str) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.board(),
            self.turn().to_fen_char(),
            castling,
            en_passant,
            self.halfmove_clock(),
            self.fullmove_number()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use chess_core::FenError;

    #[test]
    fn roundtrip_standard() {
        for fen in [
            Position::STARTPOS_FEN,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 b - - 99 120",
        ] {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn roundtrip_chess960() {
        let fen = "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9";
        let position = Position::from_fen_with(fen, CastlingMode::Chess960).unwrap();
        assert_eq!(position.to_fen(), fen);
        assert_eq!(
            position.to_xfen(),
            "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w KQkq - 2 9"
        );
    }

    #[test]
    fn xfen_input_gives_shredder_output() {
        let xfen = "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w KQkq - 2 9";
        let position = Position::from_fen_with(xfen, CastlingMode::Chess960).unwrap();
        assert!(position.to_fen().contains(" HFhf "));
    }

    #[test]
    fn xfen_hides_uncapturable_en_passant() {
        let position = Position::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
        )
        .unwrap();
        assert!(position.to_fen().contains(" e3 "));
        assert!(position.to_xfen().contains(" KQkq - "));

        let position = Position::from_fen(
            "rnbqkbnr/ppp1pppp/8/8/2Pp4/8/PP1PPPPP/RNBQKBNR b KQkq c3 0 2",
        )
        .unwrap();
        assert!(position.to_xfen().contains(" c3 "));
    }

    #[test]
    fn malformed_fields() {
        for fen in [
            "",
            "8/8/8/8/8/8/8/8 w - - 0",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e4 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w HAha - 0 1",
        ] {
            let err = Position::from_fen(fen).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Malformed, "{}", fen);
        }
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 1 2"),
            Err(PositionError::Fen(FenError::InvalidPartCount(7)))
        ));
    }

    #[test]
    fn illegal_positions() {
        for fen in [
            // No black king
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            // Two white kings
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            // Pawn on the back rank
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1",
            // Castling without the rook
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
            // En passant square for the wrong side
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e3 0 1",
            // En passant without the pushed pawn
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1",
            // Black is in check but white is to move
            "4k3/8/8/8/8/8/8/4RK2 w - - 0 1",
        ] {
            let err = Position::from_fen(fen).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Illegal, "{}", fen);
        }
    }

    #[test]
    fn chess960_needs_explicit_mode() {
        let fen = "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w HFhf - 2 9";
        assert_eq!(
            Position::from_fen(fen).unwrap_err().kind(),
            ErrorKind::Malformed
        );
        // KQkq in standard mode needs the standard home squares
        let xfen = "bqnb1rkr/pp3ppp/3ppn2/2p5/5P2/P2P4/NPP1P1PP/BQ1BNRKR w KQkq - 2 9";
        assert_eq!(
            Position::from_fen(xfen).unwrap_err().kind(),
            ErrorKind::Illegal
        );
    }
}
