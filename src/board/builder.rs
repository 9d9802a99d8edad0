//! Fluent builder for constructing chess positions.
//!
//! Allows creating positions piece by piece rather than parsing FEN strings,
//! e.g. when a host reads the pieces off its own representation.
//!
//! # Example
//! ```
//! use chess_rules::board::{Color, Piece, PieceType, PositionBuilder};
//!
//! let state = PositionBuilder::new()
//!     .piece("e1".parse().unwrap(), Piece::new(Color::White, PieceType::King))
//!     .piece("e8".parse().unwrap(), Piece::new(Color::Black, PieceType::King))
//!     .piece("a2".parse().unwrap(), Piece::new(Color::White, PieceType::Pawn))
//!     .side_to_move(Color::White)
//!     .build();
//! assert_eq!(state.legal_moves().len(), 7);
//! ```

use super::error::FenError;
use super::{Board, CastleSide, CastlingRights, Color, GameState, Piece, PieceType, Square};

/// A fluent builder for constructing `GameState` positions.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    pieces: Vec<(Square, Piece)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty position builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        builder.pieces = Board::starting_position().pieces().collect();
        builder.castling_rights = CastlingRights::all();
        builder
    }

    /// Place a piece, replacing whatever stood on `square`.
    #[must_use]
    pub fn piece(mut self, square: Square, piece: Piece) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self.pieces.push((square, piece));
        self
    }

    /// Place several pieces at once.
    #[must_use]
    pub fn pieces<I>(self, pieces: I) -> Self
    where
        I: IntoIterator<Item = (Square, Piece)>,
    {
        pieces
            .into_iter()
            .fold(self, |builder, (sq, piece)| builder.piece(sq, piece))
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self
    }

    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set castling rights from a `CastlingRights` value.
    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    /// Grant one castling right.
    #[must_use]
    pub fn castle(mut self, color: Color, side: CastleSide) -> Self {
        self.castling_rights.set(color, side);
        self
    }

    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant_target = Some(target);
        self
    }

    /// Set the halfmove clock (for 50-move rule).
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Build the position.
    ///
    /// Applies the same checks as FEN parsing: one king per side, a real en
    /// passant target, and the side not on move out of check.
    pub fn try_build(self) -> Result<GameState, FenError> {
        for color in Color::BOTH {
            let king = Piece::new(color, PieceType::King);
            let found = self.pieces.iter().filter(|(_, p)| *p == king).count();
            if found != 1 {
                return Err(FenError::InvalidKingCount {
                    color: color.to_string(),
                    found,
                });
            }
        }

        let mut board = Board::empty();
        for (square, piece) in self.pieces {
            board.place(square, piece);
        }

        GameState::from_setup(
            board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
            self.halfmove_clock,
            self.fullmove_number,
        )
        .validated()
    }

    /// Build the position.
    ///
    /// # Panics
    /// Panics if the position is rejected by `try_build`.
    #[must_use]
    pub fn build(self) -> GameState {
        self.try_build().expect("invalid position")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn king(color: Color) -> Piece {
        Piece::new(color, PieceType::King)
    }

    #[test]
    fn test_starting_position() {
        let built = PositionBuilder::starting_position().build();
        let standard = GameState::new();
        assert_eq!(built.to_fen(), standard.to_fen());
        assert_eq!(built.hash(), standard.hash());
    }

    #[test]
    fn test_kings_only() {
        let state = PositionBuilder::new()
            .piece(sq("e1"), king(Color::White))
            .piece(sq("e8"), king(Color::Black))
            .build();

        assert!(state.piece_at(sq("e1")).is_some());
        assert!(state.piece_at(sq("e8")).is_some());
        assert!(state.piece_at(sq("a1")).is_none());
        assert!(state.castling_rights().is_empty());
    }

    #[test]
    fn test_castling_rights() {
        let state = PositionBuilder::starting_position()
            .castling(CastlingRights::none())
            .castle(Color::White, CastleSide::King)
            .build();

        let rights = state.castling_rights();
        assert!(rights.has(Color::White, CastleSide::King));
        assert!(!rights.has(Color::White, CastleSide::Queen));
        assert!(!rights.has(Color::Black, CastleSide::King));
        assert!(!rights.has(Color::Black, CastleSide::Queen));
    }

    #[test]
    fn test_side_to_move_and_counters() {
        let state = PositionBuilder::new()
            .pieces([(sq("e1"), king(Color::White)), (sq("e8"), king(Color::Black))])
            .side_to_move(Color::Black)
            .halfmove_clock(12)
            .fullmove_number(30)
            .build();

        assert_eq!(state.side_to_move(), Color::Black);
        assert_eq!(state.to_fen(), "4k3/8/8/8/8/8/8/4K3 b - - 12 30");
    }

    #[test]
    fn test_clear_square() {
        let state = PositionBuilder::starting_position().clear(sq("a1")).build();

        assert!(state.piece_at(sq("a1")).is_none());
        assert!(state.piece_at(sq("b1")).is_some());
    }

    #[test]
    fn test_try_build_rejects_missing_or_extra_king() {
        let missing = PositionBuilder::new()
            .piece(sq("e1"), king(Color::White))
            .try_build();
        assert!(matches!(
            missing,
            Err(FenError::InvalidKingCount { found: 0, .. })
        ));

        let extra = PositionBuilder::starting_position()
            .piece(sq("d4"), king(Color::White))
            .try_build();
        assert!(matches!(extra, Err(FenError::InvalidKingCount { found: 2, .. })));
    }

    fn pawn(color: Color) -> Piece {
        Piece::new(color, PieceType::Pawn)
    }

    #[test]
    fn test_en_passant_target_on_wrong_rank() {
        let result = PositionBuilder::new()
            .piece(sq("e1"), king(Color::White))
            .piece(sq("e8"), king(Color::Black))
            .piece(sq("d2"), pawn(Color::White))
            .piece(sq("e2"), pawn(Color::Black))
            .en_passant(sq("e3"))
            .try_build();
        assert_eq!(
            result.unwrap_err(),
            FenError::InvalidEnPassant {
                found: "e3".to_string()
            }
        );
    }

    #[test]
    fn test_en_passant_target_after_double_push() {
        let state = PositionBuilder::new()
            .piece(sq("e1"), king(Color::White))
            .piece(sq("e8"), king(Color::Black))
            .piece(sq("e5"), pawn(Color::White))
            .piece(sq("d5"), pawn(Color::Black))
            .en_passant(sq("d6"))
            .try_build()
            .unwrap();

        let captures: Vec<_> = state
            .legal_moves_from(sq("e5"))
            .into_iter()
            .filter(|mv| mv.is_en_passant)
            .collect();
        assert_eq!(captures.len(), 1);
        assert_eq!(captures[0].to, sq("d6"));

        let missing_pawn = PositionBuilder::new()
            .piece(sq("e1"), king(Color::White))
            .piece(sq("e8"), king(Color::Black))
            .en_passant(sq("d6"))
            .try_build();
        assert!(matches!(
            missing_pawn,
            Err(FenError::InvalidEnPassant { .. })
        ));
    }

    #[test]
    fn test_try_build_rejects_waiting_side_in_check() {
        let builder = PositionBuilder::new()
            .piece(sq("e1"), king(Color::White))
            .piece(sq("e8"), king(Color::Black))
            .piece(sq("h1"), Piece::new(Color::Black, PieceType::Rook));

        assert!(matches!(
            builder.clone().side_to_move(Color::Black).try_build(),
            Err(FenError::OpponentInCheck { .. })
        ));
        let state = builder.side_to_move(Color::White).try_build().unwrap();
        assert!(state.in_check());
        assert!(state
            .legal_moves()
            .iter()
            .all(|mv| mv.captured.map(|p| p.kind) != Some(PieceType::King)));
    }
}
