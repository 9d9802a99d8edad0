//! Errors returned when a proposed move is refused.

use std::fmt;

use crate::board::{MoveParseError, PieceType, Square};

use super::GameStatus;

/// Why a requested move was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IllegalMoveReason {
    /// No piece on the origin square
    EmptySquare,
    /// The piece on the origin square belongs to the side not to move
    NotYourPiece,
    /// The caller is not the side to move
    NotYourTurn,
    /// A pawn reaching the last rank needs a promotion piece
    PromotionRequired,
    /// A promotion piece was given for a move that does not promote
    UnexpectedPromotion,
    /// Pawns promote only to knight, bishop, rook or queen
    InvalidPromotionPiece,
    /// The move would leave the mover's own king attacked
    LeavesKingInCheck,
    /// The king is in check or would cross an attacked square
    CastlesThroughCheck,
    /// The piece cannot reach the destination
    NotAPieceMove,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalMoveReason::EmptySquare => "no piece on the origin square",
            IllegalMoveReason::NotYourPiece => "piece belongs to the opponent",
            IllegalMoveReason::NotYourTurn => "not your turn",
            IllegalMoveReason::PromotionRequired => "promotion piece required",
            IllegalMoveReason::UnexpectedPromotion => "move does not promote",
            IllegalMoveReason::InvalidPromotionPiece => "cannot promote to that piece",
            IllegalMoveReason::LeavesKingInCheck => "king would be left in check",
            IllegalMoveReason::CastlesThroughCheck => "cannot castle out of or through check",
            IllegalMoveReason::NotAPieceMove => "piece cannot move there",
        };
        f.write_str(text)
    }
}

/// A refused move request. The game state is left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IllegalMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    pub reason: IllegalMoveReason,
}

impl fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Illegal move {}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        write!(f, ": {}", self.reason)
    }
}

impl std::error::Error for IllegalMove {}

/// Error type for [`super::RuleEngine::propose_move`] and the session API
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProposeError {
    /// The move is not legal in the current position
    IllegalMove(IllegalMove),
    /// The game has already ended
    GameOver { status: GameStatus },
    /// The move text could not be parsed
    Parse(MoveParseError),
}

impl ProposeError {
    /// The refusal reason, if the move itself was illegal.
    #[must_use]
    pub fn illegal_reason(&self) -> Option<IllegalMoveReason> {
        match self {
            ProposeError::IllegalMove(illegal) => Some(illegal.reason),
            _ => None,
        }
    }
}

impl fmt::Display for ProposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposeError::IllegalMove(illegal) => write!(f, "{illegal}"),
            ProposeError::GameOver { status } => write!(f, "Game is over ({status})"),
            ProposeError::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ProposeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProposeError::IllegalMove(illegal) => Some(illegal),
            ProposeError::Parse(err) => Some(err),
            ProposeError::GameOver { .. } => None,
        }
    }
}

impl From<IllegalMove> for ProposeError {
    fn from(err: IllegalMove) -> Self {
        ProposeError::IllegalMove(err)
    }
}

impl From<MoveParseError> for ProposeError {
    fn from(err: MoveParseError) -> Self {
        ProposeError::Parse(err)
    }
}
