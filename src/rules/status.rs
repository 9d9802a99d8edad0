use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Color;

/// Why a game ended without a winner (other than stalemate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawReason {
    FiftyMove,
    Repetition,
    InsufficientMaterial,
}

/// Classification of a position for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    InProgress { check: bool },
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    /// No further moves are accepted once the game is over.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }

    #[must_use]
    pub const fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Checkmate { winner } => Some(*winner),
            _ => None,
        }
    }

    /// Is the side to move in check? True for checkmate as well.
    #[must_use]
    pub const fn is_check(&self) -> bool {
        matches!(
            self,
            GameStatus::InProgress { check: true } | GameStatus::Checkmate { .. }
        )
    }

    #[must_use]
    pub const fn is_draw(&self) -> bool {
        matches!(self, GameStatus::Stalemate | GameStatus::Draw(_))
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::InProgress { check: false }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::FiftyMove => write!(f, "fifty-move rule"),
            DrawReason::Repetition => write!(f, "repetition"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress { check: false } => write!(f, "in progress"),
            GameStatus::InProgress { check: true } => write!(f, "check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::Draw(reason) => write!(f, "draw by {reason}"),
        }
    }
}
