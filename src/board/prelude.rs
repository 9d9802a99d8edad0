//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! # Example
//! ```
//! use chess_rules::board::prelude::*;
//!
//! let state = GameState::new();
//! assert_eq!(state.side_to_move(), Color::White);
//! ```

pub use super::{
    Board, CastleSide, CastlingRights, Color, FenError, GameState, Move, MoveParseError, Piece,
    PieceType, PositionBuilder, Square, SquareError,
};
pub use crate::rules::{GameStatus, MoveRequest, MoveResult};
pub use crate::session::{GameId, GameSession};
