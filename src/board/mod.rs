//! Chess board representation and game logic.
//!
//! A mailbox board with full move rules: castling, en passant and
//! promotion, make/undo with history, and Zobrist keys for repetition.
//!
//! # Example
//! ```
//! use chess_rules::board::GameState;
//!
//! let state = GameState::new();
//! let moves = state.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod attacks;
mod builder;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod placement;
pub mod prelude;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{FenError, MoveParseError, SquareError};
pub use placement::Board;
pub use state::{GameState, HistoryEntry};
pub use types::{CastleSide, CastlingRights, Color, Move, Piece, PieceType, Square};

pub(crate) use types::PROMOTION_PIECES;
