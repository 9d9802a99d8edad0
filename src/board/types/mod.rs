//! Core chess types.
//!
//! This module contains the fundamental value types used throughout the crate:
//! - `PieceType`, `Color` and `Piece` - chess pieces and the two sides
//! - `Square` - one of the 64 board squares
//! - `Move` - a classified move
//! - `CastlingRights` and `CastleSide` - castling state

mod castling;
mod moves;
mod piece;
mod square;

pub use castling::{CastleSide, CastlingRights};
pub use moves::Move;
pub use piece::{Color, Piece, PieceType};
pub use square::Square;

pub(crate) use piece::PROMOTION_PIECES;
