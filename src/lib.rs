//! Chess rules and game state.
//!
//! Tracks pieces on an 8x8 board, resolves player move requests into legal
//! or illegal moves, applies them, and reports check, checkmate, stalemate
//! and draws.
//!
//! # Example
//! ```
//! use chess_rules::{GameId, GameSession, GameStatus};
//!
//! let mut session = GameSession::create(GameId::new());
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     session.propose_uci(mv).unwrap();
//! }
//! assert_eq!(session.current_status().winner(), Some(chess_rules::Color::Black));
//! assert!(matches!(session.current_status(), GameStatus::Checkmate { .. }));
//! ```

pub mod board;
pub mod config;
pub mod rules;
pub mod session;
mod zobrist;

pub use board::{Board, Color, GameState, Move, Piece, PieceType, Square};
pub use config::RulesConfig;
pub use rules::{GameStatus, MoveRequest, MoveResult, ProposeError, RuleEngine};
pub use session::{GameId, GameSession, RegistryError, SessionRegistry};
