//! Move validation and position classification.
//!
//! [`RuleEngine`] sits between a move request and [`GameState::apply_move`]:
//! it refuses anything not in the legal move list, applies what remains, and
//! classifies the resulting position.

mod error;
mod status;

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::{GameState, Move, MoveParseError, Piece, PieceType, Square};
use crate::config::RulesConfig;

pub use error::{IllegalMove, IllegalMoveReason, ProposeError};
pub use status::{DrawReason, GameStatus};

/// A move as a player states it: origin, destination and an optional
/// promotion piece. Resolved against the legal moves before it is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl MoveRequest {
    #[must_use]
    pub const fn new(from: Square, to: Square, promotion: Option<PieceType>) -> Self {
        MoveRequest {
            from,
            to,
            promotion,
        }
    }

    fn refuse(&self, reason: IllegalMoveReason) -> IllegalMove {
        IllegalMove {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
            reason,
        }
    }
}

impl From<Move> for MoveRequest {
    fn from(mv: Move) -> Self {
        MoveRequest::new(mv.from, mv.to, mv.promotion)
    }
}

/// Long algebraic notation, e.g. `e2e4` or `e7e8q`.
impl FromStr for MoveRequest {
    type Err = MoveParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let len = text.chars().count();
        if !(4..=5).contains(&len) {
            return Err(MoveParseError::InvalidLength { len });
        }

        let invalid_square = || MoveParseError::InvalidSquare {
            notation: text.to_string(),
        };
        let from = text
            .get(0..2)
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid_square)?;
        let to = text
            .get(2..4)
            .and_then(|s| s.parse().ok())
            .ok_or_else(invalid_square)?;

        let promotion = match text.chars().nth(4) {
            None => None,
            Some(c) => {
                let kind = PieceType::from_char(c)
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or(MoveParseError::InvalidPromotion { char: c })?;
                Some(kind)
            }
        };

        Ok(MoveRequest::new(from, to, promotion))
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// Outcome of an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveResult {
    pub accepted: bool,
    pub mv: Move,
    pub captured_piece: Option<Piece>,
    /// Status of the position after the move, from the opponent's side
    pub status: GameStatus,
}

/// Stateless rule checks, parameterised by the draw thresholds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleEngine {
    config: RulesConfig,
}

impl RuleEngine {
    #[must_use]
    pub const fn new(config: RulesConfig) -> Self {
        RuleEngine { config }
    }

    #[must_use]
    pub const fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Classify the position for the side to move.
    ///
    /// Mate and stalemate take precedence over the draw rules, which are
    /// checked in the order fifty-move, repetition, insufficient material.
    #[must_use]
    pub fn classify(&self, state: &GameState) -> GameStatus {
        let check = state.in_check();
        if !state.has_legal_move() {
            return if check {
                GameStatus::Checkmate {
                    winner: state.side_to_move().opponent(),
                }
            } else {
                GameStatus::Stalemate
            };
        }

        let limit = self.config.fifty_move_limit;
        if limit > 0 && state.halfmove_clock() >= limit {
            return GameStatus::Draw(DrawReason::FiftyMove);
        }

        let limit = self.config.repetition_limit;
        if limit > 0 && state.repetition_count() >= limit {
            return GameStatus::Draw(DrawReason::Repetition);
        }

        if self.config.insufficient_material && state.board().is_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }

        GameStatus::InProgress { check }
    }

    /// Find the legal move that carries out `request`, or say why there is none.
    pub fn resolve(&self, state: &GameState, request: MoveRequest) -> Result<Move, IllegalMove> {
        let piece = state
            .piece_at(request.from)
            .ok_or_else(|| request.refuse(IllegalMoveReason::EmptySquare))?;
        if piece.color != state.side_to_move() {
            return Err(request.refuse(IllegalMoveReason::NotYourPiece));
        }
        if request
            .promotion
            .is_some_and(|kind| !kind.is_promotion_target())
        {
            return Err(request.refuse(IllegalMoveReason::InvalidPromotionPiece));
        }

        let candidates: Vec<Move> = state
            .pseudo_legal_moves(request.from)
            .into_iter()
            .filter(|mv| mv.to == request.to)
            .collect();
        if candidates.is_empty() {
            return Err(request.refuse(IllegalMoveReason::NotAPieceMove));
        }

        let promotes = candidates.iter().any(Move::is_promotion);
        let mv = match (promotes, request.promotion) {
            (true, None) => return Err(request.refuse(IllegalMoveReason::PromotionRequired)),
            (false, Some(_)) => {
                return Err(request.refuse(IllegalMoveReason::UnexpectedPromotion))
            }
            (_, promotion) => candidates
                .into_iter()
                .find(|mv| mv.promotion == promotion)
                .ok_or_else(|| request.refuse(IllegalMoveReason::InvalidPromotionPiece))?,
        };

        if mv.is_castle && !state.castling_path_is_safe(&mv) {
            return Err(request.refuse(IllegalMoveReason::CastlesThroughCheck));
        }
        if !state.is_legal(&mv) {
            return Err(request.refuse(IllegalMoveReason::LeavesKingInCheck));
        }
        Ok(mv)
    }

    /// Validate, apply and classify one move.
    ///
    /// Refused requests leave `state` untouched.
    pub fn propose_move(
        &self,
        state: &mut GameState,
        request: MoveRequest,
    ) -> Result<MoveResult, ProposeError> {
        let status = self.classify(state);
        if status.is_terminal() {
            return Err(ProposeError::GameOver { status });
        }

        let mv = self.resolve(state, request)?;
        state.apply_move(mv);

        Ok(MoveResult {
            accepted: true,
            mv,
            captured_piece: mv.captured,
            status: self.classify(state),
        })
    }
}
