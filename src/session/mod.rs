//! Per-game sessions and the registry that holds them.
//!
//! A [`GameSession`] owns one [`GameState`] and is the only way a host
//! changes it. Sessions are created and looked up by [`GameId`] through a
//! [`SessionRegistry`].

mod id;
mod registry;

use std::collections::BTreeSet;

use log::{debug, info};

use crate::board::{Color, GameState, HistoryEntry, Piece, PieceType, Square};
use crate::config::RulesConfig;
use crate::rules::{
    GameStatus, IllegalMove, IllegalMoveReason, MoveRequest, MoveResult, ProposeError, RuleEngine,
};

pub use id::GameId;
pub use registry::{RegistryError, SessionRegistry, SharedSession};

/// One game: its position, rules and current status.
#[derive(Clone, Debug)]
pub struct GameSession {
    id: GameId,
    state: GameState,
    engine: RuleEngine,
    status: GameStatus,
}

impl GameSession {
    /// Start a standard game with default rules, White to move.
    #[must_use]
    pub fn create(id: GameId) -> Self {
        Self::with_config(id, RulesConfig::default())
    }

    #[must_use]
    pub fn with_config(id: GameId, config: RulesConfig) -> Self {
        Self::from_state(id, GameState::new(), config)
    }

    /// Start from an arbitrary position, e.g. one read from FEN or built
    /// with [`crate::board::PositionBuilder`].
    #[must_use]
    pub fn from_state(id: GameId, state: GameState, config: RulesConfig) -> Self {
        let engine = RuleEngine::new(config);
        let status = engine.classify(&state);
        debug!("game {id}: created at {} ({status})", state.to_fen());
        GameSession {
            id,
            state,
            engine,
            status,
        }
    }

    /// Propose a move for whichever side is to move.
    pub fn propose_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveResult, ProposeError> {
        self.propose(MoveRequest::new(from, to, promotion))
    }

    /// Propose a move on behalf of `player`, refusing it if they are not on move.
    pub fn propose_move_as(
        &mut self,
        player: Color,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveResult, ProposeError> {
        let request = MoveRequest::new(from, to, promotion);
        if !self.status.is_terminal() && player != self.state.side_to_move() {
            let err = ProposeError::IllegalMove(IllegalMove {
                from,
                to,
                promotion,
                reason: IllegalMoveReason::NotYourTurn,
            });
            debug!("game {}: {player} rejected {request}: {err}", self.id);
            return Err(err);
        }
        self.propose(request)
    }

    /// Propose a move in long algebraic notation, e.g. `e2e4` or `e7e8q`.
    pub fn propose_uci(&mut self, text: &str) -> Result<MoveResult, ProposeError> {
        let request = text.parse::<MoveRequest>().map_err(|err| {
            debug!("game {}: unparsable move {text:?}: {err}", self.id);
            ProposeError::from(err)
        })?;
        self.propose(request)
    }

    /// Run one request through the rule engine and record the new status.
    pub fn propose(&mut self, request: MoveRequest) -> Result<MoveResult, ProposeError> {
        if self.status.is_terminal() {
            debug!("game {}: rejected {request}, game is over", self.id);
            return Err(ProposeError::GameOver {
                status: self.status,
            });
        }

        match self.engine.propose_move(&mut self.state, request) {
            Ok(result) => {
                self.status = result.status;
                debug!("game {}: played {} ({})", self.id, result.mv, result.status);
                if result.status.is_terminal() {
                    info!("game {} finished: {}", self.id, result.status);
                }
                Ok(result)
            }
            Err(err) => {
                debug!("game {}: rejected {request}: {err}", self.id);
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn current_status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.state.piece_at(square)
    }

    /// Where the piece on `square` may move; empty for the side not to move
    /// or once the game is over.
    #[must_use]
    pub fn legal_destinations(&self, square: Square) -> BTreeSet<Square> {
        if self.status.is_terminal() {
            return BTreeSet::new();
        }
        self.state.legal_destinations(square)
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move()
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn id(&self) -> GameId {
        self.id
    }

    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        self.state.history()
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        self.engine.config()
    }
}
