use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use parking_lot::{Mutex, RwLock};

use crate::board::{PieceType, Square};
use crate::config::RulesConfig;
use crate::rules::{MoveResult, ProposeError};

use super::{GameId, GameSession};

/// A session shared between threads; moves on it are serialized by the lock.
pub type SharedSession = Arc<Mutex<GameSession>>;

/// Error type for registry operations
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// No live session has this id
    UnknownGame(GameId),
    /// A session with this id already exists
    DuplicateGame(GameId),
    /// The session refused the move
    Move(ProposeError),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::UnknownGame(id) => write!(f, "Unknown game {id}"),
            RegistryError::DuplicateGame(id) => write!(f, "Game {id} already exists"),
            RegistryError::Move(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Move(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ProposeError> for RegistryError {
    fn from(err: ProposeError) -> Self {
        RegistryError::Move(err)
    }
}

/// Live games keyed by id.
///
/// Lookups hold the map's read lock only long enough to clone the session
/// handle, so moves in different games run in parallel.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<GameId, SharedSession>>,
    config: RulesConfig,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every session created by this registry uses `config`.
    #[must_use]
    pub fn with_config(config: RulesConfig) -> Self {
        SessionRegistry {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Start a standard game under `id`.
    pub fn create(&self, id: GameId) -> Result<SharedSession, RegistryError> {
        self.insert(GameSession::with_config(id, self.config))
    }

    /// Start a standard game under a fresh random id.
    pub fn create_random(&self) -> (GameId, SharedSession) {
        loop {
            let id = GameId::new();
            if let Ok(session) = self.create(id) {
                return (id, session);
            }
        }
    }

    /// Register an already built session, e.g. one from a custom position.
    pub fn insert(&self, session: GameSession) -> Result<SharedSession, RegistryError> {
        let id = session.id();
        let mut sessions = self.sessions.write();
        if sessions.contains_key(&id) {
            return Err(RegistryError::DuplicateGame(id));
        }
        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&shared));
        debug!("registry: added game {id} ({} live)", sessions.len());
        Ok(shared)
    }

    #[must_use]
    pub fn get(&self, id: GameId) -> Option<SharedSession> {
        self.sessions.read().get(&id).cloned()
    }

    /// Drop a game from the registry. Handles already given out stay usable.
    pub fn remove(&self, id: GameId) -> Option<SharedSession> {
        let removed = self.sessions.write().remove(&id);
        if removed.is_some() {
            debug!("registry: removed game {id}");
        }
        removed
    }

    /// Run `f` with exclusive access to one session.
    pub fn with_session<T>(
        &self,
        id: GameId,
        f: impl FnOnce(&mut GameSession) -> T,
    ) -> Result<T, RegistryError> {
        let session = self.get(id).ok_or(RegistryError::UnknownGame(id))?;
        let mut guard = session.lock();
        Ok(f(&mut *guard))
    }

    pub fn propose_move(
        &self,
        id: GameId,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveResult, RegistryError> {
        let result = self.with_session(id, |session| session.propose_move(from, to, promotion))??;
        Ok(result)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    /// Ids of all live games, in no particular order.
    #[must_use]
    pub fn ids(&self) -> Vec<GameId> {
        self.sessions.read().keys().copied().collect()
    }
}
