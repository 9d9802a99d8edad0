use std::collections::HashMap;

use crate::zobrist::ZOBRIST;

use super::{Board, CastlingRights, Color, Move, Piece, Square};

/// Everything needed to take back one applied move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub mv: Move,
    /// The piece that moved, as it stood on the origin square
    pub moved: Piece,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_castling_rights: CastlingRights,
    pub(crate) previous_halfmove_clock: u32,
    pub(crate) previous_fullmove_number: u32,
    pub(crate) previous_hash: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            counts: HashMap::new(),
        }
    }

    pub(crate) fn get(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    pub(crate) fn set(&mut self, hash: u64, count: u32) {
        if count == 0 {
            self.counts.remove(&hash);
        } else {
            self.counts.insert(hash, count);
        }
    }

    pub(crate) fn increment(&mut self, hash: u64) -> u32 {
        let next = self.get(hash).saturating_add(1);
        self.set(hash, next);
        next
    }

    pub(crate) fn decrement(&mut self, hash: u64) {
        let next = self.get(hash).saturating_sub(1);
        self.set(hash, next);
    }
}

/// Board plus side to move, rights, clocks and history.
///
/// All changes to the board go through [`GameState::apply_move`] and
/// [`GameState::undo_move`].
#[derive(Clone, Debug)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) hash: u64, // Zobrist hash
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) repetition_counts: RepetitionTable,
}

impl GameState {
    /// Standard starting position, White to move, all castling rights.
    #[must_use]
    pub fn new() -> Self {
        GameState::from_setup(
            Board::starting_position(),
            Color::White,
            CastlingRights::all(),
            None,
            0,
            1,
        )
    }

    pub(crate) fn from_setup(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Self {
        let mut state = GameState {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number: fullmove_number.max(1),
            hash: 0,
            history: Vec::new(),
            repetition_counts: RepetitionTable::new(),
        };
        state.hash = state.calculate_hash();
        state.repetition_counts.set(state.hash, 1);
        state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[must_use]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Zobrist key of the current position (placement, side, rights, en passant).
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Applied moves, oldest first.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    #[must_use]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mv)
    }

    /// How many times the current position has occurred in this game.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetition_counts.get(self.hash)
    }

    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash = 0;

        for (sq, piece) in self.board.pieces() {
            hash ^= ZOBRIST.piece(piece, sq);
        }

        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move_key;
        }

        hash ^= ZOBRIST.castling(self.castling_rights);

        if let Some(ep_square) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant(ep_square);
        }

        hash
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
