use super::super::attacks::KNIGHT_OFFSETS;
use super::super::{GameState, Move, Square};

impl GameState {
    pub(crate) fn generate_knight_moves(&self, from: Square, moves: &mut Vec<Move>) {
        for &(dr, df) in &KNIGHT_OFFSETS {
            if let Some(to) = from.offset(dr, df) {
                self.push_step(from, to, moves);
            }
        }
    }

    /// Single-step target: quiet if empty, capture if enemy, nothing if friendly.
    pub(crate) fn push_step(&self, from: Square, to: Square, moves: &mut Vec<Move>) {
        match self.board.piece_at(to) {
            None => moves.push(Move::quiet(from, to)),
            Some(victim) if victim.color != self.side_to_move => {
                moves.push(Move::capture(from, to, victim));
            }
            Some(_) => {}
        }
    }
}
