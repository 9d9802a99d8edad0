use super::super::{GameState, Move, PieceType, Square, PROMOTION_PIECES};

impl GameState {
    pub(crate) fn generate_pawn_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let color = self.side_to_move;
        let dir = color.pawn_direction();

        if let Some(forward_sq) = from.offset(dir, 0) {
            if self.board.is_empty(forward_sq) {
                self.push_pawn_move(Move::quiet(from, forward_sq), moves);
                if from.rank() == color.pawn_start_rank() {
                    if let Some(double_sq) = from.offset(2 * dir, 0) {
                        if self.board.is_empty(double_sq) {
                            let mut mv = Move::quiet(from, double_sq);
                            mv.is_double_push = true;
                            moves.push(mv);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(target_sq) = from.offset(dir, df) else {
                continue;
            };
            match self.board.piece_at(target_sq) {
                Some(victim) if victim.color != color => {
                    self.push_pawn_move(Move::capture(from, target_sq, victim), moves);
                }
                None if Some(target_sq) == self.en_passant_target => {
                    // The pawn that just made a double step stands beside us
                    let victim_sq = Square::at(from.rank(), target_sq.file());
                    if let Some(victim) = self.board.piece_at(victim_sq) {
                        if victim.color != color && victim.kind == PieceType::Pawn {
                            let mut mv = Move::capture(from, target_sq, victim);
                            mv.is_en_passant = true;
                            moves.push(mv);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// A pawn reaching the last rank yields one move per promotion piece.
    fn push_pawn_move(&self, mv: Move, moves: &mut Vec<Move>) {
        if mv.to.rank() == self.side_to_move.pawn_promotion_rank() {
            for promo in PROMOTION_PIECES {
                moves.push(mv.with_promotion(promo));
            }
        } else {
            moves.push(mv);
        }
    }
}
