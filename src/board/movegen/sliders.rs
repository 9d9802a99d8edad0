use super::super::{GameState, Move, Square};

impl GameState {
    /// Rays stop at the first occupied square, which is captured if it holds an enemy.
    pub(crate) fn generate_slider_moves(
        &self,
        from: Square,
        directions: &[(isize, isize)],
        moves: &mut Vec<Move>,
    ) {
        for &(dr, df) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, df) {
                match self.board.piece_at(to) {
                    None => moves.push(Move::quiet(from, to)),
                    Some(victim) => {
                        if victim.color != self.side_to_move {
                            moves.push(Move::capture(from, to, victim));
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }
}
