use super::super::attacks::KING_OFFSETS;
use super::super::{CastleSide, GameState, Move, Piece, PieceType, Square};

impl GameState {
    pub(crate) fn generate_king_moves(&self, from: Square, moves: &mut Vec<Move>) {
        for &(dr, df) in &KING_OFFSETS {
            if let Some(to) = from.offset(dr, df) {
                self.push_step(from, to, moves);
            }
        }

        let color = self.side_to_move;
        let back_rank = color.back_rank();
        if from != Square::at(back_rank, 4) {
            return;
        }

        let own_rook = Some(Piece::new(color, PieceType::Rook));
        for side in CastleSide::BOTH {
            if !self.castling_rights.has(color, side) {
                continue;
            }
            let rook_file = side.rook_home_file();
            if self.board.piece_at(Square::at(back_rank, rook_file)) != own_rook {
                continue;
            }
            let (lo, hi) = if rook_file < 4 { (rook_file + 1, 4) } else { (5, rook_file) };
            if (lo..hi).all(|file| self.board.is_empty(Square::at(back_rank, file))) {
                let mut mv = Move::quiet(from, Square::at(back_rank, side.king_target_file()));
                mv.is_castle = true;
                moves.push(mv);
            }
        }
    }

    /// The king may not castle out of, through, or into check.
    pub(crate) fn castling_path_is_safe(&self, mv: &Move) -> bool {
        let attacker = self.side_to_move.opponent();
        let rank = mv.from.rank();
        let lo = mv.from.file().min(mv.to.file());
        let hi = mv.from.file().max(mv.to.file());
        (lo..=hi).all(|file| !self.is_square_attacked(Square::at(rank, file), attacker))
    }
}
