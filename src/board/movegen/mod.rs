//! Move generation.
//!
//! Pseudo-legal moves come from the per-piece submodules; [`GameState::legal_moves`]
//! then drops every move that would leave the mover's king attacked.

mod kings;
mod knights;
mod pawns;
mod sliders;

use std::collections::BTreeSet;

use super::attacks::{is_square_attacked, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use super::make_unmake::relocate;
use super::{GameState, Move, PieceType, Square};

impl GameState {
    /// Moves for the piece on `from`, ignoring whether they expose the king.
    ///
    /// Empty if the square is empty or holds a piece of the side not to move.
    #[must_use]
    pub fn pseudo_legal_moves(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        let Some(piece) = self.board.piece_at(from) else {
            return moves;
        };
        if piece.color != self.side_to_move {
            return moves;
        }

        match piece.kind {
            PieceType::Pawn => self.generate_pawn_moves(from, &mut moves),
            PieceType::Knight => self.generate_knight_moves(from, &mut moves),
            PieceType::Bishop => self.generate_slider_moves(from, &BISHOP_DIRECTIONS, &mut moves),
            PieceType::Rook => self.generate_slider_moves(from, &ROOK_DIRECTIONS, &mut moves),
            PieceType::Queen => self.generate_slider_moves(from, &QUEEN_DIRECTIONS, &mut moves),
            PieceType::King => self.generate_king_moves(from, &mut moves),
        }
        moves
    }

    /// All legal moves for the side to move, in scan order of the moving pieces.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, _) in self.board.friendly_pieces(self.side_to_move) {
            moves.extend(self.pseudo_legal_moves(from));
        }
        moves.retain(|mv| self.is_legal(mv));
        moves
    }

    #[must_use]
    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        let mut moves = self.pseudo_legal_moves(from);
        moves.retain(|mv| self.is_legal(mv));
        moves
    }

    /// Squares the piece on `from` may legally move to.
    #[must_use]
    pub fn legal_destinations(&self, from: Square) -> BTreeSet<Square> {
        self.legal_moves_from(from).into_iter().map(|mv| mv.to).collect()
    }

    /// Stops at the first legal move found.
    #[must_use]
    pub fn has_legal_move(&self) -> bool {
        self.board
            .friendly_pieces(self.side_to_move)
            .into_iter()
            .any(|(from, _)| self.pseudo_legal_moves(from).iter().any(|mv| self.is_legal(mv)))
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_move()
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_move()
    }

    /// Play `mv` on a scratch copy of the board and check the mover's king.
    pub(crate) fn is_legal(&self, mv: &Move) -> bool {
        if mv.is_castle && !self.castling_path_is_safe(mv) {
            return false;
        }

        let color = self.side_to_move;
        let mut scratch = self.board.clone();
        relocate(&mut scratch, mv);
        match scratch.find_king(color) {
            Some(king) => !is_square_attacked(&scratch, king, color.opponent()),
            None => true,
        }
    }

    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.apply_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_start_position_has_twenty_moves() {
        let state = GameState::new();
        assert_eq!(state.legal_moves().len(), 20);
    }

    #[test]
    fn test_legal_moves_follow_scan_order() {
        let state = GameState::new();
        let moves = state.legal_moves();
        // b1 knight (file b) comes after every a-file move and before c-file moves
        assert_eq!(moves[0].from, sq("a2"));
        assert_eq!(moves[2].from, sq("b1"));
    }

    #[test]
    fn test_opponent_piece_has_no_moves() {
        let state = GameState::new();
        assert!(state.pseudo_legal_moves(sq("e7")).is_empty());
        assert!(state.pseudo_legal_moves(sq("e4")).is_empty());
    }

    #[test]
    fn test_legal_destinations_for_knight() {
        let state = GameState::new();
        let dests = state.legal_destinations(sq("g1"));
        assert_eq!(dests.into_iter().collect::<Vec<_>>(), vec![sq("f3"), sq("h3")]);
    }

    #[test]
    fn test_pinned_piece_cannot_leave_the_line() {
        // White bishop on e2 is pinned by the rook on e8
        let state = GameState::try_from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        assert!(state.legal_moves_from(sq("e2")).is_empty());
        assert!(!state.pseudo_legal_moves(sq("e2")).is_empty());
    }

    #[test]
    fn test_promotion_expands_to_four_moves() {
        let state = GameState::try_from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let promos: Vec<_> = state
            .legal_moves_from(sq("a7"))
            .into_iter()
            .filter_map(|mv| mv.promotion)
            .collect();
        assert_eq!(
            promos,
            vec![PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight]
        );
    }

    #[test]
    fn test_castling_generated_when_path_clear() {
        let state = GameState::try_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        let castles: Vec<_> = state
            .legal_moves_from(sq("e1"))
            .into_iter()
            .filter(|mv| mv.is_castle)
            .map(|mv| mv.to)
            .collect();
        assert_eq!(castles, vec![sq("g1"), sq("c1")]);
    }

    #[test]
    fn test_castling_through_attacked_square_rejected() {
        // Black rook on f8 covers f1
        let state = GameState::try_from_fen("4kr2/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(!state.legal_moves().iter().any(|mv| mv.is_castle));
    }

    #[test]
    fn test_castling_out_of_check_rejected() {
        let state = GameState::try_from_fen("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        assert!(state.in_check());
        assert!(!state.legal_moves().iter().any(|mv| mv.is_castle));
    }

    #[test]
    fn test_queenside_castle_allows_attacked_b_file() {
        // b1 is attacked but the king never crosses it
        let state = GameState::try_from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        assert!(state
            .legal_moves()
            .iter()
            .any(|mv| mv.is_castle && mv.to == sq("c1")));
    }

    #[test]
    fn test_en_passant_only_right_after_double_push() {
        let state =
            GameState::try_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep: Vec<_> = state.legal_moves().into_iter().filter(|m| m.is_en_passant).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to, sq("d6"));

        let stale = GameState::try_from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2").unwrap();
        assert!(!stale.legal_moves().iter().any(|m| m.is_en_passant));
    }

    #[test]
    fn test_checkmate_and_stalemate_predicates() {
        let mate = GameState::try_from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(mate.is_checkmate());
        let stale = GameState::try_from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(stale.is_stalemate());
        assert!(stale.legal_moves().is_empty());
    }
}
