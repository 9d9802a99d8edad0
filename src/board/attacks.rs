//! Square attack queries.

use super::{Board, Color, GameState, PieceType, Square};

pub(crate) const KNIGHT_OFFSETS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub(crate) const KING_OFFSETS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub(crate) const ROOK_DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub(crate) const BISHOP_DIRECTIONS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) const QUEEN_DIRECTIONS: [(isize, isize); 8] = KING_OFFSETS;

/// Is `square` attacked by any piece of `attacker` on `board`?
pub(crate) fn is_square_attacked(board: &Board, square: Square, attacker: Color) -> bool {
    let attacked_by = |sq: Option<Square>, kind: PieceType| {
        sq.and_then(|sq| board.piece_at(sq))
            .is_some_and(|p| p.color == attacker && p.kind == kind)
    };

    // A pawn attacks diagonally forward, so look one rank behind the target
    let back = -attacker.pawn_direction();
    if attacked_by(square.offset(back, -1), PieceType::Pawn)
        || attacked_by(square.offset(back, 1), PieceType::Pawn)
    {
        return true;
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, df)| attacked_by(square.offset(dr, df), PieceType::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, df)| attacked_by(square.offset(dr, df), PieceType::King))
    {
        return true;
    }

    ray_hits(board, square, attacker, &ROOK_DIRECTIONS, PieceType::Rook)
        || ray_hits(board, square, attacker, &BISHOP_DIRECTIONS, PieceType::Bishop)
}

/// Walk each ray until the first occupied square; true if that blocker is an
/// `attacker` slider of `kind` or a queen.
fn ray_hits(
    board: &Board,
    from: Square,
    attacker: Color,
    directions: &[(isize, isize)],
    kind: PieceType,
) -> bool {
    directions.iter().any(|&(dr, df)| {
        let mut current = from;
        while let Some(next) = current.offset(dr, df) {
            if let Some(piece) = board.piece_at(next) {
                return piece.color == attacker
                    && (piece.kind == kind || piece.kind == PieceType::Queen);
            }
            current = next;
        }
        false
    })
}

impl GameState {
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, attacker: Color) -> bool {
        is_square_attacked(&self.board, square, attacker)
    }

    /// Is `color`'s king attacked? A side without a king is never in check.
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board
            .find_king(color)
            .is_some_and(|king| is_square_attacked(&self.board, king, color.opponent()))
    }

    /// Is the side to move in check?
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_pawn_attacks_forward_diagonals_only() {
        let state = GameState::try_from_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(state.is_square_attacked(sq("d5"), Color::White));
        assert!(state.is_square_attacked(sq("f5"), Color::White));
        assert!(!state.is_square_attacked(sq("e5"), Color::White));
        assert!(!state.is_square_attacked(sq("d3"), Color::White));
    }

    #[test]
    fn test_slider_blocked_by_first_piece() {
        let state = GameState::try_from_fen("4k3/8/8/8/R2p4/8/8/4K3 w - - 0 1").unwrap();
        assert!(state.is_square_attacked(sq("c4"), Color::White));
        assert!(state.is_square_attacked(sq("d4"), Color::White));
        assert!(!state.is_square_attacked(sq("e4"), Color::White));
    }

    #[test]
    fn test_knight_and_king_attacks() {
        let state = GameState::try_from_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").unwrap();
        assert!(state.is_square_attacked(sq("b3"), Color::White));
        assert!(state.is_square_attacked(sq("c2"), Color::White));
        assert!(state.is_square_attacked(sq("d2"), Color::White));
        assert!(!state.is_square_attacked(sq("e3"), Color::White));
    }

    #[test]
    fn test_in_check_detection() {
        let state = GameState::try_from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
        assert!(state.in_check());
        assert!(!state.is_in_check(Color::Black));
    }
}
