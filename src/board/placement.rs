//! Piece placement on the 8x8 grid.

use std::fmt;

use super::{Color, Piece, PieceType, Square};

/// Occupancy of the 64 squares. Holds no rules knowledge.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// A board with no pieces on it.
    #[must_use]
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard initial setup.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, kind) in back_rank.into_iter().enumerate() {
            board.place(Square::at(0, file), Piece::new(Color::White, kind));
            board.place(Square::at(7, file), Piece::new(Color::Black, kind));
            board.place(Square::at(1, file), Piece::new(Color::White, PieceType::Pawn));
            board.place(Square::at(6, file), Piece::new(Color::Black, PieceType::Pawn));
        }
        board
    }

    #[inline]
    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.squares[sq.index()].is_none()
    }

    /// Put `piece` on `sq`, returning whatever stood there before.
    pub fn place(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        debug_assert!(
            piece.kind != PieceType::King
                || self.piece_at(sq) == Some(piece)
                || self.find_king(piece.color).is_none(),
            "second {} king placed on {sq}",
            piece.color
        );
        self.squares[sq.index()].replace(piece)
    }

    /// Clear `sq`, returning the piece that stood there.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()].take()
    }

    /// All pieces of one side, in scan order (file-major, then rank).
    #[must_use]
    pub fn friendly_pieces(&self, color: Color) -> Vec<(Square, Piece)> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .collect()
    }

    /// Every occupied square, in scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceType::King);
        Square::all().find(|&sq| self.piece_at(sq) == Some(king))
    }

    #[must_use]
    pub fn count(&self, color: Color, kind: PieceType) -> usize {
        let target = Piece::new(color, kind);
        self.squares.iter().filter(|p| **p == Some(target)).count()
    }

    /// Neither side has enough material to ever deliver mate.
    ///
    /// Covers K v K, K+minor v K, and any number of bishops that all
    /// stand on squares of one color.
    #[must_use]
    pub fn is_insufficient_material(&self) -> bool {
        let mut knights = 0;
        let mut light_bishops = 0;
        let mut dark_bishops = 0;

        for (sq, piece) in self.pieces() {
            match piece.kind {
                PieceType::Pawn | PieceType::Rook | PieceType::Queen => return false,
                PieceType::Knight => knights += 1,
                PieceType::Bishop if sq.is_dark() => dark_bishops += 1,
                PieceType::Bishop => light_bishops += 1,
                PieceType::King => {}
            }
        }

        let total_minors = knights + light_bishops + dark_bishops;
        if total_minors <= 1 {
            return true;
        }

        knights == 0 && (light_bishops == 0 || dark_bishops == 0)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

/// Diagram with rank 8 at the top; `.` marks an empty square.
impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let c = self
                    .piece_at(Square::at(rank, file))
                    .map_or('.', Piece::to_fen_char);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_starting_position_layout() {
        let board = Board::starting_position();
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(Color::White, PieceType::King))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceType::Queen))
        );
        assert!(board.is_empty(sq("e4")));
        assert_eq!(board.friendly_pieces(Color::White).len(), 16);
        assert_eq!(board.count(Color::Black, PieceType::Pawn), 8);
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::empty();
        let rook = Piece::new(Color::White, PieceType::Rook);
        assert_eq!(board.place(sq("a1"), rook), None);
        let knight = Piece::new(Color::Black, PieceType::Knight);
        assert_eq!(board.place(sq("a1"), knight), Some(rook));
        assert_eq!(board.remove(sq("a1")), Some(knight));
        assert!(board.is_empty(sq("a1")));
        assert_eq!(board.remove(sq("a1")), None);
    }

    #[test]
    fn test_friendly_pieces_scan_order() {
        let mut board = Board::empty();
        let pawn = Piece::new(Color::White, PieceType::Pawn);
        board.place(sq("b2"), pawn);
        board.place(sq("a7"), pawn);
        board.place(sq("a2"), pawn);
        board.place(sq("c1"), Piece::new(Color::Black, PieceType::Pawn));
        let squares: Vec<Square> = board
            .friendly_pieces(Color::White)
            .into_iter()
            .map(|(s, _)| s)
            .collect();
        assert_eq!(squares, vec![sq("a2"), sq("a7"), sq("b2")]);
    }

    #[test]
    fn test_find_king() {
        let board = Board::starting_position();
        assert_eq!(board.find_king(Color::Black), Some(sq("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn test_insufficient_material() {
        let mut board = Board::empty();
        board.place(sq("a1"), Piece::new(Color::White, PieceType::King));
        board.place(sq("h8"), Piece::new(Color::Black, PieceType::King));
        assert!(board.is_insufficient_material());

        board.place(sq("c1"), Piece::new(Color::White, PieceType::Bishop));
        assert!(board.is_insufficient_material());

        // Bishops on the same color (c1 and f4 are both dark)
        board.place(sq("f4"), Piece::new(Color::Black, PieceType::Bishop));
        assert!(board.is_insufficient_material());

        // Opposite-colored bishops can still mate
        board.remove(sq("f4"));
        board.place(sq("f5"), Piece::new(Color::Black, PieceType::Bishop));
        assert!(!board.is_insufficient_material());

        board.remove(sq("f5"));
        board.place(sq("g2"), Piece::new(Color::White, PieceType::Pawn));
        assert!(!board.is_insufficient_material());
    }

    #[test]
    fn test_two_knights_are_not_insufficient() {
        let mut board = Board::empty();
        board.place(sq("a1"), Piece::new(Color::White, PieceType::King));
        board.place(sq("h8"), Piece::new(Color::Black, PieceType::King));
        board.place(sq("c3"), Piece::new(Color::White, PieceType::Knight));
        board.place(sq("d3"), Piece::new(Color::White, PieceType::Knight));
        assert!(!board.is_insufficient_material());
    }
}
