use crate::zobrist::ZOBRIST;

use super::{Board, CastleSide, Color, GameState, HistoryEntry, Move, Piece, PieceType, Square};

/// Pieces lifted and dropped by one move.
pub(crate) struct Relocation {
    pub(crate) moved: Piece,
    pub(crate) placed: Piece,
    pub(crate) captured_on: Option<Square>,
    pub(crate) rook: Option<(Square, Square, Piece)>,
}

/// Square the captured piece stands on: the destination, or for en passant
/// the square beside it on the mover's rank.
pub(crate) fn capture_square(mv: &Move) -> Square {
    if mv.is_en_passant {
        Square::at(mv.from.rank(), mv.to.file())
    } else {
        mv.to
    }
}

/// Rook origin and destination for a castling king move.
pub(crate) fn castling_rook_squares(mv: &Move) -> (Square, Square) {
    let side = CastleSide::from_king_target_file(mv.to.file())
        .expect("castling move must land on the c or g file");
    let rank = mv.from.rank();
    (
        Square::at(rank, side.rook_home_file()),
        Square::at(rank, side.rook_castled_file()),
    )
}

/// Move the pieces on `board` as `mv` dictates. Used both for real moves and
/// for scratch boards during legality checks.
pub(crate) fn relocate(board: &mut Board, mv: &Move) -> Relocation {
    let moved = board
        .remove(mv.from)
        .expect("move origin must hold a piece");

    let captured_on = mv.captured.map(|victim| {
        debug_assert!(victim.kind != PieceType::King, "{mv} captures a king");
        let sq = capture_square(mv);
        let removed = board.remove(sq);
        debug_assert_eq!(removed, mv.captured, "captured piece mismatch on {sq}");
        sq
    });

    let placed = match mv.promotion {
        Some(kind) => Piece::new(moved.color, kind),
        None => moved,
    };
    board.place(mv.to, placed);

    let rook = if mv.is_castle {
        let (rook_from, rook_to) = castling_rook_squares(mv);
        let rook = board
            .remove(rook_from)
            .expect("castling requires a rook on its home square");
        board.place(rook_to, rook);
        Some((rook_from, rook_to, rook))
    } else {
        None
    };

    Relocation {
        moved,
        placed,
        captured_on,
        rook,
    }
}

impl GameState {
    /// Apply a move already known to be legal for the side to move.
    ///
    /// The move is trusted: validation against [`GameState::legal_moves`]
    /// is the caller's job (see [`crate::rules::RuleEngine`]).
    pub fn apply_move(&mut self, mv: Move) {
        let color = self.side_to_move;
        let entry = HistoryEntry {
            mv,
            moved: self
                .board
                .piece_at(mv.from)
                .expect("apply_move: origin square empty"),
            previous_en_passant_target: self.en_passant_target,
            previous_castling_rights: self.castling_rights,
            previous_halfmove_clock: self.halfmove_clock,
            previous_fullmove_number: self.fullmove_number,
            previous_hash: self.hash,
        };
        debug_assert_eq!(entry.moved.color, color, "moving a piece out of turn");

        let mut hash = self.hash ^ ZOBRIST.black_to_move_key;
        if let Some(old_ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant(old_ep);
        }
        hash ^= ZOBRIST.castling(self.castling_rights);

        let relocation = relocate(&mut self.board, &mv);
        hash ^= ZOBRIST.piece(relocation.moved, mv.from);
        hash ^= ZOBRIST.piece(relocation.placed, mv.to);
        if let (Some(victim), Some(sq)) = (mv.captured, relocation.captured_on) {
            hash ^= ZOBRIST.piece(victim, sq);
        }
        if let Some((rook_from, rook_to, rook)) = relocation.rook {
            hash ^= ZOBRIST.piece(rook, rook_from);
            hash ^= ZOBRIST.piece(rook, rook_to);
        }

        match relocation.moved.kind {
            PieceType::King => self.castling_rights.remove_color(color),
            PieceType::Rook => self.revoke_rook_right(color, mv.from),
            _ => {}
        }
        if let Some(victim) = mv.captured {
            if victim.kind == PieceType::Rook {
                self.revoke_rook_right(victim.color, mv.to);
            }
        }
        hash ^= ZOBRIST.castling(self.castling_rights);

        self.en_passant_target = if mv.is_double_push {
            let ep_sq = Square::at((mv.from.rank() + mv.to.rank()) / 2, mv.from.file());
            hash ^= ZOBRIST.en_passant(ep_sq);
            Some(ep_sq)
        } else {
            None
        };

        if relocation.moved.kind == PieceType::Pawn || mv.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = color.opponent();
        self.hash = hash;
        self.repetition_counts.increment(hash);
        self.history.push(entry);
    }

    /// Take back the most recent move, restoring the exact previous state.
    pub fn undo_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        let mv = entry.mv;
        let color = entry.moved.color;

        self.repetition_counts.decrement(self.hash);

        self.board.remove(mv.to);
        self.board.place(mv.from, entry.moved);
        if mv.is_castle {
            let (rook_from, rook_to) = castling_rook_squares(&mv);
            let rook = self
                .board
                .remove(rook_to)
                .expect("undo castling: rook missing");
            self.board.place(rook_from, rook);
        }
        if let Some(victim) = mv.captured {
            self.board.place(capture_square(&mv), victim);
        }

        self.side_to_move = color;
        self.en_passant_target = entry.previous_en_passant_target;
        self.castling_rights = entry.previous_castling_rights;
        self.halfmove_clock = entry.previous_halfmove_clock;
        self.fullmove_number = entry.previous_fullmove_number;
        self.hash = entry.previous_hash;

        Some(mv)
    }

    /// Rights tied to a rook are gone once anything leaves or lands on its home square.
    fn revoke_rook_right(&mut self, color: Color, sq: Square) {
        if sq.rank() != color.back_rank() {
            return;
        }
        for side in CastleSide::BOTH {
            if sq.file() == side.rook_home_file() {
                self.castling_rights.remove(color, side);
            }
        }
    }
}
