//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Move generation node counts
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_unmake.rs` - Apply/undo move correctness
//! - `edge_cases.rs` - Special positions and edge cases
//! - `proptest.rs` - Property-based tests

mod make_unmake;

use crate::board::{GameState, Move, PieceType, Square};

pub(super) fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

pub(super) fn find_move(
    state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
) -> Move {
    state
        .legal_moves()
        .into_iter()
        .find(|m| m.matches(from, to, promotion))
        .unwrap_or_else(|| panic!("Expected move {from}{to} not found"))
}

/// Play a long-algebraic move that must be legal.
pub(super) fn play(state: &mut GameState, uci: &str) -> Move {
    let promotion = uci.chars().nth(4).and_then(PieceType::from_char);
    let mv = find_move(state, sq(&uci[0..2]), sq(&uci[2..4]), promotion);
    state.apply_move(mv);
    mv
}
