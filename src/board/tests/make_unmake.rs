//! Apply/undo move tests.

use super::{find_move, play, sq};
use crate::board::{CastleSide, Color, GameState, Piece, PieceType};
use rand::prelude::*;

fn snapshot(state: &GameState) -> (String, u64, u32, usize) {
    (
        state.to_fen(),
        state.hash(),
        state.repetition_count(),
        state.history().len(),
    )
}

#[test]
fn test_en_passant_removes_the_passed_pawn() {
    let mut state =
        GameState::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
    let before = snapshot(&state);

    let mv = find_move(&state, sq("e5"), sq("f6"), None);
    assert!(mv.is_en_passant);
    state.apply_move(mv);
    assert!(state.piece_at(sq("f5")).is_none());
    assert!(state.piece_at(sq("e5")).is_none());
    assert_eq!(
        state.piece_at(sq("f6")),
        Some(Piece::new(Color::White, PieceType::Pawn))
    );
    assert_eq!(
        state.piece_at(sq("d5")),
        Some(Piece::new(Color::Black, PieceType::Pawn))
    );

    assert_eq!(state.undo_move(), Some(mv));
    assert_eq!(snapshot(&state), before);
    assert_eq!(
        state.piece_at(sq("f5")),
        Some(Piece::new(Color::Black, PieceType::Pawn))
    );
}

#[test]
fn test_double_push_sets_en_passant_target() {
    let mut state = GameState::new();
    play(&mut state, "e2e4");
    assert_eq!(state.en_passant_target(), Some(sq("e3")));
    play(&mut state, "g8f6");
    assert_eq!(state.en_passant_target(), None);
}

#[test]
fn test_castling_moves_king_and_rook() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let before = snapshot(&state);

    let mv = play(&mut state, "e1g1");
    assert!(mv.is_castle);
    assert_eq!(
        state.piece_at(sq("g1")),
        Some(Piece::new(Color::White, PieceType::King))
    );
    assert_eq!(
        state.piece_at(sq("f1")),
        Some(Piece::new(Color::White, PieceType::Rook))
    );
    assert!(state.piece_at(sq("h1")).is_none());
    assert!(!state.castling_rights().has(Color::White, CastleSide::King));
    assert!(!state.castling_rights().has(Color::White, CastleSide::Queen));
    assert!(state.castling_rights().has(Color::Black, CastleSide::Queen));

    play(&mut state, "e8c8");
    assert_eq!(
        state.piece_at(sq("d8")),
        Some(Piece::new(Color::Black, PieceType::Rook))
    );
    assert!(state.castling_rights().is_empty());

    state.undo_move();
    state.undo_move();
    assert_eq!(snapshot(&state), before);
}

#[test]
fn test_rook_move_loses_one_right_permanently() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut state, "h1h2");
    play(&mut state, "a8a7");
    play(&mut state, "h2h1");
    play(&mut state, "a7a8");

    let rights = state.castling_rights();
    assert!(!rights.has(Color::White, CastleSide::King));
    assert!(rights.has(Color::White, CastleSide::Queen));
    assert!(rights.has(Color::Black, CastleSide::King));
    assert!(!rights.has(Color::Black, CastleSide::Queen));
    assert!(!state
        .legal_moves()
        .iter()
        .any(|mv| mv.is_castle && mv.to == sq("g1")));
}

#[test]
fn test_rook_capture_removes_opponent_right() {
    let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    play(&mut state, "a1a8");
    let rights = state.castling_rights();
    assert!(!rights.has(Color::Black, CastleSide::Queen));
    assert!(rights.has(Color::Black, CastleSide::King));
    assert!(!rights.has(Color::White, CastleSide::Queen));
}

#[test]
fn test_promotion_apply_undo() {
    let mut state = GameState::from_fen("8/P7/8/8/8/8/8/K1k5 w - - 0 1");
    let before = snapshot(&state);
    let mv = find_move(&state, sq("a7"), sq("a8"), Some(PieceType::Queen));
    state.apply_move(mv);
    assert_eq!(
        state.piece_at(sq("a8")),
        Some(Piece::new(Color::White, PieceType::Queen))
    );
    state.undo_move();
    assert_eq!(snapshot(&state), before);
    assert_eq!(
        state.piece_at(sq("a7")),
        Some(Piece::new(Color::White, PieceType::Pawn))
    );
}

#[test]
fn test_clocks_advance() {
    let mut state = GameState::new();
    play(&mut state, "g1f3");
    assert_eq!(state.halfmove_clock(), 1);
    assert_eq!(state.fullmove_number(), 1);
    play(&mut state, "g8f6");
    assert_eq!(state.halfmove_clock(), 2);
    assert_eq!(state.fullmove_number(), 2);
    assert_eq!(state.side_to_move(), Color::White);
}

#[test]
fn test_undo_on_empty_history() {
    let mut state = GameState::new();
    assert_eq!(state.undo_move(), None);
    assert_eq!(state.to_fen(), GameState::new().to_fen());
}

#[test]
fn test_random_playout_undo_restores_start() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = GameState::new();
    let before = snapshot(&state);

    for _ in 0..60 {
        let moves = state.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        state.apply_move(mv);
        assert_eq!(state.hash(), state.calculate_hash());
    }
    while state.undo_move().is_some() {}

    assert_eq!(snapshot(&state), before);
}

#[test]
fn test_fullmove_number_saturates() {
    let fen = "4k3/8/8/8/8/8/8/4K3 b - - 0 4294967295";
    let mut state = GameState::from_fen(fen);
    play(&mut state, "e8d8");
    assert_eq!(state.fullmove_number(), u32::MAX);
    state.undo_move();
    assert_eq!(state.to_fen(), fen);
}
