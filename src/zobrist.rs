//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit position keys used to count
//! repeated positions.

use once_cell::sync::Lazy;
use rand::prelude::*;

use crate::board::{CastleSide, CastlingRights, Color, Piece, Square};

pub(crate) struct ZobristKeys {
    // piece_keys[piece_type][color][square_index]
    pub(crate) piece_keys: [[[u64; 64]; 2]; 6],
    pub(crate) black_to_move_key: u64,
    // castling_keys[color][side] : 0=White, 1=Black; 0=Kingside, 1=Queenside
    pub(crate) castling_keys: [[u64; 2]; 2],
    // en_passant_keys[file_index] (only file matters for EP target)
    pub(crate) en_passant_keys: [u64; 8],
}

impl ZobristKeys {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(1234567890_u64); // Fixed seed: keys are stable across runs
        let mut piece_keys = [[[0; 64]; 2]; 6];
        let mut castling_keys = [[0; 2]; 2];
        let mut en_passant_keys = [0; 8];

        for piece in &mut piece_keys {
            for color in piece.iter_mut() {
                for key in color.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let black_to_move_key = rng.gen();

        for color in &mut castling_keys {
            for key in color.iter_mut() {
                *key = rng.gen();
            }
        }

        for key in &mut en_passant_keys {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_keys,
            black_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    #[inline]
    pub(crate) fn piece(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_keys[piece.kind.index()][piece.color.index()][sq.index()]
    }

    #[inline]
    pub(crate) fn castling_right(&self, color: Color, side: CastleSide) -> u64 {
        let side_idx = match side {
            CastleSide::King => 0,
            CastleSide::Queen => 1,
        };
        self.castling_keys[color.index()][side_idx]
    }

    /// Combined key of every right held in `rights`.
    pub(crate) fn castling(&self, rights: CastlingRights) -> u64 {
        let mut key = 0;
        for color in Color::BOTH {
            for side in CastleSide::BOTH {
                if rights.has(color, side) {
                    key ^= self.castling_right(color, side);
                }
            }
        }
        key
    }

    #[inline]
    pub(crate) fn en_passant(&self, target: Square) -> u64 {
        self.en_passant_keys[target.file()]
    }
}

// Keys are built once on first use and never change afterwards
pub(crate) static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::new);
