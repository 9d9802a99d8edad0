//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

const CASTLE_WHITE_K: u8 = 1 << 0;
const CASTLE_WHITE_Q: u8 = 1 << 1;
const CASTLE_BLACK_K: u8 = 1 << 2;
const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined
const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Which rook a castling move uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// File the rook starts on (h or a).
    #[inline]
    #[must_use]
    pub(crate) const fn rook_home_file(self) -> usize {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }

    /// File the rook lands on after castling (f or d).
    #[inline]
    #[must_use]
    pub(crate) const fn rook_castled_file(self) -> usize {
        match self {
            CastleSide::King => 5,
            CastleSide::Queen => 3,
        }
    }

    /// File the king lands on after castling (g or c).
    #[inline]
    #[must_use]
    pub(crate) const fn king_target_file(self) -> usize {
        match self {
            CastleSide::King => 6,
            CastleSide::Queen => 2,
        }
    }

    pub(crate) const fn from_king_target_file(file: usize) -> Option<Self> {
        match file {
            6 => Some(CastleSide::King),
            2 => Some(CastleSide::Queen),
            _ => None,
        }
    }
}

/// Castling rights represented as a bitmask
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All castling rights (both sides can castle kingside and queenside)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::bit_for(color, side) != 0
    }

    /// Set a specific castling right
    #[inline]
    pub fn set(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::bit_for(color, side);
    }

    /// Remove a specific castling right. Returns true if it was held.
    #[inline]
    pub fn remove(&mut self, color: Color, side: CastleSide) -> bool {
        let held = self.has(color, side);
        self.0 &= !Self::bit_for(color, side);
        held
    }

    /// Remove both rights of one color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        self.remove(color, CastleSide::King);
        self.remove(color, CastleSide::Queen);
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the raw bitmask value
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Get the bit for a specific castling right
    #[inline]
    const fn bit_for(color: Color, side: CastleSide) -> u8 {
        match (color, side) {
            (Color::White, CastleSide::King) => CASTLE_WHITE_K,
            (Color::White, CastleSide::Queen) => CASTLE_WHITE_Q,
            (Color::Black, CastleSide::King) => CASTLE_BLACK_K,
            (Color::Black, CastleSide::Queen) => CASTLE_BLACK_Q,
        }
    }
}

/// FEN castling field: "KQkq", a subset, or "-".
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
