//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the chess board.
///
/// Stored as a 0-63 index (a1=0, b1=1, ..., h8=63). Only the 64 board
/// squares are constructible, so every `Square` value is in range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Square(u8);

impl Square {
    /// Create a new square with bounds checking (rank and file are 0-7)
    #[must_use]
    pub const fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Square from coordinates the caller already knows are on the board.
    #[inline]
    #[must_use]
    pub(crate) const fn at(rank: usize, file: usize) -> Self {
        debug_assert!(rank < 8 && file < 8);
        Square((rank * 8 + file) as u8)
    }

    /// Create a square from an index (0-63)
    #[must_use]
    pub const fn from_index(idx: usize) -> Option<Self> {
        if idx < 64 {
            Some(Square(idx as u8))
        } else {
            None
        }
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// Get the square's index (0-63, a1=0, b1=1, ..., h8=63)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The square reached by stepping `rank_delta` ranks and `file_delta`
    /// files, or `None` if that leaves the board.
    #[inline]
    #[must_use]
    pub const fn offset(self, rank_delta: isize, file_delta: isize) -> Option<Self> {
        let rank = self.rank() as isize + rank_delta;
        let file = self.file() as isize + file_delta;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            None
        } else {
            Some(Square((rank * 8 + file) as u8))
        }
    }

    /// True for dark squares (a1 is dark).
    #[inline]
    #[must_use]
    pub const fn is_dark(self) -> bool {
        (self.rank() + self.file()) % 2 == 0
    }

    /// All 64 squares in scan order: file-major, then rank (a1, a2, ..., a8, b1, ...).
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|file| (0..8).map(move |rank| Square((rank * 8 + file) as u8)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = SquareError;

    fn try_from((rank, file): (usize, usize)) -> Result<Self, Self::Error> {
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        Ok(Square((rank * 8 + file) as u8))
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let file = match file {
            'a'..='h' => file as usize - 'a' as usize,
            _ => return Err(invalid()),
        };
        let rank = match rank {
            '1'..='8' => rank as usize - '1' as usize,
            _ => return Err(invalid()),
        };

        Ok(Square((rank * 8 + file) as u8))
    }
}

impl TryFrom<String> for Square {
    type Error = SquareError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> Self {
        sq.to_string()
    }
}
