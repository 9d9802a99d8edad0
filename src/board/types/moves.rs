//! Move type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Piece, PieceType};
use super::square::Square;

/// A fully classified move, as produced by move generation.
///
/// Two moves compare equal only if every flag matches; use
/// [`Move::matches`] to compare against a bare (from, to, promotion) intent.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
    /// Piece removed by this move (for en passant, the pawn beside `to`)
    pub captured: Option<Piece>,
    pub is_en_passant: bool,
    pub is_castle: bool,
    pub is_double_push: bool,
}

impl Move {
    /// A non-capturing move without special flags
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
            captured: None,
            is_en_passant: false,
            is_castle: false,
            is_double_push: false,
        }
    }

    /// A capture of `victim` on the destination square
    #[inline]
    #[must_use]
    pub const fn capture(from: Square, to: Square, victim: Piece) -> Self {
        let mut mv = Move::quiet(from, to);
        mv.captured = Some(victim);
        mv
    }

    #[inline]
    #[must_use]
    pub const fn with_promotion(mut self, piece: PieceType) -> Self {
        self.promotion = Some(piece);
        self
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Returns true if this move is a pawn promotion
    #[inline]
    #[must_use]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Does this move carry out the intent (from, to, promotion)?
    #[inline]
    #[must_use]
    pub fn matches(&self, from: Square, to: Square, promotion: Option<PieceType>) -> bool {
        self.from == from && self.to == to && self.promotion == promotion
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if self.is_capture() {
            write!(f, " cap")?;
        }
        if self.is_castle {
            write!(f, " castle")?;
        }
        if self.is_en_passant {
            write!(f, " ep")?;
        }
        write!(f, ")")
    }
}

/// Long algebraic notation, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}
