//! Rule tunables for a game.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Draw thresholds applied after every accepted move.
///
/// A limit of `0` turns that rule off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Half-moves without a pawn move or capture before the game is drawn
    pub fifty_move_limit: u32,
    /// Occurrences of one position before the game is drawn
    pub repetition_limit: u32,
    /// Draw as soon as neither side can mate
    pub insufficient_material: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            fifty_move_limit: 100,
            repetition_limit: 3,
            insufficient_material: true,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub const fn with_fifty_move_limit(mut self, half_moves: u32) -> Self {
        self.fifty_move_limit = half_moves;
        self
    }

    #[must_use]
    pub const fn with_repetition_limit(mut self, occurrences: u32) -> Self {
        self.repetition_limit = occurrences;
        self
    }

    #[must_use]
    pub const fn with_insufficient_material(mut self, enabled: bool) -> Self {
        self.insufficient_material = enabled;
        self
    }
}
