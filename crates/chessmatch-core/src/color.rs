//! Player color representation.

use serde::{Deserialize, Serialize};

/// Represents the two players of a match.
///
/// Yellow starts at the bottom of the board (rows 6 and 7) and moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    Yellow = 0,
    Red = 1,
}

impl Color {
    /// Both colors, Yellow first.
    pub const ALL: [Color; 2] = [Color::Yellow, Color::Red];

    /// Returns the opposite color.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Yellow => Color::Red,
            Color::Red => Color::Yellow,
        }
    }

    /// Returns the index (0 for Yellow, 1 for Red).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the row delta of a pawn step (-1 for Yellow, +1 for Red).
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Yellow => -1,
            Color::Red => 1,
        }
    }

    /// Returns the back row for this color (7 for Yellow, 0 for Red).
    #[inline]
    pub const fn back_row(self) -> i8 {
        match self {
            Color::Yellow => 7,
            Color::Red => 0,
        }
    }

    /// Returns the row pawns of this color start on.
    #[inline]
    pub const fn pawn_row(self) -> i8 {
        match self {
            Color::Yellow => 6,
            Color::Red => 1,
        }
    }

    /// Returns the row on which pawns of this color promote.
    #[inline]
    pub const fn promotion_row(self) -> i8 {
        self.opposite().back_row()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Yellow => write!(f, "Yellow"),
            Color::Red => write!(f, "Red"),
        }
    }
}
