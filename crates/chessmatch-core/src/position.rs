//! Board coordinate representation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(row, column)` coordinate on the board.
///
/// Coordinates are signed so that offsets can step off the board; use
/// [`Position::is_on_board`] (or [`crate::Board::is_valid_position`]) before
/// indexing. Row 0 is rank 8 and row 7 is rank 1, column 0 is file `a`:
/// - a8 = (0, 0), h8 = (0, 7)
/// - a1 = (7, 0), h1 = (7, 7)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    /// Number of rows and columns on the board.
    pub const SIZE: i8 = 8;

    /// Creates a position. The result is not bounds-checked.
    #[inline]
    pub const fn new(row: i8, column: i8) -> Self {
        Position { row, column }
    }

    /// Returns true if both coordinates are in `0..8`.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        self.row >= 0 && self.row < Self::SIZE && self.column >= 0 && self.column < Self::SIZE
    }

    /// Returns the position shifted by the given deltas, or `None` if it
    /// leaves the board.
    #[inline]
    pub const fn offset(self, d_row: i8, d_column: i8) -> Option<Self> {
        let p = Position::new(self.row + d_row, self.column + d_column);
        if p.is_on_board() {
            Some(p)
        } else {
            None
        }
    }

    /// Parses a square name such as `"e2"` (file letter, rank digit).
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Position::new(
            Self::SIZE - (rank - b'0') as i8,
            (file - b'a') as i8,
        ))
    }

    /// Returns the square name, or `None` if the position is off the board.
    pub fn to_algebraic(self) -> Option<String> {
        if !self.is_on_board() {
            return None;
        }
        let file = (b'a' + self.column as u8) as char;
        let rank = Self::SIZE - self.row;
        Some(format!("{}{}", file, rank))
    }

    /// Iterates over every on-board position, row by row.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..Self::SIZE).flat_map(|row| (0..Self::SIZE).map(move |column| Position::new(row, column)))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(name) => write!(f, "Position({}, {} = {})", self.row, self.column, name),
            None => write!(f, "Position({}, {})", self.row, self.column),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_algebraic() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "({}, {})", self.row, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_algebraic_corners() {
        assert_eq!(Position::from_algebraic("a8"), Some(Position::new(0, 0)));
        assert_eq!(Position::from_algebraic("h8"), Some(Position::new(0, 7)));
        assert_eq!(Position::from_algebraic("a1"), Some(Position::new(7, 0)));
        assert_eq!(Position::from_algebraic("H1"), Some(Position::new(7, 7)));
        assert_eq!(Position::from_algebraic("a2"), Some(Position::new(6, 0)));
    }

    #[test]
    fn from_algebraic_rejects_garbage() {
        assert_eq!(Position::from_algebraic("i1"), None);
        assert_eq!(Position::from_algebraic("a9"), None);
        assert_eq!(Position::from_algebraic("a0"), None);
        assert_eq!(Position::from_algebraic(""), None);
        assert_eq!(Position::from_algebraic("e22"), None);
    }

    #[test]
    fn offset_stays_on_board() {
        let a1 = Position::new(7, 0);
        assert_eq!(a1.offset(-1, 0), Some(Position::new(6, 0)));
        assert_eq!(a1.offset(1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
    }

    #[test]
    fn display_off_board() {
        assert_eq!(format!("{}", Position::new(6, 4)), "e2");
        assert_eq!(format!("{}", Position::new(8, 0)), "(8, 0)");
        assert_eq!(Position::new(-1, 3).to_algebraic(), None);
    }

    #[test]
    fn all_covers_board() {
        assert_eq!(Position::all().count(), 64);
        assert!(Position::all().all(Position::is_on_board));
    }

    proptest! {
        #[test]
        fn algebraic_name_parses_back(row in 0i8..8, column in 0i8..8) {
            let p = Position::new(row, column);
            let name = p.to_algebraic().unwrap();
            prop_assert_eq!(Position::from_algebraic(&name), Some(p));
        }
    }
}
