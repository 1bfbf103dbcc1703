//! Reachability grid.
//!
//! A [`MovementGrid`] marks a set of board squares, one bit per square. It is
//! the 8x8 boolean grid returned by movement generation, packed into a `u64`
//! so that unions and intersections of attack sets are single operations.

use chessmatch_core::Position;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, Not};

/// A set of board squares.
///
/// Bit `row * 8 + column` marks the square at `(row, column)`.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementGrid(u64);

impl MovementGrid {
    /// No squares marked.
    pub const EMPTY: MovementGrid = MovementGrid(0);

    #[inline]
    fn bit(position: Position) -> u64 {
        debug_assert!(position.is_on_board());
        1u64 << (position.row as u32 * 8 + position.column as u32)
    }

    /// Returns true if no square is marked.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of marked squares.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Returns true if the square is marked. Off-board positions are never
    /// marked.
    #[inline]
    pub fn contains(self, position: Position) -> bool {
        position.is_on_board() && self.0 & Self::bit(position) != 0
    }

    /// Marks a square.
    #[inline]
    pub fn set(&mut self, position: Position) {
        self.0 |= Self::bit(position);
    }

    /// Returns the marked squares as an `[row][column]` boolean grid.
    pub fn to_array(self) -> [[bool; 8]; 8] {
        let mut grid = [[false; 8]; 8];
        for position in self {
            grid[position.row as usize][position.column as usize] = true;
        }
        grid
    }

    /// Iterates over the marked squares in row-major order.
    #[inline]
    pub fn iter(self) -> MovementGridIter {
        MovementGridIter(self.0)
    }
}

impl BitAnd for MovementGrid {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        MovementGrid(self.0 & rhs.0)
    }
}

impl BitOr for MovementGrid {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        MovementGrid(self.0 | rhs.0)
    }
}

impl BitOrAssign for MovementGrid {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl Not for MovementGrid {
    type Output = Self;
    #[inline]
    fn not(self) -> Self::Output {
        MovementGrid(!self.0)
    }
}

impl FromIterator<Position> for MovementGrid {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut grid = MovementGrid::EMPTY;
        for position in iter {
            grid.set(position);
        }
        grid
    }
}

impl fmt::Debug for MovementGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "MovementGrid({:#018x})", self.0)?;
        for row in 0..Position::SIZE {
            write!(f, "{} ", Position::SIZE - row)?;
            for column in 0..Position::SIZE {
                if self.contains(Position::new(row, column)) {
                    write!(f, "X ")?;
                } else {
                    write!(f, ". ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")
    }
}

/// Iterator over marked squares in a grid.
pub struct MovementGridIter(u64);

impl Iterator for MovementGridIter {
    type Item = Position;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as i8;
        self.0 &= self.0 - 1;
        Some(Position::new(index / 8, index % 8))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.0.count_ones() as usize;
        (count, Some(count))
    }
}

impl IntoIterator for MovementGrid {
    type Item = Position;
    type IntoIter = MovementGridIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_contains() {
        let mut grid = MovementGrid::EMPTY;
        let e4 = Position::new(4, 4);
        grid.set(e4);
        assert!(grid.contains(e4));
        assert!(!grid.contains(Position::new(4, 5)));
        assert_eq!(grid.count(), 1);
        assert!(!MovementGrid::EMPTY.contains(e4));
    }

    #[test]
    fn off_board_is_never_contained() {
        let full = !MovementGrid::EMPTY;
        assert!(!full.contains(Position::new(8, 0)));
        assert!(!full.contains(Position::new(0, -1)));
        assert_eq!(full.count(), 64);
    }

    #[test]
    fn iterates_row_major() {
        let grid: MovementGrid = [Position::new(7, 7), Position::new(0, 1), Position::new(3, 0)]
            .into_iter()
            .collect();
        let squares: Vec<Position> = grid.into_iter().collect();
        assert_eq!(
            squares,
            vec![Position::new(0, 1), Position::new(3, 0), Position::new(7, 7)]
        );
    }

    #[test]
    fn to_array_marks_cells() {
        let grid = MovementGrid::from_iter([Position::new(2, 5)]);
        let array = grid.to_array();
        assert!(array[2][5]);
        assert_eq!(array.iter().flatten().filter(|&&b| b).count(), 1);
    }

    #[test]
    fn set_operations() {
        let a = MovementGrid::from_iter([Position::new(0, 0)]);
        let b = MovementGrid::from_iter([Position::new(0, 1)]);
        assert_eq!((a | b).count(), 2);
        assert!((a & b).is_empty());
        assert_eq!((!a).count(), 63);
    }
}
