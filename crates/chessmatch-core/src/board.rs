//! Fixed 8x8 board storage.

use crate::{Color, Piece, PieceKind, Position};
use std::fmt;
use thiserror::Error;

/// Errors raised by board storage operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    InvalidPosition(Position),

    #[error("position {0} is already occupied")]
    Occupied(Position),
}

/// The board grid. Each cell holds at most one piece.
///
/// The board owns every piece that is in play; a piece removed from the board
/// is handed back to the caller by value.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Board {
            cells: Default::default(),
        }
    }

    /// Returns true if the position lies within the board.
    #[inline]
    pub fn is_valid_position(&self, position: Position) -> bool {
        position.is_on_board()
    }

    fn check(&self, position: Position) -> Result<(usize, usize), BoardError> {
        if self.is_valid_position(position) {
            Ok((position.row as usize, position.column as usize))
        } else {
            Err(BoardError::InvalidPosition(position))
        }
    }

    /// Returns the piece at the given position.
    pub fn piece_at(&self, position: Position) -> Result<Option<&Piece>, BoardError> {
        let (row, column) = self.check(position)?;
        Ok(self.cells[row][column].as_ref())
    }

    /// Returns the piece at an on-board position, `None` for empty or
    /// off-board squares.
    #[inline]
    pub fn get(&self, position: Position) -> Option<&Piece> {
        self.piece_at(position).ok().flatten()
    }

    /// Returns true if the position is on the board and empty.
    #[inline]
    pub fn is_empty(&self, position: Position) -> bool {
        position.is_on_board() && self.get(position).is_none()
    }

    /// Places a piece on an empty square and records the square on the piece.
    pub fn insert_piece(&mut self, mut piece: Piece, position: Position) -> Result<(), BoardError> {
        let (row, column) = self.check(position)?;
        let cell = &mut self.cells[row][column];
        if cell.is_some() {
            return Err(BoardError::Occupied(position));
        }
        piece.set_position(Some(position));
        *cell = Some(piece);
        Ok(())
    }

    /// Clears the square, returning whatever piece stood there.
    ///
    /// The returned piece no longer carries a position.
    pub fn remove_piece(&mut self, position: Position) -> Result<Option<Piece>, BoardError> {
        let (row, column) = self.check(position)?;
        Ok(self.cells[row][column].take().map(|mut piece| {
            piece.set_position(None);
            piece
        }))
    }

    /// Iterates over every piece on the board, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.cells.iter().flatten().flatten()
    }

    /// Iterates over the pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color() == color)
    }

    /// Returns the position of the king of the given color.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|p| p.kind() == PieceKind::King)
            .and_then(Piece::position)
    }

    /// Returns the number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Some(p) if p.color() == Color::Yellow => p.kind().symbol(),
                    Some(p) => p.kind().symbol().to_ascii_lowercase(),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
