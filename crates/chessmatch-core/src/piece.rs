//! Chess piece representation.

use crate::{Color, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The six types of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

/// Error returned when a piece name does not match any [`PieceKind`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown piece name: {0:?}")]
pub struct UnknownPieceKind(pub String);

impl PieceKind {
    /// All piece types in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the display name of the piece.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }

    /// Returns the single-letter symbol used on a board diagram.
    pub const fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Returns true if a pawn may be promoted into this kind of piece.
    #[inline]
    pub const fn is_promotable(self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }
}

impl FromStr for PieceKind {
    type Err = UnknownPieceKind;

    /// Matches a piece name case-insensitively (`"queen"`, `"QUEEN"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        PieceKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| UnknownPieceKind(s.to_string()))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Stable identity of a piece for the lifetime of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece with its identity and movement history.
///
/// `position` is maintained by the [`Board`](crate::Board): it is set when
/// the piece is inserted and cleared when it is removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    color: Color,
    position: Option<Position>,
    move_count: u32,
}

impl Piece {
    /// Creates a piece that is not yet on a board.
    pub const fn new(id: PieceId, kind: PieceKind, color: Color) -> Self {
        Piece {
            id,
            kind,
            color,
            position: None,
            move_count: 0,
        }
    }

    #[inline]
    pub const fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns the square the piece stands on, if it is on a board.
    #[inline]
    pub const fn position(&self) -> Option<Position> {
        self.position
    }

    /// Returns how many times the piece has moved.
    #[inline]
    pub const fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Returns true if the piece has never moved.
    #[inline]
    pub const fn is_unmoved(&self) -> bool {
        self.move_count == 0
    }

    /// Records one completed move.
    pub fn increment_moves(&mut self) {
        self.move_count += 1;
    }

    /// Undoes one recorded move.
    pub fn decrement_moves(&mut self) {
        self.move_count = self.move_count.saturating_sub(1);
    }

    pub(crate) fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
