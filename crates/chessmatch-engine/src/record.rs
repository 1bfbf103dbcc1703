//! Committed move records.

use chessmatch_core::{Color, PieceKind, Position};
use serde::Serialize;
use std::fmt;

/// Special-move bookkeeping performed alongside a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SpecialMove {
    /// A pawn advanced two squares and may be taken en passant.
    DoubleStep,
    /// The king castled and the rook hopped over it.
    Castling { rook_from: Position, rook_to: Position },
    /// A pawn captured en passant; the victim stood on `captured_at`.
    EnPassant { captured_at: Position },
    /// The pawn was replaced on the last row.
    Promotion { kind: PieceKind },
}

/// A move that was applied to the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Turn number the move was played on.
    pub turn: u32,
    pub color: Color,
    /// Kind of the piece that moved (a pawn for promotions).
    pub piece: PieceKind,
    pub origin: Position,
    pub destination: Position,
    /// Kind of the piece captured by the move, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured: Option<PieceKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialMove>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} {} {}{}{}",
            self.turn,
            self.color,
            self.piece,
            self.origin,
            if self.captured.is_some() { "x" } else { "-" },
            self.destination
        )?;
        match self.special {
            Some(SpecialMove::Promotion { kind }) => write!(f, "={}", kind.symbol()),
            Some(SpecialMove::EnPassant { .. }) => write!(f, " e.p."),
            Some(SpecialMove::Castling { .. }) => write!(f, " (castling)"),
            _ => Ok(()),
        }
    }
}

/// What happened to a move request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was committed.
    Moved(MoveRecord),
    /// The move would have left the mover's king attacked and was rolled
    /// back. The board is exactly as before the request.
    SelfCheck,
}

impl MoveOutcome {
    /// Returns true if the move was committed.
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self, MoveOutcome::Moved(_))
    }

    /// Returns the committed record, if any.
    pub fn record(&self) -> Option<&MoveRecord> {
        match self {
            MoveOutcome::Moved(record) => Some(record),
            MoveOutcome::SelfCheck => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Position {
        Position::from_algebraic(name).unwrap()
    }

    #[test]
    fn display_capture_and_promotion() {
        let record = MoveRecord {
            turn: 31,
            color: Color::Yellow,
            piece: PieceKind::Pawn,
            origin: sq("b7"),
            destination: sq("a8"),
            captured: Some(PieceKind::Rook),
            special: Some(SpecialMove::Promotion {
                kind: PieceKind::Queen,
            }),
        };
        assert_eq!(record.to_string(), "31. Yellow Pawn b7xa8=Q");
    }

    #[test]
    fn outcome_accessors() {
        let record = MoveRecord {
            turn: 1,
            color: Color::Yellow,
            piece: PieceKind::Knight,
            origin: sq("g1"),
            destination: sq("f3"),
            captured: None,
            special: None,
        };
        assert_eq!(record.to_string(), "1. Yellow Knight g1-f3");
        let moved = MoveOutcome::Moved(record.clone());
        assert!(moved.is_moved());
        assert_eq!(moved.record(), Some(&record));
        assert!(!MoveOutcome::SelfCheck.is_moved());
        assert_eq!(MoveOutcome::SelfCheck.record(), None);
    }
}
