//! Move text parsing.
//!
//! Moves are written as origin and destination squares, optionally followed by
//! the symbol of the promotion piece: `e2e4`, `b7b8q`, `g2g1N`.

use chessmatch_core::{PieceKind, Position};
use std::str::FromStr;
use thiserror::Error;

/// A move request read from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    pub origin: Position,
    pub destination: Position,
    pub promotion: Option<PieceKind>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveTextError {
    #[error("move {0:?} must look like e2e4 or b7b8q")]
    Malformed(String),
    #[error("unknown square {square:?} in move {text:?}")]
    UnknownSquare { text: String, square: String },
    #[error("unknown promotion piece {piece:?} in move {text:?}")]
    UnknownPromotion { text: String, piece: char },
}

impl FromStr for MoveText {
    type Err = MoveTextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(MoveTextError::Malformed(s.to_string()));
        }

        let square = |name: &str| {
            Position::from_algebraic(name).ok_or_else(|| MoveTextError::UnknownSquare {
                text: text.to_string(),
                square: name.to_string(),
            })
        };
        let origin = square(&text[0..2])?;
        let destination = square(&text[2..4])?;

        let promotion = match text[4..].chars().next() {
            None => None,
            Some(symbol) => Some(
                PieceKind::ALL
                    .into_iter()
                    .filter(|kind| kind.is_promotable())
                    .find(|kind| kind.symbol().eq_ignore_ascii_case(&symbol))
                    .ok_or(MoveTextError::UnknownPromotion {
                        text: text.to_string(),
                        piece: symbol,
                    })?,
            ),
        };

        Ok(MoveText {
            origin,
            destination,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_move() {
        let mv: MoveText = "a2a3".parse().unwrap();
        assert_eq!(mv.origin, Position::new(6, 0));
        assert_eq!(mv.destination, Position::new(5, 0));
        assert_eq!(mv.promotion, None);
    }

    #[test]
    fn promotion_suffix_any_case() {
        let mv: MoveText = "b7b8q".parse().unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        let mv: MoveText = "g2g1N".parse().unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Knight));
    }

    #[test]
    fn rejects_bad_text() {
        assert_eq!(
            "e2".parse::<MoveText>(),
            Err(MoveTextError::Malformed("e2".to_string()))
        );
        assert!(matches!(
            "e2i4".parse::<MoveText>(),
            Err(MoveTextError::UnknownSquare { square, .. }) if square == "i4"
        ));
        assert!(matches!(
            "e7e8k".parse::<MoveText>(),
            Err(MoveTextError::UnknownPromotion { piece: 'k', .. })
        ));
    }
}
