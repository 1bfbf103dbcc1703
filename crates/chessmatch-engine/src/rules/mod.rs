//! Check, checkmate and stalemate detection.
//!
//! The match delegates the "how is this king doing" question to the functions
//! here. Two policies are selectable through [`MatchConfig`](crate::MatchConfig):
//! a full legal-move search, or the lighter single-attacker / king-only tests.

use crate::movegen::{
    attacked_squares, attacks_from, has_legal_move, is_king_attacked, legal_movements,
    possible_movements, MoveContext,
};
use chessmatch_core::{Board, Color, PieceKind};
use serde::{Deserialize, Serialize};

/// Check status of the player to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckState {
    /// King not attacked.
    #[default]
    None,
    /// King attacked with a response available. Also reported, transiently,
    /// after a move was rolled back because it exposed the mover's own king.
    Check,
    /// King attacked with no response.
    Checkmate,
    /// No move available while the king is not attacked.
    Stalemate,
}

impl CheckState {
    /// Returns true for the states that end the match.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, CheckState::Checkmate | CheckState::Stalemate)
    }
}

/// How checkmate is decided once a king is attacked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckmateRule {
    /// Checkmate only if no piece of the attacked side has a move that leaves
    /// its king safe.
    #[default]
    Full,
    /// Looks only at the first attacker found: checkmate unless the king has a
    /// destination that this attacker does not also cover. Blocks, captures by
    /// other pieces and double checks are not considered.
    SingleAttacker,
}

/// How stalemate is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StalemateRule {
    /// After every move, the side to move has no legal move and is not in check.
    #[default]
    AllPieces,
    /// Only when a king is selected and has nowhere to go.
    KingOnly,
}

/// Evaluates the check status of `color` on the given board.
pub fn verify_check(
    board: &Board,
    color: Color,
    rule: CheckmateRule,
    context: &MoveContext,
) -> CheckState {
    if !is_king_attacked(board, color) {
        return CheckState::None;
    }
    match rule {
        CheckmateRule::Full => {
            if has_legal_move(board, color, context) {
                CheckState::Check
            } else {
                CheckState::Checkmate
            }
        }
        CheckmateRule::SingleAttacker => single_attacker_check(board, color),
    }
}

fn single_attacker_check(board: &Board, color: Color) -> CheckState {
    let Some(king) = board
        .pieces_of(color)
        .find(|p| p.kind() == PieceKind::King)
    else {
        return CheckState::None;
    };
    let Some(king_at) = king.position() else {
        return CheckState::None;
    };
    let king_moves = possible_movements(
        board,
        king,
        &MoveContext {
            en_passant: None,
            castling: false,
        },
    );

    // Rays are traced as if the king were absent so that squares behind it
    // on the attacking line stay covered.
    let mut without_king = board.clone();
    if without_king.remove_piece(king_at).is_err() {
        return CheckState::None;
    }

    for enemy in board.pieces_of(color.opposite()) {
        if !attacked_squares(board, enemy).contains(king_at) {
            continue;
        }
        if let Some(from) = enemy.position() {
            let covered = attacks_from(&without_king, enemy.kind(), enemy.color(), from);
            return if king_moves.into_iter().any(|to| !covered.contains(to)) {
                CheckState::Check
            } else {
                CheckState::Checkmate
            };
        }
    }
    CheckState::None
}

/// Returns true if `color` is stalemated: not in check and without a legal
/// move.
pub fn is_stalemate(board: &Board, color: Color, context: &MoveContext) -> bool {
    !is_king_attacked(board, color) && !has_legal_move(board, color, context)
}

/// Returns true if the king of `color` has no legal destination.
pub fn is_king_stuck(board: &Board, color: Color, context: &MoveContext) -> bool {
    board
        .king_position(color)
        .is_some_and(|king| legal_movements(board, king, context).is_empty())
}
