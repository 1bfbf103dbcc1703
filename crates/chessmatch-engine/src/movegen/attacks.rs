//! Attack sets for all piece types.
//!
//! An attack set marks every square a piece bears on, regardless of what
//! stands there. Friendly-occupied squares are included (the piece defends
//! them), which is what check detection and castling safety need.

use crate::MovementGrid;
use chessmatch_core::{Board, Color, Piece, PieceKind, Position};

/// Knight jump offsets as `(row, column)` deltas.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King step offsets.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Orthogonal ray directions.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Diagonal ray directions.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns the squares reachable by a single fixed offset from `from`.
pub fn leaper_attacks(from: Position, offsets: &[(i8, i8)]) -> MovementGrid {
    offsets
        .iter()
        .filter_map(|&(d_row, d_column)| from.offset(d_row, d_column))
        .collect()
}

/// Walks each ray from `from` until it leaves the board or hits a piece.
///
/// The blocking square is included.
pub fn slider_attacks(board: &Board, from: Position, directions: &[(i8, i8)]) -> MovementGrid {
    let mut attacks = MovementGrid::EMPTY;
    for &(d_row, d_column) in directions {
        let mut current = from;
        while let Some(next) = current.offset(d_row, d_column) {
            attacks.set(next);
            if board.get(next).is_some() {
                break;
            }
            current = next;
        }
    }
    attacks
}

/// Returns the two diagonal-forward squares a pawn of `color` attacks.
pub fn pawn_attacks(from: Position, color: Color) -> MovementGrid {
    let d_row = color.pawn_direction();
    leaper_attacks(from, &[(d_row, -1), (d_row, 1)])
}

/// Returns the attack set of a piece standing at `from`.
pub fn attacks_from(board: &Board, kind: PieceKind, color: Color, from: Position) -> MovementGrid {
    match kind {
        PieceKind::Pawn => pawn_attacks(from, color),
        PieceKind::Knight => leaper_attacks(from, &KNIGHT_OFFSETS),
        PieceKind::Bishop => slider_attacks(board, from, &BISHOP_DIRECTIONS),
        PieceKind::Rook => slider_attacks(board, from, &ROOK_DIRECTIONS),
        PieceKind::Queen => {
            slider_attacks(board, from, &ROOK_DIRECTIONS)
                | slider_attacks(board, from, &BISHOP_DIRECTIONS)
        }
        PieceKind::King => leaper_attacks(from, &KING_OFFSETS),
    }
}

/// Returns the attack set of a piece on the board. Empty for pieces that are
/// not on a board.
pub fn attacked_squares(board: &Board, piece: &Piece) -> MovementGrid {
    match piece.position() {
        Some(from) => attacks_from(board, piece.kind(), piece.color(), from),
        None => MovementGrid::EMPTY,
    }
}
