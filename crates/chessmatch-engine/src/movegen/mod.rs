//! Movement generation.
//!
//! Each piece kind produces the set of squares it could move to on the current
//! board, ignoring whether the move would leave its own king attacked. Filtering
//! for king safety is done by [`is_move_safe`] and by the match itself.
//!
//! Pawn and king rules that depend on match history (en passant, castling) read
//! it from an explicit [`MoveContext`] instead of reaching back into the match.

mod attacks;

use crate::MovementGrid;
use chessmatch_core::{Board, BoardError, Color, Piece, PieceKind, Position};

pub use attacks::{
    attacked_squares, attacks_from, leaper_attacks, pawn_attacks, slider_attacks,
    BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS,
};

/// Match state needed by movement generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveContext {
    /// Position of an enemy pawn that may be captured en passant.
    pub en_passant: Option<Position>,
    /// Whether castling destinations are generated for the king.
    pub castling: bool,
}

impl MoveContext {
    /// Context with castling enabled and no en-passant target.
    pub const fn standard() -> Self {
        MoveContext {
            en_passant: None,
            castling: true,
        }
    }
}

/// Returns every square the piece could move to, ignoring own-king safety.
///
/// Never marks a square occupied by a piece of the same color.
pub fn possible_movements(board: &Board, piece: &Piece, context: &MoveContext) -> MovementGrid {
    let Some(from) = piece.position() else {
        return MovementGrid::EMPTY;
    };
    let color = piece.color();

    let grid = match piece.kind() {
        PieceKind::Pawn => pawn_movements(board, piece, from, context),
        PieceKind::King if context.castling => {
            attacks_from(board, PieceKind::King, color, from)
                | castling_destinations(board, piece)
        }
        kind => attacks_from(board, kind, color, from),
    };

    grid & !occupied_by(board, color)
}

fn occupied_by(board: &Board, color: Color) -> MovementGrid {
    board.pieces_of(color).filter_map(Piece::position).collect()
}

fn pawn_movements(board: &Board, pawn: &Piece, from: Position, context: &MoveContext) -> MovementGrid {
    let color = pawn.color();
    let d_row = color.pawn_direction();
    let mut grid = MovementGrid::EMPTY;

    if let Some(one) = from.offset(d_row, 0).filter(|&p| board.is_empty(p)) {
        grid.set(one);
        if pawn.is_unmoved() && from.row == color.pawn_row() {
            if let Some(two) = one.offset(d_row, 0).filter(|&p| board.is_empty(p)) {
                grid.set(two);
            }
        }
    }

    for target in pawn_attacks(from, color) {
        if board.get(target).is_some_and(|p| p.color() != color) {
            grid.set(target);
        }
    }

    if let Some(target) = en_passant_target(board, pawn, from, context) {
        grid.set(target);
    }

    grid
}

/// Returns the square a pawn lands on when capturing the context's en-passant
/// victim, if that capture is available to it.
pub fn en_passant_target(
    board: &Board,
    pawn: &Piece,
    from: Position,
    context: &MoveContext,
) -> Option<Position> {
    let victim_at = context.en_passant?;
    let victim = board.get(victim_at)?;
    if victim.kind() != PieceKind::Pawn
        || victim.color() == pawn.color()
        || victim_at.row != from.row
        || (victim_at.column - from.column).abs() != 1
    {
        return None;
    }
    from.offset(pawn.color().pawn_direction(), victim_at.column - from.column)
        .filter(|&p| board.is_empty(p))
}

/// Returns the castling destinations currently open to a king.
///
/// The king and the corner rook must both be unmoved, every square between
/// them empty, and the king's square, the square it crosses and its
/// destination must not be attacked.
pub fn castling_destinations(board: &Board, king: &Piece) -> MovementGrid {
    let mut grid = MovementGrid::EMPTY;
    let Some(from) = king.position() else {
        return grid;
    };
    if king.kind() != PieceKind::King || !king.is_unmoved() {
        return grid;
    }

    let enemy = king.color().opposite();
    for rook_column in [0, Position::SIZE - 1] {
        let rook_at = Position::new(from.row, rook_column);
        let rook_ready = board.get(rook_at).is_some_and(|rook| {
            rook.kind() == PieceKind::Rook && rook.color() == king.color() && rook.is_unmoved()
        });
        if !rook_ready {
            continue;
        }

        let step: i8 = if rook_column < from.column { -1 } else { 1 };
        let (low, high) = if step < 0 {
            (rook_column + 1, from.column)
        } else {
            (from.column + 1, rook_column)
        };
        let path_clear = (low..high).all(|column| board.is_empty(Position::new(from.row, column)));
        if !path_clear {
            continue;
        }

        let Some(destination) = from.offset(0, 2 * step) else {
            continue;
        };
        let path_safe = [0, step, 2 * step].into_iter().all(|d_column| {
            from.offset(0, d_column)
                .is_some_and(|p| !is_square_attacked(board, p, enemy))
        });
        if path_safe {
            grid.set(destination);
        }
    }
    grid
}

/// Returns where the rook goes for a king castling from `king_from` to
/// `king_to`, as `(rook_from, rook_to)`.
pub fn castling_rook_move(king_from: Position, king_to: Position) -> (Position, Position) {
    if king_to.column < king_from.column {
        (
            Position::new(king_from.row, 0),
            Position::new(king_from.row, king_to.column + 1),
        )
    } else {
        (
            Position::new(king_from.row, Position::SIZE - 1),
            Position::new(king_from.row, king_to.column - 1),
        )
    }
}

/// Returns true if any piece of `by_color` attacks the square.
pub fn is_square_attacked(board: &Board, position: Position, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|piece| attacked_squares(board, piece).contains(position))
}

/// Returns true if the king of `king_color` is attacked. A board without that
/// king is never in check.
pub fn is_king_attacked(board: &Board, king_color: Color) -> bool {
    board
        .king_position(king_color)
        .is_some_and(|king| is_square_attacked(board, king, king_color.opposite()))
}

/// Returns true if moving the piece at `from` to `to` leaves its own king
/// safe. The move is played on a scratch copy of the board, including the
/// removal of an en-passant victim and the rook hop of a castling move.
pub fn is_move_safe(board: &Board, from: Position, to: Position, context: &MoveContext) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    let color = piece.color();
    let capture_at = match piece.kind() {
        PieceKind::Pawn => en_passant_target(board, piece, from, context)
            .filter(|&target| target == to)
            .and(context.en_passant),
        _ => None,
    };
    let castling = piece.kind() == PieceKind::King && (to.column - from.column).abs() == 2;

    let mut scratch = board.clone();
    play_on(&mut scratch, from, to, capture_at, castling).is_ok()
        && !is_king_attacked(&scratch, color)
}

fn play_on(
    board: &mut Board,
    from: Position,
    to: Position,
    capture_at: Option<Position>,
    castling: bool,
) -> Result<(), BoardError> {
    if let Some(victim) = capture_at {
        board.remove_piece(victim)?;
    }
    let moving = board.remove_piece(from)?;
    board.remove_piece(to)?;
    if let Some(moving) = moving {
        board.insert_piece(moving, to)?;
    }
    if castling {
        let (rook_from, rook_to) = castling_rook_move(from, to);
        if let Some(rook) = board.remove_piece(rook_from)? {
            board.insert_piece(rook, rook_to)?;
        }
    }
    Ok(())
}

/// Returns the destinations from `from` that keep the mover's king safe.
pub fn legal_movements(board: &Board, from: Position, context: &MoveContext) -> MovementGrid {
    let Some(piece) = board.get(from) else {
        return MovementGrid::EMPTY;
    };
    possible_movements(board, piece, context)
        .into_iter()
        .filter(|&to| is_move_safe(board, from, to, context))
        .collect()
}

/// Returns true if `color` has at least one move that keeps its king safe.
pub fn has_legal_move(board: &Board, color: Color, context: &MoveContext) -> bool {
    board
        .pieces_of(color)
        .filter_map(Piece::position)
        .any(|from| !legal_movements(board, from, context).is_empty())
}
