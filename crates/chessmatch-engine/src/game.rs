//! Match state machine.
//!
//! A [`Match`] owns the board, the set of pieces in play and the captured
//! pieces. Every move request goes through [`Match::execute_movement`]:
//!
//! 1. the origin is validated (on the board, occupied, owned by the player to move)
//! 2. the destination must be among the piece's possible movements
//! 3. the move is applied tentatively
//! 4. if the mover's own king is now attacked the move is rolled back, otherwise
//!    it is committed together with its castling, en-passant and promotion
//!    bookkeeping, and the turn passes to the other player

use crate::config::MatchConfig;
use crate::movegen::{
    self, castling_destinations, castling_rook_move, en_passant_target, possible_movements,
    MoveContext,
};
use crate::record::{MoveOutcome, MoveRecord, SpecialMove};
use crate::rules::{self, CheckState, StalemateRule};
use crate::MovementGrid;
use chessmatch_core::{Board, BoardError, Color, Piece, PieceId, PieceKind, Position};
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info};

/// Error type for match operations.
///
/// Every error leaves the match exactly as it was before the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MatchError {
    /// Coordinates outside the 8x8 board.
    #[error("position {0} is outside the board")]
    InvalidPosition(Position),
    /// The origin square is empty.
    #[error("no piece selected at {0}")]
    NoPieceSelected(Position),
    /// The origin belongs to the other player, or the destination is not a
    /// possible movement of the selected piece.
    #[error("invalid move: {0}")]
    InvalidMove(Position),
    /// The promotion choice is not a piece this color may promote into.
    #[error("invalid promotion: {0:?}")]
    InvalidPromotion(String),
    /// The match has ended in checkmate or stalemate.
    #[error("match is already finished")]
    MatchFinished,
    /// A piece was placed on an occupied square.
    #[error("position {0} is already occupied")]
    Occupied(Position),
}

impl From<BoardError> for MatchError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::InvalidPosition(p) => MatchError::InvalidPosition(p),
            BoardError::Occupied(p) => MatchError::Occupied(p),
        }
    }
}

/// Pawn that just advanced two squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EnPassant {
    pawn: PieceId,
    position: Position,
}

/// A move applied to the board but not yet committed.
struct Tentative {
    origin: Position,
    destination: Position,
    /// Captured piece and the square it was taken from.
    captured: Option<(Piece, Position)>,
}

/// Standard back-row order, from column 0 to column 7.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A two-player match between Yellow and Red.
#[derive(Debug, Clone)]
pub struct Match {
    board: Board,
    config: MatchConfig,
    turn: u32,
    current_player: Color,
    check: CheckState,
    finished: bool,
    castling_position: Option<Position>,
    en_passant: Option<EnPassant>,
    /// Ids of the pieces on the board.
    match_pieces: BTreeSet<PieceId>,
    captured_pieces: Vec<Piece>,
    /// Pawns taken off the board by promotion.
    promoted_pawns: Vec<Piece>,
    /// Kinds each color may promote into, indexed by [`Color::index`].
    possible_pieces: [BTreeSet<PieceKind>; 2],
    history: Vec<MoveRecord>,
    next_id: u32,
    /// Set when pieces were placed since `check` was last computed.
    needs_evaluation: bool,
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

impl Match {
    /// Creates a match in the standard starting setup with default rules.
    pub fn new() -> Self {
        Self::with_config(MatchConfig::default())
    }

    /// Creates a match in the standard starting setup.
    pub fn with_config(config: MatchConfig) -> Self {
        let mut game = Self::empty(config);
        game.set_board()
            .expect("standard setup fits on an empty board");
        game.needs_evaluation = false;
        game
    }

    /// Creates a match with an empty board, for custom setups built with
    /// [`Match::place_piece`].
    pub fn empty(config: MatchConfig) -> Self {
        Match {
            board: Board::new(),
            config,
            turn: 1,
            current_player: Color::Yellow,
            check: CheckState::None,
            finished: false,
            castling_position: None,
            en_passant: None,
            match_pieces: BTreeSet::new(),
            captured_pieces: Vec::new(),
            promoted_pawns: Vec::new(),
            possible_pieces: [BTreeSet::new(), BTreeSet::new()],
            history: Vec::new(),
            next_id: 0,
            needs_evaluation: false,
        }
    }

    fn set_board(&mut self) -> Result<(), MatchError> {
        for color in Color::ALL {
            for (column, kind) in (0..).zip(BACK_ROW) {
                self.place_piece(kind, color, Position::new(color.back_row(), column))?;
            }
            for column in 0..Position::SIZE {
                self.place_piece(PieceKind::Pawn, color, Position::new(color.pawn_row(), column))?;
            }
        }
        Ok(())
    }

    /// Puts a new piece on the board and registers it as in play.
    ///
    /// Knights, bishops, rooks and queens also become promotion choices for
    /// their color.
    pub fn place_piece(
        &mut self,
        kind: PieceKind,
        color: Color,
        position: Position,
    ) -> Result<PieceId, MatchError> {
        let id = PieceId(self.next_id);
        self.board
            .insert_piece(Piece::new(id, kind, color), position)?;
        self.next_id += 1;
        self.match_pieces.insert(id);
        if kind.is_promotable() {
            self.possible_pieces[color.index()].insert(kind);
        }
        self.needs_evaluation = true;
        Ok(id)
    }

    /// Sets the player to move and evaluates their check status. Intended for
    /// custom setups: a position that is already checkmate or stalemate
    /// finishes the match here.
    ///
    /// A setup that leaves Yellow to move without calling this is evaluated
    /// on the first move request instead.
    pub fn set_current_player(&mut self, color: Color) {
        self.current_player = color;
        self.refresh_state();
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the rule configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Returns the turn number, starting at 1.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Returns the player to move.
    pub fn current_player(&self) -> Color {
        self.current_player
    }

    /// Returns the check status.
    ///
    /// After a committed move this is the status of the player now to move.
    /// After a rolled-back move it is [`CheckState::Check`].
    pub fn check(&self) -> CheckState {
        self.check
    }

    /// Returns true once the match ended in checkmate or stalemate.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns the pawn that just advanced two squares, if any.
    pub fn en_passant(&self) -> Option<&Piece> {
        let ep = self.en_passant?;
        self.board
            .get(ep.position)
            .filter(|pawn| pawn.id() == ep.pawn)
    }

    /// Returns true if the player to move has a pawn that can capture the
    /// [`en_passant`](Self::en_passant) pawn.
    pub fn en_passant_allowed(&self) -> bool {
        let context = self.context_for(self.current_player);
        context.en_passant.is_some()
            && self
                .board
                .pieces_of(self.current_player)
                .filter(|p| p.kind() == PieceKind::Pawn)
                .any(|pawn| {
                    pawn.position().is_some_and(|from| {
                        en_passant_target(&self.board, pawn, from, &context).is_some()
                    })
                })
    }

    /// Returns the ids of the pieces on the board.
    pub fn match_pieces(&self) -> &BTreeSet<PieceId> {
        &self.match_pieces
    }

    /// Returns every captured piece in capture order.
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured_pieces
    }

    /// Returns the captured pieces of one color.
    pub fn captured_of(&self, color: Color) -> Vec<&Piece> {
        self.captured_pieces
            .iter()
            .filter(|p| p.color() == color)
            .collect()
    }

    /// Returns the captured Red pieces.
    pub fn red_captured_pieces(&self) -> Vec<&Piece> {
        self.captured_of(Color::Red)
    }

    /// Returns the captured Yellow pieces.
    pub fn yellow_captured_pieces(&self) -> Vec<&Piece> {
        self.captured_of(Color::Yellow)
    }

    /// Returns the pawns replaced by promotion.
    pub fn promoted_pawns(&self) -> &[Piece] {
        &self.promoted_pawns
    }

    /// Returns the kinds `color` may promote into.
    pub fn possible_pieces(&self, color: Color) -> &BTreeSet<PieceKind> {
        &self.possible_pieces[color.index()]
    }

    /// Returns the committed moves in order.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    fn context_for(&self, color: Color) -> MoveContext {
        let en_passant = self
            .en_passant
            .filter(|ep| {
                self.board
                    .get(ep.position)
                    .is_some_and(|pawn| pawn.id() == ep.pawn && pawn.color() != color)
            })
            .map(|ep| ep.position);
        MoveContext {
            en_passant,
            castling: true,
        }
    }

    /// Returns every square the piece at `origin` could move to, ignoring the
    /// safety of its own king.
    pub fn possible_movements(&self, origin: Position) -> Result<MovementGrid, MatchError> {
        let piece = self
            .board
            .piece_at(origin)?
            .ok_or(MatchError::NoPieceSelected(origin))?;
        let context = self.context_for(piece.color());
        Ok(possible_movements(&self.board, piece, &context))
    }

    /// Same as [`possible_movements`](Self::possible_movements), as a
    /// `[row][column]` boolean grid.
    pub fn possible_movement_grid(&self, origin: Position) -> Result<[[bool; 8]; 8], MatchError> {
        Ok(self.possible_movements(origin)?.to_array())
    }

    /// Returns the destinations of the piece at `origin` that keep its own
    /// king safe.
    pub fn legal_destinations(&self, origin: Position) -> Result<MovementGrid, MatchError> {
        let piece = self
            .board
            .piece_at(origin)?
            .ok_or(MatchError::NoPieceSelected(origin))?;
        let context = self.context_for(piece.color());
        Ok(movegen::legal_movements(&self.board, origin, &context))
    }

    /// Evaluates whether the king of `color` is in check or checkmate under
    /// the configured checkmate rule.
    pub fn verify_check(&self, color: Color) -> CheckState {
        let context = self.context_for(color);
        rules::verify_check(&self.board, color, self.config.checkmate_rule, &context)
    }

    fn evaluate_state(&self, color: Color) -> CheckState {
        let state = self.verify_check(color);
        if state == CheckState::None
            && self.config.stalemate_rule == StalemateRule::AllPieces
            && rules::is_stalemate(&self.board, color, &self.context_for(color))
        {
            return CheckState::Stalemate;
        }
        state
    }

    fn refresh_state(&mut self) {
        self.needs_evaluation = false;
        self.check = self.evaluate_state(self.current_player);
        if self.check.is_terminal() {
            self.finish();
        }
    }

    /// Checks that `position` holds a piece of the player to move.
    ///
    /// With [`StalemateRule::KingOnly`], selecting a king that has no legal
    /// destination ends the match in stalemate.
    pub fn validate_origin(&mut self, position: Position) -> Result<(), MatchError> {
        if self.needs_evaluation {
            self.refresh_state();
        }
        if self.finished {
            return Err(MatchError::MatchFinished);
        }
        let piece = self
            .board
            .piece_at(position)?
            .ok_or(MatchError::NoPieceSelected(position))?;
        if piece.color() != self.current_player {
            return Err(MatchError::InvalidMove(position));
        }

        if piece.kind() == PieceKind::King && self.config.stalemate_rule == StalemateRule::KingOnly
        {
            let context = self.context_for(self.current_player);
            if rules::is_king_stuck(&self.board, self.current_player, &context) {
                self.check = CheckState::Stalemate;
                self.finish();
            }
        }
        Ok(())
    }

    /// Moves the piece at `origin` to `destination`, promoting with the
    /// configured default piece if a pawn reaches the last row.
    pub fn execute_movement(
        &mut self,
        origin: Position,
        destination: Position,
    ) -> Result<MoveOutcome, MatchError> {
        let promotion = self.config.default_promotion.clone();
        self.execute_movement_with_promotion(origin, destination, &promotion)
    }

    /// Moves the piece at `origin` to `destination`.
    ///
    /// `promotion` names the piece a pawn reaching the last row turns into,
    /// matched case-insensitively against [`Match::possible_pieces`]. It is
    /// ignored for other moves.
    ///
    /// Returns [`MoveOutcome::SelfCheck`] if the move would leave the mover's
    /// king attacked; in that case nothing changes except that
    /// [`check`](Self::check) reports [`CheckState::Check`].
    pub fn execute_movement_with_promotion(
        &mut self,
        origin: Position,
        destination: Position,
        promotion: &str,
    ) -> Result<MoveOutcome, MatchError> {
        self.validate_origin(origin)?;
        if self.finished {
            return Err(MatchError::MatchFinished);
        }
        if !self.board.is_valid_position(destination) {
            return Err(MatchError::InvalidPosition(destination));
        }

        let color = self.current_player;
        let context = self.context_for(color);
        let piece = self
            .board
            .get(origin)
            .ok_or(MatchError::NoPieceSelected(origin))?;
        let kind = piece.kind();

        if !possible_movements(&self.board, piece, &context).contains(destination) {
            debug!("Rejected {} {} {} -> {}", color, kind, origin, destination);
            return Err(MatchError::InvalidMove(destination));
        }

        let capture_at = match kind {
            PieceKind::Pawn => en_passant_target(&self.board, piece, origin, &context)
                .filter(|&target| target == destination)
                .and(context.en_passant),
            _ => None,
        };
        let castling = kind == PieceKind::King
            && castling_destinations(&self.board, piece).contains(destination);
        let promotion = if kind == PieceKind::Pawn && destination.row == color.promotion_row() {
            Some(self.resolve_promotion(color, promotion)?)
        } else {
            None
        };

        if castling {
            self.castling_position = Some(destination);
        }
        let tentative = self.apply_tentative(origin, destination, capture_at)?;

        // Only the attack matters here; whether it would be mate is irrelevant
        // to an illegal move.
        if movegen::is_king_attacked(&self.board, color) {
            self.rollback(tentative)?;
            self.castling_position = None;
            self.check = CheckState::Check;
            debug!(
                "Rolled back {} {} {} -> {}: own king left in check",
                color, kind, origin, destination
            );
            return Ok(MoveOutcome::SelfCheck);
        }

        let record = self.commit(tentative, kind, promotion)?;
        Ok(MoveOutcome::Moved(record))
    }

    fn resolve_promotion(&self, color: Color, name: &str) -> Result<PieceKind, MatchError> {
        let kind: PieceKind = name
            .parse()
            .map_err(|_| MatchError::InvalidPromotion(name.to_string()))?;
        if self.possible_pieces(color).contains(&kind) {
            Ok(kind)
        } else {
            Err(MatchError::InvalidPromotion(name.to_string()))
        }
    }

    fn apply_tentative(
        &mut self,
        origin: Position,
        destination: Position,
        capture_at: Option<Position>,
    ) -> Result<Tentative, MatchError> {
        let mut piece = self
            .board
            .remove_piece(origin)?
            .ok_or(MatchError::NoPieceSelected(origin))?;
        piece.increment_moves();

        let capture_square = capture_at.unwrap_or(destination);
        let captured = self.board.remove_piece(capture_square)?;
        if let Some(captured) = &captured {
            self.match_pieces.remove(&captured.id());
        }
        self.board.insert_piece(piece, destination)?;

        Ok(Tentative {
            origin,
            destination,
            captured: captured.map(|c| (c, capture_square)),
        })
    }

    fn rollback(&mut self, tentative: Tentative) -> Result<(), MatchError> {
        if let Some(mut piece) = self.board.remove_piece(tentative.destination)? {
            piece.decrement_moves();
            self.board.insert_piece(piece, tentative.origin)?;
        }
        if let Some((captured, at)) = tentative.captured {
            self.match_pieces.insert(captured.id());
            self.board.insert_piece(captured, at)?;
        }
        Ok(())
    }

    fn commit(
        &mut self,
        tentative: Tentative,
        kind: PieceKind,
        promotion: Option<PieceKind>,
    ) -> Result<MoveRecord, MatchError> {
        let Tentative {
            origin,
            destination,
            captured,
        } = tentative;
        let color = self.current_player;
        let mut special = None;
        let mut captured_kind = None;

        if let Some((piece, at)) = captured {
            captured_kind = Some(piece.kind());
            if at != destination {
                special = Some(SpecialMove::EnPassant { captured_at: at });
            }
            debug!("{} captured {} on {}", color, piece, at);
            self.captured_pieces.push(piece);
        }

        if self.castling_position == Some(destination) {
            special = Some(self.castling_move(origin, destination)?);
        }
        self.castling_position = None;

        // The window closes with every committed move and only reopens for a
        // fresh two-square advance.
        self.en_passant = None;
        if kind == PieceKind::Pawn && (destination.row - origin.row).abs() == 2 {
            if let Some(pawn) = self.board.get(destination) {
                self.en_passant = Some(EnPassant {
                    pawn: pawn.id(),
                    position: destination,
                });
            }
            special = Some(SpecialMove::DoubleStep);
        }

        if let Some(new_kind) = promotion {
            self.promote(destination, new_kind)?;
            special = Some(SpecialMove::Promotion { kind: new_kind });
        }

        let record = MoveRecord {
            turn: self.turn,
            color,
            piece: kind,
            origin,
            destination,
            captured: captured_kind,
            special,
        };
        debug!("{}", record);
        self.history.push(record.clone());

        self.turn += 1;
        self.current_player = color.opposite();
        self.refresh_state();
        Ok(record)
    }

    /// Relocates the rook of a castling king that went from `king_from` to
    /// `king_to`.
    fn castling_move(
        &mut self,
        king_from: Position,
        king_to: Position,
    ) -> Result<SpecialMove, MatchError> {
        let (rook_from, rook_to) = castling_rook_move(king_from, king_to);
        let mut rook = self
            .board
            .remove_piece(rook_from)?
            .ok_or(MatchError::NoPieceSelected(rook_from))?;
        rook.increment_moves();
        self.board.insert_piece(rook, rook_to)?;
        Ok(SpecialMove::Castling { rook_from, rook_to })
    }

    /// Replaces the pawn at `at` with a new piece of `kind`.
    fn promote(&mut self, at: Position, kind: PieceKind) -> Result<(), MatchError> {
        let pawn = self
            .board
            .remove_piece(at)?
            .ok_or(MatchError::NoPieceSelected(at))?;
        self.match_pieces.remove(&pawn.id());

        let id = PieceId(self.next_id);
        self.next_id += 1;
        self.board
            .insert_piece(Piece::new(id, kind, pawn.color()), at)?;
        self.match_pieces.insert(id);
        debug!("{} pawn promoted to {} on {}", pawn.color(), kind, at);
        self.promoted_pawns.push(pawn);
        Ok(())
    }

    fn finish(&mut self) {
        self.finished = true;
        info!(
            "Match finished on turn {}: {:?} for {}",
            self.turn, self.check, self.current_player
        );
    }
}
