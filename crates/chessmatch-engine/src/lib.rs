//! Rules engine for a two-player chess match.
//!
//! This crate provides:
//! - [`Match`] - the match state machine: turn order, move validation with
//!   rollback of self-checking moves, captures, castling, en passant and
//!   promotion, and check / checkmate / stalemate tracking
//! - [`MovementGrid`] - the set of squares a piece can reach
//! - [`movegen`] - per-piece movement generation and attack detection
//! - [`rules`] - check, checkmate and stalemate policies
//! - [`MatchConfig`] - rule selection loaded from TOML
//!
//! # Example
//!
//! ```
//! use chessmatch_core::{Color, Position};
//! use chessmatch_engine::{CheckState, Match, MoveOutcome};
//!
//! let mut game = Match::new();
//! let a2 = Position::from_algebraic("a2").unwrap();
//! let a3 = Position::from_algebraic("a3").unwrap();
//!
//! let outcome = game.execute_movement(a2, a3).unwrap();
//! assert!(matches!(outcome, MoveOutcome::Moved(_)));
//! assert_eq!(game.turn(), 2);
//! assert_eq!(game.current_player(), Color::Red);
//! assert_eq!(game.check(), CheckState::None);
//! ```

mod config;
mod game;
mod grid;
pub mod movegen;
mod record;
pub mod rules;

pub use config::{ConfigError, MatchConfig};
pub use game::{Match, MatchError};
pub use grid::{MovementGrid, MovementGridIter};
pub use movegen::MoveContext;
pub use record::{MoveOutcome, MoveRecord, SpecialMove};
pub use rules::{CheckState, CheckmateRule, StalemateRule};
