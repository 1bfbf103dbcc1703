//! Core types for a two-player chess match.
//!
//! This crate provides the storage-level types shared by the match engine:
//! - [`Color`] for the two players (Yellow and Red)
//! - [`Position`] for validated `(row, column)` board coordinates
//! - [`PieceKind`], [`PieceId`] and [`Piece`] for piece representation
//! - [`Board`] for the fixed 8x8 grid and its [`BoardError`]s

mod board;
mod color;
mod piece;
mod position;

pub use board::{Board, BoardError};
pub use color::Color;
pub use piece::{Piece, PieceId, PieceKind, UnknownPieceKind};
pub use position::Position;
