//! JSON snapshot of a match after replay.

use chessmatch_core::{Color, Piece};
use chessmatch_engine::{CheckState, Match, MoveRecord};
use serde::Serialize;
use std::io::Write;

/// Serializable view of the match state.
///
/// ```json
/// {
///   "turn": 3,
///   "current_player": "Yellow",
///   "check": "none",
///   "finished": false,
///   "stopped_on_self_check": false,
///   "captured": { "yellow": [], "red": [] },
///   "history": [ { "turn": 1, "color": "Yellow", "piece": "Pawn", ... } ]
/// }
/// ```
#[derive(Serialize)]
pub struct Snapshot<'a> {
    turn: u32,
    current_player: Color,
    check: CheckState,
    finished: bool,
    /// True when replay stopped because a move left the mover in check.
    stopped_on_self_check: bool,
    captured: Captured<'a>,
    history: &'a [MoveRecord],
}

#[derive(Serialize)]
struct Captured<'a> {
    yellow: Vec<&'a Piece>,
    red: Vec<&'a Piece>,
}

impl<'a> Snapshot<'a> {
    pub fn new(game: &'a Match, stopped_on_self_check: bool) -> Self {
        Snapshot {
            turn: game.turn(),
            current_player: game.current_player(),
            check: game.check(),
            finished: game.is_finished(),
            stopped_on_self_check,
            captured: Captured {
                yellow: game.yellow_captured_pieces(),
                red: game.red_captured_pieces(),
            },
            history: game.history(),
        }
    }

    /// Writes the snapshot as pretty-printed JSON followed by a newline.
    pub fn write_to(&self, mut out: impl Write) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out).map_err(serde_json::Error::io)
    }
}
