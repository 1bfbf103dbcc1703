//! Chessmatch Replay - plays a list of moves through the match engine.
//!
//! Moves are applied in order. The final state is printed as JSON on stdout.
//! Replay stops with a non-zero exit status on the first rejected or
//! self-checking move.

mod moves;
mod snapshot;

use anyhow::{bail, Context};
use chessmatch_engine::{Match, MatchConfig, MoveOutcome};
use clap::Parser;
use moves::MoveText;
use snapshot::Snapshot;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "chessmatch-replay")]
#[command(about = "Replays moves through the match engine and prints the result as JSON")]
struct Cli {
    /// Rule configuration file
    #[arg(short, long, default_value = MatchConfig::FILE_NAME)]
    config: PathBuf,

    /// Piece a pawn becomes when a move names none (overrides the config)
    #[arg(short, long)]
    promote: Option<String>,

    /// Log level written to stderr
    #[arg(long, default_value = "warn")]
    log_level: Level,

    /// Moves to play, e.g. e2e4 e7e5 or b7b8q
    moves: Vec<MoveText>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = MatchConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(promote) = cli.promote {
        config.default_promotion = promote;
        config.validate()?;
    }
    tracing::info!(
        "Rules: checkmate {:?}, stalemate {:?}, promotion {}",
        config.checkmate_rule,
        config.stalemate_rule,
        config.default_promotion
    );

    let mut game = Match::with_config(config);
    let self_check = replay(&mut game, &cli.moves)?;

    Snapshot::new(&game, self_check.is_some()).write_to(std::io::stdout().lock())?;

    if let Some(text) = self_check {
        bail!("{} would leave the {} king in check", text, game.current_player());
    }
    Ok(())
}

/// Plays `moves` in order. Returns the text of the move that was rolled back
/// for self-check, if replay stopped on one.
fn replay(game: &mut Match, moves: &[MoveText]) -> anyhow::Result<Option<String>> {
    for mv in moves {
        let text = format!("{}{}", mv.origin, mv.destination);
        let outcome = match mv.promotion {
            Some(kind) => {
                game.execute_movement_with_promotion(mv.origin, mv.destination, kind.name())
            }
            None => game.execute_movement(mv.origin, mv.destination),
        }
        .with_context(|| format!("move {} on turn {}", text, game.turn()))?;

        match outcome {
            MoveOutcome::Moved(record) => tracing::info!("{}", record),
            MoveOutcome::SelfCheck => {
                tracing::warn!("{} rolled back: own king in check", text);
                return Ok(Some(text));
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chessmatch_core::Color;
    use chessmatch_engine::CheckState;

    fn parse(moves: &[&str]) -> Vec<MoveText> {
        moves.iter().map(|m| m.parse().unwrap()).collect()
    }

    #[test]
    fn replays_until_the_end() {
        let mut game = Match::new();
        let stopped = replay(&mut game, &parse(&["f2f3", "e7e5", "g2g4", "d8h4"])).unwrap();
        assert_eq!(stopped, None);
        assert_eq!(game.check(), CheckState::Checkmate);
        assert!(game.is_finished());
    }

    #[test]
    fn stops_on_self_check() {
        let mut game = Match::new();
        let moves = parse(&["e2e4", "e7e5", "d1h5", "f7f6", "a2a3"]);
        let stopped = replay(&mut game, &moves).unwrap();
        assert_eq!(stopped.as_deref(), Some("f7f6"));
        assert_eq!(game.turn(), 4);
        assert_eq!(game.current_player(), Color::Red);
    }

    #[test]
    fn rejected_move_is_an_error() {
        let mut game = Match::new();
        let err = replay(&mut game, &parse(&["e2e5"])).unwrap_err();
        assert!(err.to_string().contains("e2e5"));
        assert_eq!(game.turn(), 1);
    }

    #[test]
    fn cli_parses_moves_and_flags() {
        let cli = Cli::try_parse_from([
            "chessmatch-replay",
            "--promote",
            "rook",
            "--log-level",
            "debug",
            "e2e4",
            "e7e5",
        ])
        .unwrap();
        assert_eq!(cli.promote.as_deref(), Some("rook"));
        assert_eq!(cli.log_level, Level::DEBUG);
        assert_eq!(cli.moves.len(), 2);
        assert_eq!(cli.config, PathBuf::from(MatchConfig::FILE_NAME));
    }
}
