use std::io;

use thiserror::Error;

/// Errors surfaced by the game core and its runtime shell.
///
/// Collisions are not errors: they end a session through the normal state
/// machine. Everything here is either a configuration problem or the
/// placement cap being hit on a saturated board.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("no free cell found on the {width}x{height} board after {attempts} attempts")]
    BoardSaturated {
        width: u16,
        height: u16,
        attempts: u32,
    },

    #[error("level {0} does not exist (expected 1-5)")]
    InvalidLevel(u8),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}
