use std::path::PathBuf;

use thiserror::Error;

/// Reasons a move is rejected. A rejected move never mutates the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move index out of range (each index must be 0..=2)")]
    OutOfRange,

    #[error("the game is already over")]
    GameOver,

    #[error("sub-board ({row}, {col}) is already decided")]
    SubBoardClosed { row: u8, col: u8 },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: u8, col: u8 },

    #[error("must play in sub-board ({row}, {col})")]
    WrongSubBoard { row: u8, col: u8 },
}

/// Failure to read a move from its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveParseError {
    #[error("expected 4 numbers separated by spaces, got {0}")]
    WrongArity(usize),

    #[error("invalid number '{0}'")]
    NotANumber(String),

    #[error("index {0} out of range (expected 0..=2)")]
    OutOfRange(u8),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
