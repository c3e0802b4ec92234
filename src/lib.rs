#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod types;
pub mod error;
pub mod board;
pub mod state;
pub mod config;
pub mod rng;

pub mod engine {
    pub mod apply;
    pub mod outcome;
    pub mod score;
}

pub mod solver;
pub mod arena;

// Re-exports: stable minimal API surface for external callers
pub use crate::arena::{play_game, round_robin, run_duel, DuelReport, GameRecord};
pub use crate::board::SubBoard;
pub use crate::config::{load_config_from_json, EngineConfig};
pub use crate::engine::apply::apply_move;
pub use crate::engine::score::{advanced_score, baseline_score, line_score, Heuristic, Score};
pub use crate::error::{ConfigError, MoveError, MoveParseError};
pub use crate::rng::rng_for_state;
pub use crate::solver::{
    build_strategy, AlphaBeta, BoundedMinimax, Difficulty, Greedy, SearchStats, Strategy,
};
pub use crate::state::{is_terminal, legal_moves, winner, Constraint, GlobalBoard, Move};
pub use crate::types::{Outcome, Player};
