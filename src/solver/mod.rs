use std::fmt;
use std::str::FromStr;

use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::apply::apply_move;
use crate::engine::score::Score;
use crate::state::{GlobalBoard, Move};
use crate::types::Player;

pub mod alphabeta;
pub mod greedy;
pub mod minimax;

pub use alphabeta::AlphaBeta;
pub use greedy::Greedy;
pub use minimax::BoundedMinimax;

/// Diagnostics from the most recent `select_move` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Heuristic value of the chosen move, from the strategy's own perspective.
    pub score: Option<Score>,
    /// Positions generated during the search.
    pub nodes: u64,
}

/// Common contract of every move-selection tier.
///
/// Implementations never mutate the board they are given: every explored move is played
/// on a private clone.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Symbol this strategy plays.
    fn player(&self) -> Player;

    /// Reassign the symbol, e.g. when alternating colours between games.
    fn set_player(&mut self, player: Player);

    #[inline]
    fn opponent(&self) -> Player {
        self.player().other()
    }

    /// Pick a move for the side to move, or None when there is no legal move.
    fn select_move(&mut self, board: &GlobalBoard) -> Option<Move>;

    fn last_stats(&self) -> SearchStats;
}

/// Clone `board` and play `mv` on the copy.
#[inline]
pub(crate) fn child(board: &GlobalBoard, mv: Move) -> Option<GlobalBoard> {
    let mut next = board.clone();
    apply_move(&mut next, mv).ok()?;
    Some(next)
}

/// The three playing strengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// One-ply greedy search.
    Easy,
    /// Unpruned minimax with random mistakes and random tie-breaks.
    Medium,
    /// Alpha-beta with the advanced heuristic.
    Hard,
}

impl Difficulty {
    #[inline]
    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "greedy" => Ok(Difficulty::Easy),
            "medium" | "minimax" => Ok(Difficulty::Medium),
            "hard" | "alphabeta" | "alpha-beta" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (expected easy, medium or hard)")),
        }
    }
}

/// Construct the strategy for a difficulty tier. `rng` is only consumed by the medium tier.
pub fn build_strategy(
    difficulty: Difficulty,
    player: Player,
    config: &EngineConfig,
    rng: Pcg64,
) -> Box<dyn Strategy> {
    match difficulty {
        Difficulty::Easy => Box::new(Greedy::new(player)),
        Difficulty::Medium => Box::new(BoundedMinimax::with_rng(
            player,
            config.minimax.depth,
            config.minimax.error_rate,
            rng,
        )),
        Difficulty::Hard => Box::new(AlphaBeta::new(player, config.alphabeta.depth)),
    }
}
