use tracing::debug;

use crate::engine::score::{baseline_score, Score};
use crate::state::{GlobalBoard, Move};
use crate::types::Player;

use super::{child, SearchStats, Strategy};

/// One-ply search on the baseline heuristic. Ties keep the earliest move in legal order.
#[derive(Debug, Clone)]
pub struct Greedy {
    player: Player,
    stats: SearchStats,
}

impl Greedy {
    #[inline]
    pub fn new(player: Player) -> Self {
        Self {
            player,
            stats: SearchStats::default(),
        }
    }
}

impl Strategy for Greedy {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    fn select_move(&mut self, board: &GlobalBoard) -> Option<Move> {
        let mut best: Option<(Move, Score)> = None;
        let mut nodes = 0u64;
        for mv in board.legal_moves() {
            let Some(next) = child(board, mv) else { continue };
            nodes += 1;
            let score = baseline_score(&next, self.player);
            let improves = match best {
                Some((_, b)) => score > b,
                None => true,
            };
            if improves {
                best = Some((mv, score));
            }
        }

        self.stats = SearchStats {
            score: best.map(|(_, s)| s),
            nodes,
        };
        debug!(
            strategy = self.name(),
            player = %self.player,
            score = ?self.stats.score,
            nodes,
            "move selected"
        );
        best.map(|(mv, _)| mv)
    }

    fn last_stats(&self) -> SearchStats {
        self.stats
    }
}
