use tracing::debug;

use crate::engine::score::{advanced_score, Score};
use crate::state::{GlobalBoard, Move};
use crate::types::Player;

use super::{child, SearchStats, Strategy};

/// Depth-limited alpha-beta search on the advanced heuristic.
///
/// Moves are visited in legal-move order; at the root the first move with a strictly
/// greater value wins, and alpha is raised as better root moves are found.
#[derive(Debug, Clone)]
pub struct AlphaBeta {
    player: Player,
    depth: u8,
    stats: SearchStats,
}

impl AlphaBeta {
    #[inline]
    pub fn new(player: Player, depth: u8) -> Self {
        Self {
            player,
            depth: depth.max(1),
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    fn alphabeta(
        &self,
        board: &GlobalBoard,
        depth: u8,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
        nodes: &mut u64,
    ) -> Score {
        *nodes += 1;
        if board.is_terminal() || depth >= self.depth {
            return advanced_score(board, self.player);
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            return advanced_score(board, self.player);
        }

        if maximizing {
            let mut value = Score::MIN;
            for mv in moves {
                let Some(next) = child(board, mv) else { continue };
                value = value.max(self.alphabeta(&next, depth + 1, alpha, beta, false, nodes));
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        } else {
            let mut value = Score::MAX;
            for mv in moves {
                let Some(next) = child(board, mv) else { continue };
                value = value.min(self.alphabeta(&next, depth + 1, alpha, beta, true, nodes));
                beta = beta.min(value);
                if alpha >= beta {
                    break;
                }
            }
            value
        }
    }
}

impl Strategy for AlphaBeta {
    fn name(&self) -> &'static str {
        "AlphaBeta"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    fn select_move(&mut self, board: &GlobalBoard) -> Option<Move> {
        let mut nodes = 0u64;
        let mut best: Option<(Move, Score)> = None;
        let mut alpha = Score::MIN;
        let beta = Score::MAX;

        for mv in board.legal_moves() {
            let Some(next) = child(board, mv) else { continue };
            let score = self.alphabeta(&next, 1, alpha, beta, false, &mut nodes);
            let improves = match best {
                Some((_, b)) => score > b,
                None => true,
            };
            if improves {
                best = Some((mv, score));
            }
            if let Some((_, b)) = best {
                alpha = alpha.max(b);
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
