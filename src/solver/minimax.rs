use rand::seq::SliceRandom;
use rand::Rng;
use rand_pcg::Pcg64;
use tracing::{debug, trace};

use crate::engine::score::{baseline_score, Score};
use crate::rng::seeded;
use crate::state::{GlobalBoard, Move};
use crate::types::Player;

use super::{child, SearchStats, Strategy};

/// Depth-limited minimax on the baseline heuristic, without pruning.
///
/// With probability `error_rate` the search is skipped and a uniformly random legal move is
/// played instead. Among equally scored root moves one is picked at random. Both draws come
/// from the injected generator, so a fixed seed reproduces a game.
#[derive(Debug, Clone)]
pub struct BoundedMinimax<R: Rng = Pcg64> {
    player: Player,
    depth: u8,
    error_rate: f64,
    rng: R,
    stats: SearchStats,
}

impl BoundedMinimax<Pcg64> {
    /// Seeded PCG generator.
    pub fn new(player: Player, depth: u8, error_rate: f64, seed: u64) -> Self {
        Self::with_rng(player, depth, error_rate, seeded(seed))
    }
}

impl<R: Rng> BoundedMinimax<R> {
    pub fn with_rng(player: Player, depth: u8, error_rate: f64, rng: R) -> Self {
        Self {
            player,
            depth: depth.max(1),
            error_rate: error_rate.clamp(0.0, 1.0),
            rng,
            stats: SearchStats::default(),
        }
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    // `depth` counts plies already played below the root position.
    fn minimax(&self, board: &GlobalBoard, depth: u8, maximizing: bool, nodes: &mut u64) -> Score {
        *nodes += 1;
        if board.is_terminal() || depth >= self.depth {
            return baseline_score(board, self.player);
        }
        let moves = board.legal_moves();
        if moves.is_empty() {
            return baseline_score(board, self.player);
        }

        let mut best = if maximizing { Score::MIN } else { Score::MAX };
        for mv in moves {
            let Some(next) = child(board, mv) else { continue };
            let value = self.minimax(&next, depth + 1, !maximizing, nodes);
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }
}

impl<R: Rng> Strategy for BoundedMinimax<R> {
    fn name(&self) -> &'static str {
        "Minimax"
    }

    fn player(&self) -> Player {
        self.player
    }

    fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    fn select_move(&mut self, board: &GlobalBoard) -> Option<Move> {
        let moves = board.legal_moves();
        if moves.is_empty() {
            self.stats = SearchStats::default();
            return None;
        }

        if self.rng.gen::<f64>() < self.error_rate {
            let mv = *moves.choose(&mut self.rng)?;
            let score = child(board, mv).map(|next| baseline_score(&next, self.player));
            self.stats = SearchStats { score, nodes: 1 };
            trace!(player = %self.player, %mv, "random move instead of search");
            return Some(mv);
        }

        let mut nodes = 0u64;
        let mut best_score = Score::MIN;
        let mut ties: Vec<Move> = Vec::new();
        for mv in moves {
            let Some(next) = child(board, mv) else { continue };
            let score = self.minimax(&next, 1, false, &mut nodes);
            if score > best_score {
                best_score = score;
                ties.clear();
                ties.push(mv);
            } else if score == best_score {
                ties.push(mv);
            }
        }

        let chosen = ties.choose(&mut self.rng).copied();
        self.stats = SearchStats {
            score: chosen.map(|_| best_score),
            nodes,
        };
        if ties.len() > 1 {
            trace!(ties = ties.len(), "tie broken at random");
        }
        debug!(
            strategy = self.name(),
            player = %self.player,
            score = best_score,
            nodes,
            "move selected"
        );
        chosen
    }

    fn last_stats(&self) -> SearchStats {
        self.stats
    }
}
