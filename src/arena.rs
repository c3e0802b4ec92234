//! Match driver: plays strategies against each other and aggregates statistics.
//!
//! Games of a duel are independent, so they run on the rayon pool. Each game builds its own
//! strategies with generators derived from `(seed, game_id, side)`, which keeps the results
//! identical whatever the scheduling.

use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::engine::apply::apply_move;
use crate::rng::rng_for_state;
use crate::solver::{build_strategy, Difficulty, Strategy};
use crate::state::{GlobalBoard, Move};
use crate::types::{Outcome, Player};

/// Per-side counters for one game (or summed over many).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SideTally {
    pub moves: u32,
    /// Moves for which the strategy reported a score.
    pub scored_moves: u32,
    pub score_total: i64,
    pub nodes: u64,
}

impl SideTally {
    #[inline]
    fn record(&mut self, strategy: &dyn Strategy) {
        let stats = strategy.last_stats();
        self.moves += 1;
        self.nodes += stats.nodes;
        if let Some(s) = stats.score {
            self.scored_moves += 1;
            self.score_total += i64::from(s);
        }
    }

    #[inline]
    fn merge(&mut self, other: &SideTally) {
        self.moves += other.moves;
        self.scored_moves += other.scored_moves;
        self.score_total += other.score_total;
        self.nodes += other.nodes;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub outcome: Outcome,
    pub moves: Vec<Move>,
    pub x: SideTally,
    pub o: SideTally,
    /// A strategy returned no move while the board was still in progress.
    pub stalled: bool,
}

impl GameRecord {
    /// Winner, treating a stalled game as drawn.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }
}

/// Play `board` to completion with `x` and `o`. The strategies are (re)assigned their symbols.
pub fn play_game(x: &mut dyn Strategy, o: &mut dyn Strategy, mut board: GlobalBoard) -> GameRecord {
    x.set_player(Player::X);
    o.set_player(Player::O);

    let mut record = GameRecord {
        outcome: board.outcome(),
        moves: Vec::new(),
        x: SideTally::default(),
        o: SideTally::default(),
        stalled: false,
    };

    while !board.is_terminal() {
        let (strategy, tally): (&mut dyn Strategy, &mut SideTally) = match board.current_player() {
            Player::X => (&mut *x, &mut record.x),
            Player::O => (&mut *o, &mut record.o),
        };
        let Some(mv) = strategy.select_move(&board) else {
            warn!(player = %board.current_player(), "no move selected on a live board");
            record.stalled = true;
            break;
        };
        tally.record(strategy);
        if let Err(e) = apply_move(&mut board, mv) {
            warn!(player = %board.current_player(), %mv, error = %e, "strategy chose an illegal move");
            record.stalled = true;
            break;
        }
        record.moves.push(mv);
    }

    record.outcome = board.outcome();
    record
}

/// Aggregated statistics for one participant of a duel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contender {
    pub difficulty: Difficulty,
    pub wins: u32,
    pub tally: SideTally,
}

impl Contender {
    fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            wins: 0,
            tally: SideTally::default(),
        }
    }

    /// Mean heuristic score of the moves this side played.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_score_per_move(&self) -> f64 {
        if self.tally.scored_moves == 0 {
            0.0
        } else {
            self.tally.score_total as f64 / f64::from(self.tally.scored_moves)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuelReport {
    pub first: Contender,
    pub second: Contender,
    pub games: u32,
    pub draws: u32,
    pub elapsed_secs: f64,
}

impl DuelReport {
    #[inline]
    pub fn avg_secs_per_game(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.elapsed_secs / f64::from(self.games)
        }
    }

    /// Percentage of games, 0.0 when no games were played.
    #[inline]
    pub fn rate(&self, count: u32) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            f64::from(count) * 100.0 / f64::from(self.games)
        }
    }
}

/// Play `games` games between two tiers. `first` plays X in even-numbered games.
pub fn run_duel(
    first: Difficulty,
    second: Difficulty,
    games: u32,
    seed: u64,
    config: &EngineConfig,
) -> DuelReport {
    run_duel_with(first, second, games, seed, config, |_| {})
}

/// As [`run_duel`], calling `on_game` after each finished game (from worker threads).
pub fn run_duel_with<F>(
    first: Difficulty,
    second: Difficulty,
    games: u32,
    seed: u64,
    config: &EngineConfig,
    on_game: F,
) -> DuelReport
where
    F: Fn(&GameRecord) + Sync + Send,
{
    let start = Instant::now();

    let results: Vec<(bool, GameRecord)> = (0..games)
        .into_par_iter()
        .map(|game_id| {
            let first_is_x = game_id % 2 == 0;
            let (dx, dox) = if first_is_x {
                (first, second)
            } else {
                (second, first)
            };
            let gid = u64::from(game_id);
            let mut x = build_strategy(dx, Player::X, config, rng_for_state(seed, gid, 0));
            let mut o = build_strategy(dox, Player::O, config, rng_for_state(seed, gid, 1));
            let record = play_game(x.as_mut(), o.as_mut(), GlobalBoard::new());
            on_game(&record);
            (first_is_x, record)
        })
        .collect();

    let mut a = Contender::new(first);
    let mut b = Contender::new(second);
    let mut draws = 0u32;
    for (first_is_x, record) in &results {
        let (a_side, b_side) = if *first_is_x {
            (&record.x, &record.o)
        } else {
            (&record.o, &record.x)
        };
        a.tally.merge(a_side);
        b.tally.merge(b_side);
        match (record.winner(), *first_is_x) {
            (Some(Player::X), true) | (Some(Player::O), false) => a.wins += 1,
            (Some(_), _) => b.wins += 1,
            (None, _) => draws += 1,
        }
    }

    let report = DuelReport {
        first: a,
        second: b,
        games,
        draws,
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    info!(
        first = %first,
        second = %second,
        games,
        first_wins = report.first.wins,
        second_wins = report.second.wins,
        draws,
        elapsed_secs = report.elapsed_secs,
        "duel finished"
    );
    report
}

/// Every unordered pair of `players` plays one duel.
pub fn round_robin(
    players: &[Difficulty],
    games: u32,
    seed: u64,
    config: &EngineConfig,
) -> Vec<DuelReport> {
    round_robin_with(players, games, seed, config, |_| {})
}

pub fn round_robin_with<F>(
    players: &[Difficulty],
    games: u32,
    seed: u64,
    config: &EngineConfig,
    on_game: F,
) -> Vec<DuelReport>
where
    F: Fn(&GameRecord) + Sync + Send,
{
    let mut reports = Vec::new();
    let mut pair = 0u64;
    for (i, &a) in players.iter().enumerate() {
        for &b in &players[i + 1..] {
            let duel_seed = seed.wrapping_add(pair.wrapping_mul(0x0001_0000_0001));
            reports.push(run_duel_with(a, b, games, duel_seed, config, &on_game));
            pair += 1;
        }
    }
    reports
}

/// Number of duels `round_robin` plays for `n` participants.
#[inline]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}
