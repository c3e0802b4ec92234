use serde::{Deserialize, Serialize};

use crate::board::SubBoard;
use crate::state::GlobalBoard;
use crate::types::{line_cells, Outcome, Player, CENTER, LINES};

/// Heuristic value; positive favours the perspective player.
pub type Score = i32;

pub const SUB_BOARD_WIN: Score = 10_000;
pub const CENTER_BONUS: Score = 20;
pub const META_LINE_WEIGHT: Score = 10;
pub const FORK_BONUS: Score = 300;

/// Score one line: 10^n for n unopposed own marks, -10^n for n unopposed opponent marks,
/// 0 if the line is empty or contested.
#[inline]
pub fn line_score(line: [Option<Player>; 3], player: Player) -> Score {
    let mine = line.iter().filter(|&&c| c == Some(player)).count();
    let theirs = line.iter().filter(|&&c| c == Some(player.other())).count();
    match (mine, theirs) {
        (0, 0) => 0,
        (n, 0) => pow10(n),
        (0, n) => -pow10(n),
        _ => 0,
    }
}

#[inline]
fn pow10(n: usize) -> Score {
    match n {
        0 => 1,
        1 => 10,
        2 => 100,
        _ => 1000,
    }
}

/// Centre control plus line potential of one undecided (or drawn) sub-board.
pub fn sub_board_score(board: &SubBoard, player: Player) -> Score {
    let center = match board.get(CENTER) {
        Some(p) if p == player => CENTER_BONUS,
        Some(_) => -CENTER_BONUS,
        None => 0,
    };
    center + board.lines().map(|l| line_score(l, player)).sum::<Score>()
}

/// Baseline evaluation: decided sub-boards weigh ±10000, the rest are scored cell by cell,
/// and the meta-board lines are added with weight 10.
pub fn baseline_score(board: &GlobalBoard, player: Player) -> Score {
    let mut score: Score = 0;
    for sub in board.sub_boards() {
        score += match sub.outcome() {
            Outcome::Won(p) if p == player => SUB_BOARD_WIN,
            Outcome::Won(_) => -SUB_BOARD_WIN,
            Outcome::InProgress | Outcome::Draw => sub_board_score(sub, player),
        };
    }

    let grid = board.meta_grid();
    let meta: Score = LINES
        .iter()
        .map(|&l| line_score(line_cells(&grid, l), player))
        .sum();
    score + meta * META_LINE_WEIGHT
}

/// Lines in which `player` holds two cells and the third is empty.
#[inline]
pub fn count_threats(board: &SubBoard, player: Player) -> usize {
    board
        .lines()
        .filter(|line| {
            line.iter().filter(|&&c| c == Some(player)).count() == 2
                && line.iter().filter(|c| c.is_none()).count() == 1
        })
        .count()
}

/// +300 per open sub-board where `player` has a double threat, -300 per one where the
/// opponent has.
pub fn fork_adjustment(board: &GlobalBoard, player: Player) -> Score {
    let mut score = 0;
    for sub in board.sub_boards().iter().filter(|b| !b.is_terminal()) {
        if count_threats(sub, player) >= 2 {
            score += FORK_BONUS;
        }
        if count_threats(sub, player.other()) >= 2 {
            score -= FORK_BONUS;
        }
    }
    score
}

/// Baseline plus mobility (number of legal moves) plus fork adjustment.
pub fn advanced_score(board: &GlobalBoard, player: Player) -> Score {
    let mobility = Score::try_from(board.legal_moves().len()).unwrap_or(Score::MAX);
    baseline_score(board, player) + mobility + fork_adjustment(board, player)
}

/// Evaluation function selector used by the search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heuristic {
    Baseline,
    Advanced,
}

impl Heuristic {
    #[inline]
    pub fn score(self, board: &GlobalBoard, player: Player) -> Score {
        match self {
            Heuristic::Baseline => baseline_score(board, player),
            Heuristic::Advanced => advanced_score(board, player),
        }
    }
}
