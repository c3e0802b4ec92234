use crate::board::SubBoard;
use crate::types::{line_cells, Outcome, Player, LINES};

/// Virtual 3x3 grid of sub-board winners. Drawn and undecided sub-boards map to None.
#[inline]
pub fn meta_grid(boards: &[SubBoard; 9]) -> [Option<Player>; 9] {
    let mut grid = [None; 9];
    for (slot, board) in grid.iter_mut().zip(boards.iter()) {
        *slot = board.outcome().winner();
    }
    grid
}

/// True if `player` still has at least one meta-line not blocked by an opponent-won sub-board.
#[inline]
pub fn can_still_win(grid: &[Option<Player>; 9], player: Player) -> bool {
    let opp = Some(player.other());
    LINES
        .iter()
        .any(|&l| !line_cells(grid, l).contains(&opp))
}

/// Global outcome derived from the sub-boards:
/// 1. a meta-line won by one symbol decides the game;
/// 2. otherwise, all sub-boards decided is a draw;
/// 3. otherwise, if neither symbol has an open meta-line the game is drawn early;
/// 4. otherwise it continues.
pub fn global_outcome(boards: &[SubBoard; 9]) -> Outcome {
    let grid = meta_grid(boards);

    for &l in &LINES {
        if let [Some(a), Some(b), Some(c)] = line_cells(&grid, l) {
            if a == b && b == c {
                return Outcome::Won(a);
            }
        }
    }

    if boards.iter().all(SubBoard::is_terminal) {
        return Outcome::Draw;
    }

    if !can_still_win(&grid, Player::X) && !can_still_win(&grid, Player::O) {
        return Outcome::Draw;
    }

    Outcome::InProgress
}
