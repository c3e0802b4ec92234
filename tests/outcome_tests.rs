use metatac::engine::outcome::{can_still_win, global_outcome, meta_grid};
use metatac::{winner, Constraint, GlobalBoard, Move, Outcome, Player, SubBoard};

const X: Option<Player> = Some(Player::X);
const O: Option<Player> = Some(Player::O);
const E: Option<Player> = None;

fn won_by(p: Player) -> SubBoard {
    let q = Some(p);
    SubBoard::from_cells([q, E, E, E, q, E, E, E, q])
}

fn drawn() -> SubBoard {
    SubBoard::from_cells([X, O, X, X, O, O, O, X, X])
}

/// Sub-boards decided according to `pattern` ('X', 'O', 'D' for drawn, '.' for open).
fn boards_from(pattern: &str) -> [SubBoard; 9] {
    let mut boards = [SubBoard::new(); 9];
    for (slot, ch) in boards.iter_mut().zip(pattern.chars()) {
        *slot = match ch {
            'X' => won_by(Player::X),
            'O' => won_by(Player::O),
            'D' => drawn(),
            _ => SubBoard::new(),
        };
    }
    boards
}

#[test]
fn three_sub_boards_in_a_row_win_the_game() {
    for (pattern, expected) in [
        ("XXX......", Player::X),
        ("O..O..O..", Player::O),
        ("..X.X.X..", Player::X),
        ("O...O...O", Player::O),
    ] {
        let boards = boards_from(pattern);
        assert_eq!(global_outcome(&boards), Outcome::Won(expected), "{pattern}");
    }
}

#[test]
fn drawn_sub_boards_block_meta_lines() {
    let boards = boards_from("XXD......");
    assert_eq!(meta_grid(&boards), [X, X, E, E, E, E, E, E, E]);
    assert_eq!(global_outcome(&boards), Outcome::InProgress);
}

#[test]
fn all_sub_boards_decided_without_a_line_is_a_draw() {
    let boards = boards_from("XOXXOOOXD");
    assert_eq!(global_outcome(&boards), Outcome::Draw);
    let boards = boards_from("DDDDDDDDD");
    assert_eq!(global_outcome(&boards), Outcome::Draw);
}

#[test]
fn game_is_drawn_once_no_meta_line_is_open() {
    // X O X / X O O / O X . : every line holds both symbols
    let boards = boards_from("XOXXOOOX.");
    let grid = meta_grid(&boards);
    assert!(!can_still_win(&grid, Player::X));
    assert!(!can_still_win(&grid, Player::O));
    assert_eq!(global_outcome(&boards), Outcome::Draw);

    let board = GlobalBoard::from_sub_boards(boards, Player::X, Constraint::Sub(8));
    assert_eq!(winner(&board), Outcome::Draw);
    assert!(board.legal_moves().is_empty());
}

#[test]
fn one_open_line_keeps_the_game_going() {
    // X O X / X O O / O . . : O still has the bottom row
    let boards = boards_from("XOXXOOO..");
    let grid = meta_grid(&boards);
    assert!(!can_still_win(&grid, Player::X));
    assert!(can_still_win(&grid, Player::O));
    assert_eq!(global_outcome(&boards), Outcome::InProgress);
}

#[test]
fn capturing_the_last_open_line_draws_the_game_early() {
    let mut boards = boards_from("XOXXOOO..");
    boards[7] = SubBoard::from_cells([X, X, E, O, O, E, E, E, E]);
    let mut board = GlobalBoard::from_sub_boards(boards, Player::X, Constraint::Sub(7));
    assert_eq!(board.outcome(), Outcome::InProgress);

    board.apply_move(Move::from_indices(7, 2)).expect("legal");
    assert_eq!(board.sub_boards()[7].outcome(), Outcome::Won(Player::X));
    assert_eq!(board.outcome(), Outcome::Draw);
    // sub-board 8 still has empty cells but the game is over
    assert!(!board.sub_boards()[8].is_terminal());
    assert!(board.legal_moves().is_empty());
    assert_eq!(board.current_player(), Player::X);
}

#[test]
fn winning_move_ends_game_and_keeps_mover() {
    let mut boards = boards_from("XX.......");
    boards[2] = SubBoard::from_cells([X, E, O, E, X, E, E, E, E]);
    let mut board = GlobalBoard::from_sub_boards(boards, Player::X, Constraint::Sub(2));

    board.apply_move(Move::new(0, 2, 2, 2)).expect("legal");
    assert_eq!(board.outcome(), Outcome::Won(Player::X));
    assert_eq!(winner(&board), Outcome::Won(Player::X));
    assert_eq!(board.current_player(), Player::X);
}
