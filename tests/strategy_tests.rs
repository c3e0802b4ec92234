use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use metatac::rng::seeded;
use metatac::{
    build_strategy, rng_for_state, AlphaBeta, BoundedMinimax, Constraint, Difficulty,
    EngineConfig, GlobalBoard, Greedy, Heuristic, Move, Player, Score, Strategy, SubBoard,
};

const X: Option<Player> = Some(Player::X);
const O: Option<Player> = Some(Player::O);
const E: Option<Player> = None;

/// X holds the top-left and top-middle sub-boards and can take the top-right one
/// (and the game) with the last legal move.
fn winning_position() -> (GlobalBoard, Move) {
    let mut boards = [SubBoard::new(); 9];
    boards[0] = SubBoard::from_cells([X, X, X, O, O, E, E, E, E]);
    boards[1] = SubBoard::from_cells([X, O, E, O, X, E, E, E, X]);
    boards[2] = SubBoard::from_cells([X, E, O, E, X, E, E, E, E]);
    boards[3] = SubBoard::from_cells([E, E, E, E, O, E, E, E, E]);
    boards[5] = SubBoard::from_cells([O, E, E, E, E, E, E, E, E]);
    let board = GlobalBoard::from_sub_boards(boards, Player::X, Constraint::Sub(2));
    (board, Move::new(0, 2, 2, 2))
}

fn finished_board() -> GlobalBoard {
    let mut boards = [SubBoard::new(); 9];
    for i in [0, 4, 8] {
        boards[i] = SubBoard::from_cells([O, O, O, E, E, E, E, E, E]);
    }
    GlobalBoard::from_sub_boards(boards, Player::X, Constraint::Any)
}

#[test]
fn greedy_prefers_the_first_centre_on_an_empty_board() {
    let mut g = Greedy::new(Player::X);
    let board = GlobalBoard::new();
    assert_eq!(g.select_move(&board), Some(Move::new(0, 0, 1, 1)));
    assert_eq!(g.last_stats().score, Some(60));
    assert_eq!(g.last_stats().nodes, 81);
    assert_eq!(board, GlobalBoard::new());
}

#[test]
fn greedy_is_deterministic() {
    let mut board = GlobalBoard::new();
    board.apply_move(Move::new(1, 1, 0, 0)).expect("legal");
    let mut a = Greedy::new(Player::O);
    let mut b = Greedy::new(Player::O);
    assert_eq!(a.select_move(&board), b.select_move(&board));
}

#[test]
fn every_tier_takes_an_immediate_global_win() {
    let (board, winning) = winning_position();
    assert_eq!(board.legal_moves().last(), Some(&winning));

    let mut greedy = Greedy::new(Player::X);
    assert_eq!(greedy.select_move(&board), Some(winning));

    let mut ab = AlphaBeta::new(Player::X, 4);
    assert_eq!(ab.select_move(&board), Some(winning));
    assert!(ab.last_stats().nodes > board.legal_moves().len() as u64);

    let mut mm = BoundedMinimax::new(Player::X, 3, 0.0, 17);
    assert_eq!(mm.select_move(&board), Some(winning));
}

#[test]
fn no_move_on_a_finished_board() {
    let board = finished_board();
    let config = EngineConfig::default();
    for d in Difficulty::all() {
        let mut s = build_strategy(d, Player::X, &config, rng_for_state(1, 0, 0));
        assert_eq!(s.select_move(&board), None, "{d}");
    }
}

#[test]
fn search_does_not_touch_the_input_board() {
    let mut board = GlobalBoard::new();
    board.apply_move(Move::new(2, 0, 1, 2)).expect("legal");
    let snapshot = board.clone();
    let mut ab = AlphaBeta::new(Player::O, 2);
    let mut mm = BoundedMinimax::new(Player::O, 2, 0.0, 5);
    ab.select_move(&board);
    mm.select_move(&board);
    assert_eq!(board, snapshot);
}

#[test]
fn seeded_minimax_replays_identically() {
    let play = |seed: u64| -> Vec<Option<Move>> {
        let mut mm = BoundedMinimax::new(Player::X, 2, 0.3, seed);
        let mut board = GlobalBoard::new();
        board.apply_move(Move::new(1, 1, 1, 1)).expect("legal");
        board.apply_move(Move::new(1, 1, 0, 0)).expect("legal");
        (0..6).map(|_| mm.select_move(&board)).collect()
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn always_erring_minimax_plays_legal_random_moves() {
    let board = GlobalBoard::new();
    let mut mm = BoundedMinimax::new(Player::X, 3, 1.0, 7);
    for _ in 0..20 {
        let mv = mm.select_move(&board).expect("moves available");
        assert!(board.is_legal(mv));
        assert_eq!(mm.last_stats().nodes, 1);
    }
}

#[test]
fn minimax_constructor_clamps_parameters() {
    let mm = BoundedMinimax::new(Player::O, 0, 3.5, 0);
    assert_eq!(mm.depth(), 1);
    assert_eq!(mm.error_rate(), 1.0);
    assert_eq!(mm.opponent(), Player::X);
}

#[test]
fn searchers_complete_an_open_sub_board_line() {
    // X X . / O O . / . . . in the centre, X to move there
    let mut boards = [SubBoard::new(); 9];
    boards[4] = SubBoard::from_cells([X, X, E, O, O, E, E, E, E]);
    let board = GlobalBoard::from_sub_boards(boards, Player::X, Constraint::Sub(4));
    let take = Some(Move::new(1, 1, 0, 2));

    assert_eq!(AlphaBeta::new(Player::X, 2).select_move(&board), take);
    assert_eq!(Greedy::new(Player::X).select_move(&board), take);
    assert_eq!(BoundedMinimax::new(Player::X, 2, 0.0, 3).select_move(&board), take);
}

#[test]
fn built_strategies_follow_their_tier() {
    let config = EngineConfig::default();
    let names: Vec<&str> = Difficulty::all()
        .into_iter()
        .map(|d| build_strategy(d, Player::O, &config, rng_for_state(0, 0, 1)).name())
        .collect();
    assert_eq!(names, ["Greedy", "Minimax", "AlphaBeta"]);

    let mut s = build_strategy(Difficulty::Hard, Player::O, &config, rng_for_state(0, 0, 1));
    assert_eq!(s.player(), Player::O);
    s.set_player(Player::X);
    assert_eq!(s.player(), Player::X);
}

/// Plain minimax without pruning, scored from `player`'s side.
fn full_minimax(
    board: &GlobalBoard,
    depth: u8,
    limit: u8,
    maximizing: bool,
    player: Player,
    h: Heuristic,
) -> Score {
    let moves = board.legal_moves();
    if board.is_terminal() || depth >= limit || moves.is_empty() {
        return h.score(board, player);
    }
    let values = moves.into_iter().map(|mv| {
        let mut next = board.clone();
        next.apply_move(mv).expect("legal move");
        full_minimax(&next, depth + 1, limit, !maximizing, player, h)
    });
    let best = if maximizing { values.max() } else { values.min() };
    best.expect("at least one move")
}

/// Equal-best root moves in legal order, with their value.
fn best_root_moves(board: &GlobalBoard, limit: u8, h: Heuristic) -> (Vec<Move>, Score) {
    let player = board.current_player();
    let scored: Vec<(Move, Score)> = board
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let mut next = board.clone();
            next.apply_move(mv).expect("legal move");
            (mv, full_minimax(&next, 1, limit, false, player, h))
        })
        .collect();
    let best = scored.iter().map(|&(_, v)| v).max().expect("live position");
    let ties = scored.into_iter().filter(|&(_, v)| v == best).map(|(mv, _)| mv).collect();
    (ties, best)
}

fn random_position(seed: u64) -> GlobalBoard {
    let mut rng = seeded(seed);
    let plies = 4 + (seed % 8) as usize;
    let mut board = GlobalBoard::new();
    for _ in 0..plies {
        let moves = board.legal_moves();
        let Some(&mv) = moves.choose(&mut rng) else { break };
        let mut next = board.clone();
        next.apply_move(mv).expect("legal move");
        if next.is_terminal() {
            break;
        }
        board = next;
    }
    board
}

#[test]
fn minimax_breaks_ties_at_random_among_the_best() {
    let board = GlobalBoard::new();
    // one ply: every sub-board centre scores the same
    let (ties, best) = best_root_moves(&board, 1, Heuristic::Baseline);
    let centres: Vec<Move> = (0..9).map(|s| Move::from_indices(s, 4)).collect();
    assert_eq!(ties, centres);

    let mut seen = BTreeSet::new();
    for seed in 0..24 {
        let mut mm = BoundedMinimax::new(Player::X, 1, 0.0, seed);
        let mv = mm.select_move(&board).expect("opening move");
        assert!(ties.contains(&mv), "{mv} is not among the best moves");
        assert_eq!(mm.last_stats().score, Some(best));
        seen.insert((mv.sub_index(), mv.cell_index()));
    }
    assert!(seen.len() > 1, "ties should not always resolve to the same move");

    // the deterministic tiers keep the first of the tied moves
    assert_eq!(Greedy::new(Player::X).select_move(&board), Some(centres[0]));
    assert_eq!(AlphaBeta::new(Player::X, 1).select_move(&board), Some(centres[0]));
}

#[test]
fn pruned_search_agrees_with_full_minimax() {
    for seed in 0..8u64 {
        let board = random_position(seed);
        let player = board.current_player();

        let (ties, best) = best_root_moves(&board, 3, Heuristic::Advanced);
        let mut ab = AlphaBeta::new(player, 3);
        assert_eq!(ab.select_move(&board), Some(ties[0]), "seed {seed}");
        assert_eq!(ab.last_stats().score, Some(best), "seed {seed}");

        let (ties, best) = best_root_moves(&board, 3, Heuristic::Baseline);
        let mut mm = BoundedMinimax::new(player, 3, 0.0, seed);
        let mv = mm.select_move(&board).expect("live position");
        assert!(ties.contains(&mv), "seed {seed}: {mv}");
        assert_eq!(mm.last_stats().score, Some(best), "seed {seed}");
    }
}
