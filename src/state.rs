use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::SubBoard;
use crate::engine::apply::validate_move;
use crate::engine::outcome::{global_outcome, meta_grid};
use crate::error::MoveParseError;
use crate::types::{idx_to_rc, rc_to_idx, Outcome, Player};

/// (sub-board row, sub-board col, cell row, cell col), each 0..=2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub sub_row: u8,
    pub sub_col: u8,
    pub cell_row: u8,
    pub cell_col: u8,
}

impl Move {
    #[inline]
    pub const fn new(sub_row: u8, sub_col: u8, cell_row: u8, cell_col: u8) -> Self {
        Self {
            sub_row,
            sub_col,
            cell_row,
            cell_col,
        }
    }

    /// Build from row-major sub-board and cell indices (0..=8 each).
    #[inline]
    pub fn from_indices(sub: u8, cell: u8) -> Self {
        let (sub_row, sub_col) = idx_to_rc(sub);
        let (cell_row, cell_col) = idx_to_rc(cell);
        Self::new(sub_row, sub_col, cell_row, cell_col)
    }

    #[inline]
    pub fn sub_index(self) -> Option<u8> {
        rc_to_idx(self.sub_row, self.sub_col)
    }

    #[inline]
    pub fn cell_index(self) -> Option<u8> {
        rc_to_idx(self.cell_row, self.cell_col)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.sub_row, self.sub_col, self.cell_row, self.cell_col
        )
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    /// Parses four whitespace-separated indices, e.g. `"1 1 0 2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(MoveParseError::WrongArity(parts.len()));
        }
        let mut idx = [0u8; 4];
        for (slot, tok) in idx.iter_mut().zip(parts) {
            let v = tok
                .parse::<u8>()
                .map_err(|_| MoveParseError::NotANumber(tok.to_string()))?;
            if v > 2 {
                return Err(MoveParseError::OutOfRange(v));
            }
            *slot = v;
        }
        Ok(Move::new(idx[0], idx[1], idx[2], idx[3]))
    }
}

/// Which sub-board the player to move must target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constraint {
    Any,
    /// Row-major sub-board index 0..=8.
    Sub(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalBoard {
    // Sub-boards 0..=8 laid out row-major
    pub(crate) boards: [SubBoard; 9],
    pub(crate) current: Player,
    pub(crate) constraint: Constraint,
    pub(crate) outcome: Outcome,
}

impl Default for GlobalBoard {
    fn default() -> Self {
        Self {
            boards: [SubBoard::new(); 9],
            current: Player::X,
            constraint: Constraint::Any,
            outcome: Outcome::InProgress,
        }
    }
}

impl GlobalBoard {
    /// Empty board, X to move, free choice of sub-board.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble an arbitrary position. The global outcome is recomputed from the sub-boards,
    /// and a constraint pointing at a decided sub-board is relaxed to `Any`.
    pub fn from_sub_boards(boards: [SubBoard; 9], to_move: Player, constraint: Constraint) -> Self {
        let constraint = match constraint {
            Constraint::Sub(i) if i >= 9 || boards[usize::from(i)].is_terminal() => Constraint::Any,
            c => c,
        };
        Self {
            outcome: global_outcome(&boards),
            boards,
            current: to_move,
            constraint,
        }
    }

    #[inline]
    pub fn current_player(&self) -> Player {
        self.current
    }

    #[inline]
    pub fn constraint(&self) -> Constraint {
        self.constraint
    }

    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    #[inline]
    pub fn sub_boards(&self) -> &[SubBoard; 9] {
        &self.boards
    }

    #[inline]
    pub fn sub_board(&self, row: u8, col: u8) -> Option<&SubBoard> {
        rc_to_idx(row, col).map(|i| &self.boards[usize::from(i)])
    }

    /// Winning symbol per sub-board; undecided and drawn sub-boards are None.
    #[inline]
    pub fn meta_grid(&self) -> [Option<Player>; 9] {
        meta_grid(&self.boards)
    }

    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        validate_move(self, mv).is_ok()
    }

    /// Ordered legal moves: sub-board row-major, then cell row-major.
    /// Empty once the game is decided, even if cells remain open.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_terminal() {
            return Vec::new();
        }
        let subs: Vec<u8> = match self.constraint {
            Constraint::Sub(i) => vec![i],
            Constraint::Any => (0u8..9).collect(),
        };
        let mut moves = Vec::new();
        for sub in subs {
            let board = &self.boards[usize::from(sub)];
            if board.is_terminal() {
                continue;
            }
            for cell in 0u8..9 {
                if board.get(cell).is_none() {
                    moves.push(Move::from_indices(sub, cell));
                }
            }
        }
        moves
    }
}

impl fmt::Display for GlobalBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = |c: Option<Player>| c.map_or(' ', Player::symbol);
        for band in 0..3usize {
            let mut width = 0;
            for inner_row in 0..3u8 {
                let mut line = String::new();
                for band_col in 0..3usize {
                    let sub = &self.boards[band * 3 + band_col];
                    let cells: Vec<String> = (0..3u8)
                        .map(|c| glyph(sub.get(inner_row * 3 + c)).to_string())
                        .collect();
                    line.push(' ');
                    line.push_str(&cells.join("|"));
                    line.push(' ');
                    if band_col < 2 {
                        line.push_str("||");
                    }
                }
                width = line.chars().count();
                writeln!(f, "{line}")?;
            }
            if band < 2 {
                writeln!(f, "{}", "=".repeat(width))?;
            }
        }
        match self.constraint {
            Constraint::Any => writeln!(f, "Next move: any sub-board")?,
            Constraint::Sub(i) => {
                let (r, c) = idx_to_rc(i);
                writeln!(f, "Next move: sub-board ({r}, {c})")?;
            }
        }
        write!(f, "To move: {}", self.current)
    }
}

/// Free-function surface mirroring the methods, for drivers that prefer it.
#[inline]
pub fn legal_moves(board: &GlobalBoard) -> Vec<Move> {
    board.legal_moves()
}

#[inline]
pub fn is_terminal(board: &GlobalBoard) -> bool {
    board.is_terminal()
}

#[inline]
pub fn winner(board: &GlobalBoard) -> Outcome {
    board.outcome()
}
