use crate::types::{line_cells, rc_to_idx, Outcome, Player, LINES};

/// A single 3x3 tic-tac-toe grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubBoard {
    // Cells 0..=8 laid out row-major (r*3 + c)
    cells: [Option<Player>; 9],
    outcome: Outcome,
}

impl Default for SubBoard {
    fn default() -> Self {
        Self {
            cells: [None; 9],
            outcome: Outcome::InProgress,
        }
    }
}

impl SubBoard {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sub-board from an arbitrary layout, deriving its outcome from scratch.
    /// If both symbols complete a line (unreachable in play) X is reported.
    pub fn from_cells(cells: [Option<Player>; 9]) -> Self {
        let mut board = Self {
            cells,
            outcome: Outcome::InProgress,
        };
        for p in [Player::X, Player::O] {
            if board.has_line(p) {
                board.outcome = Outcome::Won(p);
                return board;
            }
        }
        if board.is_full() {
            board.outcome = Outcome::Draw;
        }
        board
    }

    #[inline]
    pub fn get(&self, idx: u8) -> Option<Player> {
        self.cells[usize::from(idx)]
    }

    #[inline]
    pub fn cells(&self) -> &[Option<Player>; 9] {
        &self.cells
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
    pub fn filled_count(&self) -> u8 {
        u8::try_from(self.cells.iter().filter(|c| c.is_some()).count()).unwrap_or(9)
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled_count() == 9
    }

    /// The 8 lines (rows, columns, diagonals) as cell triples.
    #[inline]
    pub fn lines(&self) -> impl Iterator<Item = [Option<Player>; 3]> + '_ {
        LINES.iter().map(move |&l| line_cells(&self.cells, l))
    }

    #[inline]
    pub fn is_legal(&self, row: u8, col: u8) -> bool {
        match rc_to_idx(row, col) {
            Some(idx) => !self.is_terminal() && self.cells[usize::from(idx)].is_none(),
            None => false,
        }
    }

    /// Place `player` at (row, col). Returns false, leaving the board untouched, if illegal.
    pub fn place(&mut self, row: u8, col: u8, player: Player) -> bool {
        if !self.is_legal(row, col) {
            return false;
        }
        if let Some(idx) = rc_to_idx(row, col) {
            self.cells[usize::from(idx)] = Some(player);
            self.update_outcome(player);
        }
        true
    }

    // Only the mover can have just completed a line.
    fn update_outcome(&mut self, mover: Player) {
        if self.has_line(mover) {
            self.outcome = Outcome::Won(mover);
        } else if self.is_full() {
            self.outcome = Outcome::Draw;
        }
    }

    fn has_line(&self, player: Player) -> bool {
        self.lines().any(|line| line.iter().all(|&c| c == Some(player)))
    }
}
