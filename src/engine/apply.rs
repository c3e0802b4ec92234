use crate::engine::outcome::global_outcome;
use crate::error::MoveError;
use crate::state::{Constraint, GlobalBoard, Move};
use crate::types::Outcome;

/// Check a move against the current position without touching it.
/// Returns the row-major (sub-board, cell) indices on success.
pub fn validate_move(board: &GlobalBoard, mv: Move) -> Result<(u8, u8), MoveError> {
    if board.outcome != Outcome::InProgress {
        return Err(MoveError::GameOver);
    }
    let (Some(sub), Some(cell)) = (mv.sub_index(), mv.cell_index()) else {
        return Err(MoveError::OutOfRange);
    };

    let target = &board.boards[usize::from(sub)];
    if target.is_terminal() {
        return Err(MoveError::SubBoardClosed {
            row: mv.sub_row,
            col: mv.sub_col,
        });
    }
    if let Constraint::Sub(required) = board.constraint {
        if required != sub {
            return Err(MoveError::WrongSubBoard {
                row: required / 3,
                col: required % 3,
            });
        }
    }
    if !target.is_legal(mv.cell_row, mv.cell_col) {
        return Err(MoveError::CellOccupied {
            row: mv.cell_row,
            col: mv.cell_col,
        });
    }
    Ok((sub, cell))
}

/// Apply a move in place for the player to move.
///
/// On success the sub-board is updated, the global outcome recomputed, the next constraint
/// set from the played cell (relaxed to `Any` if that sub-board is decided) and, if the game
/// goes on, the turn passes. On error nothing changes.
pub fn apply_move(board: &mut GlobalBoard, mv: Move) -> Result<(), MoveError> {
    let (sub, cell) = validate_move(board, mv)?;

    let mover = board.current;
    if !board.boards[usize::from(sub)].place(mv.cell_row, mv.cell_col, mover) {
        // validate_move already checked the cell
        return Err(MoveError::CellOccupied {
            row: mv.cell_row,
            col: mv.cell_col,
        });
    }

    board.outcome = global_outcome(&board.boards);

    board.constraint = if board.boards[usize::from(cell)].is_terminal() {
        Constraint::Any
    } else {
        Constraint::Sub(cell)
    };

    if board.outcome == Outcome::InProgress {
        board.current = mover.other();
    }
    Ok(())
}

impl GlobalBoard {
    /// Method form of [`apply_move`].
    #[inline]
    pub fn apply_move(&mut self, mv: Move) -> Result<(), MoveError> {
        apply_move(self, mv)
    }
}
