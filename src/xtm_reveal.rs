// Flood reveal
// Opens a cell and, from zero-danger cells, spreads through orthogonal neighbours

use crate::xtm_board::{Board, CellState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Target was out of bounds, already revealed or flagged
    Ignored,
    /// Number of cells newly revealed, none of them a mine
    Cleared(usize),
    /// Target was a mine; nothing else was revealed
    Detonated,
}

/// Reveal (row, col) and flood through connected zero-danger cells
///
/// Expansion is orthogonal only and stops at numbered cells. Flagged cells are
/// skipped and keep their flag. A cell is marked revealed before its
/// neighbours are queued, so no cell is visited twice.
pub fn reveal(board: &mut Board, row: usize, col: usize) -> RevealOutcome {
    match board.get(row, col) {
        Some(cell) if cell.state == CellState::Hidden => {}
        _ => return RevealOutcome::Ignored,
    }

    let target = board.cell_mut(row, col);
    target.state = CellState::Revealed;
    if target.mine {
        return RevealOutcome::Detonated;
    }

    let mut cleared = 1;
    let mut pending = vec![(row, col)];
    while let Some((r, c)) = pending.pop() {
        if board.cell(r, c).danger > 0 {
            continue;
        }
        for (nr, nc) in board.orthogonal(r, c) {
            let next = board.cell_mut(nr, nc);
            // Zero cells never border a mine, so the flood cannot open one
            if next.state != CellState::Hidden || next.mine {
                continue;
            }
            next.state = CellState::Revealed;
            cleared += 1;
            pending.push((nr, nc));
        }
    }
    RevealOutcome::Cleared(cleared)
}

/// Mark every cell revealed without touching the layout
pub fn reveal_all(board: &mut Board) {
    for cell in board.iter_mut() {
        cell.state = CellState::Revealed;
    }
}
