// Minefield generation
// Lays mines by rejection sampling with an optional safe zone, then computes danger levels

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::xtm_board::Board;

/// Total number of mines on a standard board
pub const MINE_COUNT: usize = 40;

/// Cells closer than this on both axes to the anchor never receive a mine
pub const SAFE_DISTANCE: usize = 3;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("Board already holds mines, clear it before generating again")]
    AlreadyMined,
    #[error("Anchor ({0}, {1}) lies outside the board")]
    AnchorOutOfBounds(usize, usize),
    #[error("Cannot place {mines} mines, only {free} cells are eligible")]
    NotEnoughRoom { mines: usize, free: usize },
}

/// True when (row, col) falls inside the safe zone around `anchor`
fn in_safe_zone(anchor: Option<(usize, usize)>, row: usize, col: usize) -> bool {
    match anchor {
        Some((ar, ac)) => row.abs_diff(ar) < SAFE_DISTANCE && col.abs_diff(ac) < SAFE_DISTANCE,
        None => false,
    }
}

/// Number of cells on a `side` board that may receive a mine
fn eligible_cells(side: usize, anchor: Option<(usize, usize)>) -> usize {
    let zone = |centre: usize| {
        let lo = centre.saturating_sub(SAFE_DISTANCE - 1);
        let hi = (centre + SAFE_DISTANCE - 1).min(side - 1);
        hi - lo + 1
    };
    match anchor {
        Some((ar, ac)) => side * side - zone(ar) * zone(ac),
        None => side * side,
    }
}

/// Largest safe zone any anchor can carve out of a `side` board
pub fn worst_case_eligible(side: usize) -> usize {
    if side == 0 {
        return 0;
    }
    let centre = side / 2;
    eligible_cells(side, Some((centre, centre)))
}

/// Place exactly `mines` mines on a cleared board and compute danger levels
///
/// When `anchor` is given, no mine is placed within `SAFE_DISTANCE` of it on
/// both axes, so a first click there always lands on a zero cell.
/// Preconditions are validated before sampling, so the loop always terminates.
pub fn generate<R: Rng + ?Sized>(
    board: &mut Board,
    mines: usize,
    anchor: Option<(usize, usize)>,
    rng: &mut R,
) -> Result<(), GenError> {
    if board.is_mined() {
        return Err(GenError::AlreadyMined);
    }
    if let Some((ar, ac)) = anchor {
        if !board.contains(ar, ac) {
            return Err(GenError::AnchorOutOfBounds(ar, ac));
        }
    }
    let side = board.side();
    let free = eligible_cells(side, anchor);
    if mines > free {
        return Err(GenError::NotEnoughRoom { mines, free });
    }

    let mut placed = 0;
    let mut draws = 0u64;
    while placed < mines {
        draws += 1;
        let row = rng.gen_range(0..side);
        let col = rng.gen_range(0..side);
        if in_safe_zone(anchor, row, col) {
            continue;
        }
        let cell = board.cell_mut(row, col);
        if !cell.mine {
            cell.mine = true;
            placed += 1;
        }
    }
    board.set_mined();
    debug!("laid {placed} mines around anchor {anchor:?} in {draws} draws");

    compute_danger_levels(board);
    Ok(())
}

/// Set every non-mine cell's danger level to its count of mine neighbours
pub fn compute_danger_levels(board: &mut Board) {
    let side = board.side();
    for row in 0..side {
        for col in 0..side {
            if board.cell(row, col).mine {
                continue;
            }
            let danger = board
                .neighbours(row, col)
                .filter(|&(r, c)| board.cell(r, c).mine)
                .count() as u8;
            board.cell_mut(row, col).danger = danger;
        }
    }
}

#[cfg(test)]
pub(crate) fn lay_mines(side: usize, mines: &[(usize, usize)]) -> Board {
    let mut board = Board::new(side);
    for &(r, c) in mines {
        board.cell_mut(r, c).mine = true;
    }
    board.set_mined();
    compute_danger_levels(&mut board);
    board
}
