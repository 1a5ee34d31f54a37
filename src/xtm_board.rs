// Minefield data model
// A fixed square grid of cells stored contiguously, indexed by row * side + col

/// Length of one side of the board
pub const BOARD_SIDE: usize = 16;

/// Player-visible state of a cell
/// A flagged cell is hidden by construction, so it can never also be revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// A single cell on the minesweeper board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    pub mine: bool,  // Contains a mine
    pub danger: u8,  // Adjacent mine count (0-8), meaningless for mines
    pub state: CellState,
}

impl Cell {
    fn cleared(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            mine: false,
            danger: 0,
            state: CellState::Hidden,
        }
    }

    pub fn is_revealed(&self) -> bool {
        self.state == CellState::Revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.state == CellState::Flagged
    }
}

/// Square grid of cells
#[derive(Debug, Clone)]
pub struct Board {
    side: usize,
    cells: Vec<Cell>,
    mined: bool, // Set once mines are laid, reset by clear()
}

impl Default for Board {
    fn default() -> Self {
        Board::new(BOARD_SIDE)
    }
}

impl Board {
    /// Create a cleared board of `side` x `side` cells
    pub fn new(side: usize) -> Self {
        let cells = (0..side * side)
            .map(|i| Cell::cleared(i / side, i % side))
            .collect();
        Board {
            side,
            cells,
            mined: false,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Reset every cell to its default state, keeping positions
    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::cleared(cell.row, cell.col);
        }
        self.mined = false;
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.side && col < self.side
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            self.contains(row, col),
            "cell ({row}, {col}) outside {0}x{0} board",
            self.side
        );
        row * self.side + col
    }

    /// Cell at (row, col); panics when out of range
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.index(row, col)]
    }

    /// Mutable cell at (row, col); panics when out of range
    pub fn cell_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let idx = self.index(row, col);
        &mut self.cells[idx]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.contains(row, col) {
            Some(self.cell(row, col))
        } else {
            None
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn is_mined(&self) -> bool {
        self.mined
    }

    pub(crate) fn set_mined(&mut self) {
        self.mined = true;
    }

    /// The up-to-8 in-bounds neighbours of (row, col); edges are not wrapped
    pub fn neighbours(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let last = self.side.saturating_sub(1);
        let rows = row.saturating_sub(1)..=(row + 1).min(last);
        let cols = col.saturating_sub(1)..=(col + 1).min(last);
        rows.flat_map(move |r| cols.clone().map(move |c| (r, c)))
            .filter(move |&pos| pos != (row, col))
    }

    /// The up-to-4 in-bounds orthogonal neighbours of (row, col)
    pub fn orthogonal(&self, row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> + use<> {
        let side = self.side;
        [
            (row, col.checked_sub(1)),
            (row, Some(col + 1)),
            (row.wrapping_sub(1), Some(col)),
            (row + 1, Some(col)),
        ]
        .into_iter()
        .filter_map(move |(r, c)| c.map(|c| (r, c)))
        .filter(move |&(r, c)| r < side && c < side)
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|c| c.mine).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_revealed()).count()
    }

    pub fn flagged_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_flagged()).count()
    }
}
