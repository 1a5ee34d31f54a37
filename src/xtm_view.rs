// Board presentation
// Chooses the tile and digit to draw for each cell and maps pointer positions back to cells

use ratatui::layout::Rect;

use crate::xtm_board::Cell;

/// Width of one tile in terminal columns
pub const TILE_W: u16 = 2;
/// Height of one tile in terminal rows
pub const TILE_H: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Blank,   // Hidden
    Cleared, // Revealed, no mine
    Flagged,
    Mine,    // Revealed mine
}

pub fn tile_for(cell: &Cell) -> Tile {
    if cell.is_revealed() {
        if cell.mine { Tile::Mine } else { Tile::Cleared }
    } else if cell.is_flagged() {
        Tile::Flagged
    } else {
        Tile::Blank
    }
}

/// Digit to draw atop a revealed, non-mine, numbered cell
pub fn danger_glyph(cell: &Cell) -> Option<u8> {
    if cell.is_revealed() && !cell.mine && cell.danger > 0 {
        Some(cell.danger)
    } else {
        None
    }
}

/// Characters used for each tile kind
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub blank: &'static str,
    pub cleared: &'static str,
    pub flag: &'static str,
    pub mine: &'static str,
}

impl Glyphs {
    pub fn new(ascii: bool) -> Self {
        Glyphs {
            blank: if ascii { "#" } else { "■" },
            cleared: " ",
            flag: if ascii { "F" } else { "⚑" },
            mine: if ascii { "*" } else { "☼" },
        }
    }

    pub fn for_tile(&self, tile: Tile) -> &'static str {
        match tile {
            Tile::Blank => self.blank,
            Tile::Cleared => self.cleared,
            Tile::Flagged => self.flag,
            Tile::Mine => self.mine,
        }
    }
}

/// Where the grid sits on screen, in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    pub origin_x: u16, // Column of the first tile
    pub origin_y: u16, // Row of the first tile, below the status line
    pub side: usize,
}

impl BoardGeometry {
    /// Width and height of the tile area for a board of `side` cells
    pub fn extent(side: usize) -> (u16, u16) {
        (side as u16 * TILE_W, side as u16 * TILE_H)
    }

    /// Grid cell under the pointer, if any
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let dx = x.checked_sub(self.origin_x)?;
        let dy = y.checked_sub(self.origin_y)?;
        let row = (dy / TILE_H) as usize;
        let col = (dx / TILE_W) as usize;
        if row < self.side && col < self.side {
            Some((row, col))
        } else {
            None
        }
    }

    /// Screen rectangle covered by the tile at (row, col)
    pub fn tile_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            self.origin_x + col as u16 * TILE_W,
            self.origin_y + row as u16 * TILE_H,
            TILE_W,
            TILE_H,
        )
    }
}
