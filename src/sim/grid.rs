//! Level grid: walls, empty floor and ice blocks in a single cell array
//!
//! A cell is either empty, a wall, or holds its ice block directly, so the
//! "kind says ice iff an ice block exists" invariant cannot be broken.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::error::LevelError;
use super::geom::Rect;

/// Layout codes used by level configs
pub const CODE_EMPTY: u8 = 0;
pub const CODE_WALL: u8 = 1;
pub const CODE_ICE: u8 = 2;

/// An ice block sitting in a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IceBlock {
    pub bounds: Rect,
}

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Wall,
    Ice(IceBlock),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_wall(&self) -> bool {
        matches!(self, Cell::Wall)
    }

    pub fn is_ice(&self) -> bool {
        matches!(self, Cell::Ice(_))
    }
}

/// Rectangular cell grid, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    cols: i32,
    rows: i32,
    cell_size: IVec2,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid from layout codes, sizing cells to fill `play_area`
    pub fn from_layout(layout: &[Vec<u8>], play_area: IVec2) -> Result<Self, LevelError> {
        let rows = layout.len();
        let cols = layout.first().map(|r| r.len()).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(LevelError::EmptyLayout);
        }

        let cell_size = IVec2::new(play_area.x / cols as i32, play_area.y / rows as i32);
        if cell_size.x <= 0 || cell_size.y <= 0 {
            return Err(LevelError::PlayAreaTooSmall {
                width: play_area.x,
                height: play_area.y,
                cols,
                rows,
            });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (row, line) in layout.iter().enumerate() {
            if line.len() != cols {
                return Err(LevelError::RaggedLayout {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &code) in line.iter().enumerate() {
                let cell = match code {
                    CODE_EMPTY => Cell::Empty,
                    CODE_WALL => Cell::Wall,
                    CODE_ICE => Cell::Ice(IceBlock {
                        bounds: Rect::for_cell(IVec2::new(col as i32, row as i32), cell_size),
                    }),
                    _ => return Err(LevelError::UnknownCell { code, row, col }),
                };
                cells.push(cell);
            }
        }

        Ok(Self {
            cols: cols as i32,
            rows: rows as i32,
            cell_size,
            cells,
        })
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Pixel size of one cell
    #[inline]
    pub fn cell_size(&self) -> IVec2 {
        self.cell_size
    }

    #[inline]
    pub fn in_bounds(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    fn index(&self, cell: IVec2) -> Option<usize> {
        self.in_bounds(cell)
            .then(|| (cell.y * self.cols + cell.x) as usize)
    }

    /// Cell contents, `None` outside the grid
    pub fn get(&self, cell: IVec2) -> Option<&Cell> {
        self.index(cell).map(|i| &self.cells[i])
    }

    pub fn is_empty(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(Cell::is_empty)
    }

    pub fn is_wall(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(Cell::is_wall)
    }

    pub fn is_ice(&self, cell: IVec2) -> bool {
        self.get(cell).is_some_and(Cell::is_ice)
    }

    pub fn ice_block(&self, cell: IVec2) -> Option<&IceBlock> {
        match self.get(cell) {
            Some(Cell::Ice(block)) => Some(block),
            _ => None,
        }
    }

    /// Pixel rect of a cell (not bounds-checked)
    pub fn cell_rect(&self, cell: IVec2) -> Rect {
        Rect::for_cell(cell, self.cell_size)
    }

    /// Turn an empty cell into ice. Returns false if the cell was not empty.
    pub fn place_ice(&mut self, cell: IVec2) -> bool {
        let bounds = self.cell_rect(cell);
        match self.index(cell) {
            Some(i) if self.cells[i].is_empty() => {
                self.cells[i] = Cell::Ice(IceBlock { bounds });
                true
            }
            _ => false,
        }
    }

    /// Clear an ice cell back to empty. Returns false if there was no ice.
    pub fn remove_ice(&mut self, cell: IVec2) -> bool {
        match self.index(cell) {
            Some(i) if self.cells[i].is_ice() => {
                self.cells[i] = Cell::Empty;
                true
            }
            _ => false,
        }
    }

    /// Strict movement check (player, Guard, Yeti): every corner of `rect`
    /// must land on an empty in-bounds cell.
    pub fn can_move_to(&self, rect: &Rect) -> bool {
        rect.corner_cells(self.cell_size)
            .iter()
            .all(|&c| self.is_empty(c))
    }

    /// Phasing movement check (Ghost, ThermalTitan): every corner must land
    /// on an in-bounds cell that is not a wall. Ice does not block.
    pub fn can_enemy_move_to(&self, rect: &Rect) -> bool {
        rect.corner_cells(self.cell_size)
            .iter()
            .all(|&c| self.get(c).is_some_and(|cell| !cell.is_wall()))
    }

    /// All cells with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, &Cell)> {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (IVec2::new(i as i32 % cols, i as i32 / cols), cell))
    }

    pub fn ice_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_ice()).count()
    }
}
