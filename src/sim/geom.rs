//! Grid directions and pixel-space bounding boxes
//!
//! Cells are addressed as `IVec2 { x: col, y: row }`; entities live in pixel
//! space and are converted to cells by floor division with the level's cell
//! size.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// One of the four grid directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in wandering-enemy index order (0 = up, 1 = right, ...)
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit step in cell/pixel space (y grows downward)
    #[inline]
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Right => IVec2::new(1, 0),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
        }
    }

    /// Direction from a wandering-enemy index (taken modulo 4)
    pub fn from_index(index: u32) -> Self {
        Self::ALL[(index % 4) as usize]
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

/// Axis-aligned bounding box in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            size: IVec2::new(width, height),
        }
    }

    pub fn from_pos_size(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    /// Rect covering a single grid cell
    pub fn for_cell(cell: IVec2, cell_size: IVec2) -> Self {
        Self {
            pos: cell * cell_size,
            size: cell_size,
        }
    }

    #[inline]
    pub fn x(&self) -> i32 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y
    }

    /// Overlap test, half-open on the trailing edges: rects that only touch
    /// do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    /// The four corner pixels (inclusive), in cell space
    pub fn corner_cells(&self, cell_size: IVec2) -> [IVec2; 4] {
        let min = self.pos;
        let max = self.pos + self.size - IVec2::ONE;
        [
            pixel_to_cell(min, cell_size),
            pixel_to_cell(IVec2::new(max.x, min.y), cell_size),
            pixel_to_cell(IVec2::new(min.x, max.y), cell_size),
            pixel_to_cell(max, cell_size),
        ]
    }
}

/// Convert a pixel position to the cell containing it
#[inline]
pub fn pixel_to_cell(pixel: IVec2, cell_size: IVec2) -> IVec2 {
    IVec2::new(
        pixel.x.div_euclid(cell_size.x),
        pixel.y.div_euclid(cell_size.y),
    )
}
