use serde::Serialize;

use crate::error::WorldGenError;

/// Offsets of the 8 Chebyshev neighbours in scan order: the row above left to right, the
/// left and right cells, then the row below left to right.
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Integer cell coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Rectangular row-major grid shared by every layer of a generated world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid<T> {
    width: u32,
    height: u32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: u32, height: u32, fill: T) -> Self {
        let total = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![fill; total],
        }
    }
}

impl<T> Grid<T> {
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> T) -> Self {
        let mut cells = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                cells.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn from_vec(width: u32, height: u32, cells: Vec<T>) -> Result<Self, WorldGenError> {
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(WorldGenError::GridLength {
                width,
                height,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index_of(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize) * (self.width as usize) + x as usize
    }

    #[inline]
    pub fn position_of(&self, index: usize) -> GridPos {
        let w = self.width as usize;
        GridPos::new((index % w) as u32, (index / w) as u32)
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width as i64 && y < self.height as i64
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(self.index_of(x, y))
    }

    pub fn set(&mut self, x: u32, y: u32, value: T) {
        if x < self.width && y < self.height {
            let idx = self.index_of(x, y);
            self.cells[idx] = value;
        }
    }

    pub fn values(&self) -> &[T] {
        &self.cells
    }

    pub fn into_values(self) -> Vec<T> {
        self.cells
    }

    /// Cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, &T)> + '_ {
        let w = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, value)| (GridPos::new((idx % w) as u32, (idx / w) as u32), value))
    }

    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(&mut f).collect(),
        }
    }

    /// Grid of this shape over `cells`, one value per cell in row-major order.
    pub(crate) fn with_cells<U>(&self, cells: Vec<U>) -> Grid<U> {
        debug_assert_eq!(cells.len(), self.cells.len());
        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn ensure_same_shape<U>(&self, other: &Grid<U>) -> Result<(), WorldGenError> {
        if self.same_shape(other) {
            Ok(())
        } else {
            Err(WorldGenError::DimensionMismatch {
                expected_width: self.width,
                expected_height: self.height,
                found_width: other.width,
                found_height: other.height,
            })
        }
    }

    /// The 8 neighbours of `(x, y)` in [`MOORE_OFFSETS`] order; `None` marks cells past the edge.
    pub fn moore_neighbors(&self, x: u32, y: u32) -> [Option<&T>; 8] {
        let mut out = [None; 8];
        for (slot, (dx, dy)) in out.iter_mut().zip(MOORE_OFFSETS) {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            if self.contains(nx, ny) {
                *slot = Some(&self.cells[self.index_of(nx as u32, ny as u32)]);
            }
        }
        out
    }
}

impl<T: Copy> Grid<T> {
    /// Copies of the neighbours, same order and sentinel as [`Grid::moore_neighbors`].
    pub fn moore_values(&self, x: u32, y: u32) -> [Option<T>; 8] {
        self.moore_neighbors(x, y).map(|n| n.copied())
    }
}
