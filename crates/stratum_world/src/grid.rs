//! # World Grid
//!
//! Dense block storage. The grid spans `x ∈ [0, width)`, `y ∈ [0, height)`,
//! `z ∈ [0, depth)` and is stored flat in `[y][z][x]` order, so a horizontal
//! layer is contiguous. Each cell holds a block or nothing.
//!
//! Neighbour lookups are coordinate arithmetic with bounds checks; no cell
//! stores references to another.

use crate::block::Block;

/// A cell coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridPos {
    /// X coordinate (map column).
    pub x: usize,
    /// Y coordinate (elevation).
    pub y: usize,
    /// Z coordinate (map row).
    pub z: usize,
}

impl GridPos {
    /// Creates a new position.
    #[inline]
    #[must_use]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Offsets the position, or `None` if any axis would go negative.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: isize, dy: isize, dz: isize) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
            z: self.z.checked_add_signed(dz)?,
        })
    }
}

/// Offsets of the 26 cells around a cell.
const NEIGHBOR_OFFSETS: [(isize, isize, isize); 26] = {
    let mut offsets = [(0, 0, 0); 26];
    let mut n = 0;
    let mut dy = -1;
    while dy <= 1 {
        let mut dz = -1;
        while dz <= 1 {
            let mut dx = -1;
            while dx <= 1 {
                if dx != 0 || dy != 0 || dz != 0 {
                    offsets[n] = (dx, dy, dz);
                    n += 1;
                }
                dx += 1;
            }
            dz += 1;
        }
        dy += 1;
    }
    offsets
};

/// Dense 3D block grid.
#[derive(Clone, Debug)]
pub struct WorldGrid {
    width: usize,
    height: usize,
    depth: usize,
    cells: Vec<Option<Block>>,
}

impl WorldGrid {
    /// Creates an empty grid.
    #[must_use]
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self { width, height, depth, cells: vec![None; width * height * depth] }
    }

    /// X extent.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Y extent (max world height).
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Z extent.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if `pos` lies inside the grid.
    #[inline]
    #[must_use]
    pub const fn contains(&self, pos: GridPos) -> bool {
        pos.x < self.width && pos.y < self.height && pos.z < self.depth
    }

    #[inline]
    fn index(&self, pos: GridPos) -> Option<usize> {
        self.contains(pos).then(|| (pos.y * self.depth + pos.z) * self.width + pos.x)
    }

    #[inline]
    fn position(&self, index: usize) -> GridPos {
        let layer = self.width * self.depth;
        GridPos::new(index % self.width, index / layer, (index % layer) / self.width)
    }

    /// Block at `pos`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, pos: GridPos) -> Option<&Block> {
        self.index(pos).and_then(|i| self.cells[i].as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, pos: GridPos) -> Option<&mut Block> {
        self.index(pos).and_then(|i| self.cells[i].as_mut())
    }

    /// Returns true if `pos` is inside the grid and holds no block.
    #[inline]
    #[must_use]
    pub fn is_empty_cell(&self, pos: GridPos) -> bool {
        self.index(pos).is_some_and(|i| self.cells[i].is_none())
    }

    /// Puts `block` into an empty cell. Returns false (and drops nothing)
    /// when the cell is occupied or outside the grid.
    pub(crate) fn insert(&mut self, pos: GridPos, block: Block) -> bool {
        match self.index(pos) {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(block);
                true
            }
            _ => false,
        }
    }

    /// Clears a cell, returning its block.
    pub(crate) fn take(&mut self, pos: GridPos) -> Option<Block> {
        let i = self.index(pos)?;
        self.cells[i].take()
    }

    /// In-bounds 26-connected neighbours of `pos`.
    pub fn neighbors(&self, pos: GridPos) -> impl Iterator<Item = GridPos> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy, dz)| pos.offset(dx, dy, dz))
            .filter(move |&p| self.contains(p))
    }

    /// All occupied cells with their blocks.
    pub fn blocks(&self) -> impl Iterator<Item = (GridPos, &Block)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|b| (self.position(i), b)))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Number of visible blocks.
    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.cells.iter().flatten().filter(|b| b.is_visible()).count()
    }
}
