//! # Random-Walk Carving
//!
//! Caves and clouds share one mechanism: a walker takes bounded ±1 steps
//! through the grid, and a cube kernel of radius `hole_size` around each
//! position is cleared (caves) or filled (clouds).
//!
//! Out-of-bounds access is impossible by construction. The walker starts
//! inside its bounds and every axis of a step is re-rolled until it lands
//! inside them again. Walk bounds keep `hole_size` away from the grid faces,
//! so the kernel never leaves the grid either.

use std::ops::Range;

use rand::Rng;

use crate::grid::{GridPos, WorldGrid};
use crate::render::InstanceSink;
use crate::world::World;

/// Axis-aligned box of cells, half-open on every axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// X range.
    pub x: Range<usize>,
    /// Y range.
    pub y: Range<usize>,
    /// Z range.
    pub z: Range<usize>,
}

impl Region {
    /// Returns true if `pos` lies inside the region.
    #[inline]
    #[must_use]
    pub fn contains(&self, pos: GridPos) -> bool {
        self.x.contains(&pos.x) && self.y.contains(&pos.y) && self.z.contains(&pos.z)
    }

    /// Returns true if the region holds no cell.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Every cell in the region, y-major.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.y.clone().flat_map(move |y| {
            self.z.clone().flat_map(move |z| self.x.clone().map(move |x| GridPos::new(x, y, z)))
        })
    }
}

/// A random walker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walker {
    pos: GridPos,
}

impl Walker {
    /// Places a walker uniformly inside `start`, which must not be empty.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, start: &Region) -> Self {
        Self {
            pos: GridPos::new(
                rng.gen_range(start.x.clone()),
                rng.gen_range(start.y.clone()),
                rng.gen_range(start.z.clone()),
            ),
        }
    }

    /// Current position.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> GridPos {
        self.pos
    }

    /// Moves by -1, 0 or +1 on every axis, staying inside `bounds`.
    ///
    /// The walker must already be inside `bounds`.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, bounds: &Region) {
        self.pos.x = Self::step_axis(rng, self.pos.x, &bounds.x);
        self.pos.y = Self::step_axis(rng, self.pos.y, &bounds.y);
        self.pos.z = Self::step_axis(rng, self.pos.z, &bounds.z);
    }

    fn step_axis<R: Rng + ?Sized>(rng: &mut R, value: usize, range: &Range<usize>) -> usize {
        loop {
            let delta: isize = rng.gen_range(-1..=1);
            if let Some(next) = value.checked_add_signed(delta) {
                if range.contains(&next) {
                    return next;
                }
            }
        }
    }
}

/// Cells of the cube of radius `radius` around `center` that lie in `grid`.
pub fn kernel(grid: &WorldGrid, center: GridPos, radius: usize) -> impl Iterator<Item = GridPos> + '_ {
    let r = radius as isize;
    (-r..=r).flat_map(move |dy| {
        (-r..=r).flat_map(move |dz| (-r..=r).filter_map(move |dx| center.offset(dx, dy, dz)))
    })
    .filter(move |&p| grid.contains(p))
}

/// Clears every unprotected block in the kernel. Returns the number cleared.
pub fn carve_hole<S: InstanceSink>(world: &mut World<S>, center: GridPos, radius: usize) -> usize {
    let doomed: Vec<GridPos> = kernel(world.grid(), center, radius)
        .filter(|&p| world.grid().get(p).is_some_and(|b| !b.ore().is_carve_protected()))
        .collect();
    for &pos in &doomed {
        world.clear(pos);
    }
    doomed.len()
}

/// Cells of the kernel that are empty.
pub fn empty_cells(grid: &WorldGrid, center: GridPos, radius: usize) -> Vec<GridPos> {
    kernel(grid, center, radius).filter(|&p| grid.is_empty_cell(p)).collect()
}

/// Makes every block next to an empty cell of `region` visible.
///
/// Returns the number of blocks newly exposed.
pub fn expose_region<S: InstanceSink>(world: &mut World<S>, region: &Region) -> usize {
    let mut hidden = Vec::new();
    for pos in region.cells() {
        if !world.grid().is_empty_cell(pos) {
            continue;
        }
        hidden.extend(
            world
                .grid()
                .neighbors(pos)
                .filter(|&n| world.grid().get(n).is_some_and(|b| !b.is_visible())),
        );
    }
    hidden.into_iter().filter(|&pos| world.expose(pos)).count()
}
