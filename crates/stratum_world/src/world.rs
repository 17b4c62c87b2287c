//! # World
//!
//! The block grid together with the sink that renders it. Every change to
//! block visibility goes through here, so a block is visible exactly when it
//! owns a live instance, and the handle index always points back at it.

use std::collections::HashMap;

use stratum_procedural::Seed;

use crate::block::{Block, InstanceHandle, OreType};
use crate::grid::{GridPos, WorldGrid};
use crate::render::{InstanceSink, NullSink};

/// A generated voxel world.
pub struct World<S: InstanceSink = NullSink> {
    grid: WorldGrid,
    sink: S,
    handles: HashMap<InstanceHandle, GridPos>,
    seed: Seed,
}

impl<S: InstanceSink> World<S> {
    /// Creates an empty world.
    #[must_use]
    pub fn new(width: usize, height: usize, depth: usize, seed: Seed, sink: S) -> Self {
        Self { grid: WorldGrid::new(width, height, depth), sink, handles: HashMap::new(), seed }
    }

    /// The block grid.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    /// The instance sink.
    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Seed the world was built from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> Seed {
        self.seed
    }

    /// Position of the block rendered by `handle`.
    #[must_use]
    pub fn position_of(&self, handle: InstanceHandle) -> Option<GridPos> {
        self.handles.get(&handle).copied()
    }

    /// Number of blocks of each type, indexed by `OreType as usize`.
    #[must_use]
    pub fn census(&self) -> [usize; OreType::ALL.len()] {
        let mut counts = [0; OreType::ALL.len()];
        for (_, block) in self.grid.blocks() {
            counts[block.ore() as usize] += 1;
        }
        counts
    }

    /// Consumes the world, returning the sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Creates a block in an empty cell. Returns false if the cell is
    /// occupied or outside the grid.
    pub(crate) fn create_block(&mut self, pos: GridPos, ore: OreType, visible: bool) -> bool {
        if !self.grid.insert(pos, Block::new(ore, false)) {
            return false;
        }
        if visible {
            self.expose(pos);
        }
        true
    }

    /// Makes a hidden block visible. Returns true if it was hidden.
    pub(crate) fn expose(&mut self, pos: GridPos) -> bool {
        let Some(block) = self.grid.get_mut(pos) else {
            return false;
        };
        if block.is_visible() {
            return false;
        }
        let handle = self.sink.create_instance(block.ore(), pos);
        block.show(handle);
        self.handles.insert(handle, pos);
        true
    }

    /// Clears a cell, releasing its instance.
    pub(crate) fn clear(&mut self, pos: GridPos) -> Option<Block> {
        let block = self.grid.take(pos)?;
        if let Some(handle) = block.instance() {
            self.handles.remove(&handle);
            self.sink.destroy_instance(handle);
        }
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(4, 4, 4, Seed::new(1), NullSink::new())
    }

    #[test]
    fn test_visible_blocks_own_instances() {
        let mut world = world();
        let pos = GridPos::new(1, 2, 3);
        assert!(world.create_block(pos, OreType::Grass, true));

        let handle = world.grid().get(pos).and_then(Block::instance).unwrap();
        assert_eq!(world.position_of(handle), Some(pos));
        assert_eq!(world.sink().live(), 1);
    }

    #[test]
    fn test_expose_is_idempotent() {
        let mut world = world();
        let pos = GridPos::new(0, 0, 0);
        world.create_block(pos, OreType::Soil, false);
        assert_eq!(world.sink().live(), 0);

        assert!(world.expose(pos));
        assert!(!world.expose(pos));
        assert_eq!(world.sink().live(), 1);
        assert_eq!(world.grid().get(pos).map(Block::ore), Some(OreType::Soil));
    }

    #[test]
    fn test_clear_releases_instance() {
        let mut world = world();
        let pos = GridPos::new(2, 1, 2);
        world.create_block(pos, OreType::Snow, true);
        let handle = world.grid().get(pos).and_then(Block::instance).unwrap();

        let block = world.clear(pos).unwrap();
        assert_eq!(block.ore(), OreType::Snow);
        assert_eq!(world.sink().live(), 0);
        assert_eq!(world.position_of(handle), None);
    }

    #[test]
    fn test_census() {
        let mut world = world();
        world.create_block(GridPos::new(0, 0, 0), OreType::Undestroyed, true);
        world.create_block(GridPos::new(1, 1, 0), OreType::Iron, false);
        world.create_block(GridPos::new(2, 1, 0), OreType::Iron, false);

        let census = world.census();
        assert_eq!(census[OreType::Undestroyed as usize], 1);
        assert_eq!(census[OreType::Iron as usize], 2);
        assert_eq!(census.iter().sum::<usize>(), 3);
    }
}
