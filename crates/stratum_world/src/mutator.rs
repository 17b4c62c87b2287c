//! # Interactive Mutator
//!
//! Single-block edits on a finished world. Each call is one atomic change:
//! the grid and the instance sink are consistent again when it returns.
//!
//! Mining a block exposes the hidden neighbours strictly below it, so the
//! player sees what lies under the hole. Blocks above and beside are left
//! as they are. Bedrock cannot be mined.

use crate::block::{InstanceHandle, OreType};
use crate::error::{WorldError, WorldResult};
use crate::grid::GridPos;
use crate::render::InstanceSink;
use crate::world::World;

/// Result of a mining attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MineOutcome {
    /// The block was removed.
    Removed {
        /// Type of the removed block.
        ore: OreType,
        /// Hidden neighbours below that became visible.
        exposed: usize,
    },
    /// The block is bedrock and stays.
    Protected,
    /// There was no block.
    Empty,
}

/// Result of a placement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// A new visible block was created.
    Placed,
    /// The cell already holds a block; nothing changed.
    Occupied,
}

impl<S: InstanceSink> World<S> {
    fn check_bounds(&self, pos: GridPos) -> WorldResult<()> {
        if self.grid().contains(pos) {
            Ok(())
        } else {
            Err(WorldError::OutOfBounds { x: pos.x, y: pos.y, z: pos.z })
        }
    }

    /// Removes the block at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is outside the grid.
    pub fn mine(&mut self, pos: GridPos) -> WorldResult<MineOutcome> {
        self.check_bounds(pos)?;
        match self.grid().get(pos).map(|b| b.ore()) {
            None => return Ok(MineOutcome::Empty),
            Some(OreType::Undestroyed) => return Ok(MineOutcome::Protected),
            Some(_) => {}
        }

        let Some(block) = self.clear(pos) else {
            return Ok(MineOutcome::Empty);
        };

        let below: Vec<GridPos> = self.grid().neighbors(pos).filter(|n| n.y < pos.y).collect();
        let exposed = below.into_iter().filter(|&n| self.expose(n)).count();

        tracing::debug!(?pos, ore = %block.ore(), exposed, "mined block");
        Ok(MineOutcome::Removed { ore: block.ore(), exposed })
    }

    /// Removes the block rendered by `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownInstance`] if no block owns `handle`.
    pub fn mine_instance(&mut self, handle: InstanceHandle) -> WorldResult<MineOutcome> {
        let pos = self.position_of(handle).ok_or(WorldError::UnknownInstance(handle.value()))?;
        self.mine(pos)
    }

    /// Creates a visible block of `ore` in the empty cell at `pos`.
    ///
    /// # Errors
    ///
    /// - [`WorldError::OutOfBounds`] if `pos` is outside the grid
    /// - [`WorldError::InvalidPlacement`] for bedrock and sky blocks
    pub fn place(&mut self, pos: GridPos, ore: OreType) -> WorldResult<PlaceOutcome> {
        self.check_bounds(pos)?;
        if matches!(ore, OreType::Undestroyed | OreType::Sky) {
            return Err(WorldError::InvalidPlacement(ore));
        }
        if self.create_block(pos, ore, true) {
            tracing::debug!(?pos, %ore, "placed block");
            Ok(PlaceOutcome::Placed)
        } else {
            Ok(PlaceOutcome::Occupied)
        }
    }
}
