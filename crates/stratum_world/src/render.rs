//! # Render Seam
//!
//! The world never draws anything itself. Visible blocks get an instance
//! from an [`InstanceSink`]; removed blocks hand it back. A graphical
//! front-end implements the trait, headless runs use [`NullSink`].

use crate::block::{InstanceHandle, OreType};
use crate::grid::GridPos;

/// Receiver of instance lifetimes.
pub trait InstanceSink {
    /// Creates a render instance for a block of `ore` at `pos`.
    fn create_instance(&mut self, ore: OreType, pos: GridPos) -> InstanceHandle;

    /// Destroys a render instance.
    fn destroy_instance(&mut self, handle: InstanceHandle);
}

/// A sink that renders nothing and counts instances.
#[derive(Clone, Debug, Default)]
pub struct NullSink {
    next: u64,
    live: usize,
}

impl NullSink {
    /// Creates an empty sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: 0, live: 0 }
    }

    /// Instances created and not yet destroyed.
    #[inline]
    #[must_use]
    pub const fn live(&self) -> usize {
        self.live
    }

    /// Instances ever created.
    #[inline]
    #[must_use]
    pub const fn created(&self) -> u64 {
        self.next
    }
}

impl InstanceSink for NullSink {
    fn create_instance(&mut self, _ore: OreType, _pos: GridPos) -> InstanceHandle {
        self.next += 1;
        self.live += 1;
        InstanceHandle::new(self.next)
    }

    fn destroy_instance(&mut self, _handle: InstanceHandle) {
        self.live = self.live.saturating_sub(1);
    }
}

impl<S: InstanceSink + ?Sized> InstanceSink for &mut S {
    fn create_instance(&mut self, ore: OreType, pos: GridPos) -> InstanceHandle {
        (**self).create_instance(ore, pos)
    }

    fn destroy_instance(&mut self, handle: InstanceHandle) {
        (**self).destroy_instance(handle);
    }
}
