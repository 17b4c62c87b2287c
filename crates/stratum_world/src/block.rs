//! # Blocks
//!
//! A block is an ore type, a visibility flag and an optional handle to the
//! render instance that shows it. Blocks are never retyped in place: the
//! grid only ever clears a cell or creates a new block in an empty one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Block types in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OreType {
    /// Bedrock. Only generated at y = 0.
    Undestroyed = 0,
    /// Soil
    Soil = 1,
    /// Grass
    Grass = 2,
    /// Forest floor
    Forest = 3,
    /// Stone
    Stone = 4,
    /// Iron ore
    Iron = 5,
    /// Gold ore
    Gold = 6,
    /// Diamond ore
    Diamond = 7,
    /// Snow (high ground and clouds)
    Snow = 8,
    /// Built but empty. Never generated.
    Sky = 9,
}

impl OreType {
    /// Every type, in discriminant order.
    pub const ALL: [Self; 10] = [
        Self::Undestroyed,
        Self::Soil,
        Self::Grass,
        Self::Forest,
        Self::Stone,
        Self::Iron,
        Self::Gold,
        Self::Diamond,
        Self::Snow,
        Self::Sky,
    ];

    /// Returns true for types cave carving must leave in place.
    #[inline]
    #[must_use]
    pub const fn is_carve_protected(self) -> bool {
        matches!(self, Self::Undestroyed | Self::Stone | Self::Iron | Self::Gold | Self::Diamond)
    }

    /// Returns true for ore veins.
    #[inline]
    #[must_use]
    pub const fn is_ore(self) -> bool {
        matches!(self, Self::Stone | Self::Iron | Self::Gold | Self::Diamond)
    }

    /// Lowercase display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Undestroyed => "bedrock",
            Self::Soil => "soil",
            Self::Grass => "grass",
            Self::Forest => "forest",
            Self::Stone => "stone",
            Self::Iron => "iron",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
            Self::Snow => "snow",
            Self::Sky => "sky",
        }
    }
}

impl fmt::Display for OreType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque handle to a render instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceHandle(u64);

impl InstanceHandle {
    /// Wraps a raw handle value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// A single block in the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    ore: OreType,
    visible: bool,
    instance: Option<InstanceHandle>,
}

impl Block {
    /// Creates a block without a render instance.
    #[inline]
    #[must_use]
    pub const fn new(ore: OreType, visible: bool) -> Self {
        Self { ore, visible, instance: None }
    }

    /// Block type.
    #[inline]
    #[must_use]
    pub const fn ore(&self) -> OreType {
        self.ore
    }

    /// Whether the block is rendered.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Render instance, if one exists.
    #[inline]
    #[must_use]
    pub const fn instance(&self) -> Option<InstanceHandle> {
        self.instance
    }

    /// Marks the block visible and records its instance.
    #[inline]
    pub(crate) fn show(&mut self, instance: InstanceHandle) {
        self.visible = true;
        self.instance = Some(instance);
    }
}
