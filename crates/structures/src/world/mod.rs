//! World collaborators: the voxel store, the terrain source and the material
//! resolver, plus in-memory implementations of each.
//!
//! Construction only talks to these traits. The in-memory types back the Bevy
//! plugin and the test harness.

pub mod blocks;
pub mod terrain;
pub mod voxels;
pub mod write_log;


use std::borrow::Cow;

use bevy::math::IVec3;
use serde::{Deserialize, Serialize};

use footprint::Tags;

pub use terrain::HeightField;
pub use voxels::VoxelGrid;
pub use write_log::{VoxelWriter, WriteLog};

/// A material identifier, e.g. `stone_bricks`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Block(Cow<'static, str>);

impl Block {
    pub const AIR: Block = Block::named("air");

    pub const fn named(name: &'static str) -> Self {
        Block(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Block(Cow::Owned(name.into()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn is_air(&self) -> bool {
        self.0 == "air"
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Voxel read/write primitive. `None` means empty (air).
pub trait VoxelStore {
    fn get_voxel(&self, pos: IVec3) -> Option<Block>;
    /// Writing [`Block::AIR`] empties the voxel.
    fn set_voxel(&mut self, pos: IVec3, block: Block);
}

/// Ground elevation sampling.
pub trait TerrainSource {
    /// Y of the topmost terrain voxel of the column, if known.
    fn ground_elevation(&self, x: i32, z: i32) -> Option<i32>;
    /// Inclusive `(min, max)` Y range that may be written.
    fn build_height_bounds(&self) -> (i32, i32);
}

/// Pure tag → material lookups.
pub trait MaterialResolver {
    fn facade_material(&self, tags: &Tags) -> Block;
    fn roof_material(&self, tags: &Tags) -> Block;
}
