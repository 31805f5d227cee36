use std::collections::HashMap;

use bevy::math::IVec3;
use bevy::prelude::*;

use super::{Block, TerrainSource, VoxelStore};

/// Default writable Y range.
pub const DEFAULT_HEIGHT_BOUNDS: (i32, i32) = (-64, 319);

/// Sparse in-memory voxel world. Absent positions are air.
#[derive(Resource, Debug, Clone)]
pub struct VoxelGrid {
    voxels: HashMap<IVec3, Block>,
    height_bounds: (i32, i32),
}

impl Default for VoxelGrid {
    fn default() -> Self {
        Self::new(DEFAULT_HEIGHT_BOUNDS)
    }
}

impl VoxelGrid {
    pub fn new(height_bounds: (i32, i32)) -> Self {
        Self {
            voxels: HashMap::new(),
            height_bounds,
        }
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn height_bounds(&self) -> (i32, i32) {
        self.height_bounds
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec3, &Block)> + '_ {
        self.voxels.iter().map(|(pos, block)| (*pos, block))
    }

    /// Fill `x, z` from `bottom` to `top` inclusive.
    pub fn fill_column(&mut self, x: i32, z: i32, bottom: i32, top: i32, block: &Block) {
        for y in bottom..=top {
            self.set_voxel(IVec3::new(x, y, z), block.clone());
        }
    }

    /// Number of voxels holding `block`.
    pub fn count(&self, block: &Block) -> usize {
        self.voxels.values().filter(|b| *b == block).count()
    }

    /// Topmost non-air voxel of a column, scanning down from the upper bound.
    pub fn surface_y(&self, x: i32, z: i32) -> Option<i32> {
        let (min_y, max_y) = self.height_bounds;
        (min_y..=max_y)
            .rev()
            .find(|y| self.voxels.contains_key(&IVec3::new(x, *y, z)))
    }
}

impl VoxelStore for VoxelGrid {
    fn get_voxel(&self, pos: IVec3) -> Option<Block> {
        self.voxels.get(&pos).cloned()
    }

    fn set_voxel(&mut self, pos: IVec3, block: Block) {
        if block.is_air() {
            self.voxels.remove(&pos);
        } else {
            self.voxels.insert(pos, block);
        }
    }
}

/// A grid used directly as terrain reads back its own surface, so any
/// structure already written shows up as ground. Capture a
/// [`super::HeightField`] before writing.
impl TerrainSource for VoxelGrid {
    fn ground_elevation(&self, x: i32, z: i32) -> Option<i32> {
        self.surface_y(x, z)
    }

    fn build_height_bounds(&self) -> (i32, i32) {
        self.height_bounds
    }
}
