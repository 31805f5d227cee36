use std::collections::HashSet;

use bevy::math::IVec3;

use super::{Block, VoxelStore};

/// Every position written during one synthesis run.
///
/// Lets a stage tell a previous unit's output apart from pre-existing world
/// content, e.g. to keep a lower part's roof intact where an upper part
/// starts.
#[derive(Debug, Clone, Default)]
pub struct WriteLog {
    written: HashSet<IVec3>,
}

impl WriteLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, pos: IVec3) {
        self.written.insert(pos);
    }

    pub fn contains(&self, pos: IVec3) -> bool {
        self.written.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.written.len()
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }
}

/// The only path construction stages use to touch voxels: clamps writes to
/// the build-height bounds and records each one in the [`WriteLog`].
pub struct VoxelWriter<'a> {
    store: &'a mut dyn VoxelStore,
    log: &'a mut WriteLog,
    min_y: i32,
    max_y: i32,
}

impl<'a> VoxelWriter<'a> {
    pub fn new(store: &'a mut dyn VoxelStore, log: &'a mut WriteLog, bounds: (i32, i32)) -> Self {
        Self {
            store,
            log,
            min_y: bounds.0,
            max_y: bounds.1,
        }
    }

    pub fn in_bounds(&self, y: i32) -> bool {
        (self.min_y..=self.max_y).contains(&y)
    }

    pub fn get(&self, pos: IVec3) -> Option<Block> {
        self.store.get_voxel(pos).filter(|b| !b.is_air())
    }

    pub fn is_air(&self, pos: IVec3) -> bool {
        self.get(pos).is_none()
    }

    /// Non-air voxel that this run wrote earlier.
    pub fn is_joint(&self, pos: IVec3) -> bool {
        self.log.contains(pos) && !self.is_air(pos)
    }

    /// Returns `false` when `pos` is outside the build-height bounds.
    pub fn set(&mut self, pos: IVec3, block: &Block) -> bool {
        if !self.in_bounds(pos.y) {
            return false;
        }
        self.store.set_voxel(pos, block.clone());
        self.log.record(pos);
        true
    }

    pub fn clear(&mut self, pos: IVec3) -> bool {
        self.set(pos, &Block::AIR)
    }

    /// Write only if the voxel is currently air.
    pub fn set_if_air(&mut self, pos: IVec3, block: &Block) -> bool {
        self.is_air(pos) && self.set(pos, block)
    }
}
