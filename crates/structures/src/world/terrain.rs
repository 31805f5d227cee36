use std::collections::HashMap;

use bevy::prelude::*;

use footprint::{Column, ColumnSet};

use super::TerrainSource;

/// Sparse map of ground elevations, keyed by column.
///
/// Used both as a terrain source in its own right and as the snapshot taken
/// before any voxel is written, so that later units never sample terrain
/// that earlier units have built over. Only covered columns are stored, so
/// footprints far apart cost no more than footprints side by side.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HeightField {
    heights: HashMap<Column, Option<i32>>,
    height_bounds: (i32, i32),
}

impl HeightField {
    /// Empty field covering nothing.
    pub fn empty(height_bounds: (i32, i32)) -> Self {
        Self {
            heights: HashMap::new(),
            height_bounds,
        }
    }

    /// Field over the inclusive rectangle `min..=max`, sampling `f` once per
    /// column.
    pub fn from_fn(
        min: Column,
        max: Column,
        height_bounds: (i32, i32),
        f: impl FnMut(Column) -> Option<i32>,
    ) -> Self {
        let mut field = Self::empty(height_bounds);
        field.cover(min, max, f);
        field
    }

    /// Level ground at `y` over the rectangle.
    pub fn flat(min: Column, max: Column, y: i32, height_bounds: (i32, i32)) -> Self {
        Self::from_fn(min, max, height_bounds, |_| Some(y))
    }

    /// Snapshot `source` over the rectangle.
    pub fn capture(source: &(impl TerrainSource + ?Sized), min: Column, max: Column) -> Self {
        Self::capture_regions(source, [(min, max)])
    }

    /// Snapshot `source` over several inclusive rectangles. Overlaps are
    /// sampled once.
    pub fn capture_regions(
        source: &(impl TerrainSource + ?Sized),
        regions: impl IntoIterator<Item = (Column, Column)>,
    ) -> Self {
        let mut field = Self::empty(source.build_height_bounds());
        for (min, max) in regions {
            field.cover(min, max, |c| source.ground_elevation(c.x, c.z));
        }
        field
    }

    /// Sample `f` for every column of `min..=max` not already covered.
    fn cover(&mut self, min: Column, max: Column, mut f: impl FnMut(Column) -> Option<i32>) {
        if max.x < min.x || max.z < min.z {
            return;
        }
        for z in min.z..=max.z {
            for x in min.x..=max.x {
                let column = Column::new(x, z);
                self.heights.entry(column).or_insert_with(|| f(column));
            }
        }
    }

    pub fn get(&self, column: Column) -> Option<i32> {
        self.heights.get(&column).copied().flatten()
    }

    /// Overwrite one column. Uncovered columns are ignored.
    pub fn set(&mut self, column: Column, height: Option<i32>) {
        if let Some(slot) = self.heights.get_mut(&column) {
            *slot = height;
        }
    }

    /// Highest known ground under `fill`; `None` when no column resolves.
    pub fn max_over(&self, fill: &ColumnSet) -> Option<i32> {
        fill.iter().filter_map(|c| self.get(c)).max()
    }

    /// Number of columns covered (known or not).
    pub fn area(&self) -> usize {
        self.heights.len()
    }

    pub fn height_bounds(&self) -> (i32, i32) {
        self.height_bounds
    }
}

impl TerrainSource for HeightField {
    fn ground_elevation(&self, x: i32, z: i32) -> Option<i32> {
        self.get(Column::new(x, z))
    }

    fn build_height_bounds(&self) -> (i32, i32) {
        self.height_bounds
    }
}
