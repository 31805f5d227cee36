//! Storey slabs, embedded lights and the interior privacy ring.

use footprint::{Column, ColumnSet};

use crate::constants::FLOOR_SLAB_THICKNESS;
use crate::world::VoxelWriter;

use super::{voxel, BuildContext, UnitPlan};

/// Columns that carry a light in every slab of this unit.
///
/// A lattice with the configured pitch anchored at the corner of the eroded
/// fill; when no lattice point lands inside, a single light goes to the
/// eroded column nearest the centroid.
pub(super) fn light_columns(fill: &ColumnSet, ctx: &BuildContext<'_>) -> ColumnSet {
    let lights = &ctx.config.floor_lights;
    if !lights.enabled {
        return ColumnSet::new();
    }
    let eligible = fill.erode(lights.edge_margin);
    let Some((min, _)) = eligible.bounds() else {
        return ColumnSet::new();
    };
    let pitch = lights.pitch();
    let lattice: ColumnSet = eligible
        .iter()
        .filter(|c| (c.x - min.x).rem_euclid(pitch) == 0 && (c.z - min.z).rem_euclid(pitch) == 0)
        .collect();
    if !lattice.is_empty() {
        return lattice;
    }
    nearest_to_centroid(&eligible).into_iter().collect()
}

fn nearest_to_centroid(set: &ColumnSet) -> Option<Column> {
    let (cx, cz) = set.centroid()?;
    set.iter().min_by(|a, b| {
        let da = dist2(*a, cx, cz);
        let db = dist2(*b, cx, cz);
        da.total_cmp(&db)
    })
}

fn dist2(c: Column, x: f64, z: f64) -> f64 {
    let (px, pz) = c.center();
    (px - x).powi(2) + (pz - z).powi(2)
}

/// Write one slab per storey. Voxels this run already placed are left alone
/// so stacked units keep each other's roofs. Returns lights placed.
pub(super) fn slabs(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) -> usize {
    let floor = &ctx.config.materials.floor;
    let light = &ctx.config.floor_lights.material;
    let lights = light_columns(&plan.unit.fill, ctx);
    let mut placed = 0;
    for slab in plan.slab_rows(ctx.config.level_height) {
        // Lights sit in the top row of the slab.
        let rows = (slab..slab + FLOOR_SLAB_THICKNESS).filter(|y| *y <= plan.wall_top);
        let top = rows.clone().last().unwrap_or(slab);
        for y in rows {
            for column in plan.unit.fill.iter() {
                let pos = voxel(column, y);
                if w.is_joint(pos) {
                    continue;
                }
                if y == top && lights.contains(column) {
                    if w.set(pos, light) {
                        placed += 1;
                    }
                } else {
                    w.set(pos, floor);
                }
            }
        }
    }
    placed
}

/// A low partition ring set back from the facade on every storey.
pub(super) fn privacy_ring(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) {
    let privacy = &ctx.config.privacy_walls;
    if !privacy.enabled || privacy.height < 1 {
        return;
    }
    let ring = plan.unit.fill.erode(privacy.offset).edge_set();
    if ring.is_empty() {
        return;
    }
    let lh = ctx.config.level_height.max(1);
    for slab in plan.slab_rows(lh) {
        // Stay below the next slab and the wall top.
        let last = (slab + privacy.height).min(slab + lh - 1).min(plan.wall_top);
        for column in ring.iter() {
            for y in slab + 1..=last {
                w.set_if_air(voxel(column, y), &privacy.material);
            }
        }
    }
}
