//! Ground work: foundation, skirt and interior clearing.

use crate::constants::SKIRT_MAX_DEPTH;
use crate::world::VoxelWriter;

use super::{voxel, BuildContext, UnitPlan};

/// Fill from the terrain up to the storey-zero base. Only for units that
/// start at ground level. Returns the number of columns without terrain.
pub(super) fn foundation(
    plan: &UnitPlan<'_>,
    ctx: &BuildContext<'_>,
    w: &mut VoxelWriter<'_>,
) -> usize {
    if plan.unit.extent.start != 0 {
        return 0;
    }
    let material = &ctx.config.materials.foundation;
    let mut skipped = 0;
    for column in plan.unit.fill.iter() {
        let Some(ground) = ctx.terrain.get(column) else {
            skipped += 1;
            continue;
        };
        for y in ground + 1..plan.base {
            w.set(voxel(column, y), material);
        }
    }
    skipped
}

/// Extend the perimeter walls of a raised, fully anchored unit downward until
/// they meet something solid, so explicit min/max ranges do not float.
pub(super) fn skirt(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) {
    let extent = &plan.unit.extent;
    if extent.start <= 0 || !(extent.anchored_start && extent.anchored_end) {
        return;
    }
    let floor_limit = plan.base - SKIRT_MAX_DEPTH;
    for column in plan.edge.iter() {
        // Already standing on an earlier unit.
        if w.is_joint(voxel(column, plan.base)) || w.is_joint(voxel(column, plan.base - 1)) {
            continue;
        }
        let stop = ctx
            .terrain
            .get(column)
            .map_or(floor_limit, |g| g.max(floor_limit));
        let mut y = plan.base - 1;
        while y > stop && w.is_air(voxel(column, y)) {
            if !w.set(voxel(column, y), &plan.facade) {
                break;
            }
            y -= 1;
        }
    }
}

/// Empty the interior from the base up to one row above the roof.
///
/// A column starts above any contiguous run of voxels this run already wrote
/// at the base, so a lower unit's roof survives where this one sits on it.
pub(super) fn clear_interior(plan: &UnitPlan<'_>, w: &mut VoxelWriter<'_>) {
    let top = plan.wall_top + plan.unit.extent.roof_thickness + 1;
    for column in plan.interior.iter() {
        let mut y = plan.base;
        while y <= top && w.is_joint(voxel(column, y)) {
            y += 1;
        }
        for y in y..=top {
            if !w.is_air(voxel(column, y)) {
                w.clear(voxel(column, y));
            }
        }
    }
}
