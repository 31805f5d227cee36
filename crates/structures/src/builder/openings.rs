//! Cuts through the shell: building passages and entrance doors.

use footprint::line::polyline;
use footprint::{Column, ColumnSet};

use crate::constants::{DOOR_HEIGHT, LANDING_MAX_DEPTH};
use crate::world::VoxelWriter;

use super::{outward, voxel, BuildContext, UnitPlan};

// ---------------------------------------------------------------------------
// Passages
// ---------------------------------------------------------------------------

/// Square neighbourhood of `radius` around every member.
fn dilate(set: &ColumnSet, radius: i32) -> ColumnSet {
    set.iter()
        .flat_map(|c| {
            (-radius..=radius)
                .flat_map(move |dx| (-radius..=radius).map(move |dz| c.offset(dx, dz)))
        })
        .collect()
}

/// Carve a corridor along every passage line that crosses the unit, then
/// line it with a sleeve (side walls and ceiling) and ceiling lights.
/// Passages run at street level, so raised units are left alone.
pub(super) fn passages(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) {
    if plan.unit.extent.start != 0 {
        return;
    }
    let cfg = &ctx.config.passages;
    let clearance = cfg.clearance(ctx.config.level_height);
    let half = (cfg.clear_width - 1).max(0) / 2;
    let ceiling = plan.base + clearance;
    let step = cfg.light_step.max(1) as usize;

    for line in ctx.passages {
        let path = polyline(line);
        let centre: ColumnSet = path.iter().copied().collect();
        if !centre.intersects(&plan.unit.fill) {
            continue;
        }
        let corridor = dilate(&centre, half).intersection(&plan.unit.fill);
        let sleeve = dilate(&corridor, 1)
            .difference(&corridor)
            .intersection(&plan.unit.fill);

        for column in corridor.iter() {
            for y in plan.base..ceiling {
                w.clear(voxel(column, y));
            }
            w.set(voxel(column, ceiling), &cfg.sleeve_material);
        }
        for column in sleeve.iter() {
            for y in plan.base..=ceiling {
                w.set(voxel(column, y), &cfg.sleeve_material);
            }
        }
        for column in path
            .iter()
            .filter(|c| corridor.contains(**c))
            .step_by(step)
        {
            w.set(voxel(*column, ceiling), &cfg.light_material);
        }
    }
}

// ---------------------------------------------------------------------------
// Doors
// ---------------------------------------------------------------------------

/// Perimeter column an entrance snaps to: the nearest edge column within the
/// snap distance, ties broken by column order.
pub(super) fn snap_entrance(edge: &ColumnSet, entrance: Column, snap: i32) -> Option<Column> {
    edge.iter()
        .filter(|c| c.chebyshev(entrance) <= snap)
        .min_by_key(|c| c.distance_squared(entrance))
}

/// Open a doorway at each entrance on this unit's perimeter and add a landing
/// outside when the ground there is more than one block below the threshold.
/// Only ground-level units get doors. Returns doors opened.
pub(super) fn doors(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) -> usize {
    if plan.unit.extent.start != 0 {
        return 0;
    }
    let cfg = &ctx.config.doors;
    let mut opened = 0;
    for entrance in ctx.entrances {
        let Some(door) = snap_entrance(&plan.edge, *entrance, cfg.snap_distance) else {
            continue;
        };
        let Some((dx, dz)) = outward(&plan.unit.fill, door) else {
            continue;
        };
        let top = (plan.base + DOOR_HEIGHT - 1).min(plan.wall_top);
        for y in plan.base..=top {
            w.clear(voxel(door, y));
        }
        opened += 1;

        let outside = door.offset(dx, dz);
        let Some(ground) = ctx.terrain.get(outside) else {
            continue;
        };
        if ground >= plan.base - 1 {
            continue;
        }
        let bottom = (ground + 1).max(plan.base - LANDING_MAX_DEPTH);
        for y in bottom..plan.base {
            w.set_if_air(voxel(outside, y), &cfg.landing_material);
        }
    }
    opened
}
