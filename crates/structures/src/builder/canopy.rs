//! Canopies and shelters: a roof carried on pillars, no walls.

use footprint::{Column, ColumnSet};

use crate::world::VoxelWriter;

use super::{facade, voxel, BuildContext, UnitPlan};

/// Fill column closest to `target`.
fn nearest(fill: &ColumnSet, target: Column) -> Option<Column> {
    if fill.contains(target) {
        return Some(target);
    }
    fill.iter().min_by_key(|c| c.distance_squared(target))
}

/// Pillar positions: each distinct outer-ring vertex snapped into the fill.
pub(super) fn pillar_columns(plan: &UnitPlan<'_>) -> ColumnSet {
    plan.unit
        .rings
        .iter()
        .flat_map(|ring| ring.vertices().iter().copied())
        .filter_map(|v| nearest(&plan.unit.fill, v))
        .collect()
}

/// Returns pillar columns skipped for lack of terrain.
pub(super) fn build(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) -> usize {
    facade::roof(plan, ctx, w);

    let pillar = &ctx.config.materials.pillar;
    let mut skipped = 0;
    for column in pillar_columns(plan).iter() {
        let Some(ground) = ctx.terrain.get(column) else {
            skipped += 1;
            continue;
        };
        for y in ground + 1..=plan.wall_top {
            w.set_if_air(voxel(column, y), pillar);
        }
    }
    skipped
}
