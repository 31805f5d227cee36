//! Exterior shell: walls, window bands and the roof.

use footprint::Column;

use crate::roof::{direction_hint, RoofInput, RoofShape};
use crate::world::VoxelWriter;

use super::{is_glass_facade, voxel, BuildContext, UnitPlan};

pub(super) fn walls(plan: &UnitPlan<'_>, w: &mut VoxelWriter<'_>) {
    for column in plan.edge.iter() {
        for y in plan.base..=plan.wall_top {
            w.set(voxel(column, y), &plan.facade);
        }
    }
}

/// Replace wall voxels with glazing in a periodic on/off pattern, per storey.
///
/// Rows run from just above each slab for `level_height - 2` blocks (at
/// least one), leaving a spandrel under the next slab.
pub(super) fn windows(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) {
    if !plan.unit.glazed || is_glass_facade(&plan.unit.tags, &plan.facade) {
        return;
    }
    let pattern = &ctx.config.windows;
    let lh = ctx.config.level_height.max(1);
    let band = (lh - 2).max(1);
    let glazed: Vec<Column> = plan
        .edge
        .iter()
        .filter(|c| pattern.is_glazed(c.x, c.z))
        .collect();
    for slab in plan.slab_rows(lh) {
        let last = (slab + band).min(plan.wall_top);
        for column in &glazed {
            for y in slab + 1..=last {
                let pos = voxel(*column, y);
                if w.get(pos).as_ref() == Some(&plan.facade) {
                    w.set(pos, &pattern.material);
                }
            }
        }
    }
}

pub(super) fn roof(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) {
    let shape = RoofShape::from_tags(&plan.unit.tags);
    let (direction, across) = direction_hint(&plan.unit.tags);
    let wall_top = plan.wall_top;
    let top = move |_: Column| wall_top;
    let input = RoofInput {
        fill: &plan.unit.fill,
        wall_top: &top,
        thickness: plan.unit.extent.roof_thickness,
        direction,
        across,
    };
    let Some(eave) = input.eave() else {
        return;
    };
    for (column, layers) in ctx.roofs.layers(shape, &input) {
        for y in top(column) + 1..=eave + layers.max(1) {
            w.set(voxel(column, y), &plan.roof);
        }
    }
}
