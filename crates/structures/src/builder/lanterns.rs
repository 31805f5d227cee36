//! Exterior wall lanterns along the outline.

use footprint::line::polyline;
use footprint::Column;

use crate::world::VoxelWriter;

use super::{outward, voxel, BuildContext, UnitPlan};

/// Perimeter columns in walk order, then every `step`-th one.
///
/// Units with outer rings follow the ring outline; the rest (contours) fall
/// back to a diagonal lattice over the edge set.
fn candidates(plan: &UnitPlan<'_>, step: i32) -> Vec<Column> {
    if plan.unit.rings.is_empty() {
        return plan
            .edge
            .iter()
            .filter(|c| (c.x + c.z).rem_euclid(step) == 0)
            .collect();
    }
    let mut seen = std::collections::HashSet::new();
    plan.unit
        .rings
        .iter()
        .flat_map(|ring| polyline(ring.points()))
        .filter(|c| plan.edge.contains(*c) && seen.insert(*c))
        .step_by(step as usize)
        .collect()
}

/// Try to hang a lantern on the outside of `column`.
fn mount(
    plan: &UnitPlan<'_>,
    column: Column,
    y: i32,
    ctx: &BuildContext<'_>,
    w: &mut VoxelWriter<'_>,
) -> bool {
    let Some((dx, dz)) = outward(&plan.unit.fill, column) else {
        return false;
    };
    // Needs solid, non-glazed wall behind it.
    match w.get(voxel(column, y)) {
        Some(wall) if wall == plan.facade => {}
        _ => return false,
    }
    w.set_if_air(voxel(column.offset(dx, dz), y), &ctx.config.lanterns.material)
}

/// Returns lanterns placed. Spots that stay obstructed after searching the
/// neighbourhood are skipped.
pub(super) fn place(plan: &UnitPlan<'_>, ctx: &BuildContext<'_>, w: &mut VoxelWriter<'_>) -> usize {
    let cfg = &ctx.config.lanterns;
    if !cfg.enabled || cfg.step < 1 {
        return 0;
    }
    let y = plan.base + cfg.height.clamp(0, (plan.wall_top - plan.base).max(0));
    let mut placed = 0;
    for column in candidates(plan, cfg.step) {
        let found = mount(plan, column, y, ctx, w)
            || (1..=cfg.search_radius.max(0)).any(|r| {
                let ring: Vec<Column> = plan
                    .edge
                    .iter()
                    .filter(|c| c.chebyshev(column) == r)
                    .collect();
                ring.into_iter().any(|c| mount(plan, c, y, ctx, w))
            });
        if found {
            placed += 1;
        }
    }
    placed
}
