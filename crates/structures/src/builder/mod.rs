//! Volume builder: turns one construction unit into voxels.
//!
//! Stage order is fixed: foundation, skirt, clearing, floor slabs, privacy
//! ring, walls, windows, roof, passages, doors, lanterns. Later stages rely
//! on what earlier ones wrote (walls overwrite slab edges, windows replace
//! wall voxels, lanterns avoid glazing), so the order must not change.
//!
//! Stages have soft preconditions only. A column with no terrain skips that
//! column; nothing aborts the unit.

mod base;
mod canopy;
mod facade;
mod floors;
mod lanterns;
mod openings;


use bevy::log::debug;
use bevy::math::IVec3;

use footprint::{Column, ColumnSet, Ring, Tags};

use crate::config::SynthesisConfig;
use crate::constants::{GLASS_MATERIALS, WORSHIP_BUILDING_TYPES};
use crate::extent::ResolvedExtent;
use crate::roof::RoofRegistry;
use crate::tags::TagView;
use crate::world::{Block, HeightField, MaterialResolver, VoxelWriter};

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A shell with no parts, built whole.
    Standalone,
    /// An independently tagged sub-volume.
    Part,
    /// The remainder of a shell not covered by its parts.
    Contour,
    /// Roof slab on pillars.
    Canopy,
}

/// One construction unit with everything resolved up front.
#[derive(Debug, Clone)]
pub struct Unit {
    pub id: i64,
    pub kind: UnitKind,
    pub fill: ColumnSet,
    /// Outer rings, walked by the lantern stage and used for canopy pillars.
    pub rings: Vec<Ring>,
    /// Effective tags (after appearance inheritance).
    pub tags: Tags,
    pub extent: ResolvedExtent,
    /// Y of storey zero before the start offset is applied.
    pub ground: i32,
    /// Window stage enabled (not a place of worship, nor inside one).
    pub glazed: bool,
}

impl Unit {
    /// Y of the lowest storey slab.
    pub fn base(&self) -> i32 {
        self.ground + self.extent.start
    }

    /// Y of the last wall row.
    pub fn wall_top(&self) -> i32 {
        self.base() + self.extent.thickness - 1
    }
}

/// True for place-of-worship footprints.
pub fn is_worship(tags: &Tags) -> bool {
    let view = TagView::new(tags);
    view.is("amenity", "place_of_worship")
        || [view.str("building"), view.str("building:part")]
            .into_iter()
            .flatten()
            .any(|v| WORSHIP_BUILDING_TYPES.contains(&v.to_ascii_lowercase().as_str()))
}

/// Facade already reads as glazing.
pub fn is_glass_facade(tags: &Tags, facade: &Block) -> bool {
    facade.name().contains("glass")
        || TagView::new(tags)
            .str("building:material")
            .is_some_and(|m| GLASS_MATERIALS.contains(&m.to_ascii_lowercase().as_str()))
}

// ---------------------------------------------------------------------------
// Context and results
// ---------------------------------------------------------------------------

/// Read-only collaborators shared by every unit of a run.
pub struct BuildContext<'a> {
    pub config: &'a SynthesisConfig,
    /// Terrain snapshot taken before the first write.
    pub terrain: &'a HeightField,
    pub materials: &'a dyn MaterialResolver,
    pub roofs: &'a RoofRegistry,
    pub entrances: &'a [Column],
    pub passages: &'a [Vec<Column>],
}

/// What one unit produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitOutcome {
    pub doors: usize,
    pub lanterns: usize,
    pub lights: usize,
    /// Columns skipped for lack of terrain.
    pub skipped_columns: usize,
}

/// Derived geometry and materials for one unit.
struct UnitPlan<'u> {
    unit: &'u Unit,
    base: i32,
    wall_top: i32,
    edge: ColumnSet,
    interior: ColumnSet,
    facade: Block,
    roof: Block,
}

impl<'u> UnitPlan<'u> {
    fn new(unit: &'u Unit, materials: &dyn MaterialResolver) -> Self {
        let edge = unit.fill.edge_set();
        let interior = unit.fill.difference(&edge);
        Self {
            unit,
            base: unit.base(),
            wall_top: unit.wall_top(),
            edge,
            interior,
            facade: materials.facade_material(&unit.tags),
            roof: materials.roof_material(&unit.tags),
        }
    }

    /// Slab Y of each storey that fits under the wall top.
    fn slab_rows(&self, level_height: i32) -> impl Iterator<Item = i32> + '_ {
        let lh = level_height.max(1);
        (0..self.unit.extent.floors)
            .map(move |i| self.base + i * lh)
            .take_while(move |y| *y <= self.wall_top)
    }
}

pub(crate) fn voxel(column: Column, y: i32) -> IVec3 {
    IVec3::new(column.x, y, column.z)
}

/// First orthogonal neighbour outside `fill`, as an offset.
pub(crate) fn outward(fill: &ColumnSet, column: Column) -> Option<(i32, i32)> {
    footprint::coords::NEIGHBOR_OFFSETS
        .into_iter()
        .find(|(dx, dz)| !fill.contains(column.offset(*dx, *dz)))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Build one unit. Returns `None` when the fill is empty.
pub fn build_unit(
    unit: &Unit,
    ctx: &BuildContext<'_>,
    writer: &mut VoxelWriter<'_>,
) -> Option<UnitOutcome> {
    if unit.fill.is_empty() {
        return None;
    }
    let plan = UnitPlan::new(unit, ctx.materials);
    let mut outcome = UnitOutcome::default();

    if unit.kind == UnitKind::Canopy {
        outcome.skipped_columns += canopy::build(&plan, ctx, writer);
        return Some(outcome);
    }

    outcome.skipped_columns += base::foundation(&plan, ctx, writer);
    base::skirt(&plan, ctx, writer);
    base::clear_interior(&plan, writer);
    outcome.lights += floors::slabs(&plan, ctx, writer);
    floors::privacy_ring(&plan, ctx, writer);
    facade::walls(&plan, writer);
    facade::windows(&plan, ctx, writer);
    facade::roof(&plan, ctx, writer);
    openings::passages(&plan, ctx, writer);
    outcome.doors += openings::doors(&plan, ctx, writer);
    outcome.lanterns += lanterns::place(&plan, ctx, writer);

    debug!(
        "unit {} ({:?}): base {} top {} floors {}, {} doors, {} lanterns",
        unit.id,
        unit.kind,
        plan.base,
        plan.wall_top,
        unit.extent.floors,
        outcome.doors,
        outcome.lanterns
    );
    Some(outcome)
}
