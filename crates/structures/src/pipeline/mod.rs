//! Orchestration: snapshot in, voxels out.
//!
//! A run classifies the snapshot, captures terrain over the site once, then
//! visits units in a fixed order: standalone shells, parts from low to high,
//! shell contours, canopies. Later units read what earlier ones wrote, so the
//! whole run goes through a single [`VoxelWriter`].

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use bevy::log::{debug, info};
use bevy::prelude::Resource;

use footprint::{Column, ColumnSet, Projector, Tags};

use crate::builder::{build_unit, is_worship, BuildContext, Unit, UnitKind};
use crate::config::SynthesisConfig;
use crate::error::SynthesisError;
use crate::extent::{resolve_extent, ExtentKind, ResolvedExtent};
use crate::features::{classify, FeatureSnapshot, Footprint};
use crate::roof::RoofRegistry;
use crate::shells::{inherit_from, ShellIndex};
use crate::tags::TagView;
use crate::world::{
    HeightField, MaterialResolver, TerrainSource, VoxelStore, VoxelWriter, WriteLog,
};

/// Columns of terrain captured around each fill, so doors and
/// lanterns can probe just outside a footprint.
pub const TERRAIN_PADDING: i32 = 8;

/// Counts from one run.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    pub shells: usize,
    pub parts: usize,
    pub canopies: usize,
    pub units_built: usize,
    /// Units whose site had no terrain at all.
    pub units_skipped_no_terrain: usize,
    /// Contours left out because only slivers remained around the parts.
    pub contours_skipped: usize,
    /// Footprints whose fill came out empty.
    pub empty_fills: usize,
    pub rings_dropped: usize,
    pub columns_skipped: usize,
    pub doors: usize,
    pub lanterns: usize,
    pub lights: usize,
    pub voxels_written: usize,
}

// ---------------------------------------------------------------------------
// Site plan
// ---------------------------------------------------------------------------

/// Classified construction inputs for one snapshot.
#[derive(Debug, Clone, Default)]
pub struct SitePlan {
    pub shells: ShellIndex,
    pub parts: Vec<Footprint>,
    pub canopies: Vec<Footprint>,
    pub entrances: Vec<Column>,
    pub passages: Vec<Vec<Column>>,
    pub rings_dropped: usize,
    pub empty_fills: usize,
}

impl SitePlan {
    pub fn classify(
        snapshot: &FeatureSnapshot,
        projector: &impl Projector,
        config: &SynthesisConfig,
    ) -> Self {
        let classified = classify(snapshot, projector, config.stitch_tolerance_deg);
        Self {
            shells: ShellIndex::new(classified.shells),
            parts: classified.parts,
            canopies: classified.canopies,
            entrances: classified.entrances,
            passages: classified.passages,
            rings_dropped: classified.dropped_rings,
            empty_fills: classified.empty_fills,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.shells.is_empty() && self.parts.is_empty() && self.canopies.is_empty()
    }

    fn footprints(&self) -> impl Iterator<Item = &Footprint> {
        self.shells
            .shells()
            .iter()
            .chain(&self.parts)
            .chain(&self.canopies)
    }

    /// Union bounding box of every fill, padded by [`TERRAIN_PADDING`].
    pub fn bounds(&self) -> Option<(Column, Column)> {
        self.footprints()
            .filter_map(|f| f.fill.bounds())
            .reduce(|(amin, amax), (bmin, bmax)| {
                (
                    Column::new(amin.x.min(bmin.x), amin.z.min(bmin.z)),
                    Column::new(amax.x.max(bmax.x), amax.z.max(bmax.z)),
                )
            })
            .map(|(min, max)| {
                (
                    min.offset(-TERRAIN_PADDING, -TERRAIN_PADDING),
                    max.offset(TERRAIN_PADDING, TERRAIN_PADDING),
                )
            })
    }

    /// Sample `source` under every fill, each padded by [`TERRAIN_PADDING`].
    /// Must happen before the first write.
    pub fn capture_terrain(&self, source: &(impl TerrainSource + ?Sized)) -> HeightField {
        let regions = self
            .footprints()
            .filter_map(|f| f.fill.bounds())
            .map(|(min, max)| {
                (
                    min.offset(-TERRAIN_PADDING, -TERRAIN_PADDING),
                    max.offset(TERRAIN_PADDING, TERRAIN_PADDING),
                )
            });
        HeightField::capture_regions(source, regions)
    }
}

// ---------------------------------------------------------------------------
// Synthesizer
// ---------------------------------------------------------------------------

/// Runs synthesis with one configuration, palette and roof registry.
pub struct Synthesizer<'a> {
    pub config: &'a SynthesisConfig,
    pub materials: &'a dyn MaterialResolver,
    pub roofs: &'a RoofRegistry,
}

impl<'a> Synthesizer<'a> {
    pub fn new(
        config: &'a SynthesisConfig,
        materials: &'a dyn MaterialResolver,
        roofs: &'a RoofRegistry,
    ) -> Self {
        Self {
            config,
            materials,
            roofs,
        }
    }

    /// Classify, capture terrain and build in one go. `terrain` and `store`
    /// must be distinct; when the store is also the terrain, capture first
    /// with [`SitePlan::capture_terrain`] and call [`Synthesizer::build`].
    pub fn run(
        &self,
        snapshot: &FeatureSnapshot,
        projector: &impl Projector,
        terrain: &(impl TerrainSource + ?Sized),
        store: &mut dyn VoxelStore,
    ) -> Result<SynthesisReport, SynthesisError> {
        self.config.validate()?;
        let site = SitePlan::classify(snapshot, projector, self.config);
        let heights = site.capture_terrain(terrain);
        Ok(self.build(&site, &heights, store))
    }

    /// Build every unit of `site` into `store`.
    pub fn build(
        &self,
        site: &SitePlan,
        terrain: &HeightField,
        store: &mut dyn VoxelStore,
    ) -> SynthesisReport {
        let mut report = SynthesisReport {
            shells: site.shells.len(),
            parts: site.parts.len(),
            canopies: site.canopies.len(),
            rings_dropped: site.rings_dropped,
            empty_fills: site.empty_fills,
            ..Default::default()
        };
        if site.is_empty() {
            info!("structure synthesis: nothing to build");
            return report;
        }

        let units = self.plan_units(site, terrain, &mut report);
        let ctx = BuildContext {
            config: self.config,
            terrain,
            materials: self.materials,
            roofs: self.roofs,
            entrances: &site.entrances,
            passages: &site.passages,
        };
        let mut log = WriteLog::new();
        let mut writer = VoxelWriter::new(store, &mut log, terrain.height_bounds());
        for unit in &units {
            let Some(outcome) = build_unit(unit, &ctx, &mut writer) else {
                continue;
            };
            report.units_built += 1;
            report.doors += outcome.doors;
            report.lanterns += outcome.lanterns;
            report.lights += outcome.lights;
            report.columns_skipped += outcome.skipped_columns;
        }
        report.voxels_written = log.len();

        info!(
            "structure synthesis: {} units from {} shells, {} parts, {} canopies; {} voxels",
            report.units_built, report.shells, report.parts, report.canopies, report.voxels_written
        );
        report
    }

    /// Resolve every unit, in build order.
    pub fn plan_units(
        &self,
        site: &SitePlan,
        terrain: &HeightField,
        report: &mut SynthesisReport,
    ) -> Vec<Unit> {
        let shells = &site.shells;

        let mut parts: Vec<Unit> = Vec::with_capacity(site.parts.len());
        let mut covered: BTreeMap<usize, ColumnSet> = BTreeMap::new();
        for part in &site.parts {
            let enclosure = shells.enclosing_shell(&part.fill);
            let shell_index = enclosure.map(|(i, _)| i);
            let shell = enclosure.map(|(_, s)| s);
            let tags = inherit_from(&part.tags, shell);
            let site_fill = shell.map_or(&part.fill, |s| &s.fill);
            let Some(ground) = self.ground_reference(site_fill, terrain, part.id, report) else {
                continue;
            };
            if let Some(index) = shell_index {
                let entry = covered.entry(index).or_default();
                *entry = entry.union(&part.fill);
            }
            let glazed = !is_worship(&tags) && !shell.is_some_and(|s| is_worship(&s.tags));
            parts.push(Unit {
                id: part.id,
                kind: UnitKind::Part,
                fill: part.fill.clone(),
                rings: part.area.outers.clone(),
                extent: resolve_extent(&tags, ExtentKind::Part, self.config),
                tags,
                ground,
                glazed,
            });
        }
        // Stable: equal starts keep input order.
        parts.sort_by_key(|u| u.extent.start);

        let mut standalone = Vec::new();
        let mut contours = Vec::new();
        for (index, shell) in shells.shells().iter().enumerate() {
            let (kind, fill, rings) = match covered.get(&index) {
                None => (UnitKind::Standalone, shell.fill.clone(), shell.area.outers.clone()),
                Some(parts_fill) => {
                    let gap = shell.fill.difference(parts_fill);
                    if gap.erode(1).is_empty() {
                        debug!("shell {}: parts cover it, no contour", shell.id);
                        report.contours_skipped += 1;
                        continue;
                    }
                    (UnitKind::Contour, gap, Vec::new())
                }
            };
            let Some(ground) = self.ground_reference(&shell.fill, terrain, shell.id, report) else {
                continue;
            };
            let unit = Unit {
                id: shell.id,
                kind,
                fill,
                rings,
                tags: shell.tags.clone(),
                extent: resolve_extent(&shell.tags, ExtentKind::Standalone, self.config),
                ground,
                glazed: !is_worship(&shell.tags),
            };
            match kind {
                UnitKind::Standalone => standalone.push(unit),
                _ => contours.push(unit),
            }
        }

        let mut canopies = Vec::with_capacity(site.canopies.len());
        for canopy in &site.canopies {
            let shell = shells.enclosing_shell(&canopy.fill).map(|(_, s)| s);
            let site_fill = shell.map_or(&canopy.fill, |s| &s.fill);
            let Some(ground) = self.ground_reference(site_fill, terrain, canopy.id, report) else {
                continue;
            };
            let tags = inherit_from(&canopy.tags, shell);
            canopies.push(Unit {
                id: canopy.id,
                kind: UnitKind::Canopy,
                fill: canopy.fill.clone(),
                rings: canopy.area.outers.clone(),
                extent: self.canopy_extent(&tags),
                tags,
                ground,
                glazed: false,
            });
        }

        standalone
            .into_iter()
            .chain(parts)
            .chain(contours)
            .chain(canopies)
            .collect()
    }

    /// Storey-zero Y for a unit on `site_fill`: one above the highest ground
    /// plus the foundation.
    fn ground_reference(
        &self,
        site_fill: &ColumnSet,
        terrain: &HeightField,
        id: i64,
        report: &mut SynthesisReport,
    ) -> Option<i32> {
        let Some(max_ground) = terrain.max_over(site_fill) else {
            debug!("footprint {id}: no terrain under site, skipped");
            report.units_skipped_no_terrain += 1;
            return None;
        };
        Some(max_ground + 1 + self.config.foundation_thickness)
    }

    /// Canopy parts use part rules. Without an explicit top a canopy stands
    /// one storey minus a block tall.
    fn canopy_extent(&self, tags: &Tags) -> ResolvedExtent {
        let kind = if TagView::new(tags).has("building:part") {
            ExtentKind::Part
        } else {
            ExtentKind::Standalone
        };
        let mut extent = resolve_extent(tags, kind, self.config);
        if !extent.anchored_end {
            extent.thickness = (self.config.level_height - 1).max(1);
            extent.floors = 1;
        }
        extent
    }
}
