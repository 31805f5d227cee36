use bevy::math::IVec3;

use footprint::{tags_from, Column, ColumnSet, Feature, LatLon, ScaledProjector};

use super::*;
use crate::builder::UnitKind;
use crate::palette::Palette;
use crate::world::{VoxelGrid, VoxelStore};

const GROUND: i32 = 64;

fn projector() -> ScaledProjector {
    ScaledProjector {
        origin: LatLon::new(0.0, 0.0),
        blocks_per_degree: 100_000.0,
    }
}

/// Closed rectangular way whose fill is `x0..x1` by `z0..z1` (exclusive).
fn way(id: i64, tags: &[(&str, &str)], x0: i32, z0: i32, x1: i32, z1: i32) -> Feature {
    let p = projector();
    let geometry = [(x0, z0), (x1, z0), (x1, z1), (x0, z1), (x0, z0)]
        .into_iter()
        .map(|(x, z)| p.unproject(Column::new(x, z)))
        .collect();
    Feature::way(id, tags_from(tags.iter().copied()), geometry)
}

fn flat_terrain() -> HeightField {
    HeightField::flat(
        Column::new(-50, -50),
        Column::new(100, 100),
        GROUND,
        (-64, 319),
    )
}

fn plan(elements: Vec<Feature>) -> (Vec<Unit>, SynthesisReport) {
    let config = SynthesisConfig::default();
    let palette = Palette::default();
    let roofs = RoofRegistry::builtin();
    let synth = Synthesizer::new(&config, &palette, &roofs);
    let site = SitePlan::classify(&FeatureSnapshot::new(elements), &projector(), &config);
    let terrain = site.capture_terrain(&flat_terrain());
    let mut report = SynthesisReport::default();
    let units = synth.plan_units(&site, &terrain, &mut report);
    (units, report)
}

fn run(elements: Vec<Feature>, terrain: &HeightField) -> (VoxelGrid, SynthesisReport) {
    let config = SynthesisConfig::default();
    let palette = Palette::default();
    let roofs = RoofRegistry::builtin();
    let mut grid = VoxelGrid::default();
    let report = Synthesizer::new(&config, &palette, &roofs)
        .run(&FeatureSnapshot::new(elements), &projector(), terrain, &mut grid)
        .expect("valid config");
    (grid, report)
}

#[test]
fn test_empty_snapshot_builds_nothing() {
    let (grid, report) = run(Vec::new(), &flat_terrain());
    assert!(grid.is_empty());
    assert_eq!(report, SynthesisReport::default());
}

#[test]
fn test_single_building_end_to_end() {
    let elements = vec![way(1, &[("building", "yes"), ("building:levels", "1")], 0, 0, 10, 10)];
    let (grid, report) = run(elements, &flat_terrain());
    assert_eq!(report.shells, 1);
    assert_eq!(report.units_built, 1);
    assert!(report.voxels_written > 0);
    assert_eq!(report.voxels_written, grid.len());

    let base = GROUND + 2;
    assert_eq!(
        grid.get_voxel(IVec3::new(0, base, 5)),
        Some(Palette::default().default_facade)
    );
    // Flat roof one layer above a one-storey wall.
    assert_eq!(
        grid.get_voxel(IVec3::new(5, base + 4, 5)),
        Some(Palette::default().default_roof)
    );
}

#[test]
fn test_units_follow_build_order() {
    let elements = vec![
        way(1, &[("building", "yes")], 0, 0, 20, 10),
        way(
            2,
            &[("building:part", "yes"), ("building:min_level", "2"), ("building:levels", "4")],
            0,
            0,
            10,
            10,
        ),
        way(3, &[("building:part", "yes"), ("building:levels", "2")], 0, 0, 10, 10),
        way(10, &[("building", "yes")], 40, 0, 50, 10),
        way(20, &[("amenity", "shelter")], 30, 20, 36, 26),
    ];
    let (units, report) = plan(elements);
    let order: Vec<(i64, UnitKind)> = units.iter().map(|u| (u.id, u.kind)).collect();
    assert_eq!(
        order,
        vec![
            (10, UnitKind::Standalone),
            (3, UnitKind::Part),
            (2, UnitKind::Part),
            (1, UnitKind::Contour),
            (20, UnitKind::Canopy),
        ]
    );
    assert_eq!(report.units_skipped_no_terrain, 0);

    let contour = &units[3];
    assert_eq!(
        contour.fill,
        ColumnSet::rect(Column::new(10, 0), Column::new(19, 9))
    );
    // Parts share the shell's ground reference.
    assert_eq!(units[1].ground, units[2].ground);
    assert_eq!(units[2].base(), units[1].ground + 8);
}

#[test]
fn test_fully_covered_shell_has_no_contour() {
    let elements = vec![
        way(1, &[("building", "yes")], 0, 0, 10, 10),
        way(2, &[("building:part", "yes"), ("building:levels", "3")], 0, 0, 10, 10),
    ];
    let (units, report) = plan(elements);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].kind, UnitKind::Part);
    assert_eq!(report.contours_skipped, 1);
}

#[test]
fn test_part_inherits_shell_appearance() {
    let elements = vec![
        way(1, &[("building", "yes"), ("building:colour", "#b45030")], 0, 0, 10, 10),
        way(2, &[("building:part", "yes"), ("roof:colour", "grey")], 2, 2, 8, 8),
    ];
    let (units, _) = plan(elements);
    let part = units.iter().find(|u| u.id == 2).expect("part unit");
    assert_eq!(
        part.tags.get("building:colour").map(String::as_str),
        Some("#b45030")
    );
    assert_eq!(part.tags.get("roof:colour").map(String::as_str), Some("grey"));
}

#[test]
fn test_worship_shell_disables_part_windows() {
    let elements = vec![
        way(1, &[("building", "church")], 0, 0, 20, 20),
        way(2, &[("building:part", "tower"), ("building:levels", "6")], 0, 0, 5, 5),
    ];
    let (units, _) = plan(elements);
    assert!(units.iter().all(|u| !u.glazed));
}

#[test]
fn test_canopy_without_top_is_one_storey() {
    let (units, _) = plan(vec![way(5, &[("building", "roof")], 0, 0, 6, 6)]);
    assert_eq!(units.len(), 1);
    assert_eq!(units[0].kind, UnitKind::Canopy);
    assert_eq!(units[0].extent.thickness, 3);
}

#[test]
fn test_missing_terrain_skips_unit() {
    let elements = vec![way(1, &[("building", "yes")], 0, 0, 10, 10)];
    let (grid, report) = run(elements, &HeightField::empty((-64, 319)));
    assert!(grid.is_empty());
    assert_eq!(report.units_built, 0);
    assert_eq!(report.units_skipped_no_terrain, 1);
}

#[test]
fn test_partial_terrain_skips_columns_only() {
    let mut terrain = flat_terrain();
    terrain.set(Column::new(3, 3), None);
    let elements = vec![way(1, &[("building", "yes")], 0, 0, 10, 10)];
    let (grid, report) = run(elements, &terrain);
    assert_eq!(report.units_built, 1);
    assert_eq!(report.columns_skipped, 1);
    // Foundation missing only there.
    assert_eq!(grid.get_voxel(IVec3::new(3, GROUND + 1, 3)), None);
    assert!(grid.get_voxel(IVec3::new(4, GROUND + 1, 3)).is_some());
}

#[test]
fn test_invalid_config_rejected() {
    let config = SynthesisConfig {
        level_height: 0,
        ..Default::default()
    };
    let palette = Palette::default();
    let roofs = RoofRegistry::builtin();
    let mut grid = VoxelGrid::default();
    let result = Synthesizer::new(&config, &palette, &roofs).run(
        &FeatureSnapshot::default(),
        &projector(),
        &flat_terrain(),
        &mut grid,
    );
    assert!(matches!(
        result,
        Err(SynthesisError::InvalidConfig { field: "level_height", .. })
    ));
}

#[test]
fn test_site_bounds_are_padded() {
    let config = SynthesisConfig::default();
    let site = SitePlan::classify(
        &FeatureSnapshot::new(vec![
            way(1, &[("building", "yes")], 0, 0, 10, 10),
            way(2, &[("amenity", "shelter")], 20, 30, 24, 34),
        ]),
        &projector(),
        &config,
    );
    assert_eq!(
        site.bounds(),
        Some((
            Column::new(-TERRAIN_PADDING, -TERRAIN_PADDING),
            Column::new(23 + TERRAIN_PADDING, 33 + TERRAIN_PADDING)
        ))
    );
    assert_eq!(SitePlan::default().bounds(), None);
}

/// Level ground everywhere.
struct Plain(i32);

impl TerrainSource for Plain {
    fn ground_elevation(&self, _x: i32, _z: i32) -> Option<i32> {
        Some(self.0)
    }

    fn build_height_bounds(&self) -> (i32, i32) {
        (-64, 319)
    }
}

#[test]
fn test_distant_footprints_capture_only_their_surroundings() {
    let far = 60_000;
    let elements = vec![
        way(1, &[("building", "yes")], 0, 0, 10, 10),
        way(2, &[("building", "yes")], far, far, far + 10, far + 10),
    ];
    let config = SynthesisConfig::default();
    let site = SitePlan::classify(&FeatureSnapshot::new(elements), &projector(), &config);
    let terrain = site.capture_terrain(&Plain(GROUND));
    let side = (10 + 2 * TERRAIN_PADDING) as usize;
    assert_eq!(terrain.area(), 2 * side * side);
    assert_eq!(terrain.get(Column::new(far + 5, far + 5)), Some(GROUND));
    assert_eq!(terrain.get(Column::new(far / 2, far / 2)), None);

    let palette = Palette::default();
    let roofs = RoofRegistry::builtin();
    let mut grid = VoxelGrid::default();
    let report = Synthesizer::new(&config, &palette, &roofs).build(&site, &terrain, &mut grid);
    assert_eq!(report.units_built, 2);
    assert!(grid.get_voxel(IVec3::new(far, GROUND + 1, far)).is_some());
}
