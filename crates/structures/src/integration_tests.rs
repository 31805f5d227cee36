//! Integration tests driving the whole plugin through the `TestSite` harness.
//!
//! Each test lays out footprints in grid columns, runs one batch and checks
//! voxels. With the default config a unit on flat ground at `GROUND` has its
//! foundation at `GROUND + 1` and storey zero at `GROUND + 2`.

use crate::config::SynthesisConfig;
use crate::palette::Palette;
use crate::pipeline::SynthesisReport;
use crate::test_harness::TestSite;
use crate::world::blocks::{GLASS_PANE, LANTERN, STONE_BRICKS, WHITE_CONCRETE};
use crate::world::Block;

const GROUND: i32 = TestSite::GROUND;
const BASE: i32 = GROUND + 2;

fn roof() -> Block {
    Palette::default().default_roof
}

// ===========================================================================
// 1. Plugin wiring
// ===========================================================================

#[test]
fn empty_site_reports_nothing() {
    let mut site = TestSite::new();
    let report = site.run();
    assert_eq!(report, SynthesisReport::default());
    assert_eq!(site.completions(), 1);
    assert!(site.grid().is_empty());
}

#[test]
fn nothing_runs_without_a_request() {
    let site = TestSite::new().with_footprint(1, (0, 0), (10, 10), &[("building", "yes")]);
    assert_eq!(site.completions(), 0);
    assert!(site.grid().is_empty());
}

#[test]
fn invalid_config_skips_the_run() {
    let mut site = TestSite::new()
        .with_config(|c| c.level_height = 0)
        .with_footprint(1, (0, 0), (10, 10), &[("building", "yes")]);
    site.run();
    assert_eq!(site.completions(), 0);
    assert!(site.grid().is_empty());
}

#[test]
fn config_resource_defaults() {
    let site = TestSite::new();
    assert_eq!(site.resource::<SynthesisConfig>(), &SynthesisConfig::default());
}

// ===========================================================================
// 2. Whole buildings
// ===========================================================================

#[test]
fn single_building_has_foundation_walls_and_roof() {
    let mut site = TestSite::new().with_footprint(
        1,
        (0, 0),
        (10, 10),
        &[("building", "yes"), ("building:levels", "2")],
    );
    let report = site.run();
    assert_eq!(report.shells, 1);
    assert_eq!(report.units_built, 1);

    site.assert_block(5, GROUND + 1, 5, &STONE_BRICKS);
    site.assert_block(0, BASE, 5, &STONE_BRICKS);
    site.assert_air(5, BASE + 1, 5);
    // Two storeys of four, flat roof directly above.
    site.assert_block(5, BASE + 8, 5, &roof());
    assert_eq!(site.top(5, 5), Some(BASE + 8));
}

#[test]
fn flat_roof_adds_exactly_its_thickness() {
    let mut site = TestSite::new().with_footprint(
        1,
        (0, 0),
        (8, 6),
        &[
            ("building", "yes"),
            ("building:levels", "2"),
            ("roof:shape", "flat"),
            ("roof:height", "3"),
        ],
    );
    site.run();
    let wall_top = BASE + 7;
    for x in 0..8 {
        for z in 0..6 {
            for y in wall_top + 1..=wall_top + 3 {
                site.assert_block(x, y, z, &roof());
            }
            site.assert_air(x, wall_top + 4, z);
        }
    }
}

#[test]
fn window_pattern_follows_the_diagonal() {
    let mut site = TestSite::new().with_footprint(
        1,
        (0, 0),
        (12, 12),
        &[("building", "yes"), ("building:levels", "1")],
    );
    site.run();
    // North wall z = 0, first glazed row.
    for x in 1..11 {
        let expected = if x % 4 < 2 { GLASS_PANE } else { STONE_BRICKS };
        site.assert_block(x, BASE + 1, 0, &expected);
    }
}

#[test]
fn place_of_worship_keeps_solid_walls() {
    let mut site = TestSite::new()
        .with_footprint(1, (0, 0), (20, 20), &[("building", "cathedral")])
        .with_footprint(2, (0, 0), (6, 6), &[("building:part", "tower"), ("building:levels", "8")]);
    site.run();
    assert_eq!(site.count(&GLASS_PANE), 0);
}

#[test]
fn terrain_sampled_from_grid_when_no_height_field() {
    let mut site = TestSite::new()
        .with_grid_terrain()
        .with_footprint(1, (0, 0), (10, 10), &[("building", "yes")]);
    let report = site.run();
    assert_eq!(report.units_built, 1);
    site.assert_block(5, GROUND + 1, 5, &STONE_BRICKS);
    site.assert_block(0, BASE, 3, &STONE_BRICKS);
}

#[test]
fn sloped_site_builds_from_the_highest_ground() {
    let mut site = TestSite::new()
        .with_ground((0, 0), (4, 9), GROUND + 3)
        .with_footprint(1, (0, 0), (10, 10), &[("building", "yes")]);
    site.run();
    let base = GROUND + 3 + 2;
    site.assert_block(9, base, 3, &STONE_BRICKS);
    // Foundation fills the step on the low side.
    for y in GROUND + 1..base {
        site.assert_block(8, y, 5, &STONE_BRICKS);
    }
}

#[test]
fn courtyard_relation_leaves_the_hole_open() {
    let mut site = TestSite::new()
        .with_way(10, &[(0, 0), (20, 0), (20, 20), (0, 20), (0, 0)], &[])
        .with_way(11, &[(6, 6), (14, 6), (14, 14), (6, 14), (6, 6)], &[])
        .with_relation(
            1,
            &[(10, "outer"), (11, "inner")],
            &[("type", "multipolygon"), ("building", "yes")],
        );
    let report = site.run();
    assert_eq!(report.shells, 1);
    assert_eq!(report.units_built, 1);
    // Courtyard untouched down to the ground.
    assert_eq!(site.top(10, 10), None);
    // Courtyard-side wall.
    site.assert_block(5, BASE, 10, &STONE_BRICKS);
}

#[test]
fn bridge_building_floats_without_foundation() {
    let mut site = TestSite::new().with_footprint(
        1,
        (0, 0),
        (10, 10),
        &[("building", "yes"), ("bridge", "yes"), ("min_height", "6")],
    );
    site.run();
    site.assert_air(5, GROUND + 1, 5);
    site.assert_block(0, BASE + 6, 3, &STONE_BRICKS);
    site.assert_air(0, BASE + 5, 3);
}

// ===========================================================================
// 3. Parts
// ===========================================================================

#[test]
fn part_inherits_shell_facade() {
    let mut site = TestSite::new()
        .with_footprint(1, (0, 0), (20, 20), &[("building", "yes"), ("building:colour", "#ffffff")])
        .with_footprint(2, (4, 4), (12, 12), &[("building:part", "yes"), ("building:levels", "3")]);
    site.run();
    // Part wall row between window bands.
    site.assert_block(4, BASE + 4, 7, &WHITE_CONCRETE);
    // Contour around the part uses the same facade.
    site.assert_block(0, BASE, 7, &WHITE_CONCRETE);
}

#[test]
fn stacked_parts_build_low_to_high() {
    let mut site = TestSite::new()
        .with_footprint(1, (0, 0), (12, 12), &[("building", "yes")])
        .with_footprint(
            2,
            (0, 0),
            (12, 12),
            &[("building:part", "yes"), ("building:min_level", "2"), ("building:levels", "4")],
        )
        .with_footprint(3, (0, 0), (12, 12), &[("building:part", "yes"), ("building:levels", "2")]);
    let report = site.run();
    assert_eq!(report.parts, 2);
    assert_eq!(report.contours_skipped, 1);
    assert_eq!(report.units_built, 2);

    // The lower part's roof survives as the upper part's floor.
    site.assert_block(6, BASE + 8, 6, &roof());
    site.assert_air(6, BASE + 9, 6);
    // Upper walls and roof.
    site.assert_block(0, BASE + 12, 3, &STONE_BRICKS);
    assert_eq!(site.top(6, 6), Some(BASE + 16));
}

// ===========================================================================
// 4. Openings and fixtures
// ===========================================================================

#[test]
fn entrance_opens_a_door() {
    let mut site = TestSite::new()
        .with_footprint(1, (0, 0), (10, 10), &[("building", "yes")])
        .with_node(5, (5, 11), &[("entrance", "main")]);
    let report = site.run();
    assert_eq!(report.doors, 1);
    site.assert_air(5, BASE, 9);
    site.assert_air(5, BASE + 1, 9);
    // Landing in front of the raised threshold.
    site.assert_block(5, GROUND + 1, 10, &SynthesisConfig::default().doors.landing_material);
}

#[test]
fn passage_cuts_through_the_ground_floor() {
    let mut site = TestSite::new()
        .with_footprint(1, (0, 0), (10, 10), &[("building", "yes"), ("building:levels", "3")])
        .with_way(7, &[(5, -4), (5, 14)], &[("tunnel", "building_passage"), ("highway", "footway")]);
    site.run();
    for z in 0..10 {
        for y in BASE..BASE + 3 {
            site.assert_air(5, y, z);
        }
    }
    site.assert_block(5, BASE + 3, 0, &SynthesisConfig::default().passages.light_material);
}

#[test]
fn lanterns_hang_outside_the_walls() {
    let mut site = TestSite::new().with_footprint(1, (0, 0), (16, 16), &[("building", "yes")]);
    let report = site.run();
    assert!(report.lanterns > 0);
    assert_eq!(site.count(&LANTERN), report.lanterns);
    for (pos, block) in site.grid().iter() {
        if *block == LANTERN {
            assert!(pos.x < 0 || pos.x > 15 || pos.z < 0 || pos.z > 15, "{pos}");
        }
    }
}

#[test]
fn shelter_is_a_roof_on_pillars() {
    let mut site = TestSite::new().with_footprint(1, (0, 0), (6, 4), &[("amenity", "shelter")]);
    let report = site.run();
    assert_eq!(report.canopies, 1);
    let pillar = SynthesisConfig::default().materials.pillar;
    for (x, z) in [(0, 0), (5, 0), (5, 3), (0, 3)] {
        site.assert_block(x, GROUND + 1, z, &pillar);
        site.assert_block(x, BASE + 2, z, &pillar);
    }
    site.assert_air(2, BASE, 0);
    site.assert_block(2, BASE + 3, 2, &roof());
}
