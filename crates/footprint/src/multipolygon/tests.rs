use std::collections::HashMap;

use super::*;
use crate::coords::ScaledProjector;
use crate::feature::{tags_from, Member};
use crate::raster::rasterize_area;
use crate::stitch::DEFAULT_TOLERANCE_DEG;

fn projector() -> ScaledProjector {
    ScaledProjector {
        origin: LatLon::new(0.0, 0.0),
        blocks_per_degree: 100_000.0,
    }
}

/// Geographic polyline from grid corners.
fn path(points: &[(i32, i32)]) -> Vec<LatLon> {
    let proj = projector();
    points
        .iter()
        .map(|&(x, z)| proj.unproject(crate::coords::Column::new(x, z)))
        .collect()
}

// -------------------------------------------------------------------------
// Role semantics
// -------------------------------------------------------------------------

#[test]
fn test_role_classification() {
    assert_eq!(MemberRole::from_role("inner"), MemberRole::Inner);
    assert_eq!(MemberRole::from_role("hole"), MemberRole::Inner);
    assert_eq!(MemberRole::from_role(""), MemberRole::Outer);
    assert_eq!(MemberRole::from_role("outline"), MemberRole::Outer);
    assert_eq!(MemberRole::from_role("exterior"), MemberRole::Outer);
    assert_eq!(MemberRole::from_role("shell"), MemberRole::Outer);
    assert_eq!(MemberRole::from_role("whatever"), MemberRole::Outer);
    assert_eq!(MemberRole::from_role("part"), MemberRole::Part);
    assert_eq!(MemberRole::from_role("building:part"), MemberRole::Part);
    assert_eq!(MemberRole::from_role("element"), MemberRole::Part);
    assert_eq!(MemberRole::from_role(" Inner "), MemberRole::Inner);
}

// -------------------------------------------------------------------------
// Ring assembly
// -------------------------------------------------------------------------

#[test]
fn test_outer_and_inner_pools_stitched_separately() {
    let outer_a = path(&[(0, 0), (20, 0), (20, 20)]);
    let outer_b = path(&[(20, 20), (0, 20), (0, 0)]);
    let inner = path(&[(5, 5), (10, 5), (10, 10), (5, 10), (5, 5)]);
    let members = [
        MemberGeometry {
            role: MemberRole::Outer,
            points: &outer_a,
            tags: None,
        },
        MemberGeometry {
            role: MemberRole::Inner,
            points: &inner,
            tags: None,
        },
        MemberGeometry {
            role: MemberRole::Outer,
            points: &outer_b,
            tags: None,
        },
    ];
    let rings = assemble_rings(&members, DEFAULT_TOLERANCE_DEG);
    assert_eq!(rings.outers.len(), 1);
    assert_eq!(rings.inners.len(), 1);
    assert_eq!(rings.dropped, 0);

    let area = rings.project(&projector());
    let fill = rasterize_area(&area);
    assert_eq!(fill.len(), 20 * 20 - 5 * 5);
}

#[test]
fn test_part_members_excluded_from_rings() {
    let outer = path(&[(0, 0), (8, 0), (8, 8), (0, 8), (0, 0)]);
    let part = path(&[(2, 2), (4, 2), (4, 4), (2, 4), (2, 2)]);
    let members = [
        MemberGeometry {
            role: MemberRole::Outer,
            points: &outer,
            tags: None,
        },
        MemberGeometry {
            role: MemberRole::Part,
            points: &part,
            tags: None,
        },
    ];
    let rings = assemble_rings(&members, DEFAULT_TOLERANCE_DEG);
    assert_eq!(rings.outers.len(), 1);
    assert!(rings.inners.is_empty());
}

// -------------------------------------------------------------------------
// Tag merge
// -------------------------------------------------------------------------

#[test]
fn test_relation_tags_take_priority() {
    let relation = tags_from([("building", "yes"), ("building:colour", "red")]);
    let first = tags_from([("building:colour", "blue"), ("roof:shape", "gabled")]);
    let second = tags_from([("roof:shape", "hipped"), ("building:material", "brick")]);
    let points = path(&[(0, 0), (1, 0)]);
    let members = [
        MemberGeometry {
            role: MemberRole::Outer,
            points: &points,
            tags: Some(&first),
        },
        MemberGeometry {
            role: MemberRole::Outer,
            points: &points,
            tags: Some(&second),
        },
    ];
    let merged = merge_member_tags(&relation, &members, false);
    assert_eq!(merged.get("building:colour").map(String::as_str), Some("red"));
    // First member in order wins among members.
    assert_eq!(merged.get("roof:shape").map(String::as_str), Some("gabled"));
    assert_eq!(merged.get("building:material").map(String::as_str), Some("brick"));
}

#[test]
fn test_inner_member_tags_ignored() {
    let relation = tags_from([("building", "yes")]);
    let inner_tags = tags_from([("building:levels", "9")]);
    let points = path(&[(0, 0), (1, 0)]);
    let members = [MemberGeometry {
        role: MemberRole::Inner,
        points: &points,
        tags: Some(&inner_tags),
    }];
    let merged = merge_member_tags(&relation, &members, false);
    assert!(!merged.contains_key("building:levels"));
}

#[test]
fn test_part_relation_skips_structural_keys() {
    let relation = tags_from([("building:part", "yes")]);
    let member_tags = tags_from([
        ("height", "30"),
        ("building:levels", "8"),
        ("building:min_level", "2"),
        ("building:colour", "white"),
    ]);
    let points = path(&[(0, 0), (1, 0)]);
    let members = [MemberGeometry {
        role: MemberRole::Outer,
        points: &points,
        tags: Some(&member_tags),
    }];

    let merged = merge_member_tags(&relation, &members, true);
    assert!(!merged.contains_key("height"));
    assert!(!merged.contains_key("building:levels"));
    assert!(!merged.contains_key("building:min_level"));
    assert_eq!(merged.get("building:colour").map(String::as_str), Some("white"));

    // A non-part relation takes them.
    let merged = merge_member_tags(&relation, &members, false);
    assert_eq!(merged.get("height").map(String::as_str), Some("30"));
}

// -------------------------------------------------------------------------
// Whole-relation assembly
// -------------------------------------------------------------------------

#[test]
fn test_assemble_relation_resolves_member_ways() {
    let way_a = Feature::way(
        1,
        tags_from([("building:material", "brick")]),
        path(&[(0, 0), (12, 0), (12, 12)]),
    );
    let way_b = Feature::way(2, Tags::new(), path(&[(12, 12), (0, 12), (0, 0)]));
    let relation = Feature::relation(
        10,
        tags_from([("type", "multipolygon"), ("building", "yes")]),
        vec![
            Member::way(1, "outer", Vec::new()),
            Member::way(2, "outer", Vec::new()),
            Member::way(99, "outer", Vec::new()),
        ],
    );
    let ways: HashMap<i64, &Feature> = [(1, &way_a), (2, &way_b)].into_iter().collect();

    let assembled = assemble_relation(&relation, &ways, DEFAULT_TOLERANCE_DEG).expect("assembled");
    assert_eq!(assembled.id, 10);
    assert_eq!(assembled.rings.outers.len(), 1);
    assert_eq!(
        assembled.tags.get("building:material").map(String::as_str),
        Some("brick")
    );
}

#[test]
fn test_assemble_relation_without_closed_outer_is_none() {
    let relation = Feature::relation(
        11,
        tags_from([("building", "yes")]),
        vec![Member::way(5, "outer", path(&[(0, 0), (4, 0), (4, 4)]))],
    );
    assert!(assemble_relation(&relation, &HashMap::new(), DEFAULT_TOLERANCE_DEG).is_none());
}

#[test]
fn test_is_part_relation() {
    assert!(is_part_relation(&tags_from([("building:part", "yes")])));
    assert!(!is_part_relation(&tags_from([("building:part", "no")])));
    assert!(!is_part_relation(&tags_from([("building", "yes")])));
}
