//! Multipolygon assembly: groups a relation's member ways into outer and
//! inner rings and merges member tags into the relation's tags.

use std::collections::HashMap;

use bevy::log::debug;

use crate::coords::{LatLon, Projector};
use crate::feature::{Feature, FeatureKind, Tags};
use crate::ring::{Area, Ring};
use crate::stitch::stitch_rings;

#[cfg(test)]
mod tests;

/// Height and level keys that a part relation never pulls from its member
/// ways: one member's stray height tag must not leak into the part's extent.
pub const STRUCTURAL_KEYS: &[&str] = &[
    "height",
    "min_height",
    "building:height",
    "building:min_height",
    "levels",
    "min_level",
    "max_level",
    "building:levels",
    "building:levels:aboveground",
    "building:min_level",
    "building:max_level",
    "roof:levels",
    "roof:height",
];

/// How a relation member contributes to the assembled area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    Outer,
    Inner,
    /// Parts are built as independent units elsewhere and never join the
    /// relation's own rings.
    Part,
}

impl MemberRole {
    /// `inner|hole` are holes; `part|building:part|element` are excluded;
    /// everything else (empty, `outer`, `outline`, `exterior`, `shell`, or any
    /// unrecognized role) counts as outer.
    pub fn from_role(role: &str) -> Self {
        match role.trim().to_ascii_lowercase().as_str() {
            "inner" | "hole" => MemberRole::Inner,
            "part" | "building:part" | "element" => MemberRole::Part,
            _ => MemberRole::Outer,
        }
    }
}

/// A member way with its geometry and (optional) own tags resolved.
#[derive(Debug, Clone, Copy)]
pub struct MemberGeometry<'a> {
    pub role: MemberRole,
    pub points: &'a [LatLon],
    pub tags: Option<&'a Tags>,
}

/// Stitched rings of one relation, still in geographic coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledRings {
    pub outers: Vec<Vec<LatLon>>,
    pub inners: Vec<Vec<LatLon>>,
    /// Chains that could not be closed, across both pools.
    pub dropped: usize,
}

impl AssembledRings {
    /// Project onto the grid. Rings that collapse below four points are
    /// discarded.
    pub fn project(&self, projector: &impl Projector) -> Area {
        Area {
            outers: self
                .outers
                .iter()
                .filter_map(|r| Ring::project(r, projector))
                .collect(),
            inners: self
                .inners
                .iter()
                .filter_map(|r| Ring::project(r, projector))
                .collect(),
        }
    }
}

/// A relation after assembly: merged tags plus its rings.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledRelation {
    pub id: i64,
    pub tags: Tags,
    pub rings: AssembledRings,
}

/// Stitch the outer and inner pools separately. Part members are ignored.
pub fn assemble_rings(members: &[MemberGeometry<'_>], tolerance: f64) -> AssembledRings {
    let pool = |role: MemberRole| -> Vec<Vec<LatLon>> {
        members
            .iter()
            .filter(|m| m.role == role && !m.points.is_empty())
            .map(|m| m.points.to_vec())
            .collect()
    };
    let outer = stitch_rings(pool(MemberRole::Outer), tolerance);
    let inner = stitch_rings(pool(MemberRole::Inner), tolerance);
    AssembledRings {
        outers: outer.rings,
        inners: inner.rings,
        dropped: outer.dropped + inner.dropped,
    }
}

/// Merge member tags into the relation's tags.
///
/// Relation tags win. For each outer member in order, any key absent from
/// the merged result is copied over; a part relation skips
/// [`STRUCTURAL_KEYS`].
pub fn merge_member_tags(
    relation_tags: &Tags,
    members: &[MemberGeometry<'_>],
    is_part: bool,
) -> Tags {
    let mut merged = relation_tags.clone();
    for member in members.iter().filter(|m| m.role == MemberRole::Outer) {
        let Some(tags) = member.tags else {
            continue;
        };
        for (key, value) in tags {
            if is_part && STRUCTURAL_KEYS.contains(&key.as_str()) {
                continue;
            }
            merged.entry(key.clone()).or_insert_with(|| value.clone());
        }
    }
    merged
}

/// True when the relation describes a building part.
pub fn is_part_relation(tags: &Tags) -> bool {
    tags.get("building:part")
        .is_some_and(|v| !v.trim().is_empty() && v != "no")
}

/// Assemble a relation feature. Member geometry and tags are looked up in
/// `ways` by reference when the member carries no geometry of its own.
///
/// Returns `None` when nothing closed could be assembled.
pub fn assemble_relation(
    relation: &Feature,
    ways: &HashMap<i64, &Feature>,
    tolerance: f64,
) -> Option<AssembledRelation> {
    let members: Vec<MemberGeometry<'_>> = relation
        .members
        .iter()
        .filter(|m| m.kind == FeatureKind::Way)
        .filter_map(|m| {
            let way = ways.get(&m.reference).copied();
            let points: &[LatLon] = if m.geometry.is_empty() {
                way.map(|w| w.geometry.as_slice())?
            } else {
                m.geometry.as_slice()
            };
            Some(MemberGeometry {
                role: MemberRole::from_role(&m.role),
                points,
                tags: way.map(|w| &w.tags),
            })
        })
        .collect();

    let rings = assemble_rings(&members, tolerance);
    if rings.outers.is_empty() {
        debug!(
            "multipolygon {}: no closed outer ring from {} members",
            relation.id,
            relation.members.len()
        );
        return None;
    }
    let tags = merge_member_tags(&relation.tags, &members, is_part_relation(&relation.tags));
    Some(AssembledRelation {
        id: relation.id,
        tags,
        rings,
    })
}
