use std::collections::HashSet;

use bevy::log::debug;

use footprint::multipolygon::{assemble_relation, MemberRole};
use footprint::{
    rasterize_area, Area, Column, ColumnSet, Feature, FeatureKind, Projector, Ring, Tags,
};

use super::FeatureSnapshot;
use crate::tags::TagView;

/// What a closed footprint becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootprintRole {
    /// Top-level building outline.
    Shell,
    /// Independently tagged sub-volume.
    Part,
    /// Roof-only structure: slab on pillars, no walls.
    Canopy,
}

/// Role implied by a footprint's tags, if any.
pub fn footprint_role(tags: &Tags) -> Option<FootprintRole> {
    let view = TagView::new(tags);
    if view.is("building:part", "roof")
        || view.is("building", "roof")
        || view.is("man_made", "canopy")
        || view.is("amenity", "shelter")
    {
        return Some(FootprintRole::Canopy);
    }
    if view.is_set("building:part") {
        return Some(FootprintRole::Part);
    }
    if view.is_set("building") {
        return Some(FootprintRole::Shell);
    }
    None
}

/// A projected, rasterized footprint with its effective tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Footprint {
    pub id: i64,
    pub tags: Tags,
    pub area: Area,
    pub fill: ColumnSet,
}

impl Footprint {
    pub fn new(id: i64, tags: Tags, area: Area) -> Self {
        let fill = rasterize_area(&area);
        Self {
            id,
            tags,
            area,
            fill,
        }
    }
}

/// Construction inputs sorted out of one snapshot.
#[derive(Debug, Clone, Default)]
pub struct Classified {
    pub shells: Vec<Footprint>,
    pub parts: Vec<Footprint>,
    pub canopies: Vec<Footprint>,
    /// Entrance markers on the grid.
    pub entrances: Vec<Column>,
    /// Passage linework on the grid.
    pub passages: Vec<Vec<Column>>,
    /// Rings that could not be closed or collapsed on projection.
    pub dropped_rings: usize,
    /// Footprints whose fill came out empty.
    pub empty_fills: usize,
}

impl Classified {
    fn push(&mut self, role: FootprintRole, footprint: Footprint) {
        if footprint.fill.is_empty() {
            debug!("footprint {}: empty fill, skipped", footprint.id);
            self.empty_fills += 1;
            return;
        }
        match role {
            FootprintRole::Shell => self.shells.push(footprint),
            FootprintRole::Part => self.parts.push(footprint),
            FootprintRole::Canopy => self.canopies.push(footprint),
        }
    }
}

fn is_entrance(tags: &Tags) -> bool {
    let view = TagView::new(tags);
    view.is_set("entrance") || view.is_set("door")
}

fn is_passage(tags: &Tags) -> bool {
    TagView::new(tags).is("tunnel", "building_passage")
}

/// Sort the snapshot into shells, parts, canopies, entrances and passages.
///
/// Relations are assembled first. Outer member ways of an assembled
/// footprint relation are not classified again on their own. Relations with
/// `type=building` only group already-tagged ways and are skipped.
pub fn classify(
    snapshot: &FeatureSnapshot,
    projector: &impl Projector,
    tolerance: f64,
) -> Classified {
    let mut out = Classified::default();
    let ways = snapshot.ways_by_id();
    let mut consumed: HashSet<i64> = HashSet::new();

    for relation in snapshot
        .elements
        .iter()
        .filter(|f| f.kind == FeatureKind::Relation)
    {
        let view = TagView::new(&relation.tags);
        if view.is("type", "building") {
            continue;
        }
        let Some(assembled) = assemble_relation(relation, &ways, tolerance) else {
            if footprint_role(&relation.tags).is_some() {
                out.dropped_rings += 1;
            }
            continue;
        };
        out.dropped_rings += assembled.rings.dropped;
        let Some(role) = footprint_role(&assembled.tags) else {
            continue;
        };
        consumed.extend(
            relation
                .members
                .iter()
                .filter(|m| m.kind == FeatureKind::Way)
                .filter(|m| MemberRole::from_role(&m.role) == MemberRole::Outer)
                .map(|m| m.reference),
        );
        let area = assembled.rings.project(projector);
        if area.is_empty() {
            out.dropped_rings += 1;
            continue;
        }
        out.push(role, Footprint::new(relation.id, assembled.tags, area));
    }

    for feature in &snapshot.elements {
        match feature.kind {
            FeatureKind::Node => {
                if is_entrance(&feature.tags) {
                    if let Some(point) = feature.point() {
                        out.entrances.push(projector.project(point));
                    }
                }
            }
            FeatureKind::Way => {
                if consumed.contains(&feature.id) {
                    continue;
                }
                classify_way(feature, projector, tolerance, &mut out);
            }
            FeatureKind::Relation => {}
        }
    }
    out
}

fn classify_way(
    feature: &Feature,
    projector: &impl Projector,
    tolerance: f64,
    out: &mut Classified,
) {
    let role = footprint_role(&feature.tags);
    if role.is_none() && is_passage(&feature.tags) {
        let line: Vec<Column> = feature
            .geometry
            .iter()
            .map(|p| projector.project(*p))
            .collect();
        if !line.is_empty() {
            out.passages.push(line);
        }
        return;
    }
    let Some(role) = role else {
        return;
    };
    if !feature.is_closed(tolerance) {
        debug!("way {}: footprint ring is not closed", feature.id);
        out.dropped_rings += 1;
        return;
    }
    let Some(ring) = Ring::project(&feature.geometry, projector) else {
        debug!("way {}: ring collapsed on projection", feature.id);
        out.dropped_rings += 1;
        return;
    };
    out.push(
        role,
        Footprint::new(feature.id, feature.tags.clone(), Area::from_outer(ring)),
    );
}
