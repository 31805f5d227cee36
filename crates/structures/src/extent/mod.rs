//! Vertical extent resolution: tags to `(start offset, thickness)` in blocks.
//!
//! The tag vocabulary is sparse and used inconsistently, so resolution is a
//! precedence ladder. Every branch is total: any tag subset (including
//! none, garbage or negative values) yields `thickness >= 1` and
//! `start >= 0`.

use footprint::Tags;

use crate::config::SynthesisConfig;
use crate::constants::{
    FALLBACK_FLOORS, FALLBACK_FLOORS_SMALL, HEIGHT_LIMIT_BLOCKS, LEVEL_LIMIT, ROOF_THICKNESS_FLAT,
    ROOF_THICKNESS_PITCHED, SMALL_BUILDING_TYPES,
};
use crate::roof::RoofShape;
use crate::tags::TagView;


pub const LEVEL_KEYS: &[&str] = &["building:levels", "levels", "building:levels:aboveground"];
pub const MIN_LEVEL_KEYS: &[&str] = &["building:min_level", "min_level"];
pub const MAX_LEVEL_KEYS: &[&str] = &["building:max_level", "max_level"];
pub const HEIGHT_KEYS: &[&str] = &["height", "building:height"];
pub const MIN_HEIGHT_KEYS: &[&str] = &["min_height", "building:min_height"];

/// Which rule set applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtentKind {
    /// A building outline built on its own.
    Standalone,
    /// A sub-volume stacked within or atop a building.
    Part,
}

/// The frozen vertical extent of one construction unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedExtent {
    /// Blocks above the unit's ground reference. Always `>= 0`.
    pub start: i32,
    /// Wall height in blocks. Always `>= 1`.
    pub thickness: i32,
    /// Storey count used for slabs and windows. Always `>= 1`.
    pub floors: i32,
    /// Always `>= 1`.
    pub roof_thickness: i32,
    /// An explicit start (`min_level` / `min_height`) was tagged.
    pub anchored_start: bool,
    /// An explicit top (`max_level`, levels, or height) was tagged.
    pub anchored_end: bool,
    /// Bridge, passage or layer marker present.
    pub suspended: bool,
}

impl ResolvedExtent {
    /// Last wall row, relative to the ground reference.
    pub fn top(&self) -> i32 {
        self.start + self.thickness - 1
    }
}

/// Parsed inputs shared by both rule sets.
struct ExtentTags {
    levels: Option<i32>,
    min_level: Option<i32>,
    max_level: Option<i32>,
    height: Option<i32>,
    min_height: Option<i32>,
    roof_thickness: i32,
    suspended: bool,
    small: bool,
}

impl ExtentTags {
    fn read(tags: &Tags, config: &SynthesisConfig) -> Self {
        let view = TagView::new(tags);
        let lh = config.level_height;
        let blocks = |keys: &[&str]| {
            view.first_number(keys).map(|m| {
                config
                    .metres_to_blocks(m)
                    .clamp(-HEIGHT_LIMIT_BLOCKS, HEIGHT_LIMIT_BLOCKS)
            })
        };
        let level = |keys: &[&str]| {
            view.first_int(keys)
                .map(|l| l.clamp(-LEVEL_LIMIT, LEVEL_LIMIT))
        };

        let roof_thickness = level(&["roof:levels"])
            .map(|l| l * lh)
            .or_else(|| blocks(&["roof:height"]))
            .unwrap_or_else(|| {
                if RoofShape::from_tags(tags) == RoofShape::Flat {
                    ROOF_THICKNESS_FLAT
                } else {
                    ROOF_THICKNESS_PITCHED
                }
            })
            .max(1);

        let suspended =
            view.flag("bridge") || view.is("tunnel", "building_passage") || view.has("layer");

        let small = [view.str("building"), view.str("building:part")]
            .into_iter()
            .flatten()
            .any(|v| SMALL_BUILDING_TYPES.contains(&v.to_ascii_lowercase().as_str()));

        Self {
            levels: level(LEVEL_KEYS),
            min_level: level(MIN_LEVEL_KEYS),
            max_level: level(MAX_LEVEL_KEYS),
            height: blocks(HEIGHT_KEYS),
            min_height: blocks(MIN_HEIGHT_KEYS),
            roof_thickness,
            suspended,
            small,
        }
    }

    fn fallback_floors(&self) -> i32 {
        if self.small {
            FALLBACK_FLOORS_SMALL
        } else {
            FALLBACK_FLOORS
        }
    }

    /// Start from whichever explicit anchor is present.
    fn anchor_start(&self, lh: i32) -> Option<i32> {
        self.min_level.map(|m| m * lh).or(self.min_height)
    }
}

/// Resolve the extent of a unit from its effective tags.
pub fn resolve_extent(tags: &Tags, kind: ExtentKind, config: &SynthesisConfig) -> ResolvedExtent {
    let t = ExtentTags::read(tags, config);
    let lh = config.level_height.max(1);

    let (start, thickness, floors, anchored_start, anchored_end) = match kind {
        ExtentKind::Standalone => standalone(&t, lh),
        ExtentKind::Part => part(&t, lh),
    };

    let thickness = thickness.max(1);
    let floors = floors.unwrap_or(thickness / lh).max(1);
    // Ground anchoring: without an explicit start, a grounded unit sits on
    // its ground reference whatever the branch computed.
    let start = if !anchored_start && !t.suspended { 0 } else { start };

    ResolvedExtent {
        start: start.max(0),
        thickness,
        floors,
        roof_thickness: t.roof_thickness,
        anchored_start,
        anchored_end,
        suspended: t.suspended,
    }
}

type Branch = (i32, i32, Option<i32>, bool, bool);

fn standalone(t: &ExtentTags, lh: i32) -> Branch {
    let start = if t.suspended {
        t.anchor_start(lh).unwrap_or(0)
    } else {
        0
    };
    let anchored_start = t.suspended && t.anchor_start(lh).is_some();

    if let Some(levels) = t.levels {
        return (start, levels * lh, Some(levels), anchored_start, true);
    }
    if let Some(height) = t.height {
        return (start, height - t.roof_thickness, None, anchored_start, true);
    }
    let floors = t.fallback_floors();
    (start, floors * lh, Some(floors), anchored_start, false)
}

fn part(t: &ExtentTags, lh: i32) -> Branch {
    if let (Some(min), Some(max)) = (t.min_level, t.max_level) {
        let floors = max - min + 1;
        return (min * lh, floors * lh, Some(floors), true, true);
    }
    if let (Some(min), Some(levels)) = (t.min_level, t.levels) {
        // Here `levels` is the index of the top level, not a count.
        let floors = (levels - min).max(0);
        return (min * lh, floors * lh, Some(floors), true, true);
    }
    if let Some(levels) = t.levels {
        let start = t.min_height.unwrap_or(0);
        return (start, levels * lh, Some(levels), t.min_height.is_some(), true);
    }
    if let (Some(min_height), Some(height)) = (t.min_height, t.height) {
        return (min_height, height - min_height, None, true, true);
    }
    if let Some(height) = t.height {
        let start = t.min_level.map(|m| m * lh).unwrap_or(0);
        return (
            start,
            height - t.roof_thickness,
            None,
            t.min_level.is_some(),
            true,
        );
    }
    if let Some(max) = t.max_level {
        // Only the top is known: count storeys from the ground unless a
        // metric start was tagged.
        let start = t.min_height.unwrap_or(0);
        let floors = (max + 1 - start / lh).max(1);
        return (start, floors * lh, Some(floors), t.min_height.is_some(), true);
    }
    let floors = t.fallback_floors();
    let anchor = t.anchor_start(lh);
    (
        anchor.unwrap_or(0),
        floors * lh,
        Some(floors),
        anchor.is_some(),
        false,
    )
}
