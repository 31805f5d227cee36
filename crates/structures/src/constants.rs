//! Fixed construction constants that are not user-tunable.
//!
//! Tunables live in [`crate::config::SynthesisConfig`].

/// Thickness of each storey slab, in blocks.
pub const FLOOR_SLAB_THICKNESS: i32 = 1;

/// Height of a doorway cut into a perimeter wall.
pub const DOOR_HEIGHT: i32 = 2;

/// Deepest landing built below a doorway before giving up on the drop.
pub const LANDING_MAX_DEPTH: i32 = 4;

/// How far a downward skirt searches for an obstacle before stopping at terrain.
pub const SKIRT_MAX_DEPTH: i32 = 96;

/// Roof thickness when no roof tag gives one.
pub const ROOF_THICKNESS_FLAT: i32 = 1;
pub const ROOF_THICKNESS_PITCHED: i32 = 3;

/// Storeys assumed when no height or level tag exists.
pub const FALLBACK_FLOORS: i32 = 2;
pub const FALLBACK_FLOORS_SMALL: i32 = 1;

/// Building values that get the single-storey fallback.
pub const SMALL_BUILDING_TYPES: &[&str] = &[
    "shed",
    "garage",
    "garages",
    "kiosk",
    "carport",
    "hut",
    "cabin",
    "toilets",
    "service",
];

/// Building values treated as places of worship (no window punching).
pub const WORSHIP_BUILDING_TYPES: &[&str] = &[
    "church",
    "chapel",
    "cathedral",
    "mosque",
    "temple",
    "synagogue",
    "shrine",
    "monastery",
];

/// Facade materials that already read as glazing.
pub const GLASS_MATERIALS: &[&str] = &["glass", "mirror", "glass_facade"];

pub const FEET_TO_METRES: f64 = 0.3048;

/// Tag keys copied from a shell to a part that lacks them.
pub const APPEARANCE_KEYS: &[&str] = &[
    "building:material",
    "building:colour",
    "roof:material",
    "roof:colour",
];

/// Level and height tags are clamped to these magnitudes before arithmetic.
pub const LEVEL_LIMIT: i32 = 512;
pub const HEIGHT_LIMIT_BLOCKS: i32 = 4096;
