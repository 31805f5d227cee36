//! Tunable synthesis parameters.
//!
//! [`SynthesisConfig`] is a resource so it can be swapped between runs.
//! Every field has a default, and a partial JSON document only overrides the
//! fields it names.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::SynthesisError;
use crate::world::blocks;
use crate::world::Block;

// ---------------------------------------------------------------------------
// Stage parameters
// ---------------------------------------------------------------------------

/// Facade glazing: `on` glazed columns, then `off` blank columns, repeating
/// along `x + z` from `origin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub on: i32,
    pub off: i32,
    pub origin: i32,
    pub material: Block,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            on: 2,
            off: 2,
            origin: 0,
            material: blocks::GLASS_PANE,
        }
    }
}

impl WindowConfig {
    /// True when the facade column at `x, z` is glazed.
    pub fn is_glazed(&self, x: i32, z: i32) -> bool {
        let period = (self.on + self.off).max(1);
        (x + z - self.origin).rem_euclid(period) < self.on
    }
}

/// Light sources embedded in storey slabs on a lattice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorLightConfig {
    pub enabled: bool,
    pub material: Block,
    /// Columns closer than this to the perimeter never get a light.
    pub edge_margin: u32,
    /// Lower bound on the lattice pitch.
    pub min_spacing: i32,
    pub period: i32,
}

impl Default for FloorLightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            material: blocks::GLOWSTONE,
            edge_margin: 2,
            min_spacing: 4,
            period: 6,
        }
    }
}

impl FloorLightConfig {
    pub fn pitch(&self) -> i32 {
        self.period.max(self.min_spacing).max(1)
    }
}

/// Low partition ring set back from the facade on every storey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyWallConfig {
    pub enabled: bool,
    pub offset: u32,
    pub height: i32,
    pub material: Block,
}

impl Default for PrivacyWallConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: 3,
            height: 2,
            material: blocks::WHITE_WOOL,
        }
    }
}

/// Exterior fixtures along the perimeter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanternConfig {
    pub enabled: bool,
    /// Height above the unit's base.
    pub height: i32,
    pub step: i32,
    pub search_radius: i32,
    pub material: Block,
}

impl Default for LanternConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            height: 3,
            step: 8,
            search_radius: 2,
            material: blocks::LANTERN,
        }
    }
}

/// Corridors cut along `tunnel=building_passage` linework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassageConfig {
    pub clear_width: i32,
    /// Overrides the default clearance of one storey minus its slab.
    pub clear_height: Option<i32>,
    pub sleeve_material: Block,
    pub light_step: i32,
    pub light_material: Block,
}

impl Default for PassageConfig {
    fn default() -> Self {
        Self {
            clear_width: 3,
            clear_height: None,
            sleeve_material: blocks::POLISHED_ANDESITE,
            light_step: 6,
            light_material: blocks::SEA_LANTERN,
        }
    }
}

impl PassageConfig {
    pub fn clearance(&self, level_height: i32) -> i32 {
        self.clear_height.unwrap_or(level_height - 1).max(2)
    }
}

/// Entrance marker handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    /// Markers farther than this (Chebyshev) from the perimeter are ignored.
    pub snap_distance: i32,
    pub landing_material: Block,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            snap_distance: 3,
            landing_material: blocks::COBBLESTONE,
        }
    }
}

/// Structural materials not chosen by the palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuralMaterials {
    pub foundation: Block,
    pub floor: Block,
    pub pillar: Block,
}

impl Default for StructuralMaterials {
    fn default() -> Self {
        Self {
            foundation: blocks::STONE_BRICKS,
            floor: blocks::SMOOTH_STONE,
            pillar: blocks::STONE_BRICK_WALL,
        }
    }
}

// ---------------------------------------------------------------------------
// SynthesisConfig resource
// ---------------------------------------------------------------------------

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Blocks per storey.
    pub level_height: i32,
    pub foundation_thickness: i32,
    /// Metres represented by one block when converting metric tags.
    pub metres_per_block: f64,
    /// Endpoint tolerance for ring stitching, in degrees.
    pub stitch_tolerance_deg: f64,
    pub materials: StructuralMaterials,
    pub windows: WindowConfig,
    pub floor_lights: FloorLightConfig,
    pub privacy_walls: PrivacyWallConfig,
    pub lanterns: LanternConfig,
    pub passages: PassageConfig,
    pub doors: DoorConfig,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            level_height: 4,
            foundation_thickness: 1,
            metres_per_block: 1.0,
            stitch_tolerance_deg: footprint::DEFAULT_TOLERANCE_DEG,
            materials: StructuralMaterials::default(),
            windows: WindowConfig::default(),
            floor_lights: FloorLightConfig::default(),
            privacy_walls: PrivacyWallConfig::default(),
            lanterns: LanternConfig::default(),
            passages: PassageConfig::default(),
            doors: DoorConfig::default(),
        }
    }
}

impl SynthesisConfig {
    /// Parse a (possibly partial) JSON document over the defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SynthesisError> {
        let config: SynthesisConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SynthesisError> {
        let positive = [
            ("level_height", self.level_height),
            ("windows.on + windows.off", self.windows.on + self.windows.off),
            ("lanterns.step", self.lanterns.step),
            ("passages.clear_width", self.passages.clear_width),
            ("passages.light_step", self.passages.light_step),
        ];
        for (field, value) in positive {
            if value < 1 {
                return Err(SynthesisError::InvalidConfig {
                    field,
                    reason: format!("must be at least 1, got {value}"),
                });
            }
        }
        if self.foundation_thickness < 0 {
            return Err(SynthesisError::InvalidConfig {
                field: "foundation_thickness",
                reason: format!("must not be negative, got {}", self.foundation_thickness),
            });
        }
        if !(self.metres_per_block.is_finite() && self.metres_per_block > 0.0) {
            return Err(SynthesisError::InvalidConfig {
                field: "metres_per_block",
                reason: format!("must be a positive number, got {}", self.metres_per_block),
            });
        }
        Ok(())
    }

    /// Convert a metric value to whole blocks.
    pub fn metres_to_blocks(&self, metres: f64) -> i32 {
        (metres / self.metres_per_block).round() as i32
    }
}
