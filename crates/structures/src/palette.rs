//! Material and colour lookup tables.
//!
//! The palette is immutable data injected as a resource. Colour tags win
//! over material tags; a colour is matched to the nearest table entry by
//! squared RGB distance.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use footprint::Tags;

use crate::error::SynthesisError;
use crate::tags::TagView;
use crate::world::blocks;
use crate::world::{Block, MaterialResolver};

pub type Rgb = [u8; 3];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColourEntry {
    pub rgb: Rgb,
    pub block: Block,
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub facade_materials: BTreeMap<String, Block>,
    pub roof_materials: BTreeMap<String, Block>,
    pub facade_colours: Vec<ColourEntry>,
    pub roof_colours: Vec<ColourEntry>,
    pub default_facade: Block,
    pub default_roof: Block,
}

fn entries(table: &[(Rgb, Block)]) -> Vec<ColourEntry> {
    table
        .iter()
        .map(|(rgb, block)| ColourEntry {
            rgb: *rgb,
            block: block.clone(),
        })
        .collect()
}

fn materials(table: &[(&str, Block)]) -> BTreeMap<String, Block> {
    table
        .iter()
        .map(|(name, block)| (name.to_string(), block.clone()))
        .collect()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            facade_materials: materials(&[
                ("brick", blocks::BRICKS),
                ("stone", blocks::STONE_BRICKS),
                ("concrete", blocks::LIGHT_GRAY_CONCRETE),
                ("plaster", blocks::WHITE_CONCRETE),
                ("wood", blocks::OAK_PLANKS),
                ("timber_framing", blocks::SPRUCE_PLANKS),
                ("glass", blocks::GLASS),
                ("mirror", blocks::GLASS),
                ("metal", blocks::IRON_BLOCK),
                ("steel", blocks::IRON_BLOCK),
                ("sandstone", blocks::SANDSTONE),
                ("limestone", blocks::SMOOTH_STONE),
                ("marble", blocks::QUARTZ_BLOCK),
            ]),
            roof_materials: materials(&[
                ("roof_tiles", blocks::ORANGE_TERRACOTTA),
                ("tile", blocks::ORANGE_TERRACOTTA),
                ("slate", blocks::DEEPSLATE_TILES),
                ("concrete", blocks::GRAY_CONCRETE),
                ("metal", blocks::IRON_BLOCK),
                ("copper", blocks::COPPER_BLOCK),
                ("wood", blocks::SPRUCE_PLANKS),
                ("glass", blocks::GLASS),
                ("tar_paper", blocks::BLACK_CONCRETE),
                ("stone", blocks::STONE_BRICKS),
            ]),
            facade_colours: entries(&[
                ([255, 255, 255], blocks::WHITE_CONCRETE),
                ([200, 200, 200], blocks::LIGHT_GRAY_CONCRETE),
                ([128, 128, 128], blocks::GRAY_CONCRETE),
                ([20, 20, 20], blocks::BLACK_CONCRETE),
                ([160, 40, 30], blocks::BRICKS),
                ([220, 40, 40], blocks::RED_CONCRETE),
                ([230, 200, 120], blocks::SANDSTONE),
                ([200, 170, 60], blocks::YELLOW_TERRACOTTA),
                ([150, 95, 60], blocks::BROWN_TERRACOTTA),
                ([80, 110, 70], blocks::GREEN_TERRACOTTA),
                ([80, 90, 120], blocks::BLUE_TERRACOTTA),
            ]),
            roof_colours: entries(&[
                ([60, 60, 60], blocks::DEEPSLATE_TILES),
                ([128, 128, 128], blocks::GRAY_CONCRETE),
                ([20, 20, 20], blocks::BLACK_CONCRETE),
                ([180, 80, 50], blocks::ORANGE_TERRACOTTA),
                ([150, 40, 30], blocks::BRICKS),
                ([110, 70, 45], blocks::BROWN_TERRACOTTA),
                ([80, 110, 70], blocks::GREEN_TERRACOTTA),
                ([230, 230, 230], blocks::WHITE_CONCRETE),
            ]),
            default_facade: blocks::STONE_BRICKS,
            default_roof: blocks::DEEPSLATE_TILES,
        }
    }
}

impl Palette {
    pub fn from_json_str(json: &str) -> Result<Self, SynthesisError> {
        Ok(serde_json::from_str(json)?)
    }

    fn resolve(
        &self,
        tags: &Tags,
        colour_key: &str,
        material_key: &str,
        colours: &[ColourEntry],
        materials: &BTreeMap<String, Block>,
        default: &Block,
    ) -> Block {
        let view = TagView::new(tags);
        if let Some(block) = view
            .str(colour_key)
            .and_then(parse_colour)
            .and_then(|rgb| nearest_colour(&rgb, colours))
        {
            return block;
        }
        view.str(material_key)
            .and_then(|m| materials.get(&m.to_ascii_lowercase()))
            .cloned()
            .unwrap_or_else(|| default.clone())
    }
}

impl MaterialResolver for Palette {
    fn facade_material(&self, tags: &Tags) -> Block {
        self.resolve(
            tags,
            "building:colour",
            "building:material",
            &self.facade_colours,
            &self.facade_materials,
            &self.default_facade,
        )
    }

    fn roof_material(&self, tags: &Tags) -> Block {
        self.resolve(
            tags,
            "roof:colour",
            "roof:material",
            &self.roof_colours,
            &self.roof_materials,
            &self.default_roof,
        )
    }
}

fn rgb_distance(a: &Rgb, b: &Rgb) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = *x as i32 - *y as i32;
            (d * d) as u32
        })
        .sum()
}

fn nearest_colour(rgb: &Rgb, table: &[ColourEntry]) -> Option<Block> {
    table
        .iter()
        .min_by_key(|entry| rgb_distance(&entry.rgb, rgb))
        .map(|entry| entry.block.clone())
}

const NAMED_COLOURS: &[(&str, Rgb)] = &[
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("grey", [128, 128, 128]),
    ("gray", [128, 128, 128]),
    ("lightgrey", [211, 211, 211]),
    ("lightgray", [211, 211, 211]),
    ("darkgrey", [80, 80, 80]),
    ("darkgray", [80, 80, 80]),
    ("silver", [192, 192, 192]),
    ("red", [220, 40, 40]),
    ("darkred", [139, 0, 0]),
    ("maroon", [128, 0, 0]),
    ("orange", [230, 130, 40]),
    ("yellow", [240, 220, 60]),
    ("beige", [230, 215, 170]),
    ("cream", [250, 240, 200]),
    ("tan", [210, 180, 140]),
    ("brown", [130, 80, 45]),
    ("green", [60, 140, 60]),
    ("darkgreen", [0, 100, 0]),
    ("blue", [50, 80, 200]),
    ("navy", [0, 0, 128]),
    ("pink", [255, 180, 200]),
    ("purple", [120, 50, 140]),
];

/// Parse `#rgb`, `#rrggbb` or a named colour.
pub fn parse_colour(raw: &str) -> Option<Rgb> {
    let value = raw.trim().to_ascii_lowercase().replace([' ', '_'], "");
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    NAMED_COLOURS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, rgb)| *rgb)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let digit = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
    };
    match hex.len() {
        6 => Some([digit(0..2)?, digit(2..4)?, digit(4..6)?]),
        3 => {
            let mut rgb = [0u8; 3];
            for (i, slot) in rgb.iter_mut().enumerate() {
                let d = digit(i..i + 1)?;
                *slot = d * 17;
            }
            Some(rgb)
        }
        _ => None,
    }
}
