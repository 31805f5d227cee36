//! Roof-shape library.
//!
//! Each shape is a pure height-field function: given a footprint, its
//! per-column wall top, a roof thickness and an optional direction hint, it
//! returns how many roof layers to stack on each column above the eave. The
//! [`RoofRegistry`] maps shape tags to those functions.

mod shapes;


use std::collections::{BTreeMap, HashMap};

use bevy::prelude::Resource;

use footprint::{Column, ColumnSet, Tags};

use crate::tags::TagView;

pub use shapes::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoofShape {
    Flat,
    Gabled,
    Skillion,
    Pyramidal,
    Hip,
    HalfHip,
    Gambrel,
    Mansard,
    Dome,
    Onion,
    Conical,
    Sawtooth,
    Butterfly,
    Barrel,
    Saltbox,
}

impl RoofShape {
    pub const ALL: [RoofShape; 15] = [
        RoofShape::Flat,
        RoofShape::Gabled,
        RoofShape::Skillion,
        RoofShape::Pyramidal,
        RoofShape::Hip,
        RoofShape::HalfHip,
        RoofShape::Gambrel,
        RoofShape::Mansard,
        RoofShape::Dome,
        RoofShape::Onion,
        RoofShape::Conical,
        RoofShape::Sawtooth,
        RoofShape::Butterfly,
        RoofShape::Barrel,
        RoofShape::Saltbox,
    ];

    /// Canonical shape for a `roof:shape` value, aliases included.
    pub fn from_tag(raw: &str) -> Option<RoofShape> {
        let shape = match raw.trim().to_ascii_lowercase().as_str() {
            "flat" => RoofShape::Flat,
            "gabled" | "gable" => RoofShape::Gabled,
            "skillion" | "lean_to" | "shed" | "monopitch" => RoofShape::Skillion,
            "pyramidal" | "pyramid" => RoofShape::Pyramidal,
            "hip" | "hipped" => RoofShape::Hip,
            "half-hip" | "half-hipped" | "half_hipped" | "half_hip" => RoofShape::HalfHip,
            "gambrel" => RoofShape::Gambrel,
            "mansard" => RoofShape::Mansard,
            "dome" => RoofShape::Dome,
            "onion" => RoofShape::Onion,
            "cone" | "conical" => RoofShape::Conical,
            "sawtooth" => RoofShape::Sawtooth,
            "butterfly" => RoofShape::Butterfly,
            "round" | "barrel" => RoofShape::Barrel,
            "saltbox" => RoofShape::Saltbox,
            _ => return None,
        };
        Some(shape)
    }

    /// Shape from `roof:shape`; missing or unknown values are flat.
    pub fn from_tags(tags: &Tags) -> RoofShape {
        TagView::new(tags)
            .str("roof:shape")
            .and_then(RoofShape::from_tag)
            .unwrap_or(RoofShape::Flat)
    }

    pub fn name(self) -> &'static str {
        match self {
            RoofShape::Flat => "flat",
            RoofShape::Gabled => "gabled",
            RoofShape::Skillion => "skillion",
            RoofShape::Pyramidal => "pyramidal",
            RoofShape::Hip => "hip",
            RoofShape::HalfHip => "half-hip",
            RoofShape::Gambrel => "gambrel",
            RoofShape::Mansard => "mansard",
            RoofShape::Dome => "dome",
            RoofShape::Onion => "onion",
            RoofShape::Conical => "conical",
            RoofShape::Sawtooth => "sawtooth",
            RoofShape::Butterfly => "butterfly",
            RoofShape::Barrel => "barrel",
            RoofShape::Saltbox => "saltbox",
        }
    }
}

/// Everything a shape function may look at.
pub struct RoofInput<'a> {
    pub fill: &'a ColumnSet,
    pub wall_top: &'a dyn Fn(Column) -> i32,
    pub thickness: i32,
    /// Compass bearing (degrees, clockwise from north) the main slope faces.
    pub direction: Option<f64>,
    /// Ridge runs along the short axis instead of the long one.
    pub across: bool,
}

impl RoofInput<'_> {
    /// Highest wall top over the fill; layers stack above it.
    pub fn eave(&self) -> Option<i32> {
        self.fill.iter().map(|c| (self.wall_top)(c)).max()
    }
}

/// Roof layers per column, counted upward from the eave.
pub type RoofLayers = BTreeMap<Column, i32>;

pub type RoofFn = fn(&RoofInput<'_>) -> RoofLayers;

/// Shape → function dispatch.
#[derive(Resource, Clone)]
pub struct RoofRegistry {
    shapes: HashMap<RoofShape, RoofFn>,
}

impl Default for RoofRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RoofRegistry {
    pub fn empty() -> Self {
        Self {
            shapes: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(RoofShape::Flat, flat);
        registry.register(RoofShape::Gabled, gabled);
        registry.register(RoofShape::Skillion, skillion);
        registry.register(RoofShape::Pyramidal, pyramidal);
        registry.register(RoofShape::Hip, hip);
        registry.register(RoofShape::HalfHip, half_hip);
        registry.register(RoofShape::Gambrel, gambrel);
        registry.register(RoofShape::Mansard, mansard);
        registry.register(RoofShape::Dome, dome);
        registry.register(RoofShape::Onion, onion);
        registry.register(RoofShape::Conical, conical);
        registry.register(RoofShape::Sawtooth, sawtooth);
        registry.register(RoofShape::Butterfly, butterfly);
        registry.register(RoofShape::Barrel, barrel);
        registry.register(RoofShape::Saltbox, saltbox);
        registry
    }

    pub fn register(&mut self, shape: RoofShape, f: RoofFn) {
        self.shapes.insert(shape, f);
    }

    /// Function for `shape`, falling back to flat.
    pub fn get(&self, shape: RoofShape) -> RoofFn {
        self.shapes.get(&shape).copied().unwrap_or(flat)
    }

    pub fn layers(&self, shape: RoofShape, input: &RoofInput<'_>) -> RoofLayers {
        if input.fill.is_empty() {
            return RoofLayers::new();
        }
        (self.get(shape))(input)
    }
}

// ---------------------------------------------------------------------------
// Direction hints
// ---------------------------------------------------------------------------

const COMPASS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// `roof:direction` as a bearing in degrees: a number or a compass point.
pub fn parse_direction(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if let Some(i) = COMPASS
        .iter()
        .position(|p| p.eq_ignore_ascii_case(value))
    {
        return Some(i as f64 * 22.5);
    }
    let degrees: f64 = value.parse().ok()?;
    degrees.is_finite().then(|| degrees.rem_euclid(360.0))
}

/// Direction hint and ridge orientation from tags.
pub fn direction_hint(tags: &Tags) -> (Option<f64>, bool) {
    let view = TagView::new(tags);
    let direction = view
        .first_str(&["roof:direction", "roof:slope:direction"])
        .and_then(parse_direction);
    (direction, view.is("roof:orientation", "across"))
}
