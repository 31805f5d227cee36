use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use footprint::{BoundsProjector, Column, Feature, FeatureKind, LatLon, Projector, ScaledProjector};

use crate::error::SynthesisError;

// ---------------------------------------------------------------------------
// FeatureSnapshot
// ---------------------------------------------------------------------------

/// The static set of input records for one synthesis run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct FeatureSnapshot {
    pub elements: Vec<Feature>,
}

impl FeatureSnapshot {
    pub fn new(elements: Vec<Feature>) -> Self {
        Self { elements }
    }

    /// Decode an extract. Accepts a bare element array, `{"elements": [...]}`
    /// or `{"features": {"elements": [...]}}`.
    pub fn from_json_str(json: &str) -> Result<Self, SynthesisError> {
        let value: Value = serde_json::from_str(json)?;
        let elements = match value {
            Value::Array(_) => value,
            Value::Object(mut map) => {
                let nested = match map.remove("features") {
                    Some(Value::Object(mut features)) => features.remove("elements"),
                    _ => None,
                };
                match nested.or_else(|| map.remove("elements")) {
                    Some(elements @ Value::Array(_)) => elements,
                    _ => {
                        return Err(SynthesisError::UnsupportedDocument(
                            "object has no `elements` array".to_string(),
                        ))
                    }
                }
            }
            other => {
                return Err(SynthesisError::UnsupportedDocument(format!(
                    "expected an array or object, got {}",
                    json_kind(&other)
                )))
            }
        };
        Ok(Self::new(serde_json::from_value(elements)?))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ways indexed by id, for relation member lookup.
    pub fn ways_by_id(&self) -> HashMap<i64, &Feature> {
        self.elements
            .iter()
            .filter(|f| f.kind == FeatureKind::Way)
            .map(|f| (f.id, f))
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// SiteProjector
// ---------------------------------------------------------------------------

/// The projector used for a run.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SiteProjector {
    Bounds(BoundsProjector),
    Scaled(ScaledProjector),
}

impl Default for SiteProjector {
    /// One block per ~1.1 m at the null island origin.
    fn default() -> Self {
        SiteProjector::Scaled(ScaledProjector {
            origin: LatLon::new(0.0, 0.0),
            blocks_per_degree: 100_000.0,
        })
    }
}

impl Projector for SiteProjector {
    fn project(&self, point: LatLon) -> Column {
        match self {
            SiteProjector::Bounds(p) => p.project(point),
            SiteProjector::Scaled(p) => p.project(point),
        }
    }
}
