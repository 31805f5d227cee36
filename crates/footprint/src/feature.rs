//! Input records: tagged nodes, ways and relations as delivered by an
//! Overpass-style extract. Immutable once decoded.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::coords::LatLon;

/// Free-form attribute tags. Ordered so iteration is deterministic.
pub type Tags = BTreeMap<String, String>;

/// Build a [`Tags`] map from string pairs.
pub fn tags_from<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Tags {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    Node,
    Way,
    Relation,
}

/// A relation member. Geometry is optional; when absent it is resolved from
/// the way with the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    #[serde(rename = "ref")]
    pub reference: i64,
    #[serde(default)]
    pub role: String,
    #[serde(
        default,
        deserialize_with = "points_skipping_nulls",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub geometry: Vec<LatLon>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    #[serde(default)]
    pub tags: Tags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(
        default,
        deserialize_with = "points_skipping_nulls",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub geometry: Vec<LatLon>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<Member>,
}

/// Extracts can carry `null` for vertices that fell outside the query area.
fn points_skipping_nulls<'de, D>(deserializer: D) -> Result<Vec<LatLon>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Option<LatLon>>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default().into_iter().flatten().collect())
}

impl Feature {
    pub fn node(id: i64, tags: Tags, point: LatLon) -> Self {
        Self {
            id,
            kind: FeatureKind::Node,
            tags,
            lat: Some(point.lat),
            lon: Some(point.lon),
            geometry: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn way(id: i64, tags: Tags, geometry: Vec<LatLon>) -> Self {
        Self {
            id,
            kind: FeatureKind::Way,
            tags,
            lat: None,
            lon: None,
            geometry,
            members: Vec::new(),
        }
    }

    pub fn relation(id: i64, tags: Tags, members: Vec<Member>) -> Self {
        Self {
            id,
            kind: FeatureKind::Relation,
            tags,
            lat: None,
            lon: None,
            geometry: Vec::new(),
            members,
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Point location of a node; falls back to the first geometry vertex.
    pub fn point(&self) -> Option<LatLon> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(LatLon::new(lat, lon)),
            _ => self.geometry.first().copied(),
        }
    }

    /// True for ways whose first and last vertex coincide within `tolerance`.
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.geometry.first(), self.geometry.last()) {
            (Some(a), Some(b)) => self.geometry.len() >= 4 && a.near(b, tolerance),
            _ => false,
        }
    }
}

impl Member {
    pub fn way(reference: i64, role: &str, geometry: Vec<LatLon>) -> Self {
        Self {
            kind: FeatureKind::Way,
            reference,
            role: role.to_string(),
            geometry,
        }
    }
}
