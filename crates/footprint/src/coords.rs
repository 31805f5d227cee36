//! Geographic and grid coordinates, and the projectors between them.
//!
//! Grid convention: `x` grows eastward, `z` grows southward (north is `-z`),
//! one column per block.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate as delivered by the map extract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both axes differ by at most `tolerance` degrees.
    pub fn near(&self, other: &LatLon, tolerance: f64) -> bool {
        (self.lat - other.lat).abs() <= tolerance && (self.lon - other.lon).abs() <= tolerance
    }
}

/// One vertical column of the voxel grid, addressed by its horizontal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Column {
    pub x: i32,
    pub z: i32,
}

/// Orthogonal neighbour offsets in a fixed order: east, west, south, north.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Column {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub const fn offset(self, dx: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// The four orthogonal neighbours, in [`NEIGHBOR_OFFSETS`] order.
    pub fn neighbors4(self) -> [Column; 4] {
        NEIGHBOR_OFFSETS.map(|(dx, dz)| self.offset(dx, dz))
    }

    /// Centre of the cell in continuous grid space, used for point sampling.
    pub fn center(self) -> (f64, f64) {
        (self.x as f64 + 0.5, self.z as f64 + 0.5)
    }

    pub fn distance_squared(self, other: Column) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dz = (self.z - other.z) as i64;
        dx * dx + dz * dz
    }

    pub fn chebyshev(self, other: Column) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }
}

/// Maps geographic coordinates onto grid columns.
pub trait Projector {
    fn project(&self, point: LatLon) -> Column;
}

/// Affine mapping of a bounding box onto a square build area of
/// `size_meters` blocks, centred on `origin`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsProjector {
    pub center: LatLon,
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
    pub size_meters: f64,
    /// Grid column the bbox centre lands on.
    pub origin: Column,
}

impl Projector for BoundsProjector {
    fn project(&self, point: LatLon) -> Column {
        let lon_span = self.east - self.west;
        let lat_span = self.south - self.north;
        if lon_span == 0.0 || lat_span == 0.0 {
            return self.origin;
        }
        let dx = (point.lon - self.center.lon) / lon_span * self.size_meters;
        let dz = (point.lat - self.center.lat) / lat_span * self.size_meters;
        Column::new(
            (self.origin.x as f64 + dx).round() as i32,
            (self.origin.z as f64 + dz).round() as i32,
        )
    }
}

/// Uniform scaling around an origin: `blocks_per_degree` columns per degree on
/// both axes. Handy for small synthetic sites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledProjector {
    pub origin: LatLon,
    pub blocks_per_degree: f64,
}

impl Projector for ScaledProjector {
    fn project(&self, point: LatLon) -> Column {
        Column::new(
            ((point.lon - self.origin.lon) * self.blocks_per_degree).round() as i32,
            ((self.origin.lat - point.lat) * self.blocks_per_degree).round() as i32,
        )
    }
}

impl ScaledProjector {
    /// Inverse mapping, exact for whole columns. Used to author synthetic input.
    pub fn unproject(&self, column: Column) -> LatLon {
        LatLon::new(
            self.origin.lat - column.z as f64 / self.blocks_per_degree,
            self.origin.lon + column.x as f64 / self.blocks_per_degree,
        )
    }
}
