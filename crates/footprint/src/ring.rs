//! Closed rings of grid points and multipolygon areas built from them.

use crate::coords::{Column, LatLon, Projector};

/// A closed polygon boundary: first point equals last, at least four points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    points: Vec<Column>,
}

impl Ring {
    pub const MIN_POINTS: usize = 4;

    /// Normalise `points` into a ring: consecutive duplicates are collapsed and
    /// the ring is closed if needed. Returns `None` when fewer than three
    /// distinct vertices remain.
    pub fn new(points: Vec<Column>) -> Option<Ring> {
        let mut out: Vec<Column> = Vec::with_capacity(points.len() + 1);
        for p in points {
            if out.last() != Some(&p) {
                out.push(p);
            }
        }
        let first = *out.first()?;
        if out.last() != Some(&first) {
            out.push(first);
        }
        if out.len() < Self::MIN_POINTS {
            return None;
        }
        Some(Ring { points: out })
    }

    /// Project a geographic ring onto the grid.
    pub fn project(points: &[LatLon], projector: &impl Projector) -> Option<Ring> {
        Ring::new(points.iter().map(|p| projector.project(*p)).collect())
    }

    /// All points, closing point included.
    pub fn points(&self) -> &[Column] {
        &self.points
    }

    /// Distinct vertices, closing point excluded.
    pub fn vertices(&self) -> &[Column] {
        &self.points[..self.points.len() - 1]
    }

    pub fn edges(&self) -> impl Iterator<Item = (Column, Column)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn bounds(&self) -> (Column, Column) {
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points {
            min.x = min.x.min(p.x);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.z = max.z.max(p.z);
        }
        (min, max)
    }

    /// Twice the signed shoelace area (positive when clockwise on screen,
    /// since `z` points south).
    pub fn signed_area2(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.x as f64 * b.z as f64 - b.x as f64 * a.z as f64)
            .sum()
    }

    /// Area centroid; degenerate (zero-area) rings fall back to the vertex mean.
    pub fn centroid(&self) -> (f64, f64) {
        let a2 = self.signed_area2();
        if a2.abs() < 1e-9 {
            let verts = self.vertices();
            let n = verts.len() as f64;
            let (sx, sz) = verts
                .iter()
                .fold((0.0, 0.0), |(sx, sz), p| (sx + p.x as f64, sz + p.z as f64));
            return (sx / n, sz / n);
        }
        let (mut cx, mut cz) = (0.0, 0.0);
        for (a, b) in self.edges() {
            let cross = a.x as f64 * b.z as f64 - b.x as f64 * a.z as f64;
            cx += (a.x + b.x) as f64 * cross;
            cz += (a.z + b.z) as f64 * cross;
        }
        (cx / (3.0 * a2), cz / (3.0 * a2))
    }

    /// Even-odd ray-casting test for a point in continuous grid space.
    pub fn contains_point(&self, px: f64, pz: f64) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            let (xi, zi) = (a.x as f64, a.z as f64);
            let (xj, zj) = (b.x as f64, b.z as f64);
            if (zi > pz) != (zj > pz) && px < (xj - xi) * (pz - zi) / (zj - zi) + xi {
                inside = !inside;
            }
        }
        inside
    }
}

/// A multipolygon on the grid: outer rings plus holes. Holes are matched to
/// their outer ring at rasterization time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Area {
    pub outers: Vec<Ring>,
    pub inners: Vec<Ring>,
}

impl Area {
    pub fn from_outer(ring: Ring) -> Self {
        Self {
            outers: vec![ring],
            inners: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outers.is_empty()
    }
}
