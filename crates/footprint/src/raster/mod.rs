//! Polygon rasterization: rings and areas to column sets.
//!
//! A column belongs to a ring when its cell centre `(x + 0.5, z + 0.5)` is
//! inside under the even-odd rule. Rows are scanned inside the ring's
//! bounding box only.

use crate::column_set::ColumnSet;
use crate::coords::Column;
use crate::ring::{Area, Ring};


/// Columns whose centre lies inside `ring`.
///
/// Equivalent to testing every column of the bounding box with
/// [`Ring::contains_point`], but walks one scanline per row.
pub fn rasterize_ring(ring: &Ring) -> ColumnSet {
    let (min, max) = ring.bounds();
    let mut crossings: Vec<f64> = Vec::new();
    let mut columns: Vec<Column> = Vec::new();

    for z in min.z..max.z {
        let zc = z as f64 + 0.5;
        crossings.clear();
        for (a, b) in ring.edges() {
            let (xa, za) = (a.x as f64, a.z as f64);
            let (xb, zb) = (b.x as f64, b.z as f64);
            if (za > zc) != (zb > zc) {
                crossings.push(xa + (zc - za) * (xb - xa) / (zb - za));
            }
        }
        crossings.sort_by(f64::total_cmp);

        // Centre x + 0.5 is inside for crossings[2k] <= x + 0.5 < crossings[2k + 1].
        for pair in crossings.chunks_exact(2) {
            let first = (pair[0] - 0.5).ceil() as i32;
            let end = (pair[1] - 0.5).ceil() as i32;
            columns.extend((first..end).map(|x| Column::new(x, z)));
        }
    }
    columns.into_iter().collect()
}

/// Union of the outer fills, each minus the holes whose centroid lies inside
/// that particular outer ring.
///
/// Holes are matched by centroid only, so a hole in a strongly concave outer
/// can end up assigned to the wrong ring (or none).
pub fn rasterize_area(area: &Area) -> ColumnSet {
    let hole_fills: Vec<(&Ring, ColumnSet)> = area
        .inners
        .iter()
        .map(|inner| (inner, rasterize_ring(inner)))
        .collect();

    area.outers.iter().fold(ColumnSet::new(), |acc, outer| {
        let mut fill = rasterize_ring(outer);
        for (inner, hole) in &hole_fills {
            let (cx, cz) = inner.centroid();
            if outer.contains_point(cx, cz) {
                fill = fill.difference(hole);
            }
        }
        acc.union(&fill)
    })
}
