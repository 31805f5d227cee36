//! Grid line drawing for passage linework and ring outlines.

use crate::coords::Column;

/// Columns on the 8-connected Bresenham line from `a` to `b`, both ends
/// included.
pub fn bresenham(a: Column, b: Column) -> Vec<Column> {
    let dx = (b.x - a.x).abs();
    let dz = -(b.z - a.z).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sz = if a.z < b.z { 1 } else { -1 };
    let mut err = dx + dz;
    let (mut x, mut z) = (a.x, a.z);
    let mut out = Vec::with_capacity((dx - dz) as usize + 1);

    loop {
        out.push(Column::new(x, z));
        if x == b.x && z == b.z {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dz {
            err += dz;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            z += sz;
        }
    }
    out
}

/// Bresenham through consecutive points; shared vertices appear once.
pub fn polyline(points: &[Column]) -> Vec<Column> {
    let mut out: Vec<Column> = Vec::new();
    for pair in points.windows(2) {
        for column in bresenham(pair[0], pair[1]) {
            if out.last() != Some(&column) {
                out.push(column);
            }
        }
    }
    if out.is_empty() {
        out.extend(points.first().copied());
    }
    out
}
