//! Shell lookup and appearance inheritance.
//!
//! Shells are collected once before any part is built and are read-only
//! afterwards. A part missing facade or roof appearance tags borrows them
//! from the shell that encloses it.

use std::collections::HashMap;

use footprint::{Column, ColumnSet, Tags};

use crate::constants::APPEARANCE_KEYS;
use crate::features::Footprint;
use crate::tags::TagView;

/// Columns per bucket side.
const BUCKET_SIZE: i32 = 32;

/// Bucketed index over shell footprints.
#[derive(Debug, Clone, Default)]
pub struct ShellIndex {
    shells: Vec<Footprint>,
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

fn bucket_of(column: Column) -> (i32, i32) {
    (
        column.x.div_euclid(BUCKET_SIZE),
        column.z.div_euclid(BUCKET_SIZE),
    )
}

impl ShellIndex {
    pub fn new(shells: Vec<Footprint>) -> Self {
        let mut buckets: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (index, shell) in shells.iter().enumerate() {
            let Some((min, max)) = shell.fill.bounds() else {
                continue;
            };
            let (bx0, bz0) = bucket_of(min);
            let (bx1, bz1) = bucket_of(max);
            for bz in bz0..=bz1 {
                for bx in bx0..=bx1 {
                    buckets.entry((bx, bz)).or_default().push(index);
                }
            }
        }
        Self { shells, buckets }
    }

    pub fn len(&self) -> usize {
        self.shells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    pub fn shells(&self) -> &[Footprint] {
        &self.shells
    }

    /// Shell indices whose buckets touch the rectangle, in collection order.
    fn candidates(&self, min: Column, max: Column) -> Vec<usize> {
        let (bx0, bz0) = bucket_of(min);
        let (bx1, bz1) = bucket_of(max);
        let mut out: Vec<usize> = Vec::new();
        for bz in bz0..=bz1 {
            for bx in bx0..=bx1 {
                if let Some(bucket) = self.buckets.get(&(bx, bz)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Index of the shell enclosing `fill`.
    ///
    /// Fast path: the first shell containing the centre of the fill's bounding
    /// box. Fallback: the first shell sharing at least one column.
    pub fn enclosing(&self, fill: &ColumnSet) -> Option<usize> {
        let (min, max) = fill.bounds()?;
        let center = fill.bbox_center()?;
        let fast = self
            .buckets
            .get(&bucket_of(center))
            .and_then(|bucket| {
                bucket
                    .iter()
                    .copied()
                    .find(|&i| self.shells[i].fill.contains(center))
            });
        fast.or_else(|| {
            self.candidates(min, max)
                .into_iter()
                .find(|&i| self.shells[i].fill.intersects(fill))
        })
    }

    pub fn get(&self, index: usize) -> Option<&Footprint> {
        self.shells.get(index)
    }

    /// The enclosing shell together with its index.
    pub fn enclosing_shell(&self, fill: &ColumnSet) -> Option<(usize, &Footprint)> {
        let index = self.enclosing(fill)?;
        self.get(index).map(|shell| (index, shell))
    }
}

/// `tags` with missing appearance keys filled from `shell`, if any.
pub fn inherit_from(tags: &Tags, shell: Option<&Footprint>) -> Tags {
    match shell {
        Some(shell) => inherit_appearance(tags, &shell.tags),
        None => tags.clone(),
    }
}

/// Copy facade/roof material and colour keys that `part` lacks from `shell`.
/// Keys already present on the part are never overwritten.
pub fn inherit_appearance(part: &Tags, shell: &Tags) -> Tags {
    let mut out = part.clone();
    let part_view = TagView::new(part);
    let shell_view = TagView::new(shell);
    for key in APPEARANCE_KEYS {
        if part_view.has(key) {
            continue;
        }
        if let Some(value) = shell_view.str(key) {
            out.insert(key.to_string(), value.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use footprint::{tags_from, Area, Ring};

    use super::*;

    fn footprint(id: i64, min: (i32, i32), max: (i32, i32), tags: Tags) -> Footprint {
        let ring = Ring::new(vec![
            Column::new(min.0, min.1),
            Column::new(max.0, min.1),
            Column::new(max.0, max.1),
            Column::new(min.0, max.1),
        ])
        .expect("ring");
        Footprint::new(id, tags, Area::from_outer(ring))
    }

    #[test]
    fn test_missing_keys_copied_present_kept() {
        let part = tags_from([("building:part", "yes"), ("roof:colour", "red")]);
        let shell = tags_from([
            ("building", "yes"),
            ("building:material", "brick"),
            ("building:colour", "white"),
            ("roof:colour", "black"),
            ("building:levels", "5"),
        ]);
        let merged = inherit_appearance(&part, &shell);
        assert_eq!(merged.get("building:material").map(String::as_str), Some("brick"));
        assert_eq!(merged.get("building:colour").map(String::as_str), Some("white"));
        assert_eq!(merged.get("roof:colour").map(String::as_str), Some("red"));
        assert!(!merged.contains_key("building:levels"));
    }

    #[test]
    fn test_fast_path_uses_bbox_center() {
        let index = ShellIndex::new(vec![
            footprint(1, (0, 0), (100, 100), tags_from([("building:colour", "grey")])),
            footprint(2, (40, 40), (60, 60), tags_from([("building:colour", "red")])),
        ]);
        let part = footprint(9, (45, 45), (55, 55), Tags::new());
        assert_eq!(index.enclosing(&part.fill), Some(0));
    }

    #[test]
    fn test_fallback_first_overlap_in_order() {
        // An L-shaped part whose bbox centre lies outside every shell.
        let index = ShellIndex::new(vec![
            footprint(1, (0, 0), (4, 4), tags_from([("building:colour", "red")])),
            footprint(2, (6, 6), (10, 10), tags_from([("building:colour", "blue")])),
        ]);
        let fill: ColumnSet = ColumnSet::rect(Column::new(2, 2), Column::new(3, 3))
            .union(&ColumnSet::rect(Column::new(7, 7), Column::new(8, 8)));
        assert_eq!(fill.bbox_center(), Some(Column::new(5, 5)));
        assert_eq!(index.enclosing(&fill), Some(0));
        let shell = index.enclosing_shell(&fill).map(|(_, shell)| shell);
        let tags = inherit_from(&Tags::new(), shell);
        assert_eq!(tags.get("building:colour").map(String::as_str), Some("red"));
    }

    #[test]
    fn test_no_enclosing_shell_leaves_tags() {
        let index = ShellIndex::new(vec![footprint(1, (0, 0), (4, 4), Tags::new())]);
        let part = footprint(2, (100, 100), (104, 104), tags_from([("building:part", "yes")]));
        assert_eq!(index.enclosing(&part.fill), None);
        assert!(index.enclosing_shell(&part.fill).is_none());
        assert_eq!(inherit_from(&part.tags, None), part.tags);
    }

    #[test]
    fn test_shells_spanning_buckets() {
        let index = ShellIndex::new(vec![footprint(1, (-40, -40), (80, 80), Tags::new())]);
        let part = footprint(2, (70, -35), (75, -30), Tags::new());
        assert_eq!(index.enclosing(&part.fill), Some(0));
        assert_eq!(index.len(), 1);
    }
}
