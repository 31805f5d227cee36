//! Immutable sets of grid columns ("fills") and the set algebra used to
//! derive new ones.

use std::collections::BTreeSet;

use crate::coords::Column;

/// An unordered set of unique columns. Never mutated after creation: every
/// operation returns a fresh set. Iteration is ordered by `(x, z)` so all
/// consumers see the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSet {
    columns: BTreeSet<Column>,
}

impl FromIterator<Column> for ColumnSet {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ColumnSet {
    type Item = &'a Column;
    type IntoIter = std::collections::btree_set::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

impl ColumnSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Axis-aligned rectangle, both corners inclusive.
    pub fn rect(min: Column, max: Column) -> Self {
        (min.x..=max.x)
            .flat_map(|x| (min.z..=max.z).map(move |z| Column::new(x, z)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.columns.iter().copied()
    }

    pub fn union(&self, other: &ColumnSet) -> ColumnSet {
        Self {
            columns: self.columns.union(&other.columns).copied().collect(),
        }
    }

    pub fn difference(&self, other: &ColumnSet) -> ColumnSet {
        Self {
            columns: self.columns.difference(&other.columns).copied().collect(),
        }
    }

    pub fn intersection(&self, other: &ColumnSet) -> ColumnSet {
        Self {
            columns: self.columns.intersection(&other.columns).copied().collect(),
        }
    }

    /// True when the sets share at least one column.
    pub fn intersects(&self, other: &ColumnSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.columns.iter().any(|c| large.columns.contains(c))
    }

    /// True when at least one orthogonal neighbour of `column` is outside the set.
    pub fn is_edge(&self, column: Column) -> bool {
        self.contains(column) && column.neighbors4().iter().any(|n| !self.contains(*n))
    }

    /// The perimeter line: members with at least one of their four orthogonal
    /// neighbours absent from the set.
    pub fn edge_set(&self) -> ColumnSet {
        self.iter().filter(|c| self.is_edge(*c)).collect()
    }

    /// Strip the perimeter `margin` times.
    pub fn erode(&self, margin: u32) -> ColumnSet {
        let mut current = self.clone();
        for _ in 0..margin {
            if current.is_empty() {
                break;
            }
            current = current.difference(&current.edge_set());
        }
        current
    }

    /// Inclusive `(min, max)` corners of the bounding box.
    pub fn bounds(&self) -> Option<(Column, Column)> {
        let first = self.columns.first()?;
        let mut min = *first;
        let mut max = *first;
        for c in &self.columns {
            min.x = min.x.min(c.x);
            min.z = min.z.min(c.z);
            max.x = max.x.max(c.x);
            max.z = max.z.max(c.z);
        }
        Some((min, max))
    }

    /// Column at the middle of the bounding box (rounded toward negative).
    pub fn bbox_center(&self) -> Option<Column> {
        let (min, max) = self.bounds()?;
        Some(Column::new(
            (min.x + max.x).div_euclid(2),
            (min.z + max.z).div_euclid(2),
        ))
    }

    /// Mean of the member cell centres, in continuous grid space.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let n = self.len() as f64;
        let (sx, sz) = self.iter().fold((0.0, 0.0), |(sx, sz), c| {
            let (cx, cz) = c.center();
            (sx + cx, sz + cz)
        });
        Some((sx / n, sz / n))
    }
}
