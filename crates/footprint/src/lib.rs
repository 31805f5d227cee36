//! Footprint geometry: turns tagged map records into closed rings,
//! multipolygon areas and the column sets they cover on the voxel grid.

pub mod column_set;
pub mod coords;
pub mod feature;
pub mod line;
pub mod multipolygon;
pub mod raster;
pub mod ring;
pub mod stitch;

pub use column_set::ColumnSet;
pub use coords::{BoundsProjector, Column, LatLon, Projector, ScaledProjector};
pub use feature::{tags_from, Feature, FeatureKind, Member, Tags};
pub use multipolygon::{
    assemble_relation, assemble_rings, AssembledRelation, AssembledRings, MemberGeometry,
    MemberRole,
};
pub use raster::{rasterize_area, rasterize_ring};
pub use ring::{Area, Ring};
pub use stitch::{stitch_rings, StitchOutcome, DEFAULT_TOLERANCE_DEG};
