//! Building volume synthesis: tagged footprints in, voxels out.
//!
//! The `footprint` crate turns records into fills. This crate decides what
//! each fill becomes: it sorts records into shells, parts and canopies,
//! resolves every unit's vertical extent from sparse tags, and writes the
//! volumes stage by stage over a terrain snapshot.

pub mod builder;
pub mod config;
pub mod constants;
pub mod error;
pub mod extent;
pub mod features;
pub mod palette;
pub mod pipeline;
pub mod plugin;
pub mod roof;
pub mod shells;
pub mod tags;
pub mod world;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use config::SynthesisConfig;
pub use error::SynthesisError;
pub use features::{FeatureSnapshot, SiteProjector};
pub use palette::Palette;
pub use pipeline::{SitePlan, SynthesisReport, Synthesizer};
pub use plugin::{StructuresPlugin, StructuresSynthesized, SynthesizeStructures};
pub use roof::{RoofRegistry, RoofShape};
pub use world::{Block, HeightField, MaterialResolver, TerrainSource, VoxelGrid, VoxelStore};
