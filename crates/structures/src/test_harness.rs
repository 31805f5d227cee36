//! # TestSite: headless harness for structure synthesis
//!
//! Wraps `bevy::app::App` + `StructuresPlugin` so integration tests can lay
//! out footprints on a synthetic site, run one batch and inspect voxels.
//! Footprints are given in grid columns and converted to geographic records
//! with the site's own projector, so they go through the full decode path.

use bevy::app::App;
use bevy::prelude::*;

use footprint::{tags_from, Column, Feature, LatLon, Member, ScaledProjector};

use crate::config::SynthesisConfig;
use crate::features::{FeatureSnapshot, SiteProjector};
use crate::pipeline::SynthesisReport;
use crate::plugin::{StructuresPlugin, StructuresSynthesized, SynthesizeStructures};
use crate::world::blocks::STONE;
use crate::world::voxels::DEFAULT_HEIGHT_BOUNDS;
use crate::world::{Block, HeightField, VoxelGrid, VoxelStore};

/// A headless Bevy App wrapping `StructuresPlugin`.
pub struct TestSite {
    app: App,
    projector: ScaledProjector,
}

impl Default for TestSite {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSite {
    /// Ground level of the default flat site.
    pub const GROUND: i32 = 64;
    /// Inclusive extent of the default terrain, in columns on both axes.
    pub const EXTENT: (i32, i32) = (-64, 191);

    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// An empty site with flat terrain at [`Self::GROUND`], supplied as a
    /// `HeightField` resource.
    pub fn new() -> Self {
        let projector = ScaledProjector {
            origin: LatLon::new(0.0, 0.0),
            blocks_per_degree: 100_000.0,
        };
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StructuresPlugin);
        app.insert_resource(SiteProjector::Scaled(projector));
        app.insert_resource(HeightField::flat(
            Column::new(Self::EXTENT.0, Self::EXTENT.0),
            Column::new(Self::EXTENT.1, Self::EXTENT.1),
            Self::GROUND,
            DEFAULT_HEIGHT_BOUNDS,
        ));
        app.update();
        Self { app, projector }
    }

    // -----------------------------------------------------------------------
    // Site setup (builder pattern, consumes and returns Self)
    // -----------------------------------------------------------------------

    pub fn with_config(mut self, edit: impl FnOnce(&mut SynthesisConfig)) -> Self {
        edit(self.app.world_mut().resource_mut::<SynthesisConfig>().into_inner());
        self
    }

    /// Closed rectangular way covering columns `x0..x1` by `z0..z1`.
    pub fn with_footprint(
        self,
        id: i64,
        (x0, z0): (i32, i32),
        (x1, z1): (i32, i32),
        tags: &[(&str, &str)],
    ) -> Self {
        self.with_way(id, &[(x0, z0), (x1, z0), (x1, z1), (x0, z1), (x0, z0)], tags)
    }

    /// A way through the given grid points, open or closed.
    pub fn with_way(mut self, id: i64, points: &[(i32, i32)], tags: &[(&str, &str)]) -> Self {
        let geometry = self.geometry(points);
        self.push(Feature::way(id, tags_from(tags.iter().copied()), geometry));
        self
    }

    pub fn with_node(mut self, id: i64, (x, z): (i32, i32), tags: &[(&str, &str)]) -> Self {
        let point = self.projector.unproject(Column::new(x, z));
        self.push(Feature::node(id, tags_from(tags.iter().copied()), point));
        self
    }

    /// Relation over earlier ways, by id and role. Member geometry is left
    /// for the assembler to resolve.
    pub fn with_relation(
        mut self,
        id: i64,
        members: &[(i64, &str)],
        tags: &[(&str, &str)],
    ) -> Self {
        let members = members
            .iter()
            .map(|(reference, role)| Member::way(*reference, role, Vec::new()))
            .collect();
        self.push(Feature::relation(id, tags_from(tags.iter().copied()), members));
        self
    }

    /// Raise or lower the ground over an inclusive rectangle.
    pub fn with_ground(mut self, (x0, z0): (i32, i32), (x1, z1): (i32, i32), y: i32) -> Self {
        let mut field = self.app.world_mut().resource_mut::<HeightField>();
        for x in x0..=x1 {
            for z in z0..=z1 {
                field.set(Column::new(x, z), Some(y));
            }
        }
        self
    }

    /// Drop the `HeightField` resource and lay a stone surface into the
    /// voxel grid instead, so terrain is sampled from the grid itself.
    pub fn with_grid_terrain(mut self) -> Self {
        let world = self.app.world_mut();
        world.remove_resource::<HeightField>();
        let mut grid = world.resource_mut::<VoxelGrid>();
        for x in Self::EXTENT.0..=Self::EXTENT.1 {
            for z in Self::EXTENT.0..=Self::EXTENT.1 {
                grid.set_voxel(IVec3::new(x, Self::GROUND, z), STONE);
            }
        }
        self
    }

    fn geometry(&self, points: &[(i32, i32)]) -> Vec<LatLon> {
        points
            .iter()
            .map(|(x, z)| self.projector.unproject(Column::new(*x, *z)))
            .collect()
    }

    fn push(&mut self, feature: Feature) {
        self.app
            .world_mut()
            .resource_mut::<FeatureSnapshot>()
            .elements
            .push(feature);
    }

    // -----------------------------------------------------------------------
    // Synthesis
    // -----------------------------------------------------------------------

    /// Request one batch and run a frame. Returns the run's report.
    pub fn run(&mut self) -> SynthesisReport {
        self.app.world_mut().send_event(SynthesizeStructures);
        self.app.update();
        self.report().clone()
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn report(&self) -> &SynthesisReport {
        self.app.world().resource::<SynthesisReport>()
    }

    pub fn grid(&self) -> &VoxelGrid {
        self.app.world().resource::<VoxelGrid>()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    /// Completion events sent during the last frame.
    pub fn completions(&self) -> usize {
        self.app
            .world()
            .resource::<Events<StructuresSynthesized>>()
            .iter_current_update_events()
            .count()
    }

    /// Non-air block at a position.
    pub fn block(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        self.grid()
            .get_voxel(IVec3::new(x, y, z))
            .filter(|b| !b.is_air())
    }

    pub fn count(&self, block: &Block) -> usize {
        self.grid().count(block)
    }

    /// Highest non-air Y in a column.
    pub fn top(&self, x: i32, z: i32) -> Option<i32> {
        self.grid().surface_y(x, z)
    }

    // -----------------------------------------------------------------------
    // Assertions
    // -----------------------------------------------------------------------

    pub fn assert_block(&self, x: i32, y: i32, z: i32, expected: &Block) {
        let actual = self.block(x, y, z);
        assert_eq!(
            actual.as_ref(),
            Some(expected),
            "expected {expected} at ({x}, {y}, {z}), found {actual:?}"
        );
    }

    pub fn assert_air(&self, x: i32, y: i32, z: i32) {
        let actual = self.block(x, y, z);
        assert!(actual.is_none(), "expected air at ({x}, {y}, {z}), found {actual:?}");
    }
}
