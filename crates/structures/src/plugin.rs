//! Bevy integration: resources, request/completion events and the one system
//! that runs a synthesis batch.

use bevy::prelude::*;

use crate::config::SynthesisConfig;
use crate::features::{FeatureSnapshot, SiteProjector};
use crate::palette::Palette;
use crate::pipeline::{SitePlan, SynthesisReport, Synthesizer};
use crate::roof::RoofRegistry;
use crate::world::{HeightField, VoxelGrid};

// =============================================================================
// Events
// =============================================================================

/// Ask for the current [`FeatureSnapshot`] to be built into the [`VoxelGrid`].
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SynthesizeStructures;

/// Sent once a batch finishes.
#[derive(Event, Debug, Clone)]
pub struct StructuresSynthesized {
    pub report: SynthesisReport,
}

// =============================================================================
// Systems
// =============================================================================

/// Runs the whole batch when a request arrives. Several requests in one frame
/// collapse into one run.
///
/// Terrain comes from a [`HeightField`] resource when present, otherwise it is
/// sampled from the grid's own surface before anything is written.
#[allow(clippy::too_many_arguments)]
pub fn synthesize_structures_system(
    mut requests: EventReader<SynthesizeStructures>,
    snapshot: Res<FeatureSnapshot>,
    projector: Res<SiteProjector>,
    config: Res<SynthesisConfig>,
    palette: Res<Palette>,
    roofs: Res<RoofRegistry>,
    terrain: Option<Res<HeightField>>,
    mut grid: ResMut<VoxelGrid>,
    mut report: ResMut<SynthesisReport>,
    mut done: EventWriter<StructuresSynthesized>,
) {
    if requests.is_empty() {
        return;
    }
    requests.clear();

    if let Err(err) = config.validate() {
        warn!("structure synthesis skipped: {err}");
        return;
    }

    let site = SitePlan::classify(&snapshot, &*projector, &config);
    let heights = match terrain.as_deref() {
        Some(field) => site.capture_terrain(field),
        None => site.capture_terrain(&*grid),
    };
    let synthesizer = Synthesizer::new(&config, &*palette, &roofs);
    *report = synthesizer.build(&site, &heights, &mut *grid);
    done.send(StructuresSynthesized {
        report: report.clone(),
    });
}

// =============================================================================
// Plugin
// =============================================================================

pub struct StructuresPlugin;

impl Plugin for StructuresPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SynthesisConfig>()
            .init_resource::<Palette>()
            .init_resource::<RoofRegistry>()
            .init_resource::<SiteProjector>()
            .init_resource::<FeatureSnapshot>()
            .init_resource::<VoxelGrid>()
            .init_resource::<SynthesisReport>()
            .add_event::<SynthesizeStructures>()
            .add_event::<StructuresSynthesized>()
            .add_systems(Update, synthesize_structures_system);
    }
}
