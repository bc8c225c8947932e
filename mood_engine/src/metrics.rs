use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::Serialize;

use crate::{
    surface::{DisplayList, LayerTag},
    systems::FrameCounter,
};

/// Per-frame counters, refreshed after every layer has drawn.
#[derive(Resource, Default, Debug, Clone, PartialEq, Serialize)]
pub struct FrameMetrics {
    /// Frames completed so far, matching [`FrameCounter`].
    pub frame: u64,
    pub primitives: usize,
    pub per_layer: BTreeMap<LayerTag, usize>,
    /// Particles that expired and respawned during the last step.
    pub respawns: usize,
}

pub fn collect_frame_metrics(
    frame: Res<FrameCounter>,
    display: Res<DisplayList>,
    mut metrics: ResMut<FrameMetrics>,
) {
    metrics.frame = frame.0;
    metrics.primitives = display.total();
    metrics.per_layer = LayerTag::STACKING
        .into_iter()
        .map(|tag| (tag, display.len(tag)))
        .filter(|(_, count)| *count > 0)
        .collect();

    tracing::trace!(
        target: "mood_stone::metrics",
        frame = metrics.frame,
        primitives = metrics.primitives,
        respawns = metrics.respawns,
        "frame.rendered"
    );
}
