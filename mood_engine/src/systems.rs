use bevy::prelude::*;

use crate::{
    background::BackgroundField,
    config::LayerFlags,
    fragments::StressFragmentField,
    labels::FloatingLabels,
    metrics::FrameMetrics,
    overlay::PatternOverlay,
    particles::ParticleField,
    pressure::PressureLines,
    profile::MoodProfile,
    rng::EngineRng,
    sparkles::SparkleField,
    stone::StoneCore,
    surface::{DisplayList, DrawSurface},
    wisps::EnergyWispSystem,
};

/// Frames rendered so far. Layers draw with the value from before the increment.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCounter(pub u64);

/// Layers currently allowed to draw.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveLayers(pub LayerFlags);

impl Default for ActiveLayers {
    fn default() -> Self {
        Self(LayerFlags::all())
    }
}

/// Run condition gating a layer system on its flag.
pub fn layer_enabled(flag: LayerFlags) -> impl FnMut(Res<ActiveLayers>) -> bool + Clone {
    move |layers: Res<ActiveLayers>| layers.0.contains(flag)
}

/// Drop anything a now-disabled layer left behind in the display list.
pub fn prune_disabled_layers(
    layers: Res<ActiveLayers>,
    mut display: ResMut<DisplayList>,
    mut metrics: ResMut<FrameMetrics>,
) {
    if !layers.is_changed() {
        return;
    }
    for tag in LayerFlags::all().difference(layers.0).tags() {
        display.clear(tag);
    }
    if !layers.0.contains(LayerFlags::PARTICLES) {
        metrics.respawns = 0;
    }
}

pub fn render_background(
    frame: Res<FrameCounter>,
    background: Res<BackgroundField>,
    mut display: ResMut<DisplayList>,
) {
    background.render(frame.0, &mut *display);
}

pub fn render_pressure_lines(
    frame: Res<FrameCounter>,
    profile: Res<MoodProfile>,
    lines: Res<PressureLines>,
    mut display: ResMut<DisplayList>,
) {
    lines.render(frame.0, &profile, &mut *display);
}

pub fn render_wisps(
    frame: Res<FrameCounter>,
    mut wisps: ResMut<EnergyWispSystem>,
    mut display: ResMut<DisplayList>,
) {
    wisps.advance();
    wisps.render(frame.0, &mut *display);
}

/// Core particles first, then the converging stress fragments.
pub fn render_particles(
    profile: Res<MoodProfile>,
    mut rng: ResMut<EngineRng>,
    mut particles: ResMut<ParticleField>,
    mut fragments: ResMut<StressFragmentField>,
    mut metrics: ResMut<FrameMetrics>,
    mut display: ResMut<DisplayList>,
) {
    metrics.respawns = particles.step(&profile, rng.source());
    particles.render(&mut *display);

    fragments.step(rng.source());
    fragments.render(&mut *display);
}

pub fn render_stone_core(
    frame: Res<FrameCounter>,
    profile: Res<MoodProfile>,
    stone: Res<StoneCore>,
    mut display: ResMut<DisplayList>,
) {
    stone.render(frame.0, &profile, &mut *display);
}

pub fn render_pattern_overlay(
    frame: Res<FrameCounter>,
    profile: Res<MoodProfile>,
    overlay: Res<PatternOverlay>,
    mut display: ResMut<DisplayList>,
) {
    overlay.render(frame.0, &profile, &mut *display);
}

pub fn render_sparkles(
    frame: Res<FrameCounter>,
    profile: Res<MoodProfile>,
    sparkles: Res<SparkleField>,
    mut rng: ResMut<EngineRng>,
    mut display: ResMut<DisplayList>,
) {
    sparkles.render(frame.0, &profile, rng.source(), &mut *display);
}

pub fn render_labels(
    frame: Res<FrameCounter>,
    profile: Res<MoodProfile>,
    labels: Res<FloatingLabels>,
    mut display: ResMut<DisplayList>,
) {
    labels.render(frame.0, &profile, &mut *display);
}

pub fn advance_frame(mut frame: ResMut<FrameCounter>) {
    frame.0 = frame.0.wrapping_add(1);
}
