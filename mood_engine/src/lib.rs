//! Procedural animation engine behind the mood stone visualization.
//!
//! Every layer lives in a Bevy [`World`] as a resource and draws into the
//! shared [`DisplayList`] when [`render_frame`] is invoked. Pacing is left to
//! [`AnimationClock`] or to the caller.

pub mod background;
pub mod clock;
pub mod color;
pub mod config;
pub mod fragments;
pub mod labels;
pub mod metrics;
pub mod overlay;
pub mod particles;
pub mod pressure;
pub mod profile;
pub mod rng;
pub mod sparkles;
pub mod stone;
pub mod surface;
mod systems;
pub mod wisps;

use std::sync::Arc;

use bevy::{ecs::schedule::ExecutorKind, prelude::*};

pub use background::BackgroundField;
pub use clock::{AnimationClock, ClockError, ClockState, FrameControl, DEFAULT_INTERVAL};
pub use color::{cycle_phase, synthesize_color, ColorWave, Paint, Rgb};
pub use config::{
    load_engine_config_from_env, EngineConfig, EngineConfigError, EngineConfigHandle,
    EngineConfigMetadata, LayerFlags, ParticleTuning, ENGINE_CONFIG_ENV,
};
pub use fragments::{StressFragment, StressFragmentField};
pub use labels::FloatingLabels;
pub use metrics::FrameMetrics;
pub use overlay::PatternOverlay;
pub use particles::{EnergyKind, Particle, ParticleField};
pub use pressure::PressureLines;
pub use profile::{MoodArchetype, MoodProfile, PatternTag, ProfileError};
pub use rng::{EngineRng, RandomSource, RngSource, ScriptedSource};
pub use sparkles::SparkleField;
pub use stone::StoneCore;
pub use surface::{DisplayList, DrawSurface, FontSpec, LayerTag, Primitive};
pub use systems::{ActiveLayers, FrameCounter};
pub use wisps::{EnergyWisp, EnergyWispSystem};

/// Construct an engine for `profile` using the configuration found through
/// [`load_engine_config_from_env`]. The random source is seeded from the
/// configured seed when one is set.
pub fn build_engine_app(profile: MoodProfile) -> App {
    let (config, metadata) = load_engine_config_from_env();
    let rng = EngineRng::from_seed(config.seed);
    let mut app = build_engine_app_with(profile, config, rng);
    app.insert_resource(metadata);
    app
}

/// Construct an engine with explicit configuration and randomness.
///
/// Particle, fragment and wisp populations are created here, in that order,
/// from `rng`; they keep their size for the lifetime of the app.
pub fn build_engine_app_with(
    profile: MoodProfile,
    config: Arc<EngineConfig>,
    mut rng: EngineRng,
) -> App {
    let mut app = App::new();

    let center = config.center();
    let particles = ParticleField::new(&profile, center, config.particles, rng.source());
    let fragments = StressFragmentField::new(&profile, center, rng.source());
    let wisps = EnergyWispSystem::new(&profile, center, rng.source());

    tracing::info!(
        target: "mood_stone::engine",
        profile = profile.label(),
        particles = particles.len(),
        fragments = fragments.len(),
        wisps = wisps.len(),
        "engine.ready"
    );

    app.insert_resource(BackgroundField::new(config.canvas.width, center.y))
        .insert_resource(PressureLines::new(center))
        .insert_resource(wisps)
        .insert_resource(particles)
        .insert_resource(fragments)
        .insert_resource(StoneCore::new(center))
        .insert_resource(PatternOverlay::new(center))
        .insert_resource(SparkleField::new(center))
        .insert_resource(FloatingLabels::new(center))
        .insert_resource(ActiveLayers(config.layers))
        .insert_resource(EngineConfigHandle::new(config))
        .insert_resource(profile)
        .insert_resource(rng)
        .insert_resource(FrameCounter::default())
        .insert_resource(DisplayList::default())
        .insert_resource(FrameMetrics::default())
        .add_plugins(MinimalPlugins)
        .edit_schedule(Update, |schedule| {
            schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        })
        .add_systems(
            Update,
            (
                systems::prune_disabled_layers,
                systems::render_background
                    .run_if(systems::layer_enabled(LayerFlags::BACKGROUND)),
                systems::render_pressure_lines
                    .run_if(systems::layer_enabled(LayerFlags::PRESSURE_LINES)),
                systems::render_wisps.run_if(systems::layer_enabled(LayerFlags::ENERGY_WISPS)),
                systems::render_particles.run_if(systems::layer_enabled(LayerFlags::PARTICLES)),
                systems::render_stone_core
                    .run_if(systems::layer_enabled(LayerFlags::STONE_CORE)),
                systems::render_pattern_overlay
                    .run_if(systems::layer_enabled(LayerFlags::PATTERN_OVERLAY)),
                systems::render_sparkles.run_if(systems::layer_enabled(LayerFlags::SPARKLES)),
                systems::render_labels.run_if(systems::layer_enabled(LayerFlags::LABELS)),
                systems::advance_frame,
                metrics::collect_frame_metrics,
            )
                .chain(),
        );

    app
}

/// Render a single frame.
///
/// Each call runs the chained layer systems configured in
/// [`build_engine_app_with`] (background → pressure lines → wisps → particles
/// and fragments → stone → patterns → sparkles → labels), then increments the
/// frame counter and refreshes [`FrameMetrics`]. Presenting the
/// [`DisplayList`] is the caller's job.
pub fn render_frame(app: &mut App) {
    app.update();
}

/// Frames rendered so far.
pub fn current_frame(app: &App) -> u64 {
    app.world.resource::<FrameCounter>().0
}

/// The most recently composed frame.
pub fn display_list(app: &App) -> &DisplayList {
    app.world.resource::<DisplayList>()
}
