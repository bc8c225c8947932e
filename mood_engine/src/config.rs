//! Engine configuration.
//!
//! Loaded from `engine_config.json` with support for an environment variable
//! override, falling back to the copy compiled into the crate.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use bevy::{math::Vec2, prelude::Resource};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::surface::LayerTag;

pub const BUILTIN_ENGINE_CONFIG: &str = include_str!("data/engine_config.json");
pub const ENGINE_CONFIG_ENV: &str = "MOOD_ENGINE_CONFIG_PATH";

bitflags! {
    /// Render layers that may be switched on or off.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LayerFlags: u16 {
        const BACKGROUND = 1 << 0;
        const PRESSURE_LINES = 1 << 1;
        const ENERGY_WISPS = 1 << 2;
        const PARTICLES = 1 << 3;
        const STONE_CORE = 1 << 4;
        const PATTERN_OVERLAY = 1 << 5;
        const SPARKLES = 1 << 6;
        const LABELS = 1 << 7;
    }
}

impl Default for LayerFlags {
    fn default() -> Self {
        LayerFlags::all()
    }
}

impl LayerFlags {
    /// Draw groups owned by each single layer flag.
    pub fn tags(self) -> Vec<LayerTag> {
        let mut tags = Vec::new();
        for (flag, owned) in LAYER_TAGS {
            if self.contains(*flag) {
                tags.extend_from_slice(owned);
            }
        }
        tags
    }
}

const LAYER_TAGS: &[(LayerFlags, &[LayerTag])] = &[
    (LayerFlags::BACKGROUND, &[LayerTag::Background]),
    (LayerFlags::PRESSURE_LINES, &[LayerTag::PressureLines]),
    (LayerFlags::ENERGY_WISPS, &[LayerTag::EnergyWisps]),
    (
        LayerFlags::PARTICLES,
        &[LayerTag::Particles, LayerTag::StressFragments],
    ),
    (LayerFlags::STONE_CORE, &[LayerTag::StoneCore]),
    (LayerFlags::PATTERN_OVERLAY, &[LayerTag::StressPatterns]),
    (LayerFlags::SPARKLES, &[LayerTag::Sparkles]),
    (LayerFlags::LABELS, &[LayerTag::FloatingText]),
];

/// Root configuration for the mood stone engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
    pub layers: LayerFlags,
    pub particles: ParticleTuning,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            tick_interval_ms: 40,
            seed: None,
            layers: LayerFlags::all(),
            particles: ParticleTuning::default(),
        }
    }
}

impl EngineConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_ENGINE_CONFIG)
                .expect("builtin engine config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| EngineConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = EngineConfig::from_json_str(&contents)?;
        Ok(config)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// Visualization center, in whole pixels.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.canvas.width / 2) as f32,
            (self.canvas.height / 2) as f32,
        )
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
        }
    }
}

/// Force constants for the core particle field.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParticleTuning {
    /// Centripetal pull added to velocity each tick.
    pub gravity: f32,
    /// Per-tick velocity retention.
    pub damping: f32,
    /// Velocity jitter at stress level 100.
    pub chaos: f32,
    pub spawn_min_distance: f32,
    pub spawn_max_distance: f32,
    /// Respawned particles draw each velocity axis from `[-v, v]`.
    pub respawn_speed: f32,
}

impl Default for ParticleTuning {
    fn default() -> Self {
        Self {
            gravity: 0.08,
            damping: 0.98,
            chaos: 0.3,
            spawn_min_distance: 150.0,
            spawn_max_distance: 250.0,
            respawn_speed: 1.0,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read engine config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle for accessing the engine configuration.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfigHandle(pub Arc<EngineConfig>);

impl EngineConfigHandle {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self(config)
    }

    pub fn get(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.0)
    }
}

/// Metadata about the engine configuration source.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfigMetadata {
    path: Option<PathBuf>,
}

impl EngineConfigMetadata {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

/// Load engine configuration from environment or default path.
pub fn load_engine_config_from_env() -> (Arc<EngineConfig>, EngineConfigMetadata) {
    let override_path = env::var(ENGINE_CONFIG_ENV).ok().map(PathBuf::from);
    let default_path =
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/data/engine_config.json");

    let path = override_path.unwrap_or(default_path);
    match EngineConfig::from_file(&path) {
        Ok(config) => {
            tracing::info!(
                target: "mood_stone::config",
                path = %path.display(),
                "engine_config.loaded=file"
            );
            return (Arc::new(config), EngineConfigMetadata::new(Some(path)));
        }
        Err(err) => {
            tracing::warn!(
                target: "mood_stone::config",
                path = %path.display(),
                error = %err,
                "engine_config.load_failed"
            );
        }
    }

    let config = EngineConfig::builtin();
    tracing::info!(
        target: "mood_stone::config",
        "engine_config.loaded=builtin"
    );
    (config, EngineConfigMetadata::new(None))
}
