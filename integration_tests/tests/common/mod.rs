#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Once;

use bevy::app::App;
use mood_engine::{build_engine_app, render_frame};

static INIT: Once = Once::new();

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn ensure_test_config() {
    INIT.call_once(|| {
        let config_path = fixture_path("test_engine_config.json");

        debug_assert!(
            config_path.exists(),
            "missing test engine config at {}",
            config_path.display()
        );

        std::env::set_var("MOOD_ENGINE_CONFIG_PATH", &config_path);
    });
}

/// Engine built from the fixture config (seeded) for `profile`.
pub fn test_engine(profile: mood_engine::MoodProfile) -> App {
    ensure_test_config();
    build_engine_app(profile)
}

pub fn render_frames(app: &mut App, frames: u64) {
    for _ in 0..frames {
        render_frame(app);
    }
}
