use std::{env, error::Error, path::PathBuf};

use tracing::info;

use mood_engine::{
    build_engine_app, current_frame, display_list, render_frame, FrameMetrics, MoodProfile,
};

const DEFAULT_FRAMES: u64 = 250;

/// Renders a fixed number of frames without pacing and prints the final
/// display list as JSON.
///
/// Usage: `mood_headless [FRAMES] [PROFILE_JSON]`
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = env::args().skip(1);
    let frames = match args.next() {
        Some(raw) => raw.parse::<u64>()?,
        None => DEFAULT_FRAMES,
    };
    let profile = match args.next().map(PathBuf::from) {
        Some(path) => MoodProfile::from_file(&path)?,
        None => MoodProfile::demo(),
    };

    let mut app = build_engine_app(profile);
    for _ in 0..frames {
        render_frame(&mut app);
    }

    let metrics = app.world.resource::<FrameMetrics>();
    info!(
        target: "mood_stone::headless",
        frame = current_frame(&app),
        primitives = metrics.primitives,
        respawns = metrics.respawns,
        "headless.finished"
    );

    println!("{}", serde_json::to_string_pretty(display_list(&app))?);
    Ok(())
}
