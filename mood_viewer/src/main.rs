use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use color_eyre::Result;
use tracing::info;

use mood_engine::{
    build_engine_app_with, load_engine_config_from_env, AnimationClock, EngineRng, MoodArchetype,
    MoodProfile,
};

mod app;
mod ui;

use app::ViewerApp;

#[derive(Clone)]
struct ChannelWriter {
    sender: Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if let Ok(text) = String::from_utf8(buf.to_vec()) {
            let _ = self.sender.send(text);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ArchetypeArg {
    EconomicSurvivor,
    StormNavigator,
    PrivilegedAnxious,
    BalancedNavigator,
    AdaptiveResponder,
}

impl From<ArchetypeArg> for MoodArchetype {
    fn from(value: ArchetypeArg) -> Self {
        match value {
            ArchetypeArg::EconomicSurvivor => MoodArchetype::EconomicSurvivor,
            ArchetypeArg::StormNavigator => MoodArchetype::StormNavigator,
            ArchetypeArg::PrivilegedAnxious => MoodArchetype::PrivilegedAnxious,
            ArchetypeArg::BalancedNavigator => MoodArchetype::BalancedNavigator,
            ArchetypeArg::AdaptiveResponder => MoodArchetype::AdaptiveResponder,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Mood stone terminal viewer", long_about = None)]
struct Cli {
    /// Profile JSON written by the assessment. Takes precedence over the flags below.
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Archetype whose name and palette to use. Without it the demo reading is shown.
    #[arg(long, value_enum)]
    archetype: Option<ArchetypeArg>,
    #[arg(long, default_value_t = 50.0)]
    stress: f32,
    #[arg(long, default_value_t = 50.0)]
    economic: f32,
    #[arg(long = "life-events", default_value_t = 50.0)]
    life_events: f32,
    /// Stress pattern tag to overlay. Repeatable.
    #[arg(long = "pattern")]
    patterns: Vec<String>,
    /// Seed for reproducible animation.
    #[arg(long)]
    seed: Option<u64>,
    /// Tick interval in milliseconds (defaults to the engine config).
    #[arg(long = "interval-ms")]
    interval_ms: Option<u64>,
}

impl Cli {
    fn profile(&self) -> Result<MoodProfile> {
        if let Some(path) = &self.profile {
            return Ok(MoodProfile::from_file(path)?);
        }
        match self.archetype {
            Some(archetype) => Ok(MoodProfile::for_archetype(
                archetype.into(),
                self.stress,
                self.economic,
                self.life_events,
                &self.patterns,
            )?),
            None => Ok(MoodProfile::demo()),
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let (log_tx, log_rx) = mpsc::channel::<String>();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .with_writer(move || ChannelWriter {
            sender: log_tx.clone(),
        })
        .init();

    let cli = Cli::parse();
    let profile = cli.profile()?;

    let (config, metadata) = load_engine_config_from_env();
    let mut config = (*config).clone();
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.tick_interval_ms = interval_ms;
    }
    let config = Arc::new(config);

    info!(
        target: "mood_stone::viewer",
        profile = profile.label(),
        interval_ms = config.tick_interval_ms,
        seed = ?config.seed,
        "viewer.starting"
    );

    let clock = AnimationClock::from_config(&config);
    let rng = EngineRng::from_seed(config.seed);
    let mut engine = build_engine_app_with(profile, Arc::clone(&config), rng);
    engine.insert_resource(metadata);

    let description = cli
        .archetype
        .filter(|_| cli.profile.is_none())
        .map(|archetype| MoodArchetype::from(archetype).description());
    let viewer = ViewerApp::new(engine, clock, config, description, log_rx)?;
    let frames = viewer.run()?;
    println!("Rendered {frames} frames.");
    Ok(())
}
