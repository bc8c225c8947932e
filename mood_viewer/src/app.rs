use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::Duration;

use bevy::app::App;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use tracing::{info, warn};

use mood_engine::{
    display_list, AnimationClock, EngineConfig, FrameControl, FrameMetrics, MoodProfile,
};

use crate::ui::{draw_ui, UiState};

pub struct ViewerApp {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ui_state: UiState,
    log_receiver: Receiver<String>,
    engine: App,
    clock: AnimationClock,
}

impl ViewerApp {
    pub fn new(
        engine: App,
        clock: AnimationClock,
        config: Arc<EngineConfig>,
        description: Option<&str>,
        log_receiver: Receiver<String>,
    ) -> Result<Self> {
        let label = engine.world.resource::<MoodProfile>().label().to_owned();
        let stdout = std::io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        crossterm::terminal::enable_raw_mode()?;
        if let Err(err) = terminal.clear().and_then(|()| terminal.hide_cursor()) {
            restore_terminal(&mut terminal);
            return Err(err.into());
        }
        let mut ui_state = UiState::new(label, config.canvas.width, config.canvas.height);
        ui_state.description = description.map(str::to_owned);
        Ok(Self {
            terminal,
            ui_state,
            log_receiver,
            engine,
            clock,
        })
    }

    /// Animate until the viewer is closed. Returns the number of frames shown.
    pub fn run(self) -> Result<u64> {
        let Self {
            mut terminal,
            mut ui_state,
            log_receiver,
            mut engine,
            mut clock,
        } = self;

        clock.start()?;
        let outcome = clock.run(&mut engine, |engine| -> Result<FrameControl> {
            while let Ok(line) = log_receiver.try_recv() {
                ui_state.push_log(line);
            }
            ui_state.observe(engine.world.resource::<FrameMetrics>());

            let display = display_list(engine);
            terminal.draw(|frame| draw_ui(frame, &ui_state, display))?;

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                    {
                        return Ok(FrameControl::Close);
                    }
                }
            }
            Ok(FrameControl::Continue)
        });

        restore_terminal(&mut terminal);

        let frames = outcome?;
        info!(target: "mood_stone::viewer", frames, "viewer.closed");
        Ok(frames)
    }
}

/// Leave raw mode before anything else so a failed cursor reset cannot strand it.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) {
    if let Err(err) = crossterm::terminal::disable_raw_mode() {
        warn!(target: "mood_stone::viewer", error = %err, "viewer.raw_mode_restore_failed");
    }
    if let Err(err) = terminal.show_cursor() {
        warn!(target: "mood_stone::viewer", error = %err, "viewer.cursor_restore_failed");
    }
}
