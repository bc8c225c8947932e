//! Fixed-rate driver for the render pipeline.
//!
//! The clock owns no engine state. It only decides when [`crate::render_frame`]
//! runs, so the same [`App`] can be stepped headless in tests or paced in real
//! time by a host.

use std::{
    thread,
    time::{Duration, Instant},
};

use bevy::app::App;
use thiserror::Error;

use crate::{config::EngineConfig, render_frame};

/// Nominal tick interval (25 Hz).
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(40);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Idle,
    Running,
    /// Terminal. A stopped clock never ticks again.
    Stopped,
}

/// What the host wants after presenting a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameControl {
    Continue,
    Close,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("animation clock already stopped after {frames} frames")]
    Terminated { frames: u64 },
}

#[derive(Debug, Clone)]
pub struct AnimationClock {
    state: ClockState,
    interval: Duration,
    ticks: u64,
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl AnimationClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            state: ClockState::Idle,
            interval,
            ticks: 0,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.tick_interval())
    }

    pub fn state(&self) -> ClockState {
        self.state
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Frames rendered through this clock.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn is_running(&self) -> bool {
        self.state == ClockState::Running
    }

    pub fn start(&mut self) -> Result<(), ClockError> {
        match self.state {
            ClockState::Idle => {
                self.state = ClockState::Running;
                tracing::info!(
                    target: "mood_stone::clock",
                    interval_ms = self.interval.as_millis() as u64,
                    "clock.started"
                );
                Ok(())
            }
            ClockState::Running => Ok(()),
            ClockState::Stopped => Err(ClockError::Terminated { frames: self.ticks }),
        }
    }

    /// Stop ticking for good. Calling this again has no further effect.
    pub fn stop(&mut self) {
        if self.state == ClockState::Stopped {
            return;
        }
        self.state = ClockState::Stopped;
        tracing::info!(
            target: "mood_stone::clock",
            frames = self.ticks,
            "clock.stopped"
        );
    }

    /// Render one frame if the clock is running. Returns whether a frame ran.
    pub fn tick(&mut self, app: &mut App) -> bool {
        if !self.is_running() {
            return false;
        }
        render_frame(app);
        self.ticks += 1;
        true
    }

    /// Tick at the fixed interval until the host closes or fails.
    ///
    /// `on_frame` runs after every tick to present the frame. Returning
    /// [`FrameControl::Close`] stops the clock; returning an error stops the
    /// clock and hands the error back. Ticks that overrun the interval are not
    /// made up. Returns the number of frames ticked by this call.
    pub fn run<E, F>(&mut self, app: &mut App, mut on_frame: F) -> Result<u64, E>
    where
        F: FnMut(&mut App) -> Result<FrameControl, E>,
    {
        let first = self.ticks;
        let mut deadline = Instant::now();

        while self.tick(app) {
            match on_frame(app) {
                Ok(FrameControl::Continue) => {}
                Ok(FrameControl::Close) => self.stop(),
                Err(err) => {
                    tracing::warn!(
                        target: "mood_stone::clock",
                        frames = self.ticks,
                        "clock.frame_failed"
                    );
                    self.stop();
                    return Err(err);
                }
            }
            if !self.is_running() {
                break;
            }

            deadline += self.interval;
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                deadline = now;
            }
        }

        Ok(self.ticks - first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_engine_app_with, current_frame, profile::MoodProfile, rng::EngineRng};

    fn app() -> App {
        build_engine_app_with(MoodProfile::demo(), EngineConfig::builtin(), EngineRng::seeded(3))
    }

    #[test]
    fn idle_clock_does_not_tick() {
        let mut app = app();
        let mut clock = AnimationClock::new(Duration::ZERO);
        assert!(!clock.tick(&mut app));
        assert_eq!(current_frame(&app), 0);
    }

    #[test]
    fn start_is_a_no_op_while_running() {
        let mut clock = AnimationClock::default();
        assert_eq!(clock.interval(), DEFAULT_INTERVAL);
        clock.start().expect("start");
        clock.start().expect("second start");
        assert_eq!(clock.state(), ClockState::Running);
    }

    #[test]
    fn stop_is_terminal_and_idempotent() {
        let mut app = app();
        let mut clock = AnimationClock::new(Duration::ZERO);
        clock.start().expect("start");
        assert!(clock.tick(&mut app));
        clock.stop();
        clock.stop();
        assert_eq!(clock.state(), ClockState::Stopped);
        assert!(!clock.tick(&mut app));
        assert_eq!(clock.start(), Err(ClockError::Terminated { frames: 1 }));
        assert_eq!(current_frame(&app), 1);
    }

    #[test]
    fn run_stops_on_close() {
        let mut app = app();
        let mut clock = AnimationClock::new(Duration::ZERO);
        clock.start().expect("start");
        let ran = clock
            .run(&mut app, |app| {
                Ok::<_, ()>(if current_frame(app) == 5 {
                    FrameControl::Close
                } else {
                    FrameControl::Continue
                })
            })
            .expect("run");
        assert_eq!(ran, 5);
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(current_frame(&app), 5);
    }

    #[test]
    fn run_propagates_host_errors() {
        let mut app = app();
        let mut clock = AnimationClock::new(Duration::ZERO);
        clock.start().expect("start");
        let result = clock.run(&mut app, |app| {
            if current_frame(app) == 3 {
                Err("presenter failed")
            } else {
                Ok(FrameControl::Continue)
            }
        });
        assert_eq!(result, Err("presenter failed"));
        assert_eq!(clock.state(), ClockState::Stopped);
        assert_eq!(clock.ticks(), 3);
    }

    #[test]
    fn run_without_start_does_nothing() {
        let mut app = app();
        let mut clock = AnimationClock::new(Duration::ZERO);
        let ran = clock
            .run(&mut app, |_| Ok::<_, ()>(FrameControl::Continue))
            .expect("run");
        assert_eq!(ran, 0);
        assert_eq!(current_frame(&app), 0);
    }
}
