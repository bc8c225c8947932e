//! Ambient twinkle field.
//!
//! Sparkles are not tracked between ticks: every frame resamples a fresh set
//! of candidates, and a deterministic lifecycle derived from the frame and
//! position decides which of them are visible.

use std::f32::consts::TAU;

use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{Paint, Rgb},
    profile::MoodProfile,
    rng::RandomSource,
    surface::{DrawSurface, LayerTag},
};

const BASE_SPARKLES: usize = 15;
const CALM_SPARKLES: f64 = 40.0;
const DISTANCE_RANGE: (f32, f32) = (120.0, 350.0);
const ROTATION_RATE: f32 = 0.002;
const LIFECYCLE: i64 = 50;
const VISIBLE_SPAN: i64 = 15;
const PEAK_BRIGHTNESS: f32 = 200.0;

/// `floor(40 * max(0, 1 - stress / 100)) + 15`.
///
/// Evaluated as `40 * (100 - stress) / 100` in f64 so whole-number scores
/// land exactly on their integer counts.
pub fn sparkle_count_for(profile: &MoodProfile) -> usize {
    let calm = (100.0 - f64::from(profile.stress_level())).max(0.0);
    (CALM_SPARKLES * calm / 100.0).floor() as usize + BASE_SPARKLES
}

/// Position in the 50-frame twinkle cycle for a sparkle at `position`.
pub fn lifecycle(frame: u64, position: Vec2) -> i64 {
    let anchor = (position.x + position.y).trunc() as i64;
    (frame as i64).wrapping_add(anchor).rem_euclid(LIFECYCLE)
}

#[derive(Resource, Debug, Clone)]
pub struct SparkleField {
    center: Vec2,
}

impl SparkleField {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }

    pub fn render(
        &self,
        frame: u64,
        profile: &MoodProfile,
        rng: &mut dyn RandomSource,
        surface: &mut dyn DrawSurface,
    ) {
        surface.clear(LayerTag::Sparkles);
        let rotation = frame as f32 * ROTATION_RATE;

        for _ in 0..sparkle_count_for(profile) {
            let angle = rng.uniform(0.0, TAU);
            let distance = rng.uniform(DISTANCE_RANGE.0, DISTANCE_RANGE.1);
            let position = self.center + Vec2::from_angle(angle + rotation) * distance;

            let life = lifecycle(frame, position);
            if life >= VISIBLE_SPAN {
                continue;
            }
            let fade = (VISIBLE_SPAN - life) as f32;
            let brightness = (PEAK_BRIGHTNESS * fade / VISIBLE_SPAN as f32) as u8;
            surface.draw_circle(
                LayerTag::Sparkles,
                position,
                fade / 3.0,
                Paint::Rgb(Rgb::grey(brightness)),
            );
        }
    }
}
