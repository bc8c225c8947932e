//! The focal stone: concentric rings breathing on two out-of-step pulses.
//!
//! Economic pressure compresses the whole stone; stress flickers the
//! intensity of each ring's palette color.

use bevy::{math::Vec2, prelude::Resource};

use crate::{
    profile::MoodProfile,
    surface::{DrawSurface, LayerTag},
};

pub const RING_COUNT: usize = 10;
const BASE_RADIUS: f32 = 100.0;
const RING_SPACING: f32 = 7.0;
const MAX_COMPRESSION: f32 = 0.25;
const MAX_FLICKER: f32 = 0.3;

#[derive(Resource, Debug, Clone)]
pub struct StoneCore {
    center: Vec2,
}

impl StoneCore {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }

    /// Radius of `ring` at `frame` before skipping non-positive sizes.
    pub fn ring_radius(frame: u64, ring: usize, profile: &MoodProfile) -> f32 {
        let t = frame as f32;
        let r = ring as f32;
        let pulse_slow = (t * 0.04 + r * 0.3).sin() * 6.0;
        let pulse_fast = (t * 0.06 + r * 0.2).cos() * 4.0;
        let size = BASE_RADIUS - r * RING_SPACING + pulse_slow + pulse_fast;
        size * (1.0 - profile.pressure_ratio() * MAX_COMPRESSION)
    }

    /// Palette slot for `ring`: `floor((0.01 * frame + 0.2 * ring) mod len)`.
    pub fn palette_index(frame: u64, ring: usize, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let hundredths = frame.wrapping_add(20 * ring as u64);
        ((hundredths / 100) % len as u64) as usize
    }

    pub fn render(&self, frame: u64, profile: &MoodProfile, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::StoneCore);
        let t = frame as f32;
        let palette = profile.palette();

        for ring in 0..RING_COUNT {
            let size = Self::ring_radius(frame, ring, profile);
            if size <= 0.0 {
                continue;
            }
            let r = ring as f32;

            let index = Self::palette_index(frame, ring, palette.len());
            let flicker = 1.0 + profile.stress_ratio() * MAX_FLICKER * (t * 0.1 + r).sin();
            let paint = palette[index].scaled(flicker);

            let offset = Vec2::new((r * 0.4).cos(), (r * 0.4).sin());
            surface.draw_circle(LayerTag::StoneCore, self.center + offset, size, paint);
        }
    }
}
