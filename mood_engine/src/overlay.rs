//! Motifs for the compound stress patterns found by the assessment.

use std::f32::consts::TAU;

use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{Paint, Rgb},
    profile::{MoodProfile, PatternTag},
    surface::{DrawSurface, LayerTag},
};

const SPIRAL_POINTS: usize = 80;
const SPIRAL_COLOR: Rgb = Rgb::new(0xff, 0x6b, 0x6b);
const SPIKE_COUNT: usize = 8;
const SPIKE_INNER_RADIUS: f32 = 70.0;
const SPIKE_BASE_LENGTH: f32 = 90.0;
const SPIKE_COLOR: Rgb = Rgb::new(0xff, 0x44, 0x44);

/// Tag-selected decorations. Holds no state beyond the draw origin.
#[derive(Resource, Debug, Clone)]
pub struct PatternOverlay {
    center: Vec2,
}

impl PatternOverlay {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }

    pub fn render(&self, frame: u64, profile: &MoodProfile, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::StressPatterns);
        for tag in profile.patterns() {
            match tag {
                PatternTag::EconomicPsychologicalSpiral => self.draw_spiral(frame, surface),
                PatternTag::SurvivalModeActivation => self.draw_spikes(frame, surface),
                PatternTag::TripleStressAmplification
                | PatternTag::PrivilegeGuiltComplex
                | PatternTag::HeroicFunctioning => {}
            }
        }
    }

    fn draw_spiral(&self, frame: u64, surface: &mut dyn DrawSurface) {
        let t_frame = frame as f32;
        for t in 0..SPIRAL_POINTS {
            let t = t as f32;
            let size = (2.5 - t * 0.02).max(0.0);
            if size <= 0.0 {
                continue;
            }
            let angle = t * 0.12 + t_frame * 0.02;
            let radius = 70.0 + t * 0.6;
            surface.draw_circle(
                LayerTag::StressPatterns,
                self.center + Vec2::from_angle(angle) * radius,
                size,
                Paint::Rgb(SPIRAL_COLOR),
            );
        }
    }

    fn draw_spikes(&self, frame: u64, surface: &mut dyn DrawSurface) {
        let t_frame = frame as f32;
        for spike in 0..SPIKE_COUNT {
            let index = spike as f32;
            let direction = Vec2::from_angle(index * (TAU / SPIKE_COUNT as f32) + t_frame * 0.05);
            let length = SPIKE_BASE_LENGTH + 25.0 * (t_frame * 0.08 + index).sin();
            surface.draw_line(
                LayerTag::StressPatterns,
                self.center + direction * SPIKE_INNER_RADIUS,
                self.center + direction * length,
                Paint::Rgb(SPIKE_COLOR),
                3.0,
            );
        }
    }
}
