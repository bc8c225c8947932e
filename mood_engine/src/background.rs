use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{cycle_phase, ColorWave, Paint, CHANNEL_OFFSETS},
    surface::{DrawSurface, LayerTag},
};

pub const WAVE_LAYERS: usize = 6;
const SAMPLE_SPACING: usize = 15;
const SECONDARY_AMPLITUDE: f32 = 30.0;
const SECONDARY_FREQUENCY_RATIO: f32 = 1.7;

/// Slow interference waves spanning the canvas behind everything else.
#[derive(Resource, Debug, Clone)]
pub struct BackgroundField {
    width: u32,
    baseline: f32,
}

impl BackgroundField {
    pub fn new(width: u32, baseline: f32) -> Self {
        Self { width, baseline }
    }

    pub fn render(&self, frame: u64, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::Background);
        let t = frame as f32;

        for layer in 0..WAVE_LAYERS {
            let index = layer as f32;
            let frequency = 0.01 + index * 0.002;
            let amplitude = 20.0 + index * 8.0;

            let points: Vec<Vec2> = (0..self.width as usize)
                .step_by(SAMPLE_SPACING)
                .map(|x| {
                    let x = x as f32;
                    let y1 = self.baseline + amplitude * (x * frequency + t * 0.02 + index).sin();
                    let y2 = y1
                        + SECONDARY_AMPLITUDE
                            * (x * frequency * SECONDARY_FREQUENCY_RATIO + t * 0.015).sin();
                    Vec2::new(x, y2)
                })
                .collect();
            if points.len() < 3 {
                continue;
            }

            surface.draw_polyline(
                LayerTag::Background,
                points,
                Paint::Rgb(layer_wave(index).at(cycle_phase(t * 0.003 + index * 0.2))),
                2.0,
                true,
            );
        }
    }
}

/// Deeper layers glow brighter and lean toward blue.
fn layer_wave(index: f32) -> ColorWave {
    let intensity = 30.0 + 20.0 * index;
    ColorWave::new(
        [intensity, intensity * 0.7, intensity * 1.2],
        [20.0, 15.0, 25.0],
        CHANNEL_OFFSETS,
    )
}
