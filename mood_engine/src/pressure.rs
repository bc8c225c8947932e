use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{Paint, Rgb},
    profile::MoodProfile,
    surface::{DrawSurface, LayerTag},
};

/// Pressure ratio at and below which no compression lines are drawn.
pub const PRESSURE_THRESHOLD: f32 = 0.3;
const ANGLE_STEP_DEGREES: usize = 20;
const OUTER_BASE: f32 = 180.0;
const OUTER_SWING: f32 = 40.0;
const INNER_BASE: f32 = 120.0;
const INNER_SQUEEZE: f32 = 25.0;

/// Radial compression lines squeezing toward the stone under economic pressure.
#[derive(Resource, Debug, Clone)]
pub struct PressureLines {
    center: Vec2,
}

impl PressureLines {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }

    pub fn render(&self, frame: u64, profile: &MoodProfile, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::PressureLines);
        let pressure = profile.pressure_ratio();
        if pressure <= PRESSURE_THRESHOLD {
            return;
        }

        let t = frame as f32;
        let paint = Paint::Rgb(line_color(frame, pressure));
        let inner = INNER_BASE - pressure * INNER_SQUEEZE;

        for degrees in (0..360).step_by(ANGLE_STEP_DEGREES) {
            let degrees = degrees as f32;
            let direction = Vec2::from_angle(degrees.to_radians());
            let outer = OUTER_BASE + OUTER_SWING * (t * 0.03 + degrees * 0.1).sin();
            surface.draw_line(
                LayerTag::PressureLines,
                self.center + direction * outer,
                self.center + direction * inner,
                paint.clone(),
                2.0,
            );
        }
    }
}

/// Dark red `(I, I/3, I/3)` pulsing with the frame.
fn line_color(frame: u64, pressure: f32) -> Rgb {
    let pulse = 0.5 + 0.5 * (frame as f32 * 0.04).sin();
    let intensity = (150.0 * pressure * pulse).clamp(0.0, 255.0) as u8;
    Rgb::new(intensity, intensity / 3, intensity / 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{profile::MoodArchetype, surface::{DisplayList, Primitive}};

    fn profile(pressure: f32) -> MoodProfile {
        MoodProfile::for_archetype(
            MoodArchetype::EconomicSurvivor,
            50.0,
            pressure,
            50.0,
            Vec::<String>::new(),
        )
        .expect("valid profile")
    }

    #[test]
    fn low_pressure_draws_nothing() {
        let lines = PressureLines::new(Vec2::new(500.0, 350.0));
        let mut list = DisplayList::default();
        lines.render(10, &profile(30.0), &mut list);
        assert!(list.is_empty());
    }

    #[test]
    fn eighteen_spokes_from_outer_to_inner() {
        let center = Vec2::new(500.0, 350.0);
        let lines = PressureLines::new(center);
        let mut list = DisplayList::default();
        lines.render(0, &profile(80.0), &mut list);
        assert_eq!(list.len(LayerTag::PressureLines), 18);
        for (index, (_, primitive)) in list.iter().enumerate() {
            let Primitive::Polyline { points, width, smooth, .. } = primitive else {
                panic!("pressure lines are polylines");
            };
            assert_eq!(points.len(), 2);
            assert_eq!(*width, 2.0);
            assert!(!smooth);
            let degrees = (index * 20) as f32;
            let outer = 180.0 + 40.0 * (degrees * 0.1).sin();
            assert!((points[0].distance(center) - outer).abs() < 1e-3);
            assert!((points[1].distance(center) - 100.0).abs() < 1e-3);
        }
    }

    #[test]
    fn color_follows_pulse() {
        // frame 0: pulse 0.5, I = trunc(150 * 0.8 * 0.5) = 60
        assert_eq!(line_color(0, 0.8), Rgb::new(60, 20, 20));
        assert!(line_color(39, 1.0).r <= 150);
    }
}
