use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{cycle_phase, ColorWave, Paint, Rgb, CHANNEL_OFFSETS},
    profile::MoodProfile,
    surface::{DrawSurface, FontSpec, LayerTag},
};

const TITLE_OFFSET: f32 = 150.0;
const BOB_AMPLITUDE: f32 = 8.0;
const TITLE_WAVE: ColorWave = ColorWave::new([120.0; 3], [120.0; 3], CHANNEL_OFFSETS);

const STRESS_COLOR: Rgb = Rgb::new(0xaa, 0xaa, 0xaa);
const ECONOMIC_COLOR: Rgb = Rgb::new(0xff, 0xaa, 0x66);
const LIFE_EVENTS_COLOR: Rgb = Rgb::new(0x66, 0xaa, 0xff);

/// Bobbing archetype title with the three scores underneath.
#[derive(Resource, Debug, Clone)]
pub struct FloatingLabels {
    center: Vec2,
}

impl FloatingLabels {
    pub fn new(center: Vec2) -> Self {
        Self { center }
    }

    /// Vertical position of the title line at `frame`.
    pub fn title_y(&self, frame: u64) -> f32 {
        self.center.y + TITLE_OFFSET + BOB_AMPLITUDE * (frame as f32 * 0.04).sin()
    }

    pub fn render(&self, frame: u64, profile: &MoodProfile, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::FloatingText);
        let title_y = self.title_y(frame);
        let title_color = TITLE_WAVE.at(cycle_phase(frame as f32 * 0.006));

        surface.draw_text(
            LayerTag::FloatingText,
            Vec2::new(self.center.x, title_y),
            profile.label().to_owned(),
            Paint::Rgb(title_color),
            FontSpec::bold(16),
        );

        let metrics = [
            (25.0, format!("Stress Level: {:.0}%", profile.stress_level()), STRESS_COLOR),
            (
                45.0,
                format!("Economic Pressure: {:.0}%", profile.economic_pressure()),
                ECONOMIC_COLOR,
            ),
            (
                65.0,
                format!("Life Events: {:.0}%", profile.life_events_impact()),
                LIFE_EVENTS_COLOR,
            ),
        ];
        for (offset, text, color) in metrics {
            surface.draw_text(
                LayerTag::FloatingText,
                Vec2::new(self.center.x, title_y + offset),
                text,
                Paint::Rgb(color),
                FontSpec::regular(11),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, Primitive};

    #[test]
    fn title_and_scores_for_demo_profile() {
        let labels = FloatingLabels::new(Vec2::new(500.0, 350.0));
        let mut list = DisplayList::default();
        labels.render(0, &MoodProfile::demo(), &mut list);

        let lines: Vec<(f32, &str, &FontSpec)> = list
            .iter()
            .map(|(_, primitive)| match primitive {
                Primitive::Text {
                    position,
                    text,
                    font,
                    ..
                } => (position.y, text.as_str(), font),
                other => panic!("unexpected primitive {other:?}"),
            })
            .collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].0, 500.0);
        assert_eq!(lines[0].2, &FontSpec::bold(16));
        assert_eq!(lines[1], (525.0, "Stress Level: 75%", &FontSpec::regular(11)));
        assert_eq!(lines[2].1, "Economic Pressure: 85%");
        assert_eq!(lines[3], (565.0, "Life Events: 45%", &FontSpec::regular(11)));
    }

    #[test]
    fn title_bobs_within_eight_pixels() {
        let labels = FloatingLabels::new(Vec2::new(0.0, 100.0));
        for frame in 0..500 {
            let y = labels.title_y(frame);
            assert!((242.0 - 1e-3..=258.0 + 1e-3).contains(&y));
        }
    }

    #[test]
    fn title_color_starts_from_wave_origin() {
        let labels = FloatingLabels::new(Vec2::ZERO);
        let mut list = DisplayList::default();
        labels.render(0, &MoodProfile::demo(), &mut list);
        let Primitive::Text { paint, .. } = &list.group(LayerTag::FloatingText)[0] else {
            panic!("title is text");
        };
        assert_eq!(paint.as_rgb(), Some(TITLE_WAVE.at(0.0)));
        assert_eq!(TITLE_WAVE.at(0.0).r, 120);
    }
}
