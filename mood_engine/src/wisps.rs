use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{cycle_phase, ColorWave, Paint},
    profile::MoodProfile,
    rng::RandomSource,
    surface::{DrawSurface, LayerTag},
};

pub const MIN_WISPS: usize = 6;
pub const MAX_WISPS: usize = 12;
const SAMPLES: usize = 15;
const SAMPLE_STEP: f32 = 0.15;
const RIPPLE_AMPLITUDE: f32 = 12.0;
const RIPPLE_FREQUENCY_RATIO: f32 = 1.8;
const STROKE_WIDTH: f32 = 2.0;

/// `80 + 80 sin`, `120 + 40 cos(+2)`, `160 + 45 sin(+4)`.
const WISP_WAVE: ColorWave = ColorWave::new(
    [80.0, 120.0, 160.0],
    [80.0, 40.0, 45.0],
    [0.0, 2.0 + FRAC_PI_2, 4.0],
);

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyWisp {
    pub angle: f32,
    pub radius: f32,
    pub flow_speed: f32,
    pub amplitude: f32,
    pub frequency: f32,
}

impl EnergyWisp {
    /// Points along the current arc, relative to the origin.
    pub fn arc(&self) -> Vec<Vec2> {
        (0..SAMPLES)
            .map(|t| {
                let angle = self.angle + t as f32 * SAMPLE_STEP;
                let phase = angle * self.frequency;
                let radius = self.radius
                    + self.amplitude * phase.sin()
                    + RIPPLE_AMPLITUDE * (phase * RIPPLE_FREQUENCY_RATIO).cos();
                Vec2::from_angle(angle) * radius
            })
            .collect()
    }
}

/// `max(6, 12 - floor(pressure / 10))`.
pub fn wisp_count_for(profile: &MoodProfile) -> usize {
    let tiers = (profile.economic_pressure() / 10.0).floor() as usize;
    MAX_WISPS.saturating_sub(tiers).max(MIN_WISPS)
}

#[derive(Resource, Debug, Clone)]
pub struct EnergyWispSystem {
    wisps: Vec<EnergyWisp>,
    center: Vec2,
}

impl EnergyWispSystem {
    pub fn new(profile: &MoodProfile, center: Vec2, rng: &mut dyn RandomSource) -> Self {
        let count = wisp_count_for(profile);
        let wisps = (0..count)
            .map(|index| EnergyWisp {
                angle: index as f32 * (TAU / count as f32),
                radius: rng.uniform(80.0, 150.0),
                flow_speed: rng.uniform(0.01, 0.03),
                amplitude: rng.uniform(10.0, 30.0),
                frequency: rng.uniform(0.5, 2.0),
            })
            .collect();
        Self { wisps, center }
    }

    pub fn wisps(&self) -> &[EnergyWisp] {
        &self.wisps
    }

    pub fn len(&self) -> usize {
        self.wisps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wisps.is_empty()
    }

    /// Advance every wisp along its orbit. Angles are left unbounded.
    pub fn advance(&mut self) {
        for wisp in &mut self.wisps {
            wisp.angle += wisp.flow_speed;
        }
    }

    pub fn render(&self, frame: u64, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::EnergyWisps);
        for wisp in &self.wisps {
            let points = wisp.arc().into_iter().map(|p| p + self.center).collect();
            let color = WISP_WAVE.at(cycle_phase(frame as f32 * 0.008 + wisp.angle));
            surface.draw_polyline(
                LayerTag::EnergyWisps,
                points,
                Paint::Rgb(color),
                STROKE_WIDTH,
                true,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{profile::MoodArchetype, rng::RngSource, surface::DisplayList};

    fn profile(pressure: f32) -> MoodProfile {
        MoodProfile::for_archetype(
            MoodArchetype::PrivilegedAnxious,
            40.0,
            pressure,
            10.0,
            Vec::<String>::new(),
        )
        .expect("valid profile")
    }

    #[test]
    fn count_shrinks_with_pressure() {
        assert_eq!(wisp_count_for(&profile(0.0)), 12);
        assert_eq!(wisp_count_for(&profile(9.9)), 12);
        assert_eq!(wisp_count_for(&profile(35.0)), 9);
        assert_eq!(wisp_count_for(&profile(85.0)), 6);
        assert_eq!(wisp_count_for(&profile(100.0)), 6);
    }

    #[test]
    fn wisps_start_evenly_spaced() {
        let mut rng = RngSource::seeded(4);
        let system = EnergyWispSystem::new(&profile(40.0), Vec2::ZERO, &mut rng);
        assert_eq!(system.len(), 8);
        for (index, wisp) in system.wisps().iter().enumerate() {
            assert!((wisp.angle - index as f32 * TAU / 8.0).abs() < 1e-6);
            assert!((80.0..150.0).contains(&wisp.radius));
            assert!((0.01..0.03).contains(&wisp.flow_speed));
        }
    }

    #[test]
    fn advance_moves_only_the_angle() {
        let mut rng = RngSource::seeded(4);
        let mut system = EnergyWispSystem::new(&profile(60.0), Vec2::ZERO, &mut rng);
        let before = system.wisps().to_vec();
        for _ in 0..1_000 {
            system.advance();
        }
        assert_eq!(system.len(), before.len());
        for (after, before) in system.wisps().iter().zip(&before) {
            assert!(after.angle > before.angle);
            assert_eq!(after.radius, before.radius);
            assert_eq!(after.amplitude, before.amplitude);
            assert_eq!(after.frequency, before.frequency);
        }
    }

    #[test]
    fn each_wisp_draws_one_fifteen_point_ribbon() {
        let mut rng = RngSource::seeded(9);
        let system = EnergyWispSystem::new(&profile(0.0), Vec2::new(500.0, 350.0), &mut rng);
        let mut list = DisplayList::default();
        system.render(3, &mut list);
        assert_eq!(list.len(LayerTag::EnergyWisps), 12);
        for (_, primitive) in list.iter() {
            match primitive {
                crate::surface::Primitive::Polyline { points, smooth, .. } => {
                    assert_eq!(points.len(), 15);
                    assert!(*smooth);
                }
                other => panic!("unexpected primitive {other:?}"),
            }
        }
    }

    #[test]
    fn arc_radius_stays_within_envelope() {
        let wisp = EnergyWisp {
            angle: 123.4,
            radius: 100.0,
            flow_speed: 0.02,
            amplitude: 20.0,
            frequency: 1.5,
        };
        for point in wisp.arc() {
            let radius = point.length();
            assert!((68.0 - 1e-3..=132.0 + 1e-3).contains(&radius));
        }
    }
}
