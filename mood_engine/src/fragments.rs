use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{Paint, Rgb},
    profile::MoodProfile,
    rng::RandomSource,
    surface::{DrawSurface, LayerTag},
};

const FRAGMENTS_AT_FULL_STRESS: f32 = 30.0;
const SCATTER_HALF_EXTENT: f32 = 200.0;
const SPEED_RANGE: (f32, f32) = (0.5, 2.0);
const SIZE_RANGE: (f32, f32) = (2.0, 6.0);
const FRAGMENT_COLOR: Rgb = Rgb::new(0xb2, 0x22, 0x22);

#[derive(Debug, Clone, PartialEq)]
pub struct StressFragment {
    pub position: Vec2,
    pub target: Vec2,
    pub speed: f32,
    pub size: f32,
    pub chaos_factor: f32,
}

/// `floor(30 * stress / 100)`.
pub fn fragment_count_for(profile: &MoodProfile) -> usize {
    (FRAGMENTS_AT_FULL_STRESS * profile.stress_ratio()).floor() as usize
}

/// Fragments scattered around the stone that drift toward its center.
///
/// Fragments are never removed or respawned; once one reaches the center it
/// simply stays there.
#[derive(Resource, Debug, Clone)]
pub struct StressFragmentField {
    fragments: Vec<StressFragment>,
}

impl StressFragmentField {
    pub fn new(profile: &MoodProfile, center: Vec2, rng: &mut dyn RandomSource) -> Self {
        let chaos_factor = profile.stress_ratio();
        let fragments = (0..fragment_count_for(profile))
            .map(|_| {
                let position = center
                    + Vec2::new(
                        rng.uniform(-SCATTER_HALF_EXTENT, SCATTER_HALF_EXTENT),
                        rng.uniform(-SCATTER_HALF_EXTENT, SCATTER_HALF_EXTENT),
                    );
                StressFragment {
                    position,
                    target: center,
                    speed: rng.uniform(SPEED_RANGE.0, SPEED_RANGE.1),
                    size: rng.uniform(SIZE_RANGE.0, SIZE_RANGE.1),
                    chaos_factor,
                }
            })
            .collect();
        Self { fragments }
    }

    pub fn fragments(&self) -> &[StressFragment] {
        &self.fragments
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn step(&mut self, rng: &mut dyn RandomSource) {
        for fragment in &mut self.fragments {
            let noise = rng.uniform(-1.0, 1.0);
            let travel = (fragment.speed * (1.0 + fragment.chaos_factor * noise)).max(0.0);
            let offset = fragment.target - fragment.position;
            let distance = offset.length();
            if distance <= travel {
                fragment.position = fragment.target;
            } else {
                fragment.position += offset / distance * travel;
            }
        }
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::StressFragments);
        for fragment in &self.fragments {
            surface.draw_circle(
                LayerTag::StressFragments,
                fragment.position,
                fragment.size,
                Paint::Rgb(FRAGMENT_COLOR),
            );
        }
    }
}
