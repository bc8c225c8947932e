//! Core energy particles: a damped attractor toward the stone with
//! stress-driven jitter.
//!
//! The population is sized once from the stress level and never changes.
//! Expired particles are recycled in place onto a ring around the center.

use std::f32::consts::TAU;

use bevy::{math::Vec2, prelude::Resource};

use crate::{
    color::{Paint, Rgb},
    config::ParticleTuning,
    profile::MoodProfile,
    rng::RandomSource,
    surface::{DrawSurface, LayerTag},
};

pub const MIN_PARTICLES: usize = 50;
pub const MAX_PARTICLES: usize = 200;
const SPAWN_BOX_HALF_EXTENT: f32 = 100.0;
const INITIAL_SPEED: f32 = 2.0;
const LIFE_RANGE: (f32, f32) = (50.0, 200.0);
const SIZE_RANGE: (f32, f32) = (1.0, 4.0);
/// Particles fainter than this radius are not drawn.
const MIN_VISIBLE_RADIUS: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnergyKind {
    Core,
    Stress,
    Economic,
}

impl EnergyKind {
    pub const ALL: [EnergyKind; 3] = [EnergyKind::Core, EnergyKind::Stress, EnergyKind::Economic];

    pub fn sample(rng: &mut dyn RandomSource) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    pub fn color(self) -> Rgb {
        match self {
            EnergyKind::Stress => Rgb::new(0xff, 0x66, 0x66),
            EnergyKind::Economic => Rgb::new(0xff, 0xaa, 0x44),
            EnergyKind::Core => Rgb::new(0x66, 0xaa, 0xff),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub kind: EnergyKind,
}

impl Particle {
    fn spawn(center: Vec2, rng: &mut dyn RandomSource) -> Self {
        let position = center
            + Vec2::new(
                rng.uniform(-SPAWN_BOX_HALF_EXTENT, SPAWN_BOX_HALF_EXTENT),
                rng.uniform(-SPAWN_BOX_HALF_EXTENT, SPAWN_BOX_HALF_EXTENT),
            );
        let velocity = Vec2::new(
            rng.uniform(-INITIAL_SPEED, INITIAL_SPEED),
            rng.uniform(-INITIAL_SPEED, INITIAL_SPEED),
        );
        let life = rng.uniform(LIFE_RANGE.0, LIFE_RANGE.1);
        let max_life = rng.uniform(LIFE_RANGE.0, LIFE_RANGE.1);
        let size = rng.uniform(SIZE_RANGE.0, SIZE_RANGE.1);
        let kind = EnergyKind::sample(rng);
        Self {
            position,
            velocity,
            life,
            max_life,
            size,
            kind,
        }
    }

    /// Remaining life as a fraction of `max_life`.
    pub fn alpha(&self) -> f32 {
        self.life / self.max_life
    }

    pub fn visible_radius(&self) -> f32 {
        self.size * self.alpha()
    }
}

/// Number of particles for a profile: `150 - stress`, kept within 50..=200.
pub fn population_for(profile: &MoodProfile) -> usize {
    let count = (150.0 - profile.stress_level()).clamp(MIN_PARTICLES as f32, MAX_PARTICLES as f32);
    count as usize
}

#[derive(Resource, Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    center: Vec2,
    tuning: ParticleTuning,
}

impl ParticleField {
    pub fn new(
        profile: &MoodProfile,
        center: Vec2,
        tuning: ParticleTuning,
        rng: &mut dyn RandomSource,
    ) -> Self {
        let particles = (0..population_for(profile))
            .map(|_| Particle::spawn(center, rng))
            .collect();
        Self {
            particles,
            center,
            tuning,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    /// Advance every particle by one tick and return how many respawned.
    pub fn step(&mut self, profile: &MoodProfile, rng: &mut dyn RandomSource) -> usize {
        let jitter = profile.stress_ratio() * self.tuning.chaos;
        let mut respawned = 0;

        for particle in &mut self.particles {
            let offset = self.center - particle.position;
            let distance_sq = offset.length_squared();
            let distance = if distance_sq > 0.0 {
                distance_sq.sqrt()
            } else {
                1.0
            };
            particle.velocity += offset / distance * self.tuning.gravity;
            particle.velocity += Vec2::new(
                rng.uniform(-jitter, jitter),
                rng.uniform(-jitter, jitter),
            );

            particle.position += particle.velocity;
            particle.velocity *= self.tuning.damping;
            particle.life -= 1.0;

            if particle.life <= 0.0 {
                respawn(particle, self.center, &self.tuning, rng);
                respawned += 1;
            }
        }

        respawned
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) {
        surface.clear(LayerTag::Particles);
        for particle in &self.particles {
            let radius = particle.visible_radius();
            if radius > MIN_VISIBLE_RADIUS {
                surface.draw_circle(
                    LayerTag::Particles,
                    particle.position,
                    radius,
                    Paint::Rgb(particle.kind.color()),
                );
            }
        }
    }
}

fn respawn(
    particle: &mut Particle,
    center: Vec2,
    tuning: &ParticleTuning,
    rng: &mut dyn RandomSource,
) {
    let angle = rng.uniform(0.0, TAU);
    let distance = rng.uniform(tuning.spawn_min_distance, tuning.spawn_max_distance);
    particle.position = center + Vec2::from_angle(angle) * distance;
    particle.life = particle.max_life;
    particle.velocity = Vec2::new(
        rng.uniform(-tuning.respawn_speed, tuning.respawn_speed),
        rng.uniform(-tuning.respawn_speed, tuning.respawn_speed),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Paint,
        profile::MoodArchetype,
        rng::{RngSource, ScriptedSource},
        surface::DisplayList,
    };

    fn profile_with_stress(stress: f32) -> MoodProfile {
        MoodProfile::for_archetype(
            MoodArchetype::AdaptiveResponder,
            stress,
            40.0,
            20.0,
            Vec::<String>::new(),
        )
        .expect("valid profile")
    }

    #[test]
    fn population_follows_stress() {
        assert_eq!(population_for(&profile_with_stress(75.0)), 75);
        assert_eq!(population_for(&profile_with_stress(0.0)), 150);
        assert_eq!(population_for(&profile_with_stress(100.0)), 50);
        assert_eq!(population_for(&profile_with_stress(99.5)), 50);
    }

    #[test]
    fn initial_particles_fill_spawn_box() {
        let profile = profile_with_stress(30.0);
        let center = Vec2::new(500.0, 350.0);
        let mut rng = RngSource::seeded(5);
        let field = ParticleField::new(&profile, center, ParticleTuning::default(), &mut rng);
        assert_eq!(field.len(), 120);
        for particle in field.particles() {
            let offset = particle.position - center;
            assert!(offset.x.abs() <= 100.0 && offset.y.abs() <= 100.0);
            assert!(particle.velocity.x.abs() <= 2.0 && particle.velocity.y.abs() <= 2.0);
            assert!((50.0..=200.0).contains(&particle.life));
            assert!((50.0..=200.0).contains(&particle.max_life));
            assert!((1.0..=4.0).contains(&particle.size));
        }
    }

    #[test]
    fn population_is_constant_across_steps() {
        let profile = profile_with_stress(90.0);
        let mut rng = RngSource::seeded(17);
        let mut field =
            ParticleField::new(&profile, Vec2::new(500.0, 350.0), ParticleTuning::default(), &mut rng);
        let initial = field.len();
        for _ in 0..600 {
            field.step(&profile, &mut rng);
            assert_eq!(field.len(), initial);
        }
    }

    #[test]
    fn respawn_restores_life_on_spawn_ring() {
        let profile = profile_with_stress(50.0);
        let center = Vec2::new(500.0, 350.0);
        let mut rng = RngSource::seeded(23);
        let mut field = ParticleField::new(&profile, center, ParticleTuning::default(), &mut rng);
        for particle in &mut field.particles {
            particle.life = 1.0;
        }

        let respawned = field.step(&profile, &mut rng);

        assert_eq!(respawned, field.len());
        for particle in field.particles() {
            assert_eq!(particle.life, particle.max_life);
            let distance = particle.position.distance(center);
            assert!(
                (149.9..=250.1).contains(&distance),
                "respawn distance {distance} outside ring"
            );
            assert!(particle.velocity.x.abs() <= 1.0 && particle.velocity.y.abs() <= 1.0);
        }
    }

    #[test]
    fn particle_at_center_does_not_blow_up() {
        let profile = profile_with_stress(0.0);
        let center = Vec2::new(10.0, 10.0);
        let mut rng = ScriptedSource::midpoint();
        let mut field = ParticleField::new(&profile, center, ParticleTuning::default(), &mut rng);
        for particle in &mut field.particles {
            particle.position = center;
            particle.velocity = Vec2::ZERO;
            particle.life = 100.0;
        }

        field.step(&profile, &mut rng);

        for particle in field.particles() {
            assert!(particle.position.is_finite());
            assert_eq!(particle.position, center);
        }
    }

    #[test]
    fn scripted_source_places_particles_exactly() {
        let profile = profile_with_stress(0.0);
        let center = Vec2::new(500.0, 350.0);
        let mut rng = ScriptedSource::new(vec![0.75, 0.25, 0.5, 1.0, 0.0, 1.0, 0.5, 0.9]);
        let field = ParticleField::new(&profile, center, ParticleTuning::default(), &mut rng);
        let first = &field.particles()[0];
        assert_eq!(first.position, Vec2::new(550.0, 300.0));
        assert_eq!(first.velocity, Vec2::new(0.0, 2.0));
        assert_eq!(first.life, 50.0);
        assert_eq!(first.max_life, 200.0);
        assert_eq!(first.size, 2.5);
        assert_eq!(first.kind, EnergyKind::Economic);
    }

    #[test]
    fn faded_particles_are_not_drawn() {
        let profile = profile_with_stress(60.0);
        let mut rng = RngSource::seeded(1);
        let mut field =
            ParticleField::new(&profile, Vec2::new(500.0, 350.0), ParticleTuning::default(), &mut rng);
        for (index, particle) in field.particles.iter_mut().enumerate() {
            particle.size = 2.0;
            particle.max_life = 100.0;
            particle.life = if index % 2 == 0 { 10.0 } else { 90.0 };
            particle.kind = EnergyKind::Stress;
        }

        let mut list = DisplayList::default();
        field.render(&mut list);

        assert_eq!(list.len(LayerTag::Particles), field.len() / 2);
        for (_, primitive) in list.iter() {
            match primitive {
                crate::surface::Primitive::Ellipse { radii, paint, .. } => {
                    assert!((radii.x - 1.8).abs() < 1e-5);
                    assert_eq!(*paint, Paint::Rgb(Rgb::new(0xff, 0x66, 0x66)));
                }
                other => panic!("unexpected primitive {other:?}"),
            }
        }
    }
}
