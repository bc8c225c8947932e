mod common;

use mood_engine::{
    display_list, render_frame, EnergyWispSystem, LayerTag, MoodProfile, ParticleField,
    Primitive, StressFragmentField,
};

fn is_hex_color(text: &str) -> bool {
    text.len() == 7 && text.starts_with('#') && text[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[test]
fn collections_keep_their_size() {
    let mut app = common::test_engine(MoodProfile::demo());
    let particles = app.world.resource::<ParticleField>().len();
    let wisps = app.world.resource::<EnergyWispSystem>().len();
    let fragments = app.world.resource::<StressFragmentField>().len();

    for _ in 0..500 {
        render_frame(&mut app);
        assert_eq!(app.world.resource::<ParticleField>().len(), particles);
        assert_eq!(app.world.resource::<EnergyWispSystem>().len(), wisps);
        assert_eq!(app.world.resource::<StressFragmentField>().len(), fragments);
    }
}

#[test]
fn every_frame_stays_well_formed() {
    let mut app = common::test_engine(MoodProfile::demo());

    for _ in 0..300 {
        render_frame(&mut app);
        let display = display_list(&app);
        assert!(display.len(LayerTag::StoneCore) <= 10);

        for (tag, primitive) in display.iter() {
            match primitive {
                Primitive::Ellipse { radii, paint, .. } => {
                    assert!(radii.x > 0.0 && radii.y > 0.0, "{tag:?} drew an empty ellipse");
                    assert!(is_hex_color(&paint.to_string()), "{tag:?}: {paint}");
                }
                Primitive::Polyline { points, paint, .. } => {
                    assert!(points.len() >= 2, "{tag:?} drew a degenerate line");
                    assert!(points.iter().all(|p| p.is_finite()));
                    assert!(is_hex_color(&paint.to_string()), "{tag:?}: {paint}");
                }
                Primitive::Text { paint, .. } => {
                    assert!(is_hex_color(&paint.to_string()), "{tag:?}: {paint}");
                }
            }
        }
    }
}

#[test]
fn respawned_particles_land_on_spawn_ring() {
    let mut app = common::test_engine(MoodProfile::demo());
    let center = app.world.resource::<ParticleField>().center();

    let mut respawns_seen = 0;
    for _ in 0..400 {
        let before: Vec<f32> = app
            .world
            .resource::<ParticleField>()
            .particles()
            .iter()
            .map(|p| p.life)
            .collect();
        render_frame(&mut app);

        let field = app.world.resource::<ParticleField>();
        for (particle, life_before) in field.particles().iter().zip(before) {
            if life_before - 1.0 <= 0.0 {
                respawns_seen += 1;
                assert_eq!(particle.life, particle.max_life);
                let distance = particle.position.distance(center);
                assert!(
                    (150.0 - 1e-2..=250.0 + 1e-2).contains(&distance),
                    "respawned at distance {distance}"
                );
            }
        }
    }
    assert!(respawns_seen > 0);
}
