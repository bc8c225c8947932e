use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use mood_engine::{
    build_engine_app_with, render_frame, EngineConfig, EngineRng, MoodArchetype, MoodProfile,
};

fn bench_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");

    // Lower stress means more particles and sparkles.
    for stress in [0.0f32, 50.0, 100.0] {
        group.bench_with_input(
            BenchmarkId::new("stress", stress as u32),
            &stress,
            |b, &stress| {
                b.iter_batched(
                    || {
                        let profile = MoodProfile::for_archetype(
                            MoodArchetype::StormNavigator,
                            stress,
                            60.0,
                            40.0,
                            ["economic_psychological_spiral", "survival_mode_activation"],
                        )
                        .expect("valid profile");
                        build_engine_app_with(profile, EngineConfig::builtin(), EngineRng::seeded(7))
                    },
                    |mut app| {
                        render_frame(&mut app);
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(frame_benches, bench_frame);
criterion_main!(frame_benches);
