use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use particle_emitter::headless::{HeadlessPrefab, HeadlessScene};
use particle_emitter::{ParticleEmitter, SimulationConfig, Space, Varied};
use rand::SeedableRng;
use rand::rngs::StdRng;

const DT: f32 = 1.0 / 60.0;

fn warmed_emitter(birth_rate: f32) -> (HeadlessScene, ParticleEmitter<HeadlessScene, StdRng>, f64) {
    let mut scene = HeadlessScene::new();
    let parent = scene.add_node(Vec3::new(0.0, 2.0, 0.0), Quat::IDENTITY);
    let config = SimulationConfig {
        space: Space::World,
        birth_rate: Varied::new(birth_rate, 0.2),
        lifetime_ms: Varied::new(2000.0, 0.5),
        fade_in_ms: 200.0,
        fade_out_ms: 400.0,
        spray_angle: 0.6,
        acceleration: Vec3::new(0.0, -9.8, 0.0),
        rotation_rate: Vec3::new(1.0, 2.0, 0.5),
        collision_enabled: true,
        friction_factor: 0.1,
        ..Default::default()
    };
    let mut emitter = ParticleEmitter::with_rng(
        config,
        HeadlessPrefab::with_materials(&["body"]),
        parent,
        StdRng::seed_from_u64(0),
    );

    // Two seconds of frames to reach a steady population
    let mut now = 0.0;
    for _ in 0..120 {
        now += f64::from(DT) * 1000.0;
        emitter.tick(&mut scene, DT, now).unwrap();
    }
    (scene, emitter, now)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    for birth_rate in [100.0, 1000.0, 5000.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(birth_rate),
            &birth_rate,
            |b, &birth_rate| {
                let (mut scene, mut emitter, mut now) = warmed_emitter(birth_rate);
                b.iter(|| {
                    now += f64::from(DT) * 1000.0;
                    emitter.tick(&mut scene, DT, now).unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_tick);
criterion_main!(benches);
