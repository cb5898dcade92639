use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use worldgen_core::{apply_rule_pass, generate_world, WorldGenConfig};

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_world");

    for size in [16u32, 32, 64, 128] {
        let config = WorldGenConfig::default()
            .with_dimensions(size, size)
            .with_seed(42)
            .with_regions((size / 8).max(1));
        group.bench_with_input(BenchmarkId::new("grid", size), &config, |b, config| {
            b.iter(|| generate_world(config).expect("bench config is valid"));
        });
    }

    group.finish();
}

fn bench_rule_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_pass");

    for size in [64u32, 256] {
        let world = generate_world(
            &WorldGenConfig::default()
                .with_dimensions(size, size)
                .with_seed(7),
        )
        .expect("bench config is valid");
        group.bench_with_input(BenchmarkId::new("grid", size), &world.terrain, |b, terrain| {
            b.iter(|| apply_rule_pass(terrain));
        });
    }

    group.finish();
}

criterion_group!(pipeline_benches, bench_generate, bench_rule_pass);
criterion_main!(pipeline_benches);
