use criterion::{black_box, criterion_group, criterion_main, Criterion};

use birds_lib::{flock_base, options::RunOptions};

fn criterion_benchmark(c: &mut Criterion) {
    for no_birds in [32, 128, 512] {
        let run_options = RunOptions {
            init_birds: no_birds,
            ..Default::default()
        };

        c.bench_function(&format!("flock_base 32 ticks, {no_birds} birds"), |b| {
            b.iter(|| flock_base(black_box(32), run_options.clone()))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
