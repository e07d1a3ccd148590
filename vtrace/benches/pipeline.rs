use criterion::{criterion_group, criterion_main, Criterion};

use vtrace::color::Color;
use vtrace::config::Config;
use vtrace::vtrace;

fn checkerboard(width: u32, height: u32) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    for y in 0..height {
        for x in 0..width {
            let c = if (x + y) % 2 == 0 {
                Color::new(255, 0, 0, 255)
            } else {
                Color::new(0, 0, 0, 255)
            };
            let i = ((y * width + x) * 4) as usize;
            buf[i] = c.r;
            buf[i + 1] = c.g;
            buf[i + 2] = c.b;
            buf[i + 3] = c.a;
        }
    }
    buf
}

fn bench_pipeline(c: &mut Criterion) {
    let config = Config::default();
    c.bench_function("vtrace_checkerboard_32x32", |b| {
        b.iter_batched(
            || checkerboard(32, 32),
            |mut pixels| vtrace(&mut pixels, 32, 32, &config).unwrap(),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
