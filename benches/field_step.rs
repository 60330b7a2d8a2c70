//! Throughput of the per-frame update and the quadratic link scan.
//!
//! The pool at full-HD density is 138 particles, so the pair scan touches
//! roughly 9.5k pairs per frame. This keeps an eye on that cost as the
//! scaling limit of the field.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use driftnet::{FieldConfig, ParticleField, Vec2};

fn bench_step(c: &mut Criterion) {
    let mut field = ParticleField::with_seed(1920.0, 1080.0, FieldConfig::default(), 42);
    field.set_pointer(Vec2::new(960.0, 540.0));

    c.bench_function("step_1080p", |b| {
        b.iter(|| {
            field.step();
            black_box(field.particles().len())
        })
    });
}

fn bench_links(c: &mut Criterion) {
    let field = ParticleField::with_seed(1920.0, 1080.0, FieldConfig::default(), 42);

    c.bench_function("links_1080p", |b| {
        b.iter(|| {
            let mut count = 0usize;
            field.for_each_link(|l| {
                black_box(l.alpha);
                count += 1;
            });
            black_box(count)
        })
    });
}

criterion_group!(benches, bench_step, bench_links);
criterion_main!(benches);
