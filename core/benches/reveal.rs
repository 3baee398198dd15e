use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sweeper_core::*;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for (name, size, mines) in [("small", 9, 10), ("medium", 16, 40), ("large", 64, 600)] {
        group.bench_function(name, |b| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(generate(size, mines, seed).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_flood(c: &mut Criterion) {
    let mut group = c.benchmark_group("flood_reveal");
    for size in [16, 64, 255] {
        let board = Board::from_mine_coords(size, &[(size - 1, size - 1)]).unwrap();
        group.bench_function(format!("open_{size}"), |b| {
            b.iter_batched(
                || VisibilityMap::new(size),
                |mut store| black_box(flood_reveal((0, 0), &board, &mut store).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_flood);
criterion_main!(benches);
