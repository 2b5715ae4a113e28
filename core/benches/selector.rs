use criterion::{Criterion, criterion_group, criterion_main};
use promoplay_core::{RewardCatalog, RewardOption, pick, select_index};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::hint::black_box;

fn catalog(size: usize) -> RewardCatalog {
    RewardCatalog::new(
        (0..size)
            .map(|i| {
                RewardOption::new(format!("CODE{i}"), i as u32, "bench").with_weight(1.0 + i as f64)
            })
            .collect(),
    )
    .unwrap()
}

fn bench_selector(c: &mut Criterion) {
    let mut group = c.benchmark_group("selector");

    for size in [4, 12, 64] {
        let catalog = catalog(size);
        let mut rng = SmallRng::seed_from_u64(size as u64);
        group.bench_function(format!("pick/{size}"), |b| {
            b.iter(|| black_box(pick(&catalog, &mut rng)))
        });
    }

    group.bench_function("uniform_slots/9", |b| {
        b.iter(|| black_box(select_index(std::iter::repeat_n(1.0, 9), black_box(0.73))))
    });

    group.finish();
}

criterion_group!(benches, bench_selector);
criterion_main!(benches);
