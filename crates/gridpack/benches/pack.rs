use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridpack::{GridLayoutEngine, GridOptions, Item, RandomSource, XorShift64Star};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct SceneSpec {
    items: Vec<Item>,
    targets: Vec<String>,
}

/// A crowded surface: `statics` nodes scattered off-grid, then `targets` new nodes at the origin.
fn build_scene(statics: usize, targets: usize, seed: u64) -> SceneSpec {
    let mut rng = XorShift64Star::new(seed);
    let mut next = move |upper: f64| rng.next_f64() * upper;

    let mut items: Vec<Item> = (0..statics)
        .map(|i| {
            Item::new(
                format!("s{i}"),
                next(3600.0),
                next(2400.0),
                80.0 + next(220.0),
                60.0 + next(120.0),
            )
        })
        .collect();
    let ids: Vec<String> = (0..targets).map(|i| format!("t{i}")).collect();
    items.extend(ids.iter().map(|id| Item::new(id.clone(), 0.0, 0.0, 270.0, 80.0)));

    SceneSpec {
        items,
        targets: ids,
    }
}

fn bench_pack(c: &mut Criterion) {
    let engine = GridLayoutEngine::new(GridOptions {
        random_offset: 20.0,
        grid_width: 3840.0,
        grid_height: 2560.0,
        ..GridOptions::default()
    })
    .expect("engine");

    let mut group = c.benchmark_group("pack");
    group.measurement_time(Duration::from_secs(5));

    for &(statics, targets) in &[(10usize, 10usize), (60, 40), (200, 120)] {
        let scene = build_scene(statics, targets, 0xC0FFEE);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{statics}s_{targets}t")),
            &scene,
            |b, scene| {
                b.iter_batched(
                    || (scene.items.clone(), XorShift64Star::new(1)),
                    |(mut items, mut rng)| {
                        let plan = engine
                            .plan(&items, &scene.targets, &mut rng)
                            .expect("plan");
                        plan.commit(&mut items);
                        black_box(plan)
                    },
                    BatchSize::SmallInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_pack);
criterion_main!(benches);
