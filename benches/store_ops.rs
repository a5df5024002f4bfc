use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dijkstra_steiner::heap::{extract_min, make_heap};
use dijkstra_steiner::subset_store::SubsetStore;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn bench_store(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let keys: Vec<u64> = (0..4096).map(|_| rng.gen::<u64>() >> 34).collect();

    let mut group = c.benchmark_group("subset_store");
    for &width in &[4usize, 8, 15] {
        group.bench_function(format!("insert_width_{width}"), |b| {
            b.iter(|| {
                let mut store = SubsetStore::new(30, width).unwrap();
                for (i, &key) in keys.iter().enumerate() {
                    store.insert(key, i);
                }
                black_box(store.len())
            })
        });
        let mut filled = SubsetStore::new(30, width).unwrap();
        for (i, &key) in keys.iter().enumerate() {
            filled.insert(key, i);
        }
        group.bench_function(format!("get_width_{width}"), |b| {
            b.iter(|| keys.iter().filter_map(|&k| filled.get(black_box(k))).count())
        });
    }
    group.finish();
}

fn bench_heap(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(11);
    let items: Vec<(u64, usize)> = (0..10_000).map(|i| (rng.gen_range(0..1_000_000), i)).collect();
    let less = |a: &(u64, usize), b: &(u64, usize)| a < b;
    c.bench_function("heap_sort_10k", |b| {
        b.iter(|| {
            let mut heap = items.clone();
            let mut slots = vec![0usize; heap.len()];
            make_heap(&mut heap, less, |e, s| slots[e.1] = s);
            let mut last = 0;
            while let Some(min) = extract_min(&mut heap, less, |e, s| slots[e.1] = s) {
                heap.pop();
                last = min.0;
            }
            black_box(last)
        })
    });
}

criterion_group!(benches, bench_store, bench_heap);
criterion_main!(benches);
