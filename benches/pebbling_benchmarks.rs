use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hashchain_pebbler::{
    advances, naive_reverse, Block, IterativeEngine, KeyedBlake3Owf, Order, PebbleEngine, Pebbler, Schedule, Sha3Owf,
};

fn bench_schedule(c: &mut Criterion) {
    let order = Order::new(16).unwrap();
    c.bench_function("schedule_order_16", |b| {
        b.iter(|| Schedule::new(black_box(order)).map(u64::from).sum::<u64>());
    });
    c.bench_function("advances_single", |b| {
        b.iter(|| advances(black_box(40), black_box((1u64 << 40) - 12_345)));
    });
}

fn bench_traversal(c: &mut Criterion) {
    let f = KeyedBlake3Owf::new(&[0u8; 32]);
    let seed = Block([1u8; 32]);
    let mut group = c.benchmark_group("full_traversal");
    for k in [6u32, 10, 12] {
        group.bench_with_input(BenchmarkId::new("recursive", k), &k, |b, &k| {
            b.iter(|| {
                let mut e = PebbleEngine::new(k, seed, &f).unwrap();
                while !e.is_exhausted() {
                    black_box(e.step().unwrap());
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("iterative", k), &k, |b, &k| {
            b.iter(|| {
                let mut e = IterativeEngine::new(k, seed, &f).unwrap();
                while !e.is_exhausted() {
                    black_box(e.step().unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_naive_reference(c: &mut Criterion) {
    let order = Order::new(8).unwrap();
    let seed = Block([1u8; 32]);
    c.bench_function("naive_reverse_order_8", |b| {
        b.iter(|| naive_reverse(&Sha3Owf, black_box(order), &seed).unwrap());
    });
}

criterion_group!(benches, bench_schedule, bench_traversal, bench_naive_reference);
criterion_main!(benches);
