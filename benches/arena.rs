use criterion::{criterion_group, criterion_main, Criterion};
use rank_collections::arena::Arena;
use rank_collections::arena::Handle;

const NUM_OF_ALLOCATIONS: usize = 100;

fn bench_arena(c: &mut Criterion) {
    c.bench_function("bench arena", |b| {
        b.iter(|| {
            struct Test {
                pub val: i32,
                pub next: Option<Handle>,
            }

            let mut arena = Arena::new();
            let mut curr = arena.allocate(Test { val: 0, next: None });
            for _ in 0..NUM_OF_ALLOCATIONS {
                curr = arena.allocate(Test {
                    val: 0,
                    next: Some(curr),
                });
            }
        })
    });
}

fn bench_arena_reuse(c: &mut Criterion) {
    c.bench_function("bench arena reuse", |b| {
        b.iter(|| {
            let mut arena = Arena::new();
            let mut handles = Vec::with_capacity(NUM_OF_ALLOCATIONS);
            for i in 0..NUM_OF_ALLOCATIONS {
                handles.push(arena.allocate(i));
            }
            for handle in handles.drain(..) {
                arena.free(handle);
            }
            for i in 0..NUM_OF_ALLOCATIONS {
                handles.push(arena.allocate(i));
            }
        })
    });
}

fn bench_box(c: &mut Criterion) {
    c.bench_function("bench box", |b| {
        b.iter(|| {
            struct Test {
                pub val: i32,
                pub next: Option<Box<Test>>,
            }

            let mut curr = Box::new(Test { val: 0, next: None });
            for _ in 0..NUM_OF_ALLOCATIONS {
                curr = Box::new(Test {
                    val: 0,
                    next: Some(curr),
                });
            }
        })
    });
}

criterion_group!(benches, bench_arena, bench_arena_reuse, bench_box);
criterion_main!(benches);
