use criterion::{criterion_group, criterion_main, Criterion};
use taskpool::ThreadPool;

const TASKS_PER_ITER: u64 = 100;

fn throughput_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("submit_and_wait");

    let cpu_count = num_cpus::get() as u32;
    let mut sizes = vec![1, 2, 4];
    if !sizes.contains(&cpu_count) {
        sizes.push(cpu_count);
    }

    for threads in sizes {
        group.bench_function(format!("workers_{}", threads), |b| {
            b.iter_batched(
                || {
                    let mut pool = ThreadPool::new(threads).unwrap();
                    pool.start().unwrap();
                    pool
                },
                |pool| {
                    let handles: Vec<_> = (0..TASKS_PER_ITER)
                        .map(|i| pool.submit(move || i.wrapping_mul(i)).unwrap())
                        .collect();
                    for handle in &handles {
                        handle.wait();
                    }
                    // Dropping the pool joins its workers.
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, throughput_bench);
criterion_main!(benches);
