//! Push/pop throughput for the ring buffer, uncontended and under contention.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use std::thread;

use ring_queue::RingBuffer;

const OPERATIONS: u64 = 10_000;

fn bench_uncontended(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer_uncontended");

    for capacity in [3_usize, 64, 1024] {
        group.throughput(Throughput::Elements(OPERATIONS));
        group.bench_with_input(
            BenchmarkId::new("push_pop", capacity),
            &capacity,
            |b, &capacity| {
                let Ok(queue) = RingBuffer::new(capacity) else {
                    return;
                };
                b.iter(|| {
                    for value in 0..OPERATIONS {
                        queue.push(black_box(value));
                        black_box(queue.pop());
                    }
                });
            },
        );
        group.bench_with_input(
            BenchmarkId::new("push_overwrite", capacity),
            &capacity,
            |b, &capacity| {
                let Ok(queue) = RingBuffer::new(capacity) else {
                    return;
                };
                b.iter(|| {
                    for value in 0..OPERATIONS {
                        queue.push(black_box(value));
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_buffer_contended");

    for threads in [2_usize, 4, 8] {
        group.throughput(Throughput::Elements(OPERATIONS * threads as u64));
        group.bench_with_input(
            BenchmarkId::new("push_pop", threads),
            &threads,
            |b, &threads| {
                let Ok(queue) = RingBuffer::new(16) else {
                    return;
                };
                let queue = Arc::new(queue);
                b.iter(|| {
                    let handles: Vec<_> = (0..threads)
                        .map(|_| {
                            let queue = Arc::clone(&queue);
                            thread::spawn(move || {
                                for value in 0..OPERATIONS {
                                    queue.push(value);
                                    black_box(queue.pop());
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        let _ = handle.join();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_uncontended, bench_contended);
criterion_main!(benches);
