//! # Ring Queue Stress Tests
//!
//! Long-running contention tests. Run with `cargo test -- --ignored`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use dispatch::{Dispatcher, Worker};
use mailring_tests::{wait_until, RecordingAction};
use ring_queue::RingBuffer;

const STRESS_THREADS: usize = 64;
const STRESS_OPERATIONS_PER_THREAD: usize = 50_000;

#[test]
#[ignore]
fn stress_test_mixed_operations() {
    let queue = Arc::new(RingBuffer::new(8).unwrap());
    let barrier = Arc::new(Barrier::new(STRESS_THREADS));
    let popped = Arc::new(AtomicU64::new(0));

    let start_time = Instant::now();
    let handles: Vec<_> = (0..STRESS_THREADS)
        .map(|thread_id| {
            let queue = Arc::clone(&queue);
            let barrier = Arc::clone(&barrier);
            let popped = Arc::clone(&popped);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..STRESS_OPERATIONS_PER_THREAD {
                    queue.push((thread_id, i));
                    if queue.pop().is_some() {
                        popped.fetch_add(1, Ordering::Relaxed);
                    }
                    if i % 97 == 0 {
                        assert!(queue.snapshot().is_consistent());
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let total_time = start_time.elapsed();
    let pushed = (STRESS_THREADS * STRESS_OPERATIONS_PER_THREAD) as u64;
    let snapshot = queue.snapshot();

    println!("Stress Test Results:");
    println!("  Pushed: {pushed}");
    println!("  Popped: {}", popped.load(Ordering::Relaxed));
    println!("  Dropped: {}", queue.dropped());
    println!("  Total time: {total_time:?}");

    assert!(snapshot.is_consistent());
    assert_eq!(
        popped.load(Ordering::Relaxed) + snapshot.len as u64 + queue.dropped(),
        pushed
    );
}

#[test]
#[ignore]
fn stress_test_many_workers_converge() {
    const TAGS: u32 = 32;

    let queue = Arc::new(RingBuffer::new(TAGS as usize).unwrap());
    let mut counters = Vec::new();
    let workers: Vec<_> = (0..TAGS)
        .map(|tag| {
            let action = RecordingAction::new(&format!("tag-{tag}"));
            counters.push(action.calls());
            Worker::new(tag, action, Arc::clone(&queue), Duration::from_micros(50))
        })
        .collect();

    for tag in (0..TAGS).rev() {
        queue.push(tag);
    }
    let handle = Dispatcher::spawn(workers).unwrap();

    let converged = wait_until(Duration::from_secs(60), || {
        counters.iter().all(|calls| calls.load(Ordering::SeqCst) == 1)
    });
    handle.shutdown().unwrap();

    assert!(converged);
    assert!(queue.is_empty());
    assert_eq!(queue.dropped(), 0);
}
