//! Loss metrics counters under concurrent use.

use std::sync::Arc;
use std::thread;

use x402_admission_guard::LossMetrics;

#[test]
fn fresh_metrics_start_at_zero() {
    let metrics = LossMetrics::new();
    assert_eq!(metrics.prevented_loss(), 0);
}

#[test]
fn increments_are_counted_exactly() {
    let metrics = LossMetrics::new();
    for _ in 0..5 {
        metrics.increment_prevented_loss();
    }
    assert_eq!(metrics.prevented_loss(), 5);
}

#[test]
fn concurrent_increments_lose_no_updates() {
    const THREADS: u64 = 16;
    const PER_THREAD: u64 = 10_000;

    let metrics = Arc::new(LossMetrics::new());
    thread::scope(|s| {
        for _ in 0..THREADS {
            let metrics = Arc::clone(&metrics);
            s.spawn(move || {
                for _ in 0..PER_THREAD {
                    metrics.increment_prevented_loss();
                }
            });
        }
        // concurrent readers only ever see values that were written
        s.spawn(|| {
            let mut last = 0;
            for _ in 0..1_000 {
                let seen = metrics.prevented_loss();
                assert!(seen >= last);
                assert!(seen <= THREADS * PER_THREAD);
                last = seen;
            }
        });
    });

    assert_eq!(metrics.prevented_loss(), THREADS * PER_THREAD);
}

#[test]
fn separate_instances_are_isolated() {
    let a = LossMetrics::new();
    let b = LossMetrics::new();
    a.increment_prevented_loss();
    assert_eq!(a.prevented_loss(), 1);
    assert_eq!(b.prevented_loss(), 0);
}
