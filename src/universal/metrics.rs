use std::sync::atomic::{AtomicU64, Ordering};

/// Prevented-loss counter shared by one or more admission guards.
///
/// Owned explicitly and handed to guards as `Arc<LossMetrics>`; there is no
/// process-wide instance, so each guard (or test) can have its own.
/// Increments and reads are lock-free and safe from any thread.
#[derive(Debug, Default)]
pub struct LossMetrics {
    prevented_loss: AtomicU64,
}

impl LossMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one prevented-loss event.
    pub fn increment_prevented_loss(&self) {
        let prev = self.prevented_loss.fetch_add(1, Ordering::Relaxed);
        log::trace!("prevented_loss -> {}", prev.wrapping_add(1));
    }

    /// Current prevented-loss count. May or may not include increments that
    /// are in flight on other threads.
    pub fn prevented_loss(&self) -> u64 {
        self.prevented_loss.load(Ordering::Relaxed)
    }
}
