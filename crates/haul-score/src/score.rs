use std::sync::atomic::{AtomicI64, Ordering};

/// Running session score.  Every truck thread adds to it; nothing ever reads
/// it back to decide a delta, so a plain atomic add is enough.
#[derive(Debug, Default)]
pub struct Score(AtomicI64);

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&self, delta: i64) {
        self.0.fetch_add(delta, Ordering::AcqRel);
    }

    #[inline]
    pub fn value(&self) -> i64 {
        self.0.load(Ordering::Acquire)
    }
}
