use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::SystemTime,
};

/// Shared processing-cycle counter.
///
/// The pipeline advances the epoch once per completed cycle; every value
/// produced in that cycle carries the same epoch, so readers can tell whether
/// two values belong together.
#[derive(Clone, Debug, Default)]
pub struct Epoch {
    value: Arc<AtomicU64>,
}

impl Epoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current epoch value. Zero means no cycle has completed yet.
    pub fn current(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }

    /// Advance to the next epoch. Returns the new epoch value.
    pub fn advance(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn is_current(&self, epoch: u64) -> bool {
        epoch == self.current()
    }
}

/// A value stamped with the epoch and wall-clock time it belongs to.
#[derive(Clone, Debug)]
pub struct Stamped<T> {
    pub epoch: u64,
    pub time: SystemTime,
    pub inner: T,
}

impl<T> Stamped<T> {
    pub fn new(epoch: u64, time: SystemTime, inner: T) -> Self {
        Self { epoch, time, inner }
    }

    /// Stamp `inner` with the current wall-clock time.
    pub fn now(epoch: u64, inner: T) -> Self {
        Self::new(epoch, SystemTime::now(), inner)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Stamped<U> {
        Stamped {
            epoch: self.epoch,
            time: self.time,
            inner: f(self.inner),
        }
    }
}
