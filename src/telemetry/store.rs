use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::sample::TelemetrySample;

/// Bounded FIFO history shared between the generator and HTTP readers.
///
/// Every operation takes the same lock and does nothing but in-memory work
/// while holding it. Once full, each append evicts the oldest sample.
#[derive(Debug)]
pub struct TelemetryStore {
    capacity: usize,
    samples: Mutex<VecDeque<TelemetrySample>>,
}

impl TelemetryStore {
    /// A capacity of zero is bumped to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        TelemetryStore {
            capacity,
            samples: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn append(&self, sample: TelemetrySample) {
        let mut samples = self.lock();
        if samples.len() == self.capacity {
            samples.pop_front();
        }
        samples.push_back(sample);
    }

    /// Appends each sample in order, so only the newest `capacity` survive.
    pub fn seed(&self, samples: impl IntoIterator<Item = TelemetrySample>) {
        for sample in samples {
            self.append(sample);
        }
    }

    pub fn latest(&self) -> Option<TelemetrySample> {
        self.lock().back().cloned()
    }

    /// Point-in-time copy, oldest first.
    pub fn snapshot(&self) -> Vec<TelemetrySample> {
        self.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the guard cannot leave the deque half-written,
    // so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, VecDeque<TelemetrySample>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
