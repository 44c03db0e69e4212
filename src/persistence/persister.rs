use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use super::backend::HistoryBackend;
use super::error::PersistenceError;
use crate::telemetry::TelemetrySample;

/// Best-effort front for a [`HistoryBackend`].
///
/// Every call is bounded by `timeout`, and failures end up in the log
/// instead of being returned, so a broken backend never reaches the
/// generator or the HTTP handlers.
#[derive(Clone)]
pub struct Persister {
    backend: Arc<dyn HistoryBackend>,
    timeout: Duration,
}

impl Persister {
    pub fn new(backend: Arc<dyn HistoryBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Returns the stored history, or nothing if it cannot be read.
    pub async fn load(&self) -> Vec<TelemetrySample> {
        let result = match timeout(self.timeout, self.backend.load()).await {
            Ok(result) => result,
            Err(_) => Err(PersistenceError::Timeout(self.timeout)),
        };

        match result {
            Ok(samples) => {
                log::info!(
                    "Loaded {} samples from {}",
                    samples.len(),
                    self.backend.describe()
                );
                samples
            }
            Err(PersistenceError::NotFound(_)) => {
                log::info!(
                    "No stored history at {}, starting empty",
                    self.backend.describe()
                );
                Vec::new()
            }
            Err(e) => {
                log::warn!(
                    "Failed to load history from {}: {}; starting empty",
                    self.backend.describe(),
                    e
                );
                Vec::new()
            }
        }
    }

    pub async fn save(&self, samples: &[TelemetrySample]) -> bool {
        let result = match timeout(self.timeout, self.backend.save(samples)).await {
            Ok(result) => result,
            Err(_) => Err(PersistenceError::Timeout(self.timeout)),
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!(
                    "Failed to save {} samples to {}: {}",
                    samples.len(),
                    self.backend.describe(),
                    e
                );
                false
            }
        }
    }
}

/// Starts a task that saves every snapshot published on the returned sender.
///
/// Snapshots published while a save is in flight are coalesced into the most
/// recent one. Dropping the sender flushes the last snapshot and ends the task.
pub fn spawn_writer(
    persister: Persister,
) -> (watch::Sender<Vec<TelemetrySample>>, JoinHandle<()>) {
    let (tx, mut rx) = watch::channel(Vec::new());

    let join = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let snapshot = rx.borrow_and_update().clone();
            persister.save(&snapshot).await;
        }
        log::debug!("History writer finished");
    });

    (tx, join)
}
