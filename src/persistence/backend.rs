use async_trait::async_trait;

use super::error::PersistenceError;
use crate::telemetry::TelemetrySample;

/// Storage for the telemetry history, oldest sample first.
#[async_trait]
pub trait HistoryBackend: Send + Sync {
    /// Human readable location, used in log lines.
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Vec<TelemetrySample>, PersistenceError>;

    async fn save(&self, samples: &[TelemetrySample]) -> Result<(), PersistenceError>;
}
