use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use super::sample::TelemetrySample;
use super::state::{Perturbation, SatelliteState};
use super::store::TelemetryStore;

const LATITUDE_STEP: f64 = 0.02;
const LONGITUDE_STEP: f64 = 0.03;
const ALTITUDE_DROP: f64 = -20.0;
const ALTITUDE_CLIMB: f64 = 50.0;
const TEMPERATURE_STEP: f64 = 0.5;

/// Sole owner of the simulated satellite state.
pub struct Generator {
    state: SatelliteState,
    rng: StdRng,
    store: Arc<TelemetryStore>,
}

pub struct GeneratorHandle {
    stop_tx: oneshot::Sender<()>,
    join: JoinHandle<()>,
}

impl GeneratorHandle {
    /// Signals the task and waits for it; a tick in progress is finished first.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        if let Err(e) = self.join.await {
            log::error!("Telemetry generator task failed: {}", e);
        }
    }
}

impl Generator {
    pub fn new(state: SatelliteState, rng: StdRng, store: Arc<TelemetryStore>) -> Self {
        Self { state, rng, store }
    }

    pub fn state(&self) -> &SatelliteState {
        &self.state
    }

    /// Advances the state by one random step and appends the resulting sample.
    pub fn tick(&mut self) -> TelemetrySample {
        let delta = self.perturbation();
        self.state.apply(&delta);

        let sample = TelemetrySample::capture(&self.state, Utc::now());
        self.store.append(sample.clone());
        sample
    }

    fn perturbation(&mut self) -> Perturbation {
        Perturbation {
            latitude: self.rng.gen_range(-LATITUDE_STEP..=LATITUDE_STEP),
            longitude: self.rng.gen_range(-LONGITUDE_STEP..=LONGITUDE_STEP),
            altitude: self.rng.gen_range(ALTITUDE_DROP..=ALTITUDE_CLIMB),
            temperature: self.rng.gen_range(-TEMPERATURE_STEP..=TEMPERATURE_STEP),
        }
    }

    /// Ticks immediately, then once per `interval` after each tick completes.
    ///
    /// After every tick the full history is published on `snapshots`, if given.
    pub fn spawn(
        self,
        interval: Duration,
        snapshots: Option<watch::Sender<Vec<TelemetrySample>>>,
    ) -> GeneratorHandle {
        let (stop_tx, stop_rx) = oneshot::channel();
        let join = tokio::spawn(run_generator_loop(self, interval, snapshots, stop_rx));
        GeneratorHandle { stop_tx, join }
    }
}

async fn run_generator_loop(
    mut generator: Generator,
    interval: Duration,
    snapshots: Option<watch::Sender<Vec<TelemetrySample>>>,
    mut stop_rx: oneshot::Receiver<()>,
) {
    log::info!(
        "Telemetry generator started at {:?} (interval {})",
        generator.state(),
        humantime::format_duration(interval)
    );

    loop {
        let sample = generator.tick();
        log::debug!(
            "tick: lat={:.4} lon={:.4} alt={:.1} temp={:.2}",
            sample.latitude,
            sample.longitude,
            sample.altitude,
            sample.temperature
        );

        if let Some(tx) = &snapshots {
            // Copied under the store lock, handed off after it is released.
            let snapshot = generator.store.snapshot();
            tx.send_replace(snapshot);
        }

        let should_stop = tokio::select! {
            _ = sleep(interval) => false,
            _ = &mut stop_rx => true,
        };
        if should_stop {
            break;
        }
    }

    log::info!("Telemetry generator stopped");
}
