mod generator;
mod sample;
mod state;
mod store;

pub use generator::{Generator, GeneratorHandle};
pub use sample::TelemetrySample;
pub use state::SatelliteState;
pub use store::TelemetryStore;
