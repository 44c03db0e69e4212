use serde::Deserialize;

pub const MIN_ALTITUDE_M: f64 = 0.0;
pub const MAX_ALTITUDE_M: f64 = 35_000.0;

/// Simulated satellite position and environment, advanced once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SatelliteState {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub temperature: f64,
}

impl Default for SatelliteState {
    fn default() -> Self {
        SatelliteState {
            latitude: 36.4477,
            longitude: -119.4179,
            altitude: 1000.0,
            temperature: -10.0,
        }
    }
}

impl SatelliteState {
    pub fn apply(&mut self, delta: &Perturbation) {
        self.latitude += delta.latitude;
        self.longitude += delta.longitude;
        self.altitude = clamp_altitude(self.altitude + delta.altitude);
        self.temperature += delta.temperature;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perturbation {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub temperature: f64,
}

pub fn clamp_altitude(altitude: f64) -> f64 {
    altitude.clamp(MIN_ALTITUDE_M, MAX_ALTITUDE_M)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(altitude: f64) -> Perturbation {
        Perturbation {
            latitude: 0.01,
            longitude: -0.02,
            altitude,
            temperature: 0.25,
        }
    }

    #[test]
    fn apply_moves_every_field() {
        let mut state = SatelliteState::default();
        state.apply(&delta(30.0));

        assert!((state.latitude - 36.4577).abs() < 1e-9);
        assert!((state.longitude - -119.4379).abs() < 1e-9);
        assert_eq!(state.altitude, 1030.0);
        assert_eq!(state.temperature, -9.75);
    }

    #[test]
    fn altitude_is_clamped_at_both_ends() {
        let mut state = SatelliteState {
            altitude: 5.0,
            ..SatelliteState::default()
        };
        state.apply(&delta(-20.0));
        assert_eq!(state.altitude, MIN_ALTITUDE_M);

        state.altitude = 34_990.0;
        state.apply(&delta(50.0));
        assert_eq!(state.altitude, MAX_ALTITUDE_M);
    }
}
