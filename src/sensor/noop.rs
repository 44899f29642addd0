//! Sensor backend for hosts without sensors.
//!
//! Subscriptions can be started and stopped but no events are ever produced.
//! It can also be told that a sensor is missing, which is how the degraded
//! paths are exercised.

use crate::sensor::backend::SensorBackend;
use crate::sensor::types::{SensorError, SensorKind};
use std::collections::HashSet;

/// A backend that tracks subscription state only.
#[derive(Debug, Default)]
pub struct NoopSensors {
    active: HashSet<SensorKind>,
    missing: HashSet<SensorKind>,
}

impl NoopSensors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend on which `kind` is unavailable.
    pub fn without(mut self, kind: SensorKind) -> Self {
        self.missing.insert(kind);
        self
    }
}

impl SensorBackend for NoopSensors {
    fn start(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        if self.missing.contains(&kind) {
            return Err(SensorError::Unavailable(kind));
        }
        self.active.insert(kind);
        Ok(())
    }

    fn stop(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        if self.missing.contains(&kind) {
            return Err(SensorError::Unavailable(kind));
        }
        self.active.remove(&kind);
        Ok(())
    }

    fn is_active(&self, kind: SensorKind) -> bool {
        self.active.contains(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_stop() {
        let mut sensors = NoopSensors::new();
        sensors.start(SensorKind::HeartRate).unwrap();
        assert!(sensors.is_active(SensorKind::HeartRate));
        assert!(!sensors.is_active(SensorKind::Pedometer));

        sensors.stop(SensorKind::HeartRate).unwrap();
        assert!(!sensors.is_active(SensorKind::HeartRate));
    }

    #[test]
    fn test_missing_sensor() {
        let mut sensors = NoopSensors::new().without(SensorKind::Pedometer);
        assert!(matches!(
            sensors.start(SensorKind::Pedometer),
            Err(SensorError::Unavailable(SensorKind::Pedometer))
        ));
        assert!(!sensors.is_active(SensorKind::Pedometer));
        assert!(sensors.start(SensorKind::HeartRate).is_ok());
    }
}
