//! Sensor event types delivered by the host.
//!
//! Raw events arrive as a slice of float values, exactly as the platform
//! sensor framework reports them. They are decoded into typed samples here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value index of the daily step count in a pedometer event.
pub const PEDOMETER_STEPS_INDEX: usize = 0;
/// Value index of the walked distance in meters in a pedometer event.
pub const PEDOMETER_DISTANCE_INDEX: usize = 3;
/// Minimum number of values a pedometer event must carry.
pub const PEDOMETER_VALUE_COUNT: usize = 4;
/// Minimum number of values a heart-rate event must carry.
pub const HEART_RATE_VALUE_COUNT: usize = 1;

/// The sensors the watch subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    Pedometer,
    HeartRate,
}

impl SensorKind {
    /// Number of values an event of this kind must carry.
    pub fn required_values(self) -> usize {
        match self {
            SensorKind::Pedometer => PEDOMETER_VALUE_COUNT,
            SensorKind::HeartRate => HEART_RATE_VALUE_COUNT,
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SensorKind::Pedometer => write!(f, "pedometer"),
            SensorKind::HeartRate => write!(f, "heart-rate"),
        }
    }
}

/// Running totals reported by the pedometer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PedometerSample {
    /// Steps walked today
    pub steps_today: u32,
    /// Walked distance [m]
    pub distance_meters: f32,
}

impl PedometerSample {
    /// Decode a raw pedometer event.
    pub fn from_values(values: &[f32]) -> Result<Self, SensorError> {
        check_value_count(SensorKind::Pedometer, values)?;
        Ok(Self {
            // Float to int casts saturate; negative readings become 0
            steps_today: values[PEDOMETER_STEPS_INDEX] as u32,
            distance_meters: values[PEDOMETER_DISTANCE_INDEX],
        })
    }
}

/// One heart-rate reading in beats per minute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub bpm: f32,
}

impl HeartRateSample {
    /// Decode a raw heart-rate event.
    pub fn from_values(values: &[f32]) -> Result<Self, SensorError> {
        check_value_count(SensorKind::HeartRate, values)?;
        Ok(Self { bpm: values[0] })
    }
}

/// A raw event as delivered by a sensor backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorEvent {
    pub kind: SensorKind,
    pub values: Vec<f32>,
}

impl SensorEvent {
    pub fn pedometer(steps_today: f32, distance_meters: f32) -> Self {
        Self {
            kind: SensorKind::Pedometer,
            values: vec![steps_today, 0.0, 0.0, distance_meters],
        }
    }

    pub fn heart_rate(bpm: f32) -> Self {
        Self {
            kind: SensorKind::HeartRate,
            values: vec![bpm],
        }
    }
}

/// Errors raised by sensor subscriptions and event decoding.
#[derive(Debug, Error)]
pub enum SensorError {
    #[error("{kind} sensor delivered {got} values, expected at least {expected}")]
    InsufficientValues {
        kind: SensorKind,
        got: usize,
        expected: usize,
    },
    #[error("{0} sensor is not available on this device")]
    Unavailable(SensorKind),
    #[error("{kind} subscription failed: {reason}")]
    Subscription { kind: SensorKind, reason: String },
}

fn check_value_count(kind: SensorKind, values: &[f32]) -> Result<(), SensorError> {
    let expected = kind.required_values();
    if values.len() < expected {
        return Err(SensorError::InsufficientValues {
            kind,
            got: values.len(),
            expected,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pedometer_decoding() {
        let sample = PedometerSample::from_values(&[1234.7, 5.0, 6.0, 987.5]).unwrap();
        assert_eq!(sample.steps_today, 1234);
        assert!((sample.distance_meters - 987.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_pedometer_extra_values_ignored() {
        let sample = PedometerSample::from_values(&[10.0, 0.0, 0.0, 7.0, 99.0, 98.0]).unwrap();
        assert_eq!(sample.steps_today, 10);
    }

    #[test]
    fn test_short_pedometer_event_rejected() {
        let err = PedometerSample::from_values(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            SensorError::InsufficientValues {
                kind: SensorKind::Pedometer,
                got: 3,
                expected: 4
            }
        ));
    }

    #[test]
    fn test_empty_heart_rate_event_rejected() {
        assert!(HeartRateSample::from_values(&[]).is_err());
        assert_eq!(HeartRateSample::from_values(&[64.0]).unwrap().bpm, 64.0);
    }

    #[test]
    fn test_event_constructors_decode() {
        let event = SensorEvent::pedometer(50.0, 40.0);
        let sample = PedometerSample::from_values(&event.values).unwrap();
        assert_eq!(sample.steps_today, 50);
        assert_eq!(event.kind, SensorKind::Pedometer);
    }
}
