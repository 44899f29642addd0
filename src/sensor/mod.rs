//! Sensor subscriptions and event decoding.
//!
//! The platform owns the real sensors; the core only asks for subscriptions
//! to be started or stopped through [`SensorBackend`] and receives raw
//! events back from the host.

pub mod backend;
pub mod noop;
pub mod simulated;
pub mod types;

// Re-export commonly used types
pub use backend::SensorBackend;
pub use noop::NoopSensors;
pub use simulated::{SimulatedSensors, SimulationConfig};
pub use types::{HeartRateSample, PedometerSample, SensorError, SensorEvent, SensorKind};
