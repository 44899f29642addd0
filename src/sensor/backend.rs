use crate::sensor::types::{SensorError, SensorKind};

/// Subscription control over the device sensors.
///
/// Starting and stopping are synchronous: once `stop` returns no further
/// events of that kind are produced.
pub trait SensorBackend {
    /// Begin delivering events of `kind`.
    fn start(&mut self, kind: SensorKind) -> Result<(), SensorError>;

    /// Stop delivering events of `kind`.
    fn stop(&mut self, kind: SensorKind) -> Result<(), SensorError>;

    /// Whether events of `kind` are currently being delivered.
    fn is_active(&self, kind: SensorKind) -> bool;
}

impl<T: SensorBackend + ?Sized> SensorBackend for Box<T> {
    fn start(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        (**self).start(kind)
    }

    fn stop(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        (**self).stop(kind)
    }

    fn is_active(&self, kind: SensorKind) -> bool {
        (**self).is_active(kind)
    }
}
