//! Aggregation of pedometer and heart-rate samples into display metrics.
//!
//! Pedometer reports are running totals and simply replace the previous
//! values. Heart rate is averaged over a measurement window; the committed
//! pulse changes only when a window completes, never mid-window.

use crate::sensor::{HeartRateSample, PedometerSample, SensorBackend, SensorKind};
use crate::vitals::window::{MeasurementWindow, SampleOutcome};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Number of valid readings averaged into one pulse value.
pub const DEFAULT_REQUIRED_SAMPLES: u32 = 40;

/// Readings at or below this value are treated as sensor glitches.
pub const DEFAULT_MIN_VALID_PULSE: f32 = 10.0;

/// Aggregator tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatorConfig {
    pub required_samples: u32,
    pub min_valid_pulse: f32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            required_samples: DEFAULT_REQUIRED_SAMPLES,
            min_valid_pulse: DEFAULT_MIN_VALID_PULSE,
        }
    }
}

/// Display-ready vital metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub step_count: u32,
    pub walked_distance_meters: f32,
    /// Last committed pulse [beats/min], 0 until the first window completes
    pub current_pulse: u32,
}

/// Mutable state owned by the aggregator for the lifetime of the app.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalState {
    pub step_count: u32,
    pub walked_distance_meters: f32,
    pub current_pulse: u32,
    pub window: MeasurementWindow,
}

impl VitalState {
    fn new(config: &AggregatorConfig) -> Self {
        Self {
            step_count: 0,
            walked_distance_meters: 0.0,
            current_pulse: 0,
            window: MeasurementWindow::new(config.required_samples, config.min_valid_pulse),
        }
    }

    pub fn hrm_sample_sum(&self) -> u32 {
        self.window.sample_sum()
    }

    pub fn hrm_sample_count(&self) -> u32 {
        self.window.sample_count()
    }

    pub fn hrm_window_active(&self) -> bool {
        self.window.is_active()
    }
}

/// Turns sensor samples into [`Vitals`] and drives the heart-rate window.
pub struct Aggregator<B> {
    state: VitalState,
    sensors: B,
}

impl<B: SensorBackend> Aggregator<B> {
    pub fn new(sensors: B, config: AggregatorConfig) -> Self {
        Self {
            state: VitalState::new(&config),
            sensors,
        }
    }

    /// Start the continuous pedometer subscription.
    ///
    /// A missing pedometer is logged; step metrics then stay at their last values.
    pub fn start_sensors(&mut self) {
        if let Err(e) = self.sensors.start(SensorKind::Pedometer) {
            error!("could not start pedometer: {e}");
        }
    }

    /// Stop every subscription, aborting an open measurement window.
    pub fn stop_sensors(&mut self) {
        if let Err(e) = self.sensors.stop(SensorKind::Pedometer) {
            error!("could not stop pedometer: {e}");
        }
        if self.state.window.is_active() {
            info!(
                "aborting heart-rate window after {} samples",
                self.state.window.sample_count()
            );
            self.state.window.abort();
            self.stop_heart_rate();
        }
    }

    /// Open a new heart-rate measurement window.
    ///
    /// Accumulators are reset either way. Returns false if the heart-rate
    /// subscription could not be started, in which case the window stays
    /// closed and the last pulse stays on display.
    pub fn on_window_timer_fired(&mut self) -> bool {
        info!("starting heart-rate measurement");
        self.state.window.open();
        if let Err(e) = self.sensors.start(SensorKind::HeartRate) {
            error!("could not start heart-rate sensor: {e}");
            self.state.window.abort();
            return false;
        }
        true
    }

    pub fn on_pedometer_sample(&mut self, steps_today: u32, distance_meters: f32) {
        self.state.step_count = steps_today;
        self.state.walked_distance_meters = distance_meters;
    }

    /// Feed one heart-rate reading into the open window.
    pub fn on_heart_rate_sample(&mut self, raw_value: f32) -> SampleOutcome {
        let outcome = self.state.window.add_sample(raw_value);
        match outcome {
            SampleOutcome::Completed { average } => {
                self.state.current_pulse = average;
                info!("saved current pulse: {average}");
                self.stop_heart_rate();
            }
            SampleOutcome::Discarded => debug!("discarding heart-rate reading {raw_value}"),
            SampleOutcome::Ignored => debug!("no measurement window open, ignoring {raw_value}"),
            SampleOutcome::Accepted { .. } => {}
        }
        outcome
    }

    /// Decode and apply a raw pedometer event. Malformed events change nothing.
    pub fn on_pedometer_event(&mut self, values: &[f32]) -> bool {
        match PedometerSample::from_values(values) {
            Ok(sample) => {
                self.on_pedometer_sample(sample.steps_today, sample.distance_meters);
                true
            }
            Err(e) => {
                error!("pedometer sensor is not delivering data: {e}");
                false
            }
        }
    }

    /// Decode and apply a raw heart-rate event. Malformed events change nothing.
    pub fn on_heart_rate_event(&mut self, values: &[f32]) -> Option<SampleOutcome> {
        match HeartRateSample::from_values(values) {
            Ok(sample) => Some(self.on_heart_rate_sample(sample.bpm)),
            Err(e) => {
                error!("heart-rate sensor is not delivering data: {e}");
                None
            }
        }
    }

    pub fn current_vitals(&self) -> Vitals {
        Vitals {
            step_count: self.state.step_count,
            walked_distance_meters: self.state.walked_distance_meters,
            current_pulse: self.state.current_pulse,
        }
    }

    pub fn state(&self) -> &VitalState {
        &self.state
    }

    pub fn sensors(&self) -> &B {
        &self.sensors
    }

    fn stop_heart_rate(&mut self) {
        if let Err(e) = self.sensors.stop(SensorKind::HeartRate) {
            error!("could not stop heart-rate sensor: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor::NoopSensors;

    fn aggregator() -> Aggregator<NoopSensors> {
        Aggregator::new(NoopSensors::new(), AggregatorConfig::default())
    }

    fn feed(aggregator: &mut Aggregator<NoopSensors>, count: usize, bpm: f32) {
        for _ in 0..count {
            aggregator.on_heart_rate_sample(bpm);
        }
    }

    #[test]
    fn test_forty_samples_commit_pulse() {
        let mut aggregator = aggregator();
        assert!(aggregator.on_window_timer_fired());
        assert!(aggregator.sensors().is_active(SensorKind::HeartRate));

        feed(&mut aggregator, 39, 70.0);
        assert_eq!(
            aggregator.on_heart_rate_sample(70.0),
            SampleOutcome::Completed { average: 70 }
        );
        assert_eq!(aggregator.current_vitals().current_pulse, 70);
        assert!(!aggregator.state().hrm_window_active());
        assert!(!aggregator.sensors().is_active(SensorKind::HeartRate));
    }

    #[test]
    fn test_partial_window_keeps_previous_pulse() {
        let mut aggregator = aggregator();
        aggregator.on_window_timer_fired();
        feed(&mut aggregator, 40, 60.0);
        assert_eq!(aggregator.current_vitals().current_pulse, 60);

        aggregator.on_window_timer_fired();
        feed(&mut aggregator, 39, 90.0);
        assert_eq!(aggregator.current_vitals().current_pulse, 60);
        assert_eq!(aggregator.state().hrm_sample_count(), 39);
    }

    #[test]
    fn test_glitch_readings_do_not_count() {
        let mut aggregator = aggregator();
        aggregator.on_window_timer_fired();
        assert_eq!(aggregator.on_heart_rate_sample(5.0), SampleOutcome::Discarded);
        feed(&mut aggregator, 39, 70.0);
        assert_eq!(aggregator.state().hrm_sample_count(), 39);
        assert_eq!(aggregator.current_vitals().current_pulse, 0);

        aggregator.on_heart_rate_sample(70.0);
        assert_eq!(aggregator.current_vitals().current_pulse, 70);
    }

    #[test]
    fn test_average_truncates() {
        let mut aggregator = aggregator();
        aggregator.on_window_timer_fired();
        feed(&mut aggregator, 20, 70.9);
        feed(&mut aggregator, 20, 73.0);
        // (20 * 70 + 20 * 73) / 40 = 71.5
        assert_eq!(aggregator.current_vitals().current_pulse, 71);
    }

    #[test]
    fn test_samples_outside_window_ignored() {
        let mut aggregator = aggregator();
        assert_eq!(aggregator.on_heart_rate_sample(80.0), SampleOutcome::Ignored);
        assert_eq!(aggregator.state().hrm_sample_count(), 0);
    }

    #[test]
    fn test_timer_restarts_open_window() {
        let mut aggregator = aggregator();
        aggregator.on_window_timer_fired();
        feed(&mut aggregator, 30, 100.0);
        aggregator.on_window_timer_fired();
        assert_eq!(aggregator.state().hrm_sample_count(), 0);
        assert_eq!(aggregator.state().hrm_sample_sum(), 0);
        feed(&mut aggregator, 40, 50.0);
        assert_eq!(aggregator.current_vitals().current_pulse, 50);
    }

    #[test]
    fn test_pedometer_overwrites_totals() {
        let mut aggregator = aggregator();
        aggregator.on_pedometer_sample(1200, 850.0);
        aggregator.on_pedometer_sample(1000, 700.0);
        let vitals = aggregator.current_vitals();
        assert_eq!(vitals.step_count, 1000);
        assert_eq!(vitals.walked_distance_meters, 700.0);
    }

    #[test]
    fn test_malformed_events_leave_state_untouched() {
        let mut aggregator = aggregator();
        aggregator.on_window_timer_fired();
        aggregator.on_pedometer_sample(10, 8.0);

        assert!(!aggregator.on_pedometer_event(&[99.0, 0.0, 0.0]));
        assert_eq!(aggregator.on_heart_rate_event(&[]), None);

        assert_eq!(aggregator.current_vitals().step_count, 10);
        assert_eq!(aggregator.state().hrm_sample_count(), 0);

        assert!(aggregator.on_pedometer_event(&[25.0, 0.0, 0.0, 18.0]));
        assert_eq!(aggregator.current_vitals().step_count, 25);
        assert_eq!(
            aggregator.on_heart_rate_event(&[72.0]),
            Some(SampleOutcome::Accepted { count: 1 })
        );
    }

    #[test]
    fn test_current_vitals_is_idempotent() {
        let mut aggregator = aggregator();
        aggregator.on_pedometer_sample(321, 222.0);
        assert_eq!(aggregator.current_vitals(), aggregator.current_vitals());
    }

    #[test]
    fn test_stop_sensors_aborts_window() {
        let mut aggregator = aggregator();
        aggregator.start_sensors();
        aggregator.on_window_timer_fired();
        feed(&mut aggregator, 10, 70.0);

        aggregator.stop_sensors();
        assert!(!aggregator.sensors().is_active(SensorKind::Pedometer));
        assert!(!aggregator.sensors().is_active(SensorKind::HeartRate));
        assert!(!aggregator.state().hrm_window_active());
        assert_eq!(aggregator.on_heart_rate_sample(70.0), SampleOutcome::Ignored);
    }

    #[test]
    fn test_missing_heart_rate_sensor_degrades() {
        let sensors = NoopSensors::new().without(SensorKind::HeartRate);
        let mut aggregator = Aggregator::new(sensors, AggregatorConfig::default());
        aggregator.start_sensors();

        assert!(!aggregator.on_window_timer_fired());
        assert!(!aggregator.state().hrm_window_active());
        assert_eq!(aggregator.current_vitals().current_pulse, 0);
        assert!(aggregator.sensors().is_active(SensorKind::Pedometer));
    }

    /// Heart-rate sensor that starts once and then drops off the bus.
    #[derive(Default)]
    struct FlakyHeartRate {
        inner: NoopSensors,
        heart_rate_starts: u32,
    }

    impl SensorBackend for FlakyHeartRate {
        fn start(&mut self, kind: SensorKind) -> Result<(), crate::sensor::SensorError> {
            if kind == SensorKind::HeartRate {
                self.heart_rate_starts += 1;
                if self.heart_rate_starts > 1 {
                    return Err(crate::sensor::SensorError::Unavailable(kind));
                }
            }
            self.inner.start(kind)
        }

        fn stop(&mut self, kind: SensorKind) -> Result<(), crate::sensor::SensorError> {
            self.inner.stop(kind)
        }

        fn is_active(&self, kind: SensorKind) -> bool {
            self.inner.is_active(kind)
        }
    }

    #[test]
    fn test_failed_reopen_discards_open_window() {
        let mut aggregator = Aggregator::new(FlakyHeartRate::default(), AggregatorConfig::default());
        assert!(aggregator.on_window_timer_fired());
        for _ in 0..30 {
            aggregator.on_heart_rate_sample(200.0);
        }

        assert!(!aggregator.on_window_timer_fired());
        assert!(!aggregator.state().hrm_window_active());
        assert_eq!(aggregator.state().hrm_sample_count(), 0);
        assert_eq!(aggregator.state().hrm_sample_sum(), 0);

        // Readings still in flight must not complete a window spanning two periods
        for _ in 0..10 {
            assert_eq!(aggregator.on_heart_rate_sample(60.0), SampleOutcome::Ignored);
        }
        assert_eq!(aggregator.current_vitals().current_pulse, 0);
    }

    #[test]
    fn test_custom_threshold() {
        let config = AggregatorConfig {
            required_samples: 3,
            min_valid_pulse: 30.0,
        };
        let mut aggregator = Aggregator::new(NoopSensors::new(), config);
        aggregator.on_window_timer_fired();
        assert_eq!(aggregator.on_heart_rate_sample(25.0), SampleOutcome::Discarded);
        feed(&mut aggregator, 3, 64.0);
        assert_eq!(aggregator.current_vitals().current_pulse, 64);
    }
}
