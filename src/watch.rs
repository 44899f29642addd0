//! The watch core and the handler interface the host drives it through.
//!
//! The host owns the event loop. It calls into [`WatchHandlers`] on fixed
//! triggers, one call at a time, and shows whatever [`FaceStrings`] come back.
//! No handler returns an error: failures are logged and the affected
//! feature degrades.

use crate::clock::{render_face, FaceStrings, ThemeTracker, TimeError, TimeReading};
use crate::config::Config;
use crate::sensor::SensorBackend;
use crate::stats::{create_shared_stats, SharedSessionStats};
use crate::vitals::{Aggregator, SampleOutcome, Vitals};
use tracing::{debug, info, warn};

/// Callbacks the host invokes on the watch core.
pub trait WatchHandlers {
    /// App start: subscribe to sensors and take the first pulse measurement.
    fn on_create(&mut self);

    /// Clock tick; once per second, or once per minute in ambient mode.
    ///
    /// Returns `None` when no time is available and nothing should be drawn.
    fn on_tick(
        &mut self,
        time: Result<TimeReading, TimeError>,
        ambient: bool,
        battery_percent: u8,
    ) -> Option<FaceStrings>;

    fn on_pedometer_event(&mut self, values: &[f32]);

    fn on_heart_rate_event(&mut self, values: &[f32]);

    /// The periodic window timer fired.
    fn on_window_timer_fired(&mut self);

    /// App shutdown: release every sensor subscription.
    fn on_terminate(&mut self);
}

/// Context object holding all state the handlers work on.
pub struct WatchCore<B> {
    aggregator: Aggregator<B>,
    theme: ThemeTracker,
    stats: SharedSessionStats,
}

impl<B: SensorBackend> WatchCore<B> {
    pub fn new(sensors: B, config: &Config) -> Self {
        Self {
            aggregator: Aggregator::new(sensors, config.aggregator_config()),
            theme: ThemeTracker::new(),
            stats: create_shared_stats(),
        }
    }

    /// Share an existing set of session counters.
    pub fn with_stats(mut self, stats: SharedSessionStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn current_vitals(&self) -> Vitals {
        self.aggregator.current_vitals()
    }

    pub fn aggregator(&self) -> &Aggregator<B> {
        &self.aggregator
    }

    pub fn stats(&self) -> &SharedSessionStats {
        &self.stats
    }

    fn open_window(&mut self) {
        if self.aggregator.on_window_timer_fired() {
            self.stats.record_window_opened();
        }
    }
}

impl<B: SensorBackend> WatchHandlers for WatchCore<B> {
    fn on_create(&mut self) {
        info!("watch core starting");
        self.aggregator.start_sensors();
        self.open_window();
    }

    fn on_tick(
        &mut self,
        time: Result<TimeReading, TimeError>,
        ambient: bool,
        battery_percent: u8,
    ) -> Option<FaceStrings> {
        let reading = match time {
            Ok(reading) => reading,
            Err(e) => {
                warn!("failed to get current time: {e}");
                self.stats.record_tick_skipped();
                return None;
            }
        };

        let vitals = self.aggregator.current_vitals();
        let mut face = render_face(&reading, ambient, &vitals, battery_percent.min(100));
        face.theme_changed = self.theme.update(face.theme);
        if face.theme_changed {
            debug!("background theme is now {}", face.theme.name());
        }

        self.stats.record_tick_rendered();
        Some(face)
    }

    fn on_pedometer_event(&mut self, values: &[f32]) {
        self.stats.record_pedometer_event();
        if !self.aggregator.on_pedometer_event(values) {
            self.stats.record_discarded_event();
        }
    }

    fn on_heart_rate_event(&mut self, values: &[f32]) {
        self.stats.record_heart_rate_event();
        match self.aggregator.on_heart_rate_event(values) {
            None | Some(SampleOutcome::Discarded) => self.stats.record_discarded_event(),
            Some(SampleOutcome::Completed { .. }) => self.stats.record_window_completed(),
            Some(SampleOutcome::Accepted { .. }) | Some(SampleOutcome::Ignored) => {}
        }
    }

    fn on_window_timer_fired(&mut self) {
        self.open_window();
    }

    fn on_terminate(&mut self) {
        info!("watch core stopping");
        self.aggregator.stop_sensors();
    }
}
