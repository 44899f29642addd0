//! Synthetic sensor backend used by the terminal host.
//!
//! A worker thread produces pedometer totals and heart-rate readings while
//! the matching subscription is active and hands them over a bounded
//! channel. The host drains the channel on its own thread, so the watch core
//! still sees one event at a time.

use crate::sensor::backend::SensorBackend;
use crate::sensor::types::{SensorError, SensorEvent, SensorKind};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, warn};

/// Shape of the synthetic signals.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Time between heart-rate readings
    pub heart_rate_interval: Duration,
    /// Time between pedometer reports
    pub pedometer_interval: Duration,
    /// Resting pulse the readings oscillate around
    pub base_pulse: f32,
    /// Every n-th heart-rate reading is a zero glitch (0 disables)
    pub glitch_every: u32,
    /// Steps added per pedometer report
    pub steps_per_report: u32,
    /// Stride length [m]
    pub stride_meters: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            heart_rate_interval: Duration::from_millis(250),
            pedometer_interval: Duration::from_secs(2),
            base_pulse: 68.0,
            glitch_every: 12,
            steps_per_report: 3,
            stride_meters: 0.72,
        }
    }
}

/// Flags shared with the worker thread.
#[derive(Debug, Default)]
struct Subscriptions {
    pedometer: AtomicBool,
    heart_rate: AtomicBool,
    shutdown: AtomicBool,
}

impl Subscriptions {
    fn flag(&self, kind: SensorKind) -> &AtomicBool {
        match kind {
            SensorKind::Pedometer => &self.pedometer,
            SensorKind::HeartRate => &self.heart_rate,
        }
    }
}

/// Sensor backend backed by a synthetic signal generator.
pub struct SimulatedSensors {
    subscriptions: Arc<Subscriptions>,
    receiver: Receiver<SensorEvent>,
    worker: Option<JoinHandle<()>>,
}

impl SimulatedSensors {
    /// Spawn the generator thread. All subscriptions start inactive.
    pub fn new(config: SimulationConfig) -> Self {
        let (sender, receiver) = bounded(1_024);
        let subscriptions = Arc::new(Subscriptions::default());

        let worker_subscriptions = Arc::clone(&subscriptions);
        let worker = thread::spawn(move || generate(config, worker_subscriptions, sender));

        Self {
            subscriptions,
            receiver,
            worker: Some(worker),
        }
    }

    /// Get the receiver for sensor events.
    pub fn receiver(&self) -> &Receiver<SensorEvent> {
        &self.receiver
    }

    /// Try to receive an event without blocking.
    pub fn try_recv(&self) -> Option<SensorEvent> {
        self.receiver.try_recv().ok()
    }
}

impl SensorBackend for SimulatedSensors {
    fn start(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        if self.worker.as_ref().map_or(true, |w| w.is_finished()) {
            return Err(SensorError::Subscription {
                kind,
                reason: "signal generator is not running".to_string(),
            });
        }
        self.subscriptions.flag(kind).store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self, kind: SensorKind) -> Result<(), SensorError> {
        self.subscriptions.flag(kind).store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_active(&self, kind: SensorKind) -> bool {
        self.subscriptions.flag(kind).load(Ordering::SeqCst)
    }
}

impl Drop for SimulatedSensors {
    fn drop(&mut self) {
        self.subscriptions.shutdown.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("sensor simulator thread panicked");
            }
        }
    }
}

fn generate(config: SimulationConfig, subscriptions: Arc<Subscriptions>, sender: Sender<SensorEvent>) {
    let step = config.heart_rate_interval.max(Duration::from_millis(10));
    let pedometer_every = (config.pedometer_interval.as_millis() / step.as_millis()).max(1) as u64;

    let mut tick: u64 = 0;
    let mut heart_rate_count: u32 = 0;
    let mut steps: u32 = 0;

    while !subscriptions.shutdown.load(Ordering::SeqCst) {
        thread::sleep(step);
        tick += 1;

        if subscriptions.heart_rate.load(Ordering::SeqCst) {
            heart_rate_count += 1;
            let bpm = if config.glitch_every > 0 && heart_rate_count % config.glitch_every == 0 {
                0.0
            } else {
                config.base_pulse + 6.0 * (tick as f32 * 0.15).sin()
            };
            if !send(&sender, SensorEvent::heart_rate(bpm)) {
                break;
            }
        }

        if tick % pedometer_every == 0 && subscriptions.pedometer.load(Ordering::SeqCst) {
            steps += config.steps_per_report;
            let event = SensorEvent::pedometer(steps as f32, steps as f32 * config.stride_meters);
            if !send(&sender, event) {
                break;
            }
        }
    }
}

/// Returns false once the receiving side is gone.
fn send(sender: &Sender<SensorEvent>, event: SensorEvent) -> bool {
    match sender.try_send(event) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            debug!("sensor queue full, dropping event");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}
