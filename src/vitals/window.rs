//! Heart-rate measurement window.
//!
//! A window collects valid readings until enough have been seen to commit
//! one averaged pulse. It is opened by the periodic window timer and closes
//! itself on completion, or is aborted when the sensors are stopped.

use serde::{Deserialize, Serialize};

/// Whether a measurement window is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowState {
    Idle,
    Measuring,
}

/// What happened to one reading offered to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    /// Counted towards the window
    Accepted { count: u32 },
    /// At or below the validity threshold
    Discarded,
    /// No window open
    Ignored,
    /// This reading completed the window
    Completed { average: u32 },
}

/// Accumulators for one heart-rate measurement window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementWindow {
    state: WindowState,
    sample_sum: u32,
    sample_count: u32,
    required_samples: u32,
    min_valid: f32,
}

impl MeasurementWindow {
    /// Create an idle window needing `required_samples` readings above `min_valid`.
    pub fn new(required_samples: u32, min_valid: f32) -> Self {
        Self {
            state: WindowState::Idle,
            sample_sum: 0,
            sample_count: 0,
            required_samples: required_samples.max(1),
            min_valid,
        }
    }

    /// Open the window, dropping anything accumulated so far.
    pub fn open(&mut self) {
        self.sample_sum = 0;
        self.sample_count = 0;
        self.state = WindowState::Measuring;
    }

    /// Close the window without committing a result.
    pub fn abort(&mut self) {
        self.state = WindowState::Idle;
    }

    /// Offer one reading.
    pub fn add_sample(&mut self, bpm: f32) -> SampleOutcome {
        if self.state != WindowState::Measuring {
            return SampleOutcome::Ignored;
        }
        if bpm.is_nan() || bpm <= self.min_valid {
            return SampleOutcome::Discarded;
        }

        self.sample_count += 1;
        self.sample_sum = self.sample_sum.saturating_add(bpm as u32);

        if self.sample_count >= self.required_samples {
            self.state = WindowState::Idle;
            SampleOutcome::Completed {
                average: self.sample_sum / self.sample_count,
            }
        } else {
            SampleOutcome::Accepted {
                count: self.sample_count,
            }
        }
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == WindowState::Measuring
    }

    pub fn sample_sum(&self) -> u32 {
        self.sample_sum
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn required_samples(&self) -> u32 {
        self.required_samples
    }
}
