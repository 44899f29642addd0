//! Vital-sign tracking for the Text Watch.
//!
//! This module contains:
//! - The aggregator turning pedometer and heart-rate samples into metrics
//! - The heart-rate measurement window state machine
//! - The periodic timer that re-opens measurement windows

pub mod aggregator;
pub mod timer;
pub mod window;

// Re-export commonly used types
pub use aggregator::{
    Aggregator, AggregatorConfig, VitalState, Vitals, DEFAULT_MIN_VALID_PULSE,
    DEFAULT_REQUIRED_SAMPLES,
};
pub use timer::{WindowTimer, DEFAULT_WINDOW_PERIOD};
pub use window::{MeasurementWindow, SampleOutcome, WindowState};
