//! Text Watch - a word clock watch face with step and pulse tracking.
//!
//! This library holds the platform-independent core of a smartwatch face
//! that spells out the time in words ("Es ist fünf vor halb DREI"), shows
//! the day's steps and the latest averaged pulse, and switches its
//! background by time of day.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Host / display layer                  │
//! └──────┬──────────────────┬──────────────────────┬────────────┘
//!        │ tick             │ sensor event         │ 30 min timer
//!        ▼                  ▼                      ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     WatchCore (handlers)                    │
//! │  ┌─────────────┐   ┌─────────────────┐   ┌─────────────┐    │
//! │  │   Clock     │   │   Aggregator    │──▶│   Sensor    │    │
//! │  │  Phraser    │   │ (pulse window)  │   │   Backend   │    │
//! │  └─────────────┘   └─────────────────┘   └─────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use textwatch::{clock, sensor::NoopSensors, Config, WatchCore, WatchHandlers};
//!
//! let mut watch = WatchCore::new(NoopSensors::new(), &Config::default());
//! watch.on_create();
//!
//! let now = clock::TimeReading::new(2026, 10, 15, 14, 27, 0).unwrap();
//! let face = watch.on_tick(Ok(now), false, 80).unwrap();
//! assert_eq!(face.prefix, "fünf vor halb");
//! assert_eq!(face.hour, "DREI");
//! ```

pub mod clock;
pub mod config;
pub mod sensor;
pub mod stats;
pub mod vitals;
pub mod watch;

// Re-export key types at crate root for convenience
pub use clock::{phrase, BackgroundTheme, FaceStrings, PhraseResult, TimePhrase, TimeReading};
pub use config::{Config, ConfigError};
pub use sensor::{SensorBackend, SensorError, SensorEvent, SensorKind};
pub use stats::{SessionStats, SharedSessionStats};
pub use vitals::{Aggregator, Vitals};
pub use watch::{WatchCore, WatchHandlers};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
