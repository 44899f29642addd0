//! Session statistics for the Text Watch.
//!
//! Counts what the watch core processed during the current run so the host
//! can report it on shutdown.

pub mod counters;

// Re-export commonly used types
pub use counters::{create_shared_stats, SessionStats, SharedSessionStats, StatsSnapshot};
