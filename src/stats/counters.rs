//! Per-session activity counters.
//!
//! Tracks how many ticks, sensor events and measurement windows the watch
//! core handled. Held in memory only; nothing is written to disk.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Counters for the current session.
#[derive(Debug)]
pub struct SessionStats {
    /// Ticks that produced a rendered face
    ticks_rendered: AtomicU64,
    /// Ticks skipped because no time was available
    ticks_skipped: AtomicU64,
    pedometer_events: AtomicU64,
    heart_rate_events: AtomicU64,
    /// Malformed events plus readings rejected as glitches
    discarded_events: AtomicU64,
    windows_opened: AtomicU64,
    windows_completed: AtomicU64,
    session_id: Uuid,
    session_start: DateTime<Utc>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            ticks_rendered: AtomicU64::new(0),
            ticks_skipped: AtomicU64::new(0),
            pedometer_events: AtomicU64::new(0),
            heart_rate_events: AtomicU64::new(0),
            discarded_events: AtomicU64::new(0),
            windows_opened: AtomicU64::new(0),
            windows_completed: AtomicU64::new(0),
            session_id: Uuid::new_v4(),
            session_start: Utc::now(),
        }
    }

    pub fn record_tick_rendered(&self) {
        self.ticks_rendered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tick_skipped(&self) {
        self.ticks_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_pedometer_event(&self) {
        self.pedometer_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_heart_rate_event(&self) {
        self.heart_rate_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_discarded_event(&self) {
        self.discarded_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_window_opened(&self) {
        self.windows_opened.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_window_completed(&self) {
        self.windows_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Get the current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            session_id: self.session_id,
            ticks_rendered: self.ticks_rendered.load(Ordering::Relaxed),
            ticks_skipped: self.ticks_skipped.load(Ordering::Relaxed),
            pedometer_events: self.pedometer_events.load(Ordering::Relaxed),
            heart_rate_events: self.heart_rate_events.load(Ordering::Relaxed),
            discarded_events: self.discarded_events.load(Ordering::Relaxed),
            windows_opened: self.windows_opened.load(Ordering::Relaxed),
            windows_completed: self.windows_completed.load(Ordering::Relaxed),
            session_start: self.session_start,
            session_duration_secs: (Utc::now() - self.session_start).num_seconds().max(0) as u64,
        }
    }

    /// Get a summary string for display.
    pub fn summary(&self) -> String {
        let stats = self.snapshot();
        format!(
            "Session Statistics ({}):\n\
             - Ticks rendered: {}\n\
             - Ticks skipped: {}\n\
             - Pedometer events: {}\n\
             - Heart-rate events: {}\n\
             - Discarded events: {}\n\
             - Measurement windows: {} opened, {} completed\n\
             - Session duration: {} seconds",
            stats.session_id,
            stats.ticks_rendered,
            stats.ticks_skipped,
            stats.pedometer_events,
            stats.heart_rate_events,
            stats.discarded_events,
            stats.windows_opened,
            stats.windows_completed,
            stats.session_duration_secs
        )
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.ticks_rendered.store(0, Ordering::Relaxed);
        self.ticks_skipped.store(0, Ordering::Relaxed);
        self.pedometer_events.store(0, Ordering::Relaxed);
        self.heart_rate_events.store(0, Ordering::Relaxed);
        self.discarded_events.store(0, Ordering::Relaxed);
        self.windows_opened.store(0, Ordering::Relaxed);
        self.windows_completed.store(0, Ordering::Relaxed);
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time copy of the session counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub session_id: Uuid,
    pub ticks_rendered: u64,
    pub ticks_skipped: u64,
    pub pedometer_events: u64,
    pub heart_rate_events: u64,
    pub discarded_events: u64,
    pub windows_opened: u64,
    pub windows_completed: u64,
    pub session_start: DateTime<Utc>,
    pub session_duration_secs: u64,
}

/// Thread-safe shared session counters.
pub type SharedSessionStats = Arc<SessionStats>;

/// Create new shared session counters.
pub fn create_shared_stats() -> SharedSessionStats {
    Arc::new(SessionStats::new())
}
