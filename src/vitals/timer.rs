//! Recurring timer that re-opens the heart-rate measurement window.

use std::time::{Duration, Instant};

/// Default period between measurement windows.
pub const DEFAULT_WINDOW_PERIOD: Duration = Duration::from_secs(30 * 60);

/// A polled, fixed-period timer.
///
/// The host checks it from its event loop; once cancelled it never fires again.
#[derive(Debug, Clone)]
pub struct WindowTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl WindowTimer {
    /// Arm the timer so it first fires one period after `now`.
    pub fn new(period: Duration, now: Instant) -> Self {
        let period = period.max(Duration::from_millis(1));
        Self {
            period,
            next_due: Some(now + period),
        }
    }

    /// Returns true if the timer fired since the last poll and schedules the
    /// next period. Missed periods collapse into a single firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let mut next = due + self.period;
        while next <= now {
            next += self.period;
        }
        self.next_due = Some(next);
        true
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.next_due.is_none()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left until the next firing.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_period() {
        let start = Instant::now();
        let mut timer = WindowTimer::new(Duration::from_secs(60), start);

        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_secs(59)));
        assert!(timer.poll(start + Duration::from_secs(60)));
        assert!(!timer.poll(start + Duration::from_secs(61)));
        assert!(timer.poll(start + Duration::from_secs(120)));
    }

    #[test]
    fn test_missed_periods_collapse() {
        let start = Instant::now();
        let mut timer = WindowTimer::new(Duration::from_secs(10), start);

        assert!(timer.poll(start + Duration::from_secs(55)));
        assert!(!timer.poll(start + Duration::from_secs(59)));
        assert_eq!(
            timer.remaining(start + Duration::from_secs(59)),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_cancel() {
        let start = Instant::now();
        let mut timer = WindowTimer::new(DEFAULT_WINDOW_PERIOD, start);
        timer.cancel();
        assert!(timer.is_cancelled());
        assert!(!timer.poll(start + DEFAULT_WINDOW_PERIOD * 2));
        assert_eq!(timer.remaining(start), None);
    }
}
