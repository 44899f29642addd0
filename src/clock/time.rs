//! Wall-clock readings handed to the core on every tick.

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single wall-clock reading.
///
/// Supplied fresh by the host on every tick; the core never keeps one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReading {
    /// Hour on the 12-hour dial, 0..11 (0 = twelve o'clock)
    pub hour12: u8,
    /// Hour of day, 0..23
    pub hour24: u8,
    pub minute: u8,
    pub second: u8,
    /// Day of week, 0 = Sunday .. 6 = Saturday
    pub weekday: u8,
    /// Day of month, 1..31
    pub day: u8,
    /// Month, 1..12
    pub month: u8,
    pub year: i32,
}

impl TimeReading {
    /// Build a reading from calendar fields, deriving the weekday.
    pub fn new(
        year: i32,
        month: u8,
        day: u8,
        hour24: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, TimeError> {
        let datetime = NaiveDate::from_ymd_opt(year, month.into(), day.into())
            .and_then(|date| date.and_hms_opt(hour24.into(), minute.into(), second.into()))
            .ok_or(TimeError::InvalidDate {
                year,
                month,
                day,
                hour24,
                minute,
                second,
            })?;
        Ok(Self::from_datetime(&datetime))
    }

    /// Build a reading from anything carrying a date and a time of day.
    pub fn from_datetime<T: Datelike + Timelike>(datetime: &T) -> Self {
        let hour24 = datetime.hour() as u8;
        Self {
            hour12: hour24 % 12,
            hour24,
            minute: datetime.minute() as u8,
            second: datetime.second() as u8,
            weekday: datetime.weekday().num_days_from_sunday() as u8,
            day: datetime.day() as u8,
            month: datetime.month() as u8,
            year: datetime.year(),
        }
    }

    /// Parse `YYYY-MM-DD HH:MM:SS` (seconds optional).
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let trimmed = s.trim();
        let datetime = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
            .map_err(|e| TimeError::Parse(format!("{trimmed:?}: {e}")))?;
        Ok(Self::from_datetime(&datetime))
    }
}

/// Errors raised while obtaining the current time.
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("time source unavailable: {0}")]
    Unavailable(String),
    #[error("invalid date {year:04}-{month:02}-{day:02} {hour24:02}:{minute:02}:{second:02}")]
    InvalidDate {
        year: i32,
        month: u8,
        day: u8,
        hour24: u8,
        minute: u8,
        second: u8,
    },
    #[error("could not parse time {0}")]
    Parse(String),
}

/// Where the host obtains the current wall-clock time from.
pub trait TimeSource {
    fn now(&self) -> Result<TimeReading, TimeError>;
}

/// Local system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> Result<TimeReading, TimeError> {
        Ok(TimeReading::from_datetime(&Local::now()))
    }
}

/// A clock frozen at one reading, for previews and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub TimeReading);

impl TimeSource for FixedClock {
    fn now(&self) -> Result<TimeReading, TimeError> {
        Ok(self.0)
    }
}
