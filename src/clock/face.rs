//! Formatting of the display strings for one tick.

use crate::clock::phrase::{phrase, BackgroundTheme};
use crate::clock::time::TimeReading;
use crate::vitals::Vitals;
use serde::Serialize;

/// Fixed lead-in shown above the phrase.
pub const INTRO: &str = "Es ist";

/// Short weekday names, 0 = Sunday.
pub const DAY_NAMES: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];

/// Everything the display layer shows for one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaceStrings {
    pub intro: &'static str,
    /// Phrase such as "viertel nach"
    pub prefix: &'static str,
    /// Resolved hour name such as "ZEHN"
    pub hour: &'static str,
    /// Digital time and date
    pub clock: String,
    pub steps: String,
    pub pulse: String,
    pub battery: String,
    pub theme: BackgroundTheme,
    /// Whether the background needs to be swapped
    pub theme_changed: bool,
}

/// Remembers the last theme shown so unchanged backgrounds are not reloaded.
#[derive(Debug, Default)]
pub struct ThemeTracker {
    current: Option<BackgroundTheme>,
}

impl ThemeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `theme` as shown and report whether it differs from the last one.
    pub fn update(&mut self, theme: BackgroundTheme) -> bool {
        if self.current == Some(theme) {
            return false;
        }
        self.current = Some(theme);
        true
    }

    pub fn current(&self) -> Option<BackgroundTheme> {
        self.current
    }
}

/// Render the face for one reading.
///
/// `theme_changed` is always `true` here; [`ThemeTracker`] decides it when
/// rendering runs inside the watch core.
pub fn render_face(
    reading: &TimeReading,
    ambient: bool,
    vitals: &Vitals,
    battery_percent: u8,
) -> FaceStrings {
    let phrased = phrase(reading.hour24, reading.minute);

    FaceStrings {
        intro: INTRO,
        prefix: phrased.prefix_phrase(),
        hour: phrased.hour_name(),
        clock: format_clock(reading, ambient),
        steps: format_steps(vitals.step_count, vitals.walked_distance_meters),
        pulse: format_pulse(vitals.current_pulse),
        battery: format_battery(battery_percent),
        theme: phrased.background_theme,
        theme_changed: true,
    }
}

/// Digital time and date; ambient mode drops the seconds.
pub fn format_clock(reading: &TimeReading, ambient: bool) -> String {
    let day_name = DAY_NAMES[(reading.weekday % 7) as usize];
    if ambient {
        format!(
            "{:02}:{:02}, {}, {:02}.{:02}.{:04}",
            reading.hour24, reading.minute, day_name, reading.day, reading.month, reading.year
        )
    } else {
        format!(
            "{:02}:{:02}:{:02}, {}, {:02}.{:02}.{:04}",
            reading.hour24,
            reading.minute,
            reading.second,
            day_name,
            reading.day,
            reading.month,
            reading.year
        )
    }
}

pub fn format_steps(step_count: u32, walked_distance_meters: f32) -> String {
    format!(
        "Schritte: {} ({:.1} km)",
        step_count,
        walked_distance_meters * 0.001
    )
}

pub fn format_pulse(current_pulse: u32) -> String {
    format!("Puls: {current_pulse}/min")
}

pub fn format_battery(battery_percent: u8) -> String {
    format!("Batterie: {battery_percent}%")
}

impl std::fmt::Display for FaceStrings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.intro)?;
        writeln!(f, "{}", self.prefix)?;
        writeln!(f, "{}", self.hour)?;
        writeln!(f, "{}", self.clock)?;
        writeln!(f, "{}", self.steps)?;
        writeln!(f, "{}", self.pulse)?;
        write!(f, "{}", self.battery)
    }
}
