//! Clock face: phrasing, time readings and display strings.
//!
//! This module contains:
//! - The word-clock phraser mapping a time to its spoken phrase
//! - Time readings and the sources they come from
//! - Rendering of the full set of face strings for one tick

pub mod face;
pub mod phrase;
pub mod time;

// Re-export commonly used types
pub use face::{render_face, FaceStrings, ThemeTracker, DAY_NAMES, INTRO};
pub use phrase::{background_theme, phrase, BackgroundTheme, PhraseResult, TimePhrase, HOUR_NAMES};
pub use time::{FixedClock, SystemClock, TimeError, TimeReading, TimeSource};
