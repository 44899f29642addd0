//! Five-minute "spoken clock" phrasing.
//!
//! Maps a wall-clock hour and minute to the German word-clock phrase
//! ("fünf vor halb", "dreiviertel", ...) plus the hour the phrase refers to.
//! From twenty-three minutes past onwards the phrase names the next hour.

use serde::{Deserialize, Serialize};

/// Display names of the hours, indexed 0 = twelve through 11 = eleven.
pub const HOUR_NAMES: [&str; 12] = [
    "ZWÖLF", "EINS", "ZWEI", "DREI", "VIER", "FÜNF", "SECHS", "SIEBEN", "ACHT", "NEUN", "ZEHN",
    "ELF",
];

/// Upper (exclusive) minute bound of each bucket, paired with its phrase.
const BUCKETS: [(u8, TimePhrase); 12] = [
    (3, TimePhrase::Exact),
    (8, TimePhrase::FivePast),
    (13, TimePhrase::TenPast),
    (18, TimePhrase::QuarterPast),
    (23, TimePhrase::TwentyPast),
    (28, TimePhrase::FiveToHalf),
    (33, TimePhrase::Half),
    (38, TimePhrase::FivePastHalf),
    (43, TimePhrase::TwentyTo),
    (48, TimePhrase::ThreeQuarter),
    (53, TimePhrase::TenTo),
    (58, TimePhrase::FiveTo),
];

/// First minute at which the phrase refers to the following hour.
const NEXT_HOUR_FROM_MINUTE: u8 = 23;

/// One of the twelve phrases of the word clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimePhrase {
    Exact,
    FivePast,
    TenPast,
    QuarterPast,
    TwentyPast,
    FiveToHalf,
    Half,
    FivePastHalf,
    TwentyTo,
    ThreeQuarter,
    TenTo,
    FiveTo,
}

impl TimePhrase {
    /// All phrases in clock order.
    pub const ALL: [TimePhrase; 12] = [
        TimePhrase::Exact,
        TimePhrase::FivePast,
        TimePhrase::TenPast,
        TimePhrase::QuarterPast,
        TimePhrase::TwentyPast,
        TimePhrase::FiveToHalf,
        TimePhrase::Half,
        TimePhrase::FivePastHalf,
        TimePhrase::TwentyTo,
        TimePhrase::ThreeQuarter,
        TimePhrase::TenTo,
        TimePhrase::FiveTo,
    ];

    /// The localized text shown on the face.
    pub fn as_str(self) -> &'static str {
        match self {
            TimePhrase::Exact => "genau",
            TimePhrase::FivePast => "fünf nach",
            TimePhrase::TenPast => "zehn nach",
            TimePhrase::QuarterPast => "viertel nach",
            TimePhrase::TwentyPast => "zwanzig nach",
            TimePhrase::FiveToHalf => "fünf vor halb",
            TimePhrase::Half => "halb",
            TimePhrase::FivePastHalf => "fünf nach halb",
            TimePhrase::TwentyTo => "zwanzig vor",
            TimePhrase::ThreeQuarter => "dreiviertel",
            TimePhrase::TenTo => "zehn vor",
            TimePhrase::FiveTo => "fünf vor",
        }
    }
}

impl std::fmt::Display for TimePhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Background image category selected by time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BackgroundTheme {
    Night,
    Morning,
    Midday,
    Afternoon,
}

impl BackgroundTheme {
    /// Stable numeric ID used by the display layer to pick an asset.
    pub fn id(self) -> u8 {
        match self {
            BackgroundTheme::Morning => 1,
            BackgroundTheme::Midday => 2,
            BackgroundTheme::Afternoon => 3,
            BackgroundTheme::Night => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BackgroundTheme::Night => "night",
            BackgroundTheme::Morning => "morning",
            BackgroundTheme::Midday => "midday",
            BackgroundTheme::Afternoon => "afternoon",
        }
    }
}

/// Result of phrasing one (hour, minute) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseResult {
    /// Phrase preceding the hour name
    pub prefix: TimePhrase,
    /// Index into [`HOUR_NAMES`] of the hour the phrase refers to
    pub resolved_hour_index: u8,
    /// Background theme for the (unresolved) 24-hour value
    pub background_theme: BackgroundTheme,
}

impl PhraseResult {
    pub fn prefix_phrase(&self) -> &'static str {
        self.prefix.as_str()
    }

    /// Name of the resolved hour. Out-of-range indices wrap around the dial.
    pub fn hour_name(&self) -> &'static str {
        HOUR_NAMES[(self.resolved_hour_index % 12) as usize]
    }
}

/// Phrase a 24-hour wall-clock time.
///
/// Total over every input: the hour is reduced modulo 12 and any minute at or
/// beyond 58 falls into the trailing "genau" bucket of the next hour.
pub fn phrase(hour24: u8, minute: u8) -> PhraseResult {
    let prefix = BUCKETS
        .iter()
        .find(|(bound, _)| minute < *bound)
        .map(|(_, phrase)| *phrase)
        .unwrap_or(TimePhrase::Exact);

    let hour12 = hour24 % 12;
    let resolved_hour_index = if minute >= NEXT_HOUR_FROM_MINUTE {
        (hour12 + 1) % 12
    } else {
        hour12
    };

    PhraseResult {
        prefix,
        resolved_hour_index,
        background_theme: background_theme(hour24),
    }
}

/// Pick the background theme for a 24-hour value.
pub fn background_theme(hour24: u8) -> BackgroundTheme {
    if hour24 > 20 || hour24 < 3 {
        BackgroundTheme::Night
    } else if hour24 < 9 {
        BackgroundTheme::Morning
    } else if hour24 < 15 {
        BackgroundTheme::Midday
    } else {
        BackgroundTheme::Afternoon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_times() {
        let result = phrase(14, 27);
        assert_eq!(result.prefix_phrase(), "fünf vor halb");
        assert_eq!(result.resolved_hour_index, 3);
        assert_eq!(result.hour_name(), "DREI");

        let result = phrase(14, 0);
        assert_eq!(result.prefix_phrase(), "genau");
        assert_eq!(result.resolved_hour_index, 2);
        assert_eq!(result.hour_name(), "ZWEI");
    }

    #[test]
    fn test_bucket_boundaries_favor_later_phrase() {
        assert_eq!(phrase(10, 2).prefix, TimePhrase::Exact);
        assert_eq!(phrase(10, 3).prefix, TimePhrase::FivePast);
        assert_eq!(phrase(10, 7).prefix, TimePhrase::FivePast);
        assert_eq!(phrase(10, 8).prefix, TimePhrase::TenPast);
        assert_eq!(phrase(10, 22).prefix, TimePhrase::TwentyPast);
        assert_eq!(phrase(10, 23).prefix, TimePhrase::FiveToHalf);
        assert_eq!(phrase(10, 45).prefix, TimePhrase::ThreeQuarter);
        assert_eq!(phrase(10, 57).prefix, TimePhrase::FiveTo);
        assert_eq!(phrase(10, 58).prefix, TimePhrase::Exact);
    }

    #[test]
    fn test_phrase_depends_on_minute_only() {
        for minute in 0..60 {
            let expected = phrase(0, minute).prefix;
            for hour in 1..24 {
                assert_eq!(phrase(hour, minute).prefix, expected, "{hour}:{minute}");
            }
            assert!(TimePhrase::ALL.contains(&expected));
        }
    }

    #[test]
    fn test_each_bucket_spans_five_minutes() {
        // "genau" is split across 0..3 and 58..60
        for phrase_kind in TimePhrase::ALL {
            let count = (0..60u8)
                .filter(|m| phrase(9, *m).prefix == phrase_kind)
                .count();
            assert_eq!(count, 5, "{phrase_kind}");
        }
    }

    #[test]
    fn test_resolved_hour() {
        for hour in 0..24u8 {
            let hour12 = hour % 12;
            for minute in 0..23 {
                assert_eq!(phrase(hour, minute).resolved_hour_index, hour12);
            }
            for minute in 23..60 {
                assert_eq!(phrase(hour, minute).resolved_hour_index, (hour12 + 1) % 12);
            }
        }
    }

    #[test]
    fn test_hour_wraps_to_twelve() {
        let result = phrase(23, 40);
        assert_eq!(result.resolved_hour_index, 0);
        assert_eq!(result.hour_name(), "ZWÖLF");

        let result = phrase(11, 59);
        assert_eq!(result.prefix, TimePhrase::Exact);
        assert_eq!(result.hour_name(), "ZWÖLF");
    }

    #[test]
    fn test_hour_name_wraps_out_of_range_index() {
        let json = r#"{"prefix":"Half","resolved_hour_index":12,"background_theme":"Night"}"#;
        let result: PhraseResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.hour_name(), "ZWÖLF");

        let result = PhraseResult {
            resolved_hour_index: 255,
            ..phrase(10, 0)
        };
        assert_eq!(result.hour_name(), HOUR_NAMES[255 % 12]);
    }

    #[test]
    fn test_background_theme_ranges() {
        for hour in 0..24u8 {
            let expected = match hour {
                21..=23 | 0..=2 => BackgroundTheme::Night,
                3..=8 => BackgroundTheme::Morning,
                9..=14 => BackgroundTheme::Midday,
                _ => BackgroundTheme::Afternoon,
            };
            assert_eq!(background_theme(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn test_theme_uses_unresolved_hour() {
        // 20:45 reads "dreiviertel NEUN" but is still afternoon
        let result = phrase(20, 45);
        assert_eq!(result.hour_name(), "NEUN");
        assert_eq!(result.background_theme, BackgroundTheme::Afternoon);
    }
}
