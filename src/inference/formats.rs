//! Date and time pattern detection for string values

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Recognized temporal string format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    /// ISO 8601 date (YYYY-MM-DD)
    Date,
    /// ISO 8601 date-time (YYYY-MM-DDTHH:MM[:SS])
    DateTime,
    /// Time of day (HH:MM:SS)
    Time,
}

impl Format {
    /// Get the JSON Schema format string for this format
    pub fn as_json_schema_format(&self) -> &'static str {
        match self {
            Format::Date => "date",
            Format::DateTime => "date-time",
            Format::Time => "time",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_json_schema_format())
    }
}

// `[0-9]`, not `\d`: Unicode digits would break the byte offsets used below
static DATE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

static DATETIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[0-9]{4}-[0-9]{2}-[0-9]{2}[T ][0-9]{2}:[0-9]{2}(:[0-9]{2}(\.[0-9]+)?)?(Z|[+-][0-9]{2}:?[0-9]{2})?$",
    )
    .expect("valid date-time regex")
});

static TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{2}:[0-9]{2}:[0-9]{2}(\.[0-9]+)?$").expect("valid time regex")
});

/// Detect a date, date-time, or time string
///
/// Matches must also be valid calendar values: `2024-02-30` is rejected.
pub fn detect_format(value: &str) -> Option<Format> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    // DateTime before Date (more specific)
    if DATETIME_REGEX.is_match(value) {
        let valid = match (value.get(..10), value.get(11..)) {
            (Some(date), Some(time)) => valid_date(date) && valid_time(time),
            _ => false,
        };
        return valid.then_some(Format::DateTime);
    }

    if DATE_REGEX.is_match(value) {
        return valid_date(value).then_some(Format::Date);
    }

    if TIME_REGEX.is_match(value) {
        return valid_time(value).then_some(Format::Time);
    }

    None
}

fn valid_date(date: &str) -> bool {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
}

fn valid_time(time: &str) -> bool {
    // Only the HH:MM[:SS] prefix matters; fractions and offsets were checked by the regex
    let has_seconds = time.as_bytes().get(5) == Some(&b':');
    let (prefix, pattern) = if has_seconds {
        (time.get(..8), "%H:%M:%S")
    } else {
        (time.get(..5), "%H:%M")
    };
    prefix.is_some_and(|prefix| NaiveTime::parse_from_str(prefix, pattern).is_ok())
}
