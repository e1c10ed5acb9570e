//! Timestamp formatting for the last-updated field.

use std::fmt;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Supported formats for the last-updated value.
///
/// Stored in settings by its display pattern. Unknown patterns read back as
/// the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    Date,
    /// `YYYY-MM-DD HH:mm`
    DateTimeMinutes,
    /// `YYYY-MM-DD HH:mm:ss`
    #[default]
    DateTimeSeconds,
    /// ISO-8601 instant in UTC with milliseconds.
    Iso,
}

impl DateFormat {
    pub const ALL: [DateFormat; 4] = [
        DateFormat::Date,
        DateFormat::DateTimeMinutes,
        DateFormat::DateTimeSeconds,
        DateFormat::Iso,
    ];

    /// The pattern string used in the settings record.
    pub fn as_str(self) -> &'static str {
        match self {
            DateFormat::Date => "YYYY-MM-DD",
            DateFormat::DateTimeMinutes => "YYYY-MM-DD HH:mm",
            DateFormat::DateTimeSeconds => "YYYY-MM-DD HH:mm:ss",
            DateFormat::Iso => "ISO",
        }
    }

    /// Read a settings value, falling back to the default for unknown input.
    pub fn from_setting(value: &str) -> Self {
        Self::ALL.into_iter().find(|f| f.as_str() == value).unwrap_or_else(|| {
            tracing::debug!(value, "unknown date format, using default");
            Self::default()
        })
    }

    /// An example rendering, for settings listings.
    pub fn example(self) -> &'static str {
        match self {
            DateFormat::Date => "2024-01-15",
            DateFormat::DateTimeMinutes => "2024-01-15 14:30",
            DateFormat::DateTimeSeconds => "2024-01-15 14:30:25",
            DateFormat::Iso => "2024-01-15T14:30:25.123Z",
        }
    }

    /// Render `instant` in this format.
    ///
    /// Calendar patterns use the instant's own offset; `Iso` converts to UTC.
    pub fn format(self, instant: &DateTime<FixedOffset>) -> String {
        match self {
            DateFormat::Date => instant.format("%Y-%m-%d").to_string(),
            DateFormat::DateTimeMinutes => instant.format("%Y-%m-%d %H:%M").to_string(),
            DateFormat::DateTimeSeconds => instant.format("%Y-%m-%d %H:%M:%S").to_string(),
            DateFormat::Iso => {
                instant.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
            }
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DateFormat {
    fn from(value: String) -> Self {
        Self::from_setting(&value)
    }
}

impl From<DateFormat> for String {
    fn from(value: DateFormat) -> Self {
        value.as_str().to_string()
    }
}

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
