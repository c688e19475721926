//! Timestamp formatting utilities
//!
//! Provides the `{time}` field of the line layout: a configurable format
//! rendered in a configurable timezone.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Default strftime format: `2025-01-08 10:30:45.123456`
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Timestamp format options
///
/// Named formats are parsed from their kebab-case names; any other string
/// is taken as a strftime format and validated up front.
///
/// # Examples
///
/// ```
/// use logaroo::TimestampFormat;
///
/// let format: TimestampFormat = "rfc3339".parse().unwrap();
/// assert_eq!(format, TimestampFormat::Rfc3339);
///
/// let format: TimestampFormat = "%H:%M".parse().unwrap();
/// assert_eq!(format, TimestampFormat::Custom("%H:%M".to_string()));
///
/// assert!("%Q".parse::<TimestampFormat>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with the configured zone's offset: `2025-01-08T10:30:45.123456+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Unix timestamp in microseconds: `1736332245123456`
    UnixMicros,

    /// Custom strftime format
    Custom(String),
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Custom(DEFAULT_TIMESTAMP_FORMAT.to_string())
    }
}

impl TimestampFormat {
    /// Create a validated strftime format.
    ///
    /// A bare `%f` means microseconds, as in C and Python strftime, and is
    /// stored as chrono's `%6f`. chrono's own `%.6f`, `%3f` and friends are
    /// kept as written.
    pub fn custom(format_str: &str) -> Result<Self> {
        let format_str = microsecond_fraction(format_str);
        if StrftimeItems::new(&format_str).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "timestamp format",
                format!("'{}' is not a valid strftime format", format_str),
            ));
        }
        Ok(TimestampFormat::Custom(format_str))
    }

    /// Format a datetime in its own timezone
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let out = match self {
            TimestampFormat::Iso8601 => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.3fZ")
                .to_string(),
            TimestampFormat::Iso8601Micros => datetime
                .with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%S%.6fZ")
                .to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::UnixMicros => datetime.timestamp_micros().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                write!(out, "{}", datetime.format(format_str)).map_err(|_| {
                    LoggerError::config(
                        "timestamp format",
                        format!("cannot render '{}'", format_str),
                    )
                })?;
                out
            }
        };
        Ok(out)
    }

    /// Format a UTC instant in the given timezone
    pub fn format_in(&self, datetime: &DateTime<Utc>, timezone: Timezone) -> Result<String> {
        match timezone {
            Timezone::Utc => self.format(datetime),
            Timezone::Local => self.format(&datetime.with_timezone(&Local)),
            Timezone::Fixed(offset) => self.format(&datetime.with_timezone(&offset)),
            Timezone::Named(tz) => self.format(&datetime.with_timezone(&tz)),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimestampFormat::Unix | TimestampFormat::UnixMillis | TimestampFormat::UnixMicros
        )
    }

    fn name(&self) -> &str {
        match self {
            TimestampFormat::Iso8601 => "iso8601",
            TimestampFormat::Iso8601Micros => "iso8601-micros",
            TimestampFormat::Rfc3339 => "rfc3339",
            TimestampFormat::Unix => "unix",
            TimestampFormat::UnixMillis => "unix-millis",
            TimestampFormat::UnixMicros => "unix-micros",
            TimestampFormat::Custom(format_str) => format_str,
        }
    }
}

impl FromStr for TimestampFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "iso8601" => Ok(TimestampFormat::Iso8601),
            "iso8601-micros" => Ok(TimestampFormat::Iso8601Micros),
            "rfc3339" => Ok(TimestampFormat::Rfc3339),
            "unix" => Ok(TimestampFormat::Unix),
            "unix-millis" => Ok(TimestampFormat::UnixMillis),
            "unix-micros" => Ok(TimestampFormat::UnixMicros),
            _ => TimestampFormat::custom(s),
        }
    }
}

impl TryFrom<String> for TimestampFormat {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TimestampFormat> for String {
    fn from(format: TimestampFormat) -> Self {
        format.name().to_string()
    }
}

/// Rewrite every bare `%f` specifier to `%6f`
fn microsecond_fraction(format_str: &str) -> String {
    let mut out = String::with_capacity(format_str.len() + 2);
    let mut chars = format_str.chars();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '%' {
            match chars.next() {
                Some('f') => out.push_str("6f"),
                Some(next) => out.push(next),
                None => {}
            }
        }
    }
    out
}

impl fmt::Display for TimestampFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timezone used for the `{time}` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timezone {
    #[default]
    Utc,
    /// The system's local timezone
    Local,
    /// A fixed UTC offset such as `+02:00`
    Fixed(FixedOffset),
    /// An IANA zone such as `Europe/Oslo`, daylight saving included
    Named(Tz),
}

impl FromStr for Timezone {
    type Err = LoggerError;

    /// Accepts `UTC`, `Z`, `local`, `+HH:MM`, `-HHMM`, `UTC+HH:MM` and IANA
    /// names like `Europe/Oslo`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" | "etc/utc" | "gmt" => return Ok(Timezone::Utc),
            "local" => return Ok(Timezone::Local),
            _ => {}
        }

        let offset = trimmed
            .strip_prefix("UTC")
            .or_else(|| trimmed.strip_prefix("utc"))
            .unwrap_or(trimmed);
        if let Some(offset) = parse_offset(offset) {
            return Ok(Timezone::Fixed(offset));
        }
        trimmed.parse::<Tz>().map(Timezone::Named).map_err(|_| {
            LoggerError::config(
                "timezone",
                format!(
                    "cannot parse '{}', use UTC, local, an IANA name like Europe/Oslo \
                     or an offset like +02:00",
                    s
                ),
            )
        })
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, digits) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

impl TryFrom<String> for Timezone {
    type Error = LoggerError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Timezone> for String {
    fn from(timezone: Timezone) -> Self {
        timezone.to_string()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timezone::Utc => f.write_str("UTC"),
            Timezone::Local => f.write_str("local"),
            Timezone::Fixed(offset) => write!(f, "{}", offset),
            Timezone::Named(tz) => f.write_str(tz.name()),
        }
    }
}
