//! Conversions from raw event fields to bindable values
//!
//! Each conversion is a plain function of its configured tag. Config strings
//! are parsed once, when the owning parameter is built; only the per-event
//! conversion runs at bind time.

use std::fmt::Write;

use chrono::format::{Fixed, Item, Numeric, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::Value;

/// How a body is decoded into a string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDecoding {
    /// UTF-8, invalid input is an error
    #[default]
    Utf8,
    /// UTF-8, invalid sequences are replaced with U+FFFD
    Utf8Lossy,
}

impl TextDecoding {
    /// Parse a body `string` config. Absent or empty selects strict UTF-8.
    pub fn from_config(config: Option<&str>) -> Result<Self, String> {
        match config.map(str::trim) {
            None | Some("") => Ok(Self::Utf8),
            Some(c) if c.eq_ignore_ascii_case("utf-8") || c.eq_ignore_ascii_case("utf8") => {
                Ok(Self::Utf8)
            }
            Some(c) if c.eq_ignore_ascii_case("utf-8-lossy") => Ok(Self::Utf8Lossy),
            Some(other) => Err(format!(
                "unsupported body encoding '{}', expected utf-8 or utf-8-lossy",
                other
            )),
        }
    }

    /// Decode bytes into a string value
    pub fn decode(&self, raw: &[u8]) -> Result<Value, String> {
        match self {
            Self::Utf8 => std::str::from_utf8(raw)
                .map(Value::from)
                .map_err(|e| format!("body is not valid UTF-8: {}", e)),
            Self::Utf8Lossy => Ok(Value::String(String::from_utf8_lossy(raw).into_owned())),
        }
    }
}

/// Format used to parse a `date` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormat {
    /// chrono strftime pattern
    Pattern {
        /// The pattern text
        pattern: String,
        /// Whether the pattern carries time-of-day fields
        has_time: bool,
    },
    /// RFC 3339 timestamp with offset
    Rfc3339,
    /// Milliseconds since the Unix epoch
    EpochMillis,
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::Pattern {
            pattern: Self::DEFAULT_PATTERN.to_string(),
            has_time: true,
        }
    }
}

impl DateFormat {
    /// Pattern used when a `date` parameter has no config
    pub const DEFAULT_PATTERN: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Parse a `date` config string
    pub fn from_config(config: Option<&str>) -> Result<Self, String> {
        let pattern = match config {
            None => return Ok(Self::default()),
            Some(c) if c.trim().is_empty() => return Ok(Self::default()),
            Some(c) => c,
        };

        match pattern.trim() {
            "rfc3339" => return Ok(Self::Rfc3339),
            "epoch_millis" => return Ok(Self::EpochMillis),
            _ => {}
        }

        let mut has_time = false;
        for item in StrftimeItems::new(pattern) {
            match item {
                Item::Error => {
                    return Err(format!("invalid date pattern '{}'", pattern));
                }
                Item::Numeric(
                    Numeric::Hour
                    | Numeric::Hour12
                    | Numeric::Minute
                    | Numeric::Second
                    | Numeric::Timestamp,
                    _,
                )
                | Item::Fixed(Fixed::RFC3339 | Fixed::RFC2822) => has_time = true,
                _ => {}
            }
        }

        let format = Self::Pattern {
            pattern: pattern.to_string(),
            has_time,
        };
        format.check_round_trip(pattern)?;
        Ok(format)
    }

    /// Reference instant used to check that a pattern can parse what it formats
    const REFERENCE_SECS: i64 = 1_710_683_130;

    // A pattern that cannot identify a full date (`%Y`, `%Y-%m`, `%H:%M`)
    // formats fine but never parses, so it is rejected here.
    fn check_round_trip(&self, pattern: &str) -> Result<(), String> {
        let reference = DateTime::from_timestamp(Self::REFERENCE_SECS, 0)
            .ok_or_else(|| "reference instant out of range".to_string())?
            .fixed_offset();

        let mut formatted = String::new();
        write!(formatted, "{}", reference.format(pattern))
            .map_err(|_| format!("date pattern '{}' cannot be formatted", pattern))?;

        self.parse(&formatted).map(|_| ()).map_err(|e| {
            format!(
                "date pattern '{}' does not describe a complete date: {}",
                pattern, e
            )
        })
    }

    /// Parse a raw header value
    pub fn parse(&self, raw: &str) -> Result<Value, String> {
        match self {
            Self::Pattern {
                pattern,
                has_time: true,
            } => NaiveDateTime::parse_from_str(raw, pattern)
                .map(Value::DateTime)
                .map_err(|e| format!("cannot parse '{}' with pattern '{}': {}", raw, pattern, e)),
            Self::Pattern {
                pattern,
                has_time: false,
            } => NaiveDate::parse_from_str(raw, pattern)
                .map(Value::Date)
                .map_err(|e| format!("cannot parse '{}' with pattern '{}': {}", raw, pattern, e)),
            Self::Rfc3339 => DateTime::parse_from_rfc3339(raw)
                .map(|dt| Value::DateTimeTz(dt.with_timezone(&Utc)))
                .map_err(|e| format!("cannot parse '{}' as RFC 3339: {}", raw, e)),
            Self::EpochMillis => {
                let millis: i64 = raw
                    .parse()
                    .map_err(|e| format!("cannot parse '{}' as epoch millis: {}", raw, e))?;
                DateTime::from_timestamp_millis(millis)
                    .map(Value::DateTimeTz)
                    .ok_or_else(|| format!("epoch millis {} out of range", millis))
            }
        }
    }
}

/// Parse a base-10 `long`
pub fn parse_long(raw: &str) -> Result<Value, String> {
    raw.parse::<i64>()
        .map(Value::Int64)
        .map_err(|e| format!("cannot parse '{}' as long: {}", raw, e))
}

/// Parse a base-10 `int`
pub fn parse_int(raw: &str) -> Result<Value, String> {
    raw.parse::<i32>()
        .map(Value::Int32)
        .map_err(|e| format!("cannot parse '{}' as int: {}", raw, e))
}

/// Parse a decimal `double`
pub fn parse_double(raw: &str) -> Result<Value, String> {
    raw.parse::<f64>()
        .map(Value::Float64)
        .map_err(|e| format!("cannot parse '{}' as double: {}", raw, e))
}

/// Parse a decimal `float`
pub fn parse_float(raw: &str) -> Result<Value, String> {
    raw.parse::<f32>()
        .map(Value::Float32)
        .map_err(|e| format!("cannot parse '{}' as float: {}", raw, e))
}
