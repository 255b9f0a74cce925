//! Clock time in packed hour/minute notation.
//!
//! Clinic schedules are written as a decimal-looking number whose integer
//! part is the hour and whose two fractional digits are the minute: `7.05`
//! means five past seven, not seven and five hundredths of an hour. That
//! notation is only accepted and produced at the edges ([`FromStr`],
//! [`fmt::Display`], [`ClockTime::to_packed`]); all arithmetic runs on the
//! two-field structure and is checked.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Minutes in one hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Round to two decimal places, half away from zero.
pub fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split a packed time into its raw `(hours, minutes)` components.
///
/// A bare integer is a pure minute offset: `"75"` gives `(0, 75)`. Otherwise
/// the text is split on the decimal point and both sides are read verbatim as
/// integers, so `"7.05"` and `"7.5"` both give `(7, 5)`. Minute components of
/// the dotted form must have at most two digits and be below 60.
pub fn decompose(value: &str) -> Result<(u32, u32), TimeError> {
    let trimmed = value.trim();
    match trimmed.split_once('.') {
        None => Ok((0, parse_component(value, trimmed)?)),
        Some((hours, minutes)) => {
            if minutes.len() > 2 {
                return Err(TimeError::malformed(value, "more than two minute digits"));
            }
            let hours = parse_component(value, hours)?;
            let minutes = parse_component(value, minutes)?;
            if minutes >= MINUTES_PER_HOUR {
                return Err(TimeError::MinuteOutOfRange { minutes });
            }
            Ok((hours, minutes))
        }
    }
}

fn parse_component(value: &str, digits: &str) -> Result<u32, TimeError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TimeError::malformed(value, "expected unsigned decimal digits"));
    }
    digits
        .parse()
        .map_err(|_| TimeError::malformed(value, "component does not fit in 32 bits"))
}

/// A time of day (or offset from midnight) with minutes kept below 60.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hours: u32,
    minutes: u32,
}

impl ClockTime {
    /// Midnight, `0.00`.
    pub const MIDNIGHT: Self = Self {
        hours: 0,
        minutes: 0,
    };

    /// Create a clock time from already-normalised components.
    pub fn new(hours: u32, minutes: u32) -> Result<Self, TimeError> {
        if minutes >= MINUTES_PER_HOUR {
            return Err(TimeError::MinuteOutOfRange { minutes });
        }
        Ok(Self { hours, minutes })
    }

    /// Create a clock time, carrying excess minutes into the hour.
    pub fn from_parts(hours: u32, minutes: u32) -> Result<Self, TimeError> {
        Self::from_hours(hours).checked_add(Self::from_total_minutes(minutes))
    }

    /// A whole hour, `h.00`.
    pub const fn from_hours(hours: u32) -> Self {
        Self { hours, minutes: 0 }
    }

    /// Create a clock time from a count of minutes since midnight.
    pub const fn from_total_minutes(total: u32) -> Self {
        Self {
            hours: total / MINUTES_PER_HOUR,
            minutes: total % MINUTES_PER_HOUR,
        }
    }

    /// Encode as the packed numeric form, `hours + minutes / 100`.
    pub fn to_packed(self) -> f64 {
        f64::from(self.hours) + f64::from(self.minutes) / 100.0
    }

    pub fn hours(self) -> u32 {
        self.hours
    }

    pub fn minutes(self) -> u32 {
        self.minutes
    }

    /// Minutes since midnight.
    pub fn total_minutes(self) -> u64 {
        u64::from(self.hours) * u64::from(MINUTES_PER_HOUR) + u64::from(self.minutes)
    }

    /// Add two clock times: hours add, minutes add and carry into the hour.
    pub fn checked_add(self, rhs: Self) -> Result<Self, TimeError> {
        // Both minute fields are below 60.
        let minutes = self.minutes + rhs.minutes;
        let hours = self
            .hours
            .checked_add(rhs.hours)
            .and_then(|h| h.checked_add(minutes / MINUTES_PER_HOUR))
            .ok_or(TimeError::Overflow)?;
        Ok(Self {
            hours,
            minutes: minutes % MINUTES_PER_HOUR,
        })
    }

    /// Add a bare minute duration, carrying into the hour.
    pub fn add_minutes(self, minutes: u32) -> Result<Self, TimeError> {
        self.checked_add(Self::from_total_minutes(minutes))
    }

    /// Signed whole-minute difference `self - earlier`.
    pub fn minutes_since(self, earlier: Self) -> i64 {
        // Both totals are below 2^38, so the cast cannot wrap.
        self.total_minutes() as i64 - earlier.total_minutes() as i64
    }

    /// Signed difference `self - earlier` in decimal hours, rounded to two
    /// places.
    ///
    /// Negative when `earlier` is actually later; callers subtract in
    /// chronological order.
    pub fn hours_since(self, earlier: Self) -> f64 {
        round_hundredths(self.minutes_since(earlier) as f64 / f64::from(MINUTES_PER_HOUR))
    }
}

impl FromStr for ClockTime {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hours, minutes) = decompose(s)?;
        Self::from_parts(hours, minutes)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.hours, self.minutes)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ClockTimeVisitor)
    }
}

/// Accepts `"7.05"` and bare minute integers. Floats are refused: `7.5`
/// cannot be told apart from `7.50`, while the quoted `"7.5"` is minute 5.
struct ClockTimeVisitor;

impl<'de> Visitor<'de> for ClockTimeVisitor {
    type Value = ClockTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a packed clock time such as \"7.05\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Err(E::custom(TimeError::malformed(
            v.to_string(),
            "numeric clock times are ambiguous, write a quoted time such as \"7.05\"",
        )))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        u32::try_from(v)
            .map(ClockTime::from_total_minutes)
            .map_err(|_| E::custom(TimeError::malformed(v.to_string(), "value too large")))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map_err(|_| {
                E::custom(TimeError::malformed(
                    v.to_string(),
                    "expected a finite, non-negative value",
                ))
            })
            .and_then(|v| self.visit_u64(v))
    }
}

/// Errors produced when a value does not follow the packed time convention.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// Input text or number is not a packed time.
    #[error("Malformed clock time {value:?}: {reason}")]
    Malformed {
        /// The offending input.
        value: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// Result of an addition has more hours than fit in 32 bits.
    #[error("Clock time overflow: more than {} hours", u32::MAX)]
    Overflow,

    /// Minute component of 60 or more where a normalised time is required.
    #[error("Minute component {minutes} out of range: must be below 60")]
    MinuteOutOfRange {
        /// The offending minute value.
        minutes: u32,
    },
}

impl TimeError {
    fn malformed(value: impl Into<String>, reason: &'static str) -> Self {
        TimeError::Malformed {
            value: value.into(),
            reason,
        }
    }
}
