//! Clock time handling for departure boards.
//!
//! The transit API publishes departure times as "HH:MM" strings without a
//! date. `ClockTime` is the validated time-of-day used throughout the board.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use serde::{Serialize, Serializer};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use departure_board::domain::ClockTime;
///
/// let time = ClockTime::parse_hhmm("08:15").unwrap();
/// assert_eq!(time.to_string(), "08:15");
/// assert_eq!(time.hour(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Create a clock time from hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parse a time from "HH:MM" format.
    ///
    /// # Examples
    ///
    /// ```
    /// use departure_board::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("0815").is_err());
    /// assert!(ClockTime::parse_hhmm("8:15").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        // chrono alone also accepts "8:15" and padded fields
        let well_formed = s.len() == 5
            && s.bytes().enumerate().all(|(i, b)| match i {
                2 => b == b':',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(TimeError::new(s, "expected HH:MM format"));
        }

        NaiveTime::parse_from_str(s, "%H:%M")
            .map(Self)
            .map_err(|_| TimeError::new(s, "hour or minute out of range"))
    }

    /// The clock time of a reference date-time, seconds dropped.
    pub fn of(datetime: NaiveDateTime) -> Self {
        let time = datetime.time();
        Self::from_hm(time.hour(), time.minute()).unwrap_or(Self(time))
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
