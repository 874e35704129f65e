//! Normalized departure records.

use std::collections::BTreeMap;

use serde::Serialize;

use super::ClockTime;

/// A single upcoming departure, ready for display.
///
/// `departure_time` is always one of the two source times: the real-time
/// estimate when the API supplied one, else the scheduled time. Records are
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartureRecord {
    expected_departure_time: ClockTime,
    real_time_departure_time: Option<ClockTime>,
    departure_time: ClockTime,
    line_short_name: String,
    track: String,
    direction: String,
}

impl DepartureRecord {
    pub fn new(
        expected_departure_time: ClockTime,
        real_time_departure_time: Option<ClockTime>,
        line_short_name: impl Into<String>,
        track: impl Into<String>,
        direction: impl Into<String>,
    ) -> Self {
        Self {
            expected_departure_time,
            real_time_departure_time,
            departure_time: real_time_departure_time.unwrap_or(expected_departure_time),
            line_short_name: line_short_name.into(),
            track: track.into(),
            direction: direction.into(),
        }
    }

    /// Scheduled departure time.
    pub fn expected_departure_time(&self) -> ClockTime {
        self.expected_departure_time
    }

    /// Real-time estimate, when the API supplied one.
    pub fn real_time_departure_time(&self) -> Option<ClockTime> {
        self.real_time_departure_time
    }

    /// The effective time to display.
    pub fn departure_time(&self) -> ClockTime {
        self.departure_time
    }

    pub fn line_short_name(&self) -> &str {
        &self.line_short_name
    }

    pub fn track(&self) -> &str {
        &self.track
    }

    pub fn direction(&self) -> &str {
        &self.direction
    }

    /// Whether a real-time estimate superseded the schedule.
    pub fn is_real_time(&self) -> bool {
        self.real_time_departure_time.is_some()
    }

    /// Group records by track, keeping their original order within each track.
    pub fn partition_by_track(records: &[DepartureRecord]) -> BTreeMap<&str, Vec<&DepartureRecord>> {
        let mut tracks: BTreeMap<&str, Vec<&DepartureRecord>> = BTreeMap::new();
        for record in records {
            tracks.entry(record.track.as_str()).or_default().push(record);
        }
        tracks
    }
}
