//! Data transfer objects for web responses.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::DepartureRecord;

use super::state::BoardSnapshot;

/// Overall state of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardStatus {
    /// No run has completed yet
    Pending,
    Ok,
    Error,
}

/// Failure details for the board.
#[derive(Debug, Serialize)]
pub struct BoardFailure {
    /// Stage that failed: authenticate, resolve_stop or fetch_departures
    pub stage: &'static str,
    pub message: String,
    pub at: NaiveDateTime,
}

/// Response for `GET /departures`.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub status: BoardStatus,

    /// Configured stop name
    pub stop: String,

    pub fetched_at: Option<NaiveDateTime>,

    pub error: Option<BoardFailure>,

    /// Departures grouped by track, in API order within each track
    pub tracks: BTreeMap<String, Vec<DepartureRecord>>,
}

impl BoardResponse {
    pub fn from_snapshot(stop: &str, snapshot: BoardSnapshot) -> Self {
        let status = match (&snapshot.failure, snapshot.fetched_at) {
            (Some(_), _) => BoardStatus::Error,
            (None, Some(_)) => BoardStatus::Ok,
            (None, None) => BoardStatus::Pending,
        };

        let tracks = DepartureRecord::partition_by_track(&snapshot.records)
            .into_iter()
            .map(|(track, records)| (track.to_string(), records.into_iter().cloned().collect()))
            .collect();

        Self {
            status,
            stop: stop.to_string(),
            fetched_at: snapshot.fetched_at,
            error: snapshot.failure.map(|f| BoardFailure {
                stage: f.stage,
                message: f.message,
                at: f.at,
            }),
            tracks,
        }
    }
}

/// Error body for requests that could not be served.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
