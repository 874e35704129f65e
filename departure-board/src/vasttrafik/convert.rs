//! Conversion from Västtrafik DTOs to domain types.

use crate::domain::{ClockTime, DepartureRecord, Stop, TimeError};

use super::types::{DepartureBoard, LocationList, RawDeparture};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConversionError {
    /// A departure carried an unparseable time
    #[error(transparent)]
    InvalidTime(#[from] TimeError),

    /// The API answered with an error body instead of a board
    #[error("board rejected ({code}): {message}")]
    Rejected { code: String, message: String },
}

/// Convert stop candidates to domain stops, keeping the API's ranking.
pub fn convert_locations(list: LocationList) -> Vec<Stop> {
    list.stop_location
        .into_vec()
        .into_iter()
        .map(|location| Stop::new(location.id, location.name))
        .collect()
}

/// Convert a departure board to normalized records, in API order.
pub fn convert_board(board: &DepartureBoard) -> Result<Vec<DepartureRecord>, ConversionError> {
    if let Some(code) = &board.error {
        return Err(ConversionError::Rejected {
            code: code.clone(),
            message: board.error_text.clone().unwrap_or_default(),
        });
    }

    board
        .departure
        .as_slice()
        .iter()
        .map(convert_departure)
        .collect()
}

/// Convert a single departure.
///
/// An empty `rtTime` counts as no estimate.
pub fn convert_departure(raw: &RawDeparture) -> Result<DepartureRecord, ConversionError> {
    let scheduled = ClockTime::parse_hhmm(&raw.time)?;

    let estimate = match raw.rt_time.as_deref() {
        None | Some("") => None,
        Some(rt_time) => Some(ClockTime::parse_hhmm(rt_time)?),
    };

    Ok(DepartureRecord::new(
        scheduled,
        estimate,
        raw.sname.clone(),
        raw.track.clone(),
        raw.direction.clone(),
    ))
}
