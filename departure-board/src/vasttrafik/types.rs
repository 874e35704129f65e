//! Västtrafik REST v2 response DTOs.
//!
//! These types map directly to the JSON bodies of the token, location search
//! and departure board endpoints. The v2 API collapses single-element lists
//! into a bare object and drops the key entirely when a list is empty, so
//! every list field goes through [`OneOrMany`].

use serde::Deserialize;

/// A JSON value that may be a list, a single object, or absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    /// Returns the elements in API order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }

    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => std::slice::from_ref(item),
        }
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// Response from `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    /// Lifetime of the token in seconds.
    pub expires_in: Option<u64>,
}

/// Response from `GET /location.name`.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationNameResponse {
    #[serde(rename = "LocationList")]
    pub location_list: LocationList,
}

/// Search results. Addresses and points of interest arrive as
/// `CoordLocation` and are skipped; they are never boarding locations.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationList {
    /// Stop candidates, best match first.
    #[serde(rename = "StopLocation", default)]
    pub stop_location: OneOrMany<StopLocation>,
}

/// A stop candidate from a name search.
#[derive(Debug, Clone, Deserialize)]
pub struct StopLocation {
    pub id: String,
    pub name: String,
}

/// Response from `GET /departureBoard`.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartureBoardResponse {
    #[serde(rename = "DepartureBoard")]
    pub departure_board: DepartureBoard,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepartureBoard {
    #[serde(rename = "Departure", default)]
    pub departure: OneOrMany<RawDeparture>,

    /// Error code when the API rejected the query.
    pub error: Option<String>,

    #[serde(rename = "errorText")]
    pub error_text: Option<String>,
}

/// A single departure as published by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDeparture {
    /// Scheduled time ("HH:MM").
    pub time: String,

    /// Real-time estimate ("HH:MM"), only present when live data exists.
    #[serde(rename = "rtTime")]
    pub rt_time: Option<String>,

    /// Short line name, e.g. "16".
    #[serde(default)]
    pub sname: String,

    #[serde(default)]
    pub track: String,

    #[serde(default)]
    pub direction: String,
}
