//! Västtrafik REST v2 client.
//!
//! This module provides an HTTP client for the Västtrafik public transport
//! API, which publishes stop search and departure boards for western Sweden.
//!
//! Key characteristics of the API:
//! - Every request needs a short-lived bearer token obtained by a
//!   client-credentials exchange against `/token`
//! - Times are "HH:MM" strings (Swedish local time), with `rtTime` present
//!   only when a live estimate exists
//! - Single-element lists are sent as a bare object and empty lists are
//!   omitted

mod client;
mod convert;
mod error;
#[cfg(test)]
pub(crate) mod fake;
#[cfg(test)]
pub(crate) mod mock;
mod types;

pub use client::{
    BearerToken, DEFAULT_CLIENT_ID, DEFAULT_SCOPE, TransitApi, VasttrafikClient, VasttrafikConfig,
};
pub use convert::{ConversionError, convert_board, convert_departure, convert_locations};
pub use error::TransitError;
pub use types::{
    DepartureBoard, DepartureBoardResponse, LocationList, LocationNameResponse, OneOrMany,
    RawDeparture, StopLocation, TokenResponse,
};
