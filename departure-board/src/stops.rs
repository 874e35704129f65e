//! Stop resolution by name.
//!
//! Turns a free-text stop name into the stop identifier the departure board
//! endpoint needs. An exact name match anywhere in the candidate list wins;
//! otherwise the API's own top-ranked candidate is taken.

use tracing::debug;

use crate::domain::Stop;
use crate::vasttrafik::{BearerToken, LocationNameResponse, TransitApi, TransitError, convert_locations};

/// Location search endpoint, relative to the API base URL.
pub const LOCATION_SEARCH_ENDPOINT: &str = "location.name";

/// Resolve `search` to the best-matching stop.
///
/// Fails with [`TransitError::NotFound`] when the search returns no stops.
pub async fn resolve_stop<A: TransitApi>(
    api: &A,
    token: &BearerToken,
    search: &str,
) -> Result<Stop, TransitError> {
    let json = api
        .request(
            LOCATION_SEARCH_ENDPOINT,
            &[("input", search.to_string())],
            token,
        )
        .await?;

    let response: LocationNameResponse =
        serde_json::from_value(json).map_err(|e| TransitError::Decode {
            message: e.to_string(),
            body: None,
        })?;

    let candidates = convert_locations(response.location_list);
    let count = candidates.len();

    let stop = select_stop(candidates, search).ok_or_else(|| TransitError::NotFound {
        query: search.to_string(),
    })?;

    debug!(
        search,
        candidates = count,
        stop_id = %stop.id(),
        stop_name = %stop.name(),
        exact = stop.name() == search,
        "resolved stop"
    );

    Ok(stop)
}

/// Pick the candidate whose name equals `search` exactly (case-sensitive),
/// else the first candidate.
pub fn select_stop(candidates: Vec<Stop>, search: &str) -> Option<Stop> {
    let exact = candidates.iter().position(|stop| stop.name() == search);
    candidates.into_iter().nth(exact.unwrap_or(0))
}
