//! Departure board fetching.
//!
//! Queries the departure board for a stop at a reference date-time and
//! normalizes the result into [`DepartureRecord`]s in API order.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::{ClockTime, DepartureRecord, StopId};
use crate::vasttrafik::{
    BearerToken, ConversionError, DepartureBoardResponse, TransitApi, TransitError, convert_board,
};

/// Departure board endpoint, relative to the API base URL.
pub const DEPARTURE_BOARD_ENDPOINT: &str = "departureBoard";

/// Number of departures requested per board.
pub const DEFAULT_TIME_SPAN: u16 = 20;

/// Query parameters for one departure board request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardQuery {
    pub stop_id: StopId,
    pub date: NaiveDate,
    /// Reference time with seconds dropped.
    pub time: ClockTime,
    pub time_span: u16,
}

impl BoardQuery {
    pub fn new(stop_id: StopId, reference: NaiveDateTime, time_span: u16) -> Self {
        Self {
            stop_id,
            date: reference.date(),
            time: ClockTime::of(reference),
            time_span,
        }
    }

    /// Query string pairs: `id`, `date` (yyyy-mm-dd), `time` (HH:MM), `timeSpan`.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.stop_id.to_string()),
            ("date", self.date.format("%Y-%m-%d").to_string()),
            ("time", self.time.to_string()),
            ("timeSpan", self.time_span.to_string()),
        ]
    }
}

/// Fetch the next departures from `stop_id` after `reference`.
///
/// An empty board is a valid result, not an error.
pub async fn fetch_departures<A: TransitApi>(
    api: &A,
    token: &BearerToken,
    stop_id: &StopId,
    reference: NaiveDateTime,
    time_span: u16,
) -> Result<Vec<DepartureRecord>, TransitError> {
    let query = BoardQuery::new(stop_id.clone(), reference, time_span);

    let json = api
        .request(DEPARTURE_BOARD_ENDPOINT, &query.params(), token)
        .await?;

    let response: DepartureBoardResponse =
        serde_json::from_value(json).map_err(|e| TransitError::Decode {
            message: e.to_string(),
            body: None,
        })?;

    let records = convert_board(&response.departure_board).map_err(|e| match e {
        ConversionError::Rejected { .. } => TransitError::Api {
            status: 200,
            message: e.to_string(),
        },
        ConversionError::InvalidTime(_) => TransitError::Decode {
            message: e.to_string(),
            body: None,
        },
    })?;

    debug!(
        stop_id = %stop_id,
        date = %query.date,
        time = %query.time,
        departures = records.len(),
        "fetched departure board"
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vasttrafik::mock::MockApi;
    use serde_json::json;

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(8, 9, 59)
            .unwrap()
    }

    fn time(s: &str) -> ClockTime {
        ClockTime::parse_hhmm(s).unwrap()
    }

    async fn fetch(board: serde_json::Value) -> Result<Vec<DepartureRecord>, TransitError> {
        let api = MockApi::new().with_response(DEPARTURE_BOARD_ENDPOINT, board);
        let token = api.obtain_token().await.unwrap();
        fetch_departures(&api, &token, &StopId::new("X"), reference(), DEFAULT_TIME_SPAN).await
    }

    #[test]
    fn query_params() {
        let query = BoardQuery::new(StopId::new("9021014004830000"), reference(), 20);
        assert_eq!(
            query.params(),
            vec![
                ("id", "9021014004830000".to_string()),
                ("date", "2024-03-05".to_string()),
                ("time", "08:09".to_string()),
                ("timeSpan", "20".to_string()),
            ]
        );
    }

    #[test]
    fn query_time_matches_response_time() {
        let query = BoardQuery::new(StopId::new("X"), reference(), 20);
        let params = query.params();
        let sent = &params[2].1;
        assert_eq!(ClockTime::parse_hhmm(sent).unwrap(), ClockTime::of(reference()));
    }

    #[tokio::test]
    async fn maps_departures_in_order() {
        let records = fetch(json!({"DepartureBoard": {"Departure": [
            {"time": "08:15", "rtTime": "08:18", "track": "A", "sname": "16", "direction": "Centrum"},
            {"time": "08:15", "track": "B"}
        ]}}))
        .await
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].departure_time(), time("08:18"));
        assert_eq!(records[0].track(), "A");
        assert_eq!(records[0].line_short_name(), "16");
        assert_eq!(records[0].direction(), "Centrum");
        assert_eq!(records[1].departure_time(), time("08:15"));
        assert_eq!(records[1].track(), "B");
    }

    #[tokio::test]
    async fn sends_board_query() {
        let api = MockApi::new().with_response(DEPARTURE_BOARD_ENDPOINT, json!({"DepartureBoard": {}}));
        let token = api.obtain_token().await.unwrap();
        fetch_departures(&api, &token, &StopId::new("X"), reference(), 20)
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls[0].0, DEPARTURE_BOARD_ENDPOINT);
        assert!(calls[0].1.contains(&("timeSpan".to_string(), "20".to_string())));
        assert!(calls[0].1.contains(&("id".to_string(), "X".to_string())));
    }

    #[tokio::test]
    async fn empty_board_is_not_an_error() {
        let records = fetch(json!({"DepartureBoard": {"servertime": "08:10"}}))
            .await
            .unwrap();
        assert!(records.is_empty());

        let records = fetch(json!({"DepartureBoard": {"Departure": []}}))
            .await
            .unwrap();
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn malformed_time_is_decode_error() {
        let err = fetch(json!({"DepartureBoard": {"Departure": [{"time": "late"}]}}))
            .await
            .unwrap_err();
        assert!(matches!(err, TransitError::Decode { .. }));
    }

    #[tokio::test]
    async fn rejected_board_is_api_error() {
        let err = fetch(json!({"DepartureBoard": {"error": "R0007", "errorText": "Internal error"}}))
            .await
            .unwrap_err();
        assert!(matches!(err, TransitError::Api { status: 200, .. }));
    }
}
