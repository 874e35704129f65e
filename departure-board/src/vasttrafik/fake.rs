//! In-process fake of the Västtrafik REST API for tests.
//!
//! Serves the token, location search and departure board endpoints on an
//! ephemeral local port so the real HTTP client can be exercised end to end.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};

#[derive(Default)]
struct FakeState {
    locations: Value,
    board: Value,
    queries: HashMap<String, HashMap<String, String>>,
}

type Shared = Arc<Mutex<FakeState>>;

/// Handle to a running fake API.
pub struct FakeApi {
    addr: SocketAddr,
    state: Shared,
}

impl FakeApi {
    pub const CLIENT_ID: &'static str = "test-client";
    pub const SECRET: &'static str = "test-secret";
    pub const TOKEN: &'static str = "fake-access-token";

    /// Start a fake API with a default stop search and departure board.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState {
            locations: json!({
                "LocationList": {
                    "StopLocation": [
                        {"id": "X", "name": "Musikvägen, Göteborg", "idx": "1"},
                        {"id": "Y", "name": "Musikvägen", "idx": "2"}
                    ]
                }
            }),
            board: json!({
                "DepartureBoard": {
                    "serverdate": "2024-03-15",
                    "servertime": "08:10",
                    "Departure": [
                        {"time": "08:15", "rtTime": "08:18", "sname": "16", "track": "A", "direction": "Centrum"},
                        {"time": "08:17", "sname": "17", "track": "B", "direction": "Hjalmar Brantingsplatsen"}
                    ]
                }
            }),
            queries: HashMap::new(),
        }));

        let app = Router::new()
            .route("/token", post(token))
            .route("/api/location.name", get(location_name))
            .route("/api/departureBoard", get(departure_board))
            .route("/api/garbage", get(garbage))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    pub fn token_url(&self) -> String {
        format!("http://{}/token", self.addr)
    }

    /// Replace the stop search response.
    pub fn set_locations(&self, locations: Value) {
        self.state.lock().unwrap().locations = locations;
    }

    /// Replace the departure board response.
    pub fn set_board(&self, board: Value) {
        self.state.lock().unwrap().board = board;
    }

    /// Query parameters of the most recent request to `endpoint`.
    pub fn last_query(&self, endpoint: &str) -> Option<HashMap<String, String>> {
        self.state.lock().unwrap().queries.get(endpoint).cloned()
    }
}

async fn token(headers: HeaderMap, Form(form): Form<HashMap<String, String>>) -> Response {
    let expected = format!(
        "Basic {}",
        BASE64.encode(format!("{}:{}", FakeApi::CLIENT_ID, FakeApi::SECRET))
    );
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "invalid_client"}))).into_response();
    }

    if form.get("grant_type").map(String::as_str) != Some("client_credentials")
        || !form.contains_key("scope")
    {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "invalid_request"}))).into_response();
    }

    Json(json!({
        "access_token": FakeApi::TOKEN,
        "token_type": "Bearer",
        "expires_in": 3600,
        "scope": form["scope"]
    }))
    .into_response()
}

fn serve(
    state: &Shared,
    headers: &HeaderMap,
    endpoint: &str,
    query: HashMap<String, String>,
    body: impl FnOnce(&FakeState) -> Value,
) -> Response {
    let bearer = format!("Bearer {}", FakeApi::TOKEN);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == bearer);

    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let mut state = state.lock().unwrap();
    state.queries.insert(endpoint.to_string(), query);
    Json(body(&state)).into_response()
}

async fn location_name(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    serve(&state, &headers, "location.name", query, |s| s.locations.clone())
}

async fn departure_board(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    serve(&state, &headers, "departureBoard", query, |s| s.board.clone())
}

async fn garbage() -> &'static str {
    "<html>not json</html>"
}
