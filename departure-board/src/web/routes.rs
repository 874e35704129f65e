//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Local;
use tracing::warn;

use crate::pipeline::PipelineError;
use crate::vasttrafik::TransitApi;

use super::dto::{BoardResponse, ErrorResponse};
use super::state::{AppState, BoardSnapshot};

/// Create the application router.
pub fn create_router<A>(state: AppState<A>) -> Router
where
    A: TransitApi + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/departures", get(departures::<A>))
        .route("/refresh", post(refresh::<A>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// The last published board, grouped by track.
async fn departures<A>(State(state): State<AppState<A>>) -> Json<BoardResponse>
where
    A: TransitApi + Send + Sync + 'static,
{
    let snapshot = state.snapshot().await;
    Json(BoardResponse::from_snapshot(
        &state.pipeline.config().stop_name,
        snapshot,
    ))
}

/// Run the pipeline now and return the freshly published board.
async fn refresh<A>(State(state): State<AppState<A>>) -> Result<Json<BoardResponse>, AppError>
where
    A: TransitApi + Send + Sync + 'static,
{
    let result = state.refresh().await;
    refresh_outcome(&state.pipeline.config().stop_name, result)
}

/// Build the refresh response from this run's own outcome, never from the
/// shared board, which a concurrent run may already have replaced.
fn refresh_outcome(
    stop: &str,
    result: Result<BoardSnapshot, PipelineError>,
) -> Result<Json<BoardResponse>, AppError> {
    match result {
        Ok(snapshot) => Ok(Json(BoardResponse::from_snapshot(stop, snapshot))),
        Err(PipelineError::AlreadyRunning) => Err(AppError::Conflict {
            message: PipelineError::AlreadyRunning.to_string(),
        }),
        Err(e) => {
            let failed = BoardSnapshot::failed(&e, Local::now().naive_local());
            Err(AppError::Upstream(BoardResponse::from_snapshot(stop, failed)))
        }
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// A run is already in flight
    Conflict { message: String },
    /// The pipeline failed; the board carries the failed stage
    Upstream(BoardResponse),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Conflict { message } => {
                (StatusCode::CONFLICT, Json(ErrorResponse { error: message })).into_response()
            }
            AppError::Upstream(board) => {
                if let Some(error) = &board.error {
                    warn!(stage = error.stage, error = %error.message, "refresh failed");
                }
                (StatusCode::BAD_GATEWAY, Json(board)).into_response()
            }
        }
    }
}
