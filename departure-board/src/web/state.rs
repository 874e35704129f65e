//! Application state for the web layer.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tokio::sync::RwLock;

use crate::domain::DepartureRecord;
use crate::pipeline::{Pipeline, PipelineError};
use crate::vasttrafik::TransitApi;

/// Why the last run failed.
#[derive(Debug, Clone)]
pub struct FailureReport {
    pub stage: &'static str,
    pub message: String,
    pub at: NaiveDateTime,
}

/// What the board currently shows.
///
/// A successful run replaces the records; a failed run clears them and
/// records the failure, so stale departures are never shown as current.
#[derive(Debug, Clone, Default)]
pub struct BoardSnapshot {
    pub records: Vec<DepartureRecord>,
    pub fetched_at: Option<NaiveDateTime>,
    pub failure: Option<FailureReport>,
}

impl BoardSnapshot {
    /// Records from a successful run at `at`.
    pub fn published(records: Vec<DepartureRecord>, at: NaiveDateTime) -> Self {
        Self {
            records,
            fetched_at: Some(at),
            failure: None,
        }
    }

    /// An empty board recording why the run at `at` failed.
    pub fn failed(err: &PipelineError, at: NaiveDateTime) -> Self {
        Self {
            records: Vec::new(),
            fetched_at: None,
            failure: Some(FailureReport {
                stage: err.stage(),
                message: err.to_string(),
                at,
            }),
        }
    }
}

/// Shared application state.
pub struct AppState<A> {
    /// Departure pipeline for the configured stop
    pub pipeline: Arc<Pipeline<A>>,

    /// Last published board
    pub board: Arc<RwLock<BoardSnapshot>>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            board: self.board.clone(),
        }
    }
}

impl<A: TransitApi> AppState<A> {
    /// Create a new app state with an empty board.
    pub fn new(pipeline: Pipeline<A>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            board: Arc::new(RwLock::new(BoardSnapshot::default())),
        }
    }

    /// Run the pipeline once and publish the outcome.
    ///
    /// Returns the board this run published. A rejected concurrent run
    /// leaves the board untouched.
    pub async fn refresh(&self) -> Result<BoardSnapshot, PipelineError> {
        let result = self.pipeline.activate().await;
        let now = Local::now().naive_local();

        match result {
            Ok(records) => {
                let snapshot = BoardSnapshot::published(records, now);
                *self.board.write().await = snapshot.clone();
                Ok(snapshot)
            }
            Err(PipelineError::AlreadyRunning) => Err(PipelineError::AlreadyRunning),
            Err(e) => {
                *self.board.write().await = BoardSnapshot::failed(&e, now);
                Err(e)
            }
        }
    }

    /// A copy of the current board.
    pub async fn snapshot(&self) -> BoardSnapshot {
        self.board.read().await.clone()
    }
}
