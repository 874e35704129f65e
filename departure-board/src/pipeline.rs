//! One-shot departure retrieval.
//!
//! An activation runs credential exchange, stop resolution and departure
//! fetching strictly in sequence. Any failure aborts the whole run and
//! nothing is returned but the failure; there is no local recovery.

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::cache::TokenCache;
use crate::departures::{DEFAULT_TIME_SPAN, fetch_departures};
use crate::domain::DepartureRecord;
use crate::stops::resolve_stop;
use crate::vasttrafik::{TransitApi, TransitError};

/// Stop the board watches out of the box.
pub const DEFAULT_STOP_NAME: &str = "Musikvägen, Göteborg";

/// Terminal failure of a pipeline run, by stage.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("could not authenticate: {0}")]
    Authenticate(#[source] TransitError),

    #[error("could not resolve stop: {0}")]
    ResolveStop(#[source] TransitError),

    #[error("could not fetch departures: {0}")]
    FetchDepartures(#[source] TransitError),

    #[error("a departure fetch is already in progress")]
    AlreadyRunning,
}

impl PipelineError {
    /// Short name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Authenticate(_) => "authenticate",
            PipelineError::ResolveStop(_) => "resolve_stop",
            PipelineError::FetchDepartures(_) => "fetch_departures",
            PipelineError::AlreadyRunning => "already_running",
        }
    }
}

/// What the pipeline fetches.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Free-text stop name to resolve.
    pub stop_name: String,

    /// Departures requested per board.
    pub time_span: u16,

    /// How long a bearer token may be reused across runs.
    /// `None` obtains a fresh token on every activation.
    pub token_ttl: Option<Duration>,
}

impl PipelineConfig {
    pub fn new(stop_name: impl Into<String>) -> Self {
        Self {
            stop_name: stop_name.into(),
            time_span: DEFAULT_TIME_SPAN,
            token_ttl: None,
        }
    }

    pub fn with_time_span(mut self, time_span: u16) -> Self {
        self.time_span = time_span;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_NAME)
    }
}

/// Sequences token → stop → departures for a configured stop.
///
/// Only one activation runs at a time; a concurrent activation is rejected
/// with [`PipelineError::AlreadyRunning`] rather than queued.
pub struct Pipeline<A> {
    api: A,
    config: PipelineConfig,
    tokens: Option<TokenCache>,
    running: Mutex<()>,
}

impl<A: TransitApi> Pipeline<A> {
    pub fn new(api: A, config: PipelineConfig) -> Self {
        let tokens = config.token_ttl.map(TokenCache::new);
        Self {
            api,
            config,
            tokens,
            running: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch departures from now.
    pub async fn activate(&self) -> Result<Vec<DepartureRecord>, PipelineError> {
        self.activate_at(Local::now().naive_local()).await
    }

    /// Fetch departures from `reference`.
    pub async fn activate_at(
        &self,
        reference: NaiveDateTime,
    ) -> Result<Vec<DepartureRecord>, PipelineError> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| PipelineError::AlreadyRunning)?;

        let result = self.run(reference).await;

        match &result {
            Ok(records) => info!(
                stop = %self.config.stop_name,
                departures = records.len(),
                "departures fetched"
            ),
            Err(e) => warn!(stage = e.stage(), error = %e, "departure fetch failed"),
        }

        result
    }

    async fn run(&self, reference: NaiveDateTime) -> Result<Vec<DepartureRecord>, PipelineError> {
        let token = match &self.tokens {
            Some(cache) => cache.get_or_obtain(&self.api).await,
            None => self.api.obtain_token().await,
        }
        .map_err(PipelineError::Authenticate)?;

        let stop = resolve_stop(&self.api, &token, &self.config.stop_name)
            .await
            .map_err(|e| {
                self.forget_rejected_token(&e);
                PipelineError::ResolveStop(e)
            })?;

        fetch_departures(&self.api, &token, stop.id(), reference, self.config.time_span)
            .await
            .map_err(|e| {
                self.forget_rejected_token(&e);
                PipelineError::FetchDepartures(e)
            })
    }

    /// A reused token the API no longer accepts must not be reused again.
    fn forget_rejected_token(&self, err: &TransitError) {
        if let (Some(cache), TransitError::Api { status: 401, .. }) = (&self.tokens, err) {
            cache.invalidate();
        }
    }
}
