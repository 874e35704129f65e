//! Mock transit API for unit tests.
//!
//! Serves canned JSON bodies per endpoint and records every call, without
//! any network traffic.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use super::client::{BearerToken, TransitApi};
use super::error::TransitError;

/// A recorded request: endpoint plus query parameters.
pub type Call = (String, Vec<(String, String)>);

/// Mock API serving fixed responses.
#[derive(Default)]
pub struct MockApi {
    /// `None` makes the token endpoint answer 401.
    token: Option<String>,
    responses: HashMap<String, Value>,
    token_requests: Mutex<usize>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            token: Some("mock-token".to_string()),
            ..Self::default()
        }
    }

    /// A mock whose token endpoint rejects the client.
    pub fn unauthorized() -> Self {
        Self::default()
    }

    /// Serve `body` for `endpoint`.
    pub fn with_response(mut self, endpoint: &str, body: Value) -> Self {
        self.responses.insert(endpoint.to_string(), body);
        self
    }

    pub fn token_requests(&self) -> usize {
        *self.token_requests.lock().unwrap()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl TransitApi for MockApi {
    async fn obtain_token(&self) -> Result<BearerToken, TransitError> {
        *self.token_requests.lock().unwrap() += 1;
        match &self.token {
            Some(token) => Ok(BearerToken::new(token.clone())),
            None => Err(TransitError::Auth {
                status: Some(401),
                message: "invalid_client".to_string(),
            }),
        }
    }

    async fn request(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        token: &BearerToken,
    ) -> Result<Value, TransitError> {
        self.calls.lock().unwrap().push((
            endpoint.to_string(),
            query
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        ));

        if self.token.as_deref() != Some(token.access_token()) {
            return Err(TransitError::Api {
                status: 401,
                message: "bad token".to_string(),
            });
        }

        self.responses
            .get(endpoint)
            .cloned()
            .ok_or_else(|| TransitError::Api {
                status: 404,
                message: format!("no mock response for {endpoint}"),
            })
    }
}
