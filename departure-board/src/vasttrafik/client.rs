//! Västtrafik REST HTTP client.
//!
//! Provides the credential exchange and authenticated GET requests. Bodies
//! are returned as untyped JSON; callers decode them into the DTOs they
//! expect.

use std::fmt;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use super::error::TransitError;
use super::types::TokenResponse;

/// Default base URL for the REST v2 API.
const DEFAULT_BASE_URL: &str = "https://api.vasttrafik.se/bin/rest.exe/v2";

/// Default token endpoint.
const DEFAULT_TOKEN_URL: &str = "https://api.vasttrafik.se:443/token";

/// Client identifier registered for the board.
pub const DEFAULT_CLIENT_ID: &str = "dMetdRHWVmhmMBir005xvYoOnxca";

/// Device scope requested with every token.
pub const DEFAULT_SCOPE: &str = "device_123532813290820193";

/// A short-lived bearer credential.
#[derive(Clone)]
pub struct BearerToken {
    access_token: String,
    expires_in: Option<Duration>,
}

impl BearerToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in: None,
        }
    }

    /// Set the lifetime reported by the token endpoint.
    pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Lifetime reported by the token endpoint, if any.
    pub fn expires_in(&self) -> Option<Duration> {
        self.expires_in
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("access_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl TryFrom<TokenResponse> for BearerToken {
    type Error = TransitError;

    fn try_from(response: TokenResponse) -> Result<Self, Self::Error> {
        if response.access_token.is_empty() {
            return Err(TransitError::Auth {
                status: None,
                message: "empty access_token".to_string(),
            });
        }

        let token = BearerToken::new(response.access_token);
        Ok(match response.expires_in {
            Some(secs) => token.with_expires_in(Duration::from_secs(secs)),
            None => token,
        })
    }
}

/// The transit API operations the departure pipeline depends on.
pub trait TransitApi {
    /// Exchange client credentials for a bearer token.
    fn obtain_token(&self) -> impl Future<Output = Result<BearerToken, TransitError>> + Send;

    /// Authenticated GET of `endpoint` with the given query, returning the
    /// JSON body unmodified.
    fn request(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        token: &BearerToken,
    ) -> impl Future<Output = Result<serde_json::Value, TransitError>> + Send;
}

/// Configuration for the Västtrafik client.
#[derive(Clone)]
pub struct VasttrafikConfig {
    /// Registered client identifier
    pub client_id: String,
    /// Client secret, supplied out-of-band
    pub client_secret: String,
    /// Scope requested with the token
    pub scope: String,
    /// Base URL for the REST API
    pub base_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl VasttrafikConfig {
    /// Create a new config with the given client secret.
    pub fn new(client_secret: impl Into<String>) -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            client_secret: client_secret.into(),
            scope: DEFAULT_SCOPE.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set the client identifier.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom token endpoint (for testing).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl fmt::Debug for VasttrafikConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VasttrafikConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scope", &self.scope)
            .field("base_url", &self.base_url)
            .field("token_url", &self.token_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Västtrafik REST API client.
#[derive(Clone)]
pub struct VasttrafikClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    scope: String,
    basic_credentials: String,
}

impl VasttrafikClient {
    /// Create a new client with the given configuration.
    pub fn new(config: VasttrafikConfig) -> Result<Self, TransitError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let basic_credentials =
            BASE64.encode(format!("{}:{}", config.client_id, config.client_secret));

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token_url: config.token_url,
            scope: config.scope,
            basic_credentials,
        })
    }
}

impl TransitApi for VasttrafikClient {
    async fn obtain_token(&self) -> Result<BearerToken, TransitError> {
        let response = self
            .http
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", self.basic_credentials))
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", self.scope.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Auth {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        let body = response.text().await?;

        let token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| TransitError::Auth {
                status: None,
                message: format!("malformed token response: {e}"),
            })?;

        debug!(expires_in = ?token.expires_in, "obtained bearer token");

        token.try_into()
    }

    async fn request(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
        token: &BearerToken,
    ) -> Result<serde_json::Value, TransitError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .bearer_auth(token.access_token())
            .query(query)
            .query(&[("format", "json")])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransitError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| TransitError::decode(e, &body))
    }
}
