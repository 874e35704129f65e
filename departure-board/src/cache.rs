//! Bearer token reuse.
//!
//! Tokens from the credential exchange are short-lived. When a reuse window
//! is configured, a token is kept for that window, capped by the lifetime
//! the token endpoint reports, so consecutive pipeline runs skip the
//! exchange.

use std::time::{Duration, Instant};

use moka::Expiry;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::vasttrafik::{BearerToken, TransitApi, TransitError};

/// Per-token expiry: the configured window or the token's own lifetime,
/// whichever is shorter.
struct TokenExpiry {
    ttl: Duration,
}

impl Expiry<(), BearerToken> for TokenExpiry {
    fn expire_after_create(
        &self,
        _key: &(),
        value: &BearerToken,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(match value.expires_in() {
            Some(lifetime) => lifetime.min(self.ttl),
            None => self.ttl,
        })
    }
}

/// Cache holding at most one bearer token.
pub struct TokenCache {
    tokens: MokaCache<(), BearerToken>,
}

impl TokenCache {
    /// Create a cache that reuses tokens for up to `ttl`.
    pub fn new(ttl: Duration) -> Self {
        let tokens = MokaCache::builder()
            .max_capacity(1)
            .expire_after(TokenExpiry { ttl })
            .build();

        Self { tokens }
    }

    /// Return the cached token, or obtain and cache a fresh one.
    pub async fn get_or_obtain<A: TransitApi>(&self, api: &A) -> Result<BearerToken, TransitError> {
        if let Some(token) = self.tokens.get(&()).await {
            debug!("reusing cached bearer token");
            return Ok(token);
        }

        let token = api.obtain_token().await?;
        self.tokens.insert((), token.clone()).await;
        Ok(token)
    }

    /// Drop the cached token.
    pub fn invalidate(&self) {
        self.tokens.invalidate_all();
    }
}
