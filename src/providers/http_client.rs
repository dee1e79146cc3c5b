//! Throttled HTTP Client for the Printing API
//!
//! Wraps `reqwest` with an outbound request quota. A request that would
//! exceed the quota waits for a permit; nothing is ever retried.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::{Client, RequestBuilder, Response};
use std::num::NonZeroU32;
use std::time::Duration;
use tracing::debug;

use crate::providers::traits::ProviderError;

/// Throttled HTTP client for API requests
pub struct RateLimitedClient {
    /// Inner HTTP client
    client: Client,

    /// Rate limiter (requests per minute)
    limiter: DefaultDirectRateLimiter,

    /// Configured rate limit
    rate_limit_per_minute: u32,
}

impl RateLimitedClient {
    /// Create a new throttled client
    ///
    /// # Arguments
    /// * `rate_limit_per_minute` - Maximum requests allowed per minute
    /// * `timeout` - Whole-request timeout
    pub fn new(rate_limit_per_minute: u32, timeout: Duration) -> Result<Self, ProviderError> {
        let rate = NonZeroU32::new(rate_limit_per_minute).unwrap_or(nonzero!(1u32));
        let limiter = RateLimiter::direct(Quota::per_minute(rate));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("canvas-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(RateLimitedClient {
            client,
            limiter,
            rate_limit_per_minute: rate.get(),
        })
    }

    pub fn rate_limit_per_minute(&self) -> u32 {
        self.rate_limit_per_minute
    }

    /// Build a GET request
    pub fn get(&self, url: url::Url) -> RateLimitedRequestBuilder<'_> {
        RateLimitedRequestBuilder {
            client: self,
            builder: self.client.get(url),
        }
    }

    /// Build a POST request
    pub fn post(&self, url: url::Url) -> RateLimitedRequestBuilder<'_> {
        RateLimitedRequestBuilder {
            client: self,
            builder: self.client.post(url),
        }
    }

    /// Wait for a permit and execute the request once
    async fn execute(&self, builder: RequestBuilder) -> Result<Response, ProviderError> {
        self.limiter.until_ready().await;

        debug!("Executing throttled request");

        Ok(builder.send().await?)
    }
}

/// Request builder wrapper that enforces the quota
pub struct RateLimitedRequestBuilder<'a> {
    client: &'a RateLimitedClient,
    builder: RequestBuilder,
}

impl<'a> RateLimitedRequestBuilder<'a> {
    /// Add JSON body to the request
    pub fn json<T: serde::Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.builder = self.builder.json(json);
        self
    }

    /// Add a bearer token header
    pub fn bearer_auth(mut self, token: &str) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Send the request (waits for the quota)
    pub async fn send(self) -> Result<Response, ProviderError> {
        self.client.execute(self.builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_client_creation() {
        let client = RateLimitedClient::new(120, Duration::from_secs(5)).unwrap();
        assert_eq!(client.rate_limit_per_minute(), 120);
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let client = RateLimitedClient::new(0, Duration::from_secs(5)).unwrap();
        assert_eq!(client.rate_limit_per_minute(), 1);
    }
}
