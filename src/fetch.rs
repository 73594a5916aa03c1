//! HTTP origin fetcher
//!
//! Reqwest-backed implementation of [`OriginFetcher`]. The client is built
//! once with the configured timeout; timeouts, connection failures and
//! non-2xx statuses all surface as [`Error::Network`].

use async_trait::async_trait;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::store::OriginFetcher;

/// Origin fetcher performing plain HTTP(S) GETs
pub struct HttpOriginFetcher {
    client: reqwest::Client,
}

impl HttpOriginFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Network)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl OriginFetcher for HttpOriginFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }
}
