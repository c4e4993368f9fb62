//! HTTP fetcher with a per-URL body memo.
//!
//! Every request carries the configured User-Agent and timeout. Successful
//! bodies are stored in the shared [`BodyCache`] and served from there on
//! later calls for the same URL.
//!
//! Status codes are not inspected: a 404 or 500 page is returned (and
//! cached) like any other body, and the scrapers simply find nothing in it.
//! Only transport failures become [`Error::FetchFailed`], and those leave
//! the cache untouched.

use crate::cache::BodyCache;
use crate::error::{Error, Result};
use bytes::Bytes;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    cache: Arc<BodyCache>,
}

impl Fetcher {
    /// Build a fetcher around a shared body cache.
    ///
    /// A zero `timeout` disables the request timeout.
    pub fn new(user_agent: &str, timeout: Duration, cache: Arc<BodyCache>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::HttpClient)?;
        Ok(Self { client, cache })
    }

    /// GET `url`, serving from the body cache when possible.
    #[instrument(level = "info", skip_all, fields(%url))]
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        if let Some(body) = self.cache.get(url) {
            debug!(bytes = body.len(), "Body cache hit");
            return Ok(body);
        }

        let fetch_failed = |source| Error::FetchFailed {
            url: url.to_string(),
            source,
        };
        let response = self.client.get(url).send().await.map_err(fetch_failed)?;
        let status = response.status();
        let body = response.bytes().await.map_err(fetch_failed)?;

        debug!(%status, bytes = body.len(), "Fetched body");
        self.cache.insert(url, body.clone());
        Ok(body)
    }

    #[cfg(test)]
    pub fn cache(&self) -> &BodyCache {
        &self.cache
    }
}
