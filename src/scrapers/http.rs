//! HTTP fetch layer for the scraping pipeline.
//!
//! A single `HttpClient` is shared by all page types. It owns the
//! browser-like user agent, the request timeout, and the enforced
//! inter-request delay. The delay is a rate limit the source site
//! expects us to respect, not a performance knob.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::error::{Result, ScrapeError};

/// Outcome of fetching one page. 200 and 404 are both ordinary results;
/// 404 means "no more pages" or "resource absent" depending on context.
#[derive(Debug)]
pub enum PageResponse {
    Ok(String),
    NotFound,
}

/// Seam between the paginator and the network, so the page loop can be
/// exercised against canned pages in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse>;
}

pub struct HttpClient {
    client: reqwest::Client,
    request_delay: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl HttpClient {
    /// Build a client with the given user agent, timeout, and delay
    /// enforced between successive requests.
    pub fn new(user_agent: &str, timeout: Duration, request_delay: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            request_delay,
            last_request: Mutex::new(None),
        }
    }

    /// Sleep out the remainder of the inter-request delay since the
    /// previous fetch, then stamp the current instant.
    async fn pace(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.request_delay {
                tokio::time::sleep(self.request_delay - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch_page(&self, url: &str) -> Result<PageResponse> {
        self.pace().await;

        debug!(url, "fetching page");
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| ScrapeError::Connection {
                    url: url.to_string(),
                    source: e,
                })?;

        match response.status() {
            StatusCode::OK => {
                let body = response.text().await.map_err(|e| ScrapeError::Connection {
                    url: url.to_string(),
                    source: e,
                })?;
                Ok(PageResponse::Ok(body))
            }
            StatusCode::NOT_FOUND => Ok(PageResponse::NotFound),
            status => Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}
