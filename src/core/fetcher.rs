//! HTTP page fetcher
//!
//! Issues one `GET {base}/transactions/{page}.json` per call and classifies
//! the outcome as a page, a `FetchFailure` or a `DecodeFailure`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::traits::PageSource;
use crate::io::page_format::decode_page;
use crate::types::{PageNumber, PageResult, TotalsError};

/// Default API host
pub const DEFAULT_BASE_URL: &str = "https://resttest.bench.co";

/// `PageSource` backed by the remote transactions API
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPageFetcher {
    /// Create a fetcher for the given base URL
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme and host (and optional path prefix) of the API
    /// * `timeout` - Optional per-request timeout; `None` waits indefinitely
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the base URL is empty or not http(s), or if
    /// the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TotalsError> {
        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TotalsError::InvalidConfig {
                message: format!("base URL must start with http:// or https://, got '{}'", base_url),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| TotalsError::InvalidConfig {
            message: format!("Failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    /// URL of the given page
    pub fn page_url(&self, page: PageNumber) -> String {
        format!("{}/transactions/{}.json", self.base_url, page)
    }
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    async fn fetch_page(&self, page: PageNumber) -> Result<PageResult, TotalsError> {
        let url = self.page_url(page);
        debug!(page, %url, "requesting page");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TotalsError::fetch_failure(page, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // Dropping the response releases the connection without reading the body.
            return Err(TotalsError::fetch_failure(
                page,
                Some(status.as_u16()),
                format!("HTTP status {}", status),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TotalsError::fetch_failure(page, Some(status.as_u16()), e.to_string()))?;

        let result = decode_page(page, &body)?;
        debug!(page, transactions = result.len(), "decoded page");
        Ok(result)
    }
}
