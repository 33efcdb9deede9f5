//! Pipeline entry point
//!
//! Builds the multi-threaded tokio runtime, runs one totals query against the
//! HTTP API and writes the report.
//!
//! # Architecture
//!
//! ```text
//! run_pipeline
//!     ├── PipelineConfig (base URL, concurrency cap, worker threads, timeout)
//!     ├── HttpPageFetcher (one GET per page)
//!     ├── TotalsQuery
//!     │   ├── PageCollector (one task per remaining page)
//!     │   └── aggregate (running sum by date)
//!     └── write_totals (text or CSV)
//! ```

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::core::{HttpPageFetcher, TotalsQuery, DEFAULT_BASE_URL};
use crate::io::{write_totals, OutputFormat};
use crate::types::{PageNumber, TotalsError};

/// Configuration for a pipeline run
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Scheme and host of the transactions API
    pub base_url: String,
    /// Maximum number of page requests in flight; `None` fans out fully
    pub max_concurrent_requests: Option<usize>,
    /// Number of runtime worker threads
    pub worker_threads: usize,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent_requests: None,
            worker_threads: num_cpus::get(),
            request_timeout: None,
        }
    }
}

impl PipelineConfig {
    /// Create a PipelineConfig with custom values
    ///
    /// Zero counts and a zero timeout are not usable and fall back to the
    /// defaults with a warning.
    pub fn new(
        base_url: impl Into<String>,
        max_concurrent_requests: Option<usize>,
        worker_threads: usize,
        request_timeout: Option<Duration>,
    ) -> Self {
        let default = Self::default();

        let max_concurrent_requests = match max_concurrent_requests {
            Some(0) => {
                warn!("Invalid max_concurrent_requests (0), fanning out without a cap");
                None
            }
            other => other,
        };

        let worker_threads = if worker_threads == 0 {
            warn!(
                "Invalid worker_threads ({}), using default ({})",
                worker_threads, default.worker_threads
            );
            default.worker_threads
        } else {
            worker_threads
        };

        let request_timeout = match request_timeout {
            Some(timeout) if timeout.is_zero() => {
                warn!("Invalid request timeout (0s), requests will not time out");
                None
            }
            other => other,
        };

        Self {
            base_url: base_url.into(),
            max_concurrent_requests,
            worker_threads,
            request_timeout,
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Page count derived from the first page
    pub total_pages: PageNumber,
    /// Pages that contributed to the totals
    pub pages_fetched: usize,
    /// Number of distinct dates written
    pub dates: usize,
    /// Failures on later pages; non-empty means the report is partial
    pub errors: Vec<TotalsError>,
}

impl RunSummary {
    /// Whether some later page failed
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Run one query and write the totals to `output`
///
/// # Returns
///
/// * `Ok(RunSummary)` once totals were written, possibly from a partial set of pages
/// * `Err(TotalsError)` if the runtime could not start, the first page failed,
///   aggregation overflowed or the output could not be written; nothing is written
///   in the first three cases
pub fn run_pipeline(
    config: &PipelineConfig,
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<RunSummary, TotalsError> {
    let fetcher = HttpPageFetcher::new(&config.base_url, config.request_timeout)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.worker_threads)
        .enable_all()
        .build()
        .map_err(|e| TotalsError::Runtime {
            message: format!("Failed to create tokio runtime: {}", e),
        })?;

    let outcome = runtime.block_on(async {
        TotalsQuery::new(Arc::new(fetcher))
            .with_max_concurrent(config.max_concurrent_requests)
            .execute()
            .await
    })?;

    write_totals(&outcome.totals, format, output)?;

    Ok(RunSummary {
        total_pages: outcome.total_pages,
        pages_fetched: outcome.pages_fetched,
        dates: outcome.totals.len(),
        errors: outcome.errors,
    })
}
