//! Parallel collection of the pages after the first
//!
//! This module provides the `PageCollector`, which fans out one tokio task per
//! remaining page and joins every task before returning.
//!
//! # Design
//!
//! ```text
//! PageCollector
//!     ├── Arc<S: PageSource>      (shared, immutable page source)
//!     └── Option<Arc<Semaphore>>  (optional cap on in-flight requests)
//! ```
//!
//! # Failure Policy
//!
//! - Every task runs to completion; there is no early cancellation.
//! - Successful pages are always kept, whatever happens to other pages.
//! - Failures are collected in arrival order. `last_error()` reports the last
//!   one observed, which is the single error value callers act on.
//!
//! Pages come back in completion order, not page-number order. Aggregation is
//! commutative, so this does not affect the totals.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use super::traits::PageSource;
use crate::types::{PageNumber, PageResult, TotalsError, FIRST_PAGE};

/// Outcome of fetching the remaining pages of a query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectedPages {
    /// Successfully fetched pages, in completion order
    pub pages: Vec<PageResult>,

    /// Failures, in arrival order
    pub errors: Vec<TotalsError>,
}

impl CollectedPages {
    /// Whether every requested page was fetched
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// The last failure observed, if any
    pub fn last_error(&self) -> Option<&TotalsError> {
        self.errors.last()
    }

    /// Split into the successful pages and the last failure
    ///
    /// A `Some` error means the pages are a partial result, not an empty one.
    pub fn into_parts(mut self) -> (Vec<PageResult>, Option<TotalsError>) {
        let last = self.errors.pop();
        (self.pages, last)
    }
}

/// Fetches pages `2..=total_pages` concurrently from a `PageSource`
#[derive(Debug)]
pub struct PageCollector<S> {
    /// Page source shared by all tasks
    source: Arc<S>,

    /// Cap on concurrent requests; `None` means one in-flight request per page
    limiter: Option<Arc<Semaphore>>,
}

impl<S> Clone for PageCollector<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            limiter: self.limiter.clone(),
        }
    }
}

impl<S: PageSource + 'static> PageCollector<S> {
    /// Create a collector with unbounded fan-out
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            limiter: None,
        }
    }

    /// Cap the number of requests in flight at once
    ///
    /// One task is still spawned per page; tasks beyond the cap wait for a
    /// permit. A cap of zero is treated as no cap.
    pub fn with_max_concurrent(mut self, max_concurrent: Option<usize>) -> Self {
        self.limiter = max_concurrent
            .filter(|&n| n > 0)
            .map(|n| Arc::new(Semaphore::new(n)));
        self
    }

    /// Fetch every page after the first
    ///
    /// # Arguments
    ///
    /// * `total_pages` - Total number of pages in the query, including the first
    ///
    /// # Returns
    ///
    /// All successfully fetched pages plus every failure. With `total_pages < 2`
    /// nothing is fetched and the result is empty.
    pub async fn fetch_remaining_pages(&self, total_pages: PageNumber) -> CollectedPages {
        let mut collected = CollectedPages::default();
        if total_pages <= FIRST_PAGE {
            return collected;
        }

        let mut tasks = JoinSet::new();
        for page in (FIRST_PAGE + 1)..=total_pages {
            let source = Arc::clone(&self.source);
            let limiter = self.limiter.clone();
            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(limiter) => Some(limiter.acquire_owned().await.map_err(|e| {
                        TotalsError::TaskFailed {
                            message: format!("page {}: {}", page, e),
                        }
                    })?),
                    None => None,
                };
                source.fetch_page(page).await
            });
        }
        debug!(tasks = tasks.len(), "spawned page tasks");

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(result)) => collected.pages.push(result),
                Ok(Err(error)) => {
                    warn!(%error, "page fetch failed");
                    collected.errors.push(error);
                }
                Err(join_error) => {
                    warn!(error = %join_error, "page task did not complete");
                    collected.errors.push(TotalsError::TaskFailed {
                        message: join_error.to_string(),
                    });
                }
            }
        }

        collected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_utils::InMemoryPageSource;
    use rstest::rstest;
    use std::time::Duration;

    fn sorted_page_numbers(collected: &CollectedPages) -> Vec<PageNumber> {
        let mut pages: Vec<PageNumber> = collected.pages.iter().map(|p| p.page).collect();
        pages.sort_unstable();
        pages
    }

    #[rstest]
    #[case::zero_pages(0)]
    #[case::single_page(1)]
    #[tokio::test]
    async fn test_nothing_to_fetch(#[case] total_pages: PageNumber) {
        let source = Arc::new(InMemoryPageSource::with_pages(4, 3));
        let collector = PageCollector::new(Arc::clone(&source));

        let collected = collector.fetch_remaining_pages(total_pages).await;

        assert!(collected.pages.is_empty());
        assert!(collected.is_complete());
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_pages_valid() {
        let source = Arc::new(InMemoryPageSource::with_pages(4, 3));
        let collector = PageCollector::new(Arc::clone(&source));

        let collected = collector.fetch_remaining_pages(4).await;

        assert_eq!(collected.pages.len(), 3);
        assert_eq!(sorted_page_numbers(&collected), vec![2, 3, 4]);
        assert!(collected.last_error().is_none());
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_pages_beyond_range_surface_error_and_keep_successes() {
        let source = Arc::new(InMemoryPageSource::with_pages(4, 3));
        let collector = PageCollector::new(Arc::clone(&source));

        let collected = collector.fetch_remaining_pages(8).await;

        // Every page was attempted even though some failed
        assert_eq!(source.calls(), 7);
        assert_eq!(sorted_page_numbers(&collected), vec![2, 3, 4]);
        assert_eq!(collected.errors.len(), 4);
        assert!(collected
            .errors
            .iter()
            .all(|e| matches!(e, TotalsError::FetchFailure { status: Some(404), .. })));

        let mut failed: Vec<PageNumber> = collected.errors.iter().filter_map(|e| e.page()).collect();
        failed.sort_unstable();
        assert_eq!(failed, vec![5, 6, 7, 8]);

        let (pages, last) = collected.into_parts();
        assert_eq!(pages.len(), 3);
        assert!(matches!(last, Some(TotalsError::FetchFailure { .. })));
    }

    #[tokio::test]
    async fn test_last_error_is_last_observed() {
        let source = Arc::new(
            InMemoryPageSource::with_pages(3, 2)
                .without_page(2)
                .malformed(3),
        );
        let collector = PageCollector::new(source);

        let collected = collector.fetch_remaining_pages(3).await;

        assert!(collected.pages.is_empty());
        assert_eq!(collected.errors.len(), 2);
        assert_eq!(collected.last_error(), collected.errors.last());
    }

    #[tokio::test]
    async fn test_panicking_task_does_not_abort_collection() {
        let source = Arc::new(InMemoryPageSource::with_pages(4, 2).panicking(3));
        let collector = PageCollector::new(source);

        let collected = collector.fetch_remaining_pages(4).await;

        assert_eq!(sorted_page_numbers(&collected), vec![2, 4]);
        assert_eq!(collected.errors.len(), 1);
        assert!(matches!(collected.errors[0], TotalsError::TaskFailed { .. }));
    }

    #[tokio::test]
    async fn test_max_concurrent_caps_in_flight_requests() {
        let source = Arc::new(
            InMemoryPageSource::with_pages(10, 1).delayed(Duration::from_millis(20)),
        );
        let collector = PageCollector::new(Arc::clone(&source)).with_max_concurrent(Some(2));

        let collected = collector.fetch_remaining_pages(10).await;

        assert_eq!(collected.pages.len(), 9);
        assert!(collected.is_complete());
        assert!(source.max_in_flight() <= 2);
    }

    #[tokio::test]
    async fn test_unbounded_fan_out_runs_pages_concurrently() {
        let source = Arc::new(
            InMemoryPageSource::with_pages(6, 1).delayed(Duration::from_millis(50)),
        );
        let collector = PageCollector::new(Arc::clone(&source)).with_max_concurrent(Some(0));

        let collected = collector.fetch_remaining_pages(6).await;

        assert_eq!(collected.pages.len(), 5);
        assert!(source.max_in_flight() > 1);
    }
}
