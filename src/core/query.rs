//! Query orchestration
//!
//! Runs the full pipeline for one query:
//! 1. Fetch the first page (fatal on failure)
//! 2. Derive the total page count from the first page
//! 3. Collect the remaining pages concurrently
//! 4. Merge the first page back in and aggregate by date

use std::sync::Arc;

use tracing::{info, warn};

use super::aggregator::aggregate;
use super::collector::PageCollector;
use super::traits::PageSource;
use crate::types::{DailyTotals, PageNumber, TotalsError, FIRST_PAGE};

/// Number of pages needed to hold `total_count` records at `page_size` per page
///
/// A first page with no transactions gives no page size to divide by; the
/// query then treats the first page as the only one. Counts beyond the page
/// number range saturate.
pub fn total_pages(total_count: u64, page_size: usize) -> PageNumber {
    if page_size == 0 {
        return FIRST_PAGE;
    }
    let pages = total_count.div_ceil(page_size as u64).max(FIRST_PAGE as u64);
    PageNumber::try_from(pages).unwrap_or(PageNumber::MAX)
}

/// Result of a query that got past the first page
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Per-date totals over every page that was fetched
    pub totals: DailyTotals,

    /// Page count derived from the first page
    pub total_pages: PageNumber,

    /// Pages that contributed to `totals`, including the first
    pub pages_fetched: usize,

    /// Failures on later pages, in arrival order
    pub errors: Vec<TotalsError>,
}

impl QueryOutcome {
    /// Whether some later page failed and the totals are partial
    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The last failure observed on a later page
    pub fn last_error(&self) -> Option<&TotalsError> {
        self.errors.last()
    }
}

/// Fetch-and-aggregate query over a `PageSource`
#[derive(Debug)]
pub struct TotalsQuery<S> {
    source: Arc<S>,
    collector: PageCollector<S>,
}

impl<S: PageSource + 'static> TotalsQuery<S> {
    /// Create a query with unbounded fan-out
    pub fn new(source: Arc<S>) -> Self {
        let collector = PageCollector::new(Arc::clone(&source));
        Self { source, collector }
    }

    /// Cap the number of concurrent page requests
    pub fn with_max_concurrent(mut self, max_concurrent: Option<usize>) -> Self {
        self.collector = self.collector.with_max_concurrent(max_concurrent);
        self
    }

    /// Run the query
    ///
    /// # Errors
    ///
    /// Returns the first page's error if it cannot be fetched or decoded, or
    /// `ArithmeticOverflow` from aggregation. Failures on later pages do not
    /// error; they are reported in `QueryOutcome::errors`.
    pub async fn execute(&self) -> Result<QueryOutcome, TotalsError> {
        let first = self.source.fetch_page(FIRST_PAGE).await?;
        let total_pages = total_pages(first.total_count, first.len());
        info!(
            total_count = first.total_count,
            page_size = first.len(),
            total_pages,
            "fetched first page"
        );

        let collected = self.collector.fetch_remaining_pages(total_pages).await;
        let errors = collected.errors;
        let mut pages = collected.pages;
        pages.push(first);

        let totals = aggregate(&pages)?;

        if errors.is_empty() {
            info!(pages = pages.len(), dates = totals.len(), "query complete");
        } else {
            warn!(
                pages = pages.len(),
                failed = errors.len(),
                dates = totals.len(),
                "query complete with missing pages"
            );
        }

        Ok(QueryOutcome {
            totals,
            total_pages,
            pages_fetched: pages.len(),
            errors,
        })
    }
}
