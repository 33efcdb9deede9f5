//! In-memory page source used by the collector and query tests

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::traits::PageSource;
use crate::types::{PageNumber, PageResult, TotalsError, Transaction};

/// Serves pages from a map; unknown pages answer like a 404
#[derive(Debug, Default)]
pub struct InMemoryPageSource {
    pages: HashMap<PageNumber, PageResult>,
    malformed: HashSet<PageNumber>,
    panicking: HashSet<PageNumber>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl InMemoryPageSource {
    /// Source serving `pages` full pages of `page_size` transactions each,
    /// with one transaction of amount `-1` per page on `2021-11-{page}` and the rest on `2021-11-01`
    pub fn with_pages(pages: PageNumber, page_size: usize) -> Self {
        let total_count = pages as u64 * page_size as u64;
        let mut source = Self::default();
        for page in 1..=pages {
            let transactions = (0..page_size)
                .map(|i| {
                    let date = if i == 0 {
                        format!("2021-11-{:02}", page + 1)
                    } else {
                        "2021-11-01".to_string()
                    };
                    Transaction::new(date, Decimal::NEGATIVE_ONE)
                })
                .collect();
            source = source.page(PageResult {
                total_count,
                page,
                transactions,
            });
        }
        source
    }

    pub fn page(mut self, result: PageResult) -> Self {
        self.pages.insert(result.page, result);
        self
    }

    pub fn without_page(mut self, page: PageNumber) -> Self {
        self.pages.remove(&page);
        self
    }

    pub fn malformed(mut self, page: PageNumber) -> Self {
        self.malformed.insert(page);
        self
    }

    pub fn panicking(mut self, page: PageNumber) -> Self {
        self.panicking.insert(page);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for InMemoryPageSource {
    async fn fetch_page(&self, page: PageNumber) -> Result<PageResult, TotalsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.panicking.contains(&page) {
            panic!("page {} exploded", page);
        }
        if self.malformed.contains(&page) {
            return Err(TotalsError::decode_failure(page, "expected value at line 1 column 1"));
        }
        self.pages
            .get(&page)
            .cloned()
            .ok_or_else(|| TotalsError::fetch_failure(page, Some(404), "HTTP status 404 Not Found"))
    }
}
