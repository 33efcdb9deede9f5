//! Core business logic module
//!
//! This module contains the fetch-and-aggregate components:
//! - `traits` - The `PageSource` abstraction
//! - `fetcher` - HTTP implementation of `PageSource`
//! - `collector` - Concurrent collection of the remaining pages
//! - `aggregator` - Running-sum aggregation by date
//! - `query` - Orchestration of a full query

pub mod aggregator;
pub mod collector;
pub mod fetcher;
pub mod query;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_utils;

pub use aggregator::aggregate;
pub use collector::{CollectedPages, PageCollector};
pub use fetcher::{HttpPageFetcher, DEFAULT_BASE_URL};
pub use query::{total_pages, QueryOutcome, TotalsQuery};
pub use traits::PageSource;
