//! Core traits for page retrieval
//!
//! This module defines the abstraction that lets the collector and the query
//! run against the HTTP fetcher or an in-memory source interchangeably.

use async_trait::async_trait;

use crate::types::{PageNumber, PageResult, TotalsError};

/// Trait for retrieving one page of transactions
///
/// Implementations perform at most one I/O operation per call and never retry.
/// Failures are returned to the caller, never logged-and-swallowed.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch and decode a single page
    async fn fetch_page(&self, page: PageNumber) -> Result<PageResult, TotalsError>;
}
