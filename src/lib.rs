//! Transaction Totals Library
//! # Overview
//!
//! This library fetches paginated transactions from a remote JSON API and
//! sums their amounts by date.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, PageResult, errors)
//! - [`cli`] - CLI arguments parsing and log setup
//! - [`core`] - Business logic components:
//!   - [`core::fetcher`] - Fetches and decodes one page over HTTP
//!   - [`core::collector`] - Fetches the remaining pages concurrently
//!   - [`core::aggregator`] - Running sum of amounts per date
//!   - [`core::query`] - Orchestrates a full query
//! - [`io`] - Wire format decoding and totals output
//! - [`pipeline`] - Runtime setup and end-to-end run
//!
//! # Query Flow
//!
//! 1. Page 1 is fetched first; its failure is fatal
//! 2. Total pages = ceil(totalCount / len(page 1 transactions))
//! 3. Pages 2..N are fetched with one task per page; failures are kept
//!    alongside the successful pages instead of aborting the query
//! 4. Every transaction is folded into a per-date sum
//!
//! # Amounts
//!
//! Amounts are `rust_decimal::Decimal`, so per-date sums are exact.

pub mod cli;
pub mod core;
pub mod io;
pub mod pipeline;
pub mod types;

pub use self::core::{aggregate, CollectedPages, HttpPageFetcher, PageCollector, PageSource, TotalsQuery};
pub use io::{write_totals, OutputFormat};
pub use pipeline::{run_pipeline, PipelineConfig, RunSummary};
pub use types::{DailyTotals, PageNumber, PageResult, TotalsError, Transaction};
