//! Transaction-related types for the totals pipeline
//!
//! This module defines the decoded transaction record and the page that
//! carries a batch of them, as produced by a `PageSource`.

use rust_decimal::Decimal;
use std::collections::HashMap;

/// 1-based page number on the remote transaction API
pub type PageNumber = u32;

/// The page every query starts from
pub const FIRST_PAGE: PageNumber = 1;

/// Mapping from calendar date to the cumulative signed amount on that date
///
/// Key order carries no meaning; writers sort before printing.
pub type DailyTotals = HashMap<String, Decimal>;

/// A single decoded transaction
///
/// Created once while decoding a page and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Calendar date as sent by the API (e.g. `2021-11-30`)
    pub date: String,

    /// Signed amount; negative values are debits
    pub amount: Decimal,

    /// Ledger the transaction was booked against
    pub ledger: String,

    /// Counterparty name
    pub company: String,
}

impl Transaction {
    /// Create a transaction with empty ledger and company
    pub fn new(date: impl Into<String>, amount: Decimal) -> Self {
        Self {
            date: date.into(),
            amount,
            ledger: String::new(),
            company: String::new(),
        }
    }
}

/// One successfully fetched page of transactions
///
/// `total_count` is assumed consistent across every page of a query.
/// The page size is implied by the length of the first page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResult {
    /// Total number of transactions across all pages
    pub total_count: u64,

    /// Page number reported by the server
    pub page: PageNumber,

    /// Transactions on this page, in server order
    pub transactions: Vec<Transaction>,
}

impl PageResult {
    /// Number of transactions carried by this page
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the page carries no transactions
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
