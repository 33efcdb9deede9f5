//! Types module
//!
//! Contains core data structures used throughout the application.
//! - `transaction`: Transaction, page and totals types
//! - `error`: Error types for the totals pipeline

pub mod error;
pub mod transaction;

pub use error::TotalsError;
pub use transaction::{DailyTotals, PageNumber, PageResult, Transaction, FIRST_PAGE};
