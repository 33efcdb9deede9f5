//! Error types for the totals pipeline
//!
//! This module defines all error types that can occur while fetching,
//! decoding and aggregating transaction pages.
//!
//! # Error Categories
//!
//! - **Page Errors**: transport failures, non-success statuses, malformed bodies
//! - **Task Errors**: a page task panicked before reporting back
//! - **Arithmetic Errors**: overflow while summing a date's amounts
//! - **Setup/Output Errors**: runtime, configuration and writer failures

use crate::types::PageNumber;
use thiserror::Error;

/// Main error type for the totals pipeline
///
/// Page-level variants are returned to the caller rather than logged where
/// they occur. A failure on the first page is fatal for the query; failures
/// on later pages degrade the result without aborting it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TotalsError {
    /// The page request failed at the transport level or returned a non-success status
    #[error("Failed to fetch page {page}{}: {message}", status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default())]
    FetchFailure {
        /// Requested page number
        page: PageNumber,
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Description of the failure
        message: String,
    },

    /// The response body did not match the expected page shape
    #[error("Malformed response for page {page}: {message}")]
    DecodeFailure {
        /// Requested page number
        page: PageNumber,
        /// Description of the decoding failure
        message: String,
    },

    /// A page task panicked or was aborted before reporting a result
    #[error("Page task failed: {message}")]
    TaskFailed {
        /// Description of the join failure
        message: String,
    },

    /// Summing the amounts for a date overflowed the decimal range
    #[error("Arithmetic overflow while summing amounts for {date}")]
    ArithmeticOverflow {
        /// Date whose running sum overflowed
        date: String,
    },

    /// The async runtime could not be created
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the runtime failure
        message: String,
    },

    /// Writing the totals failed
    #[error("Output error: {message}")]
    Output {
        /// Description of the write failure
        message: String,
    },

    /// A configuration value cannot be used
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem
        message: String,
    },
}

impl From<std::io::Error> for TotalsError {
    fn from(error: std::io::Error) -> Self {
        TotalsError::Output {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for TotalsError {
    fn from(error: csv::Error) -> Self {
        TotalsError::Output {
            message: error.to_string(),
        }
    }
}

impl TotalsError {
    /// Create a FetchFailure error
    pub fn fetch_failure(page: PageNumber, status: Option<u16>, message: impl Into<String>) -> Self {
        TotalsError::FetchFailure {
            page,
            status,
            message: message.into(),
        }
    }

    /// Create a DecodeFailure error
    pub fn decode_failure(page: PageNumber, message: impl Into<String>) -> Self {
        TotalsError::DecodeFailure {
            page,
            message: message.into(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(date: &str) -> Self {
        TotalsError::ArithmeticOverflow {
            date: date.to_string(),
        }
    }

    /// Page the error refers to, for page-level failures
    pub fn page(&self) -> Option<PageNumber> {
        match self {
            TotalsError::FetchFailure { page, .. } | TotalsError::DecodeFailure { page, .. } => {
                Some(*page)
            }
            _ => None,
        }
    }
}
