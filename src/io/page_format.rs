//! JSON page format handling
//!
//! This module centralizes the wire format of the transactions API:
//! - `PageRecord` / `TransactionWire` structures for deserialization
//! - Conversion from wire records to domain types
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{PageNumber, PageResult, TotalsError, Transaction};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Page body as sent by the API
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PageRecord {
    #[serde(rename = "totalCount")]
    pub total_count: u64,
    pub page: PageNumber,
    pub transactions: Vec<TransactionWire>,
}

/// Transaction as sent by the API
///
/// `Amount` arrives as a string-encoded decimal and is parsed during conversion.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TransactionWire {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Ledger", default)]
    pub ledger: String,
    #[serde(rename = "Amount")]
    pub amount: String,
    #[serde(rename = "Company", default)]
    pub company: String,
}

/// Parse a string-encoded amount
///
/// Accepts plain decimals (`-110.71`) and scientific notation (`1.5e2`).
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Convert a PageRecord to a PageResult
///
/// # Errors
///
/// Returns `DecodeFailure` for the requested page if any amount is not a decimal number.
pub fn convert_page_record(
    requested: PageNumber,
    record: PageRecord,
) -> Result<PageResult, TotalsError> {
    let transactions = record
        .transactions
        .into_iter()
        .map(|wire| {
            let amount = parse_amount(&wire.amount).ok_or_else(|| {
                TotalsError::decode_failure(
                    requested,
                    format!("Invalid amount '{}' on {}", wire.amount, wire.date),
                )
            })?;
            Ok(Transaction {
                date: wire.date,
                amount,
                ledger: wire.ledger,
                company: wire.company,
            })
        })
        .collect::<Result<Vec<_>, TotalsError>>()?;

    Ok(PageResult {
        total_count: record.total_count,
        page: record.page,
        transactions,
    })
}

/// Decode a raw response body into a PageResult
///
/// # Errors
///
/// Returns `DecodeFailure` when the body is not valid JSON, does not match the
/// page shape, or carries an unparseable amount.
pub fn decode_page(requested: PageNumber, body: &[u8]) -> Result<PageResult, TotalsError> {
    let record: PageRecord = serde_json::from_slice(body)
        .map_err(|e| TotalsError::decode_failure(requested, e.to_string()))?;
    convert_page_record(requested, record)
}
