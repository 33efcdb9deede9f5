//! Running-sum aggregation of transactions by date

use crate::types::{DailyTotals, PageResult, TotalsError};
use rust_decimal::Decimal;

/// Fold every transaction of every page into a per-date sum
///
/// Runs in O(n) over the total transaction count. Page order and transaction
/// order do not affect the result. Dates with no transactions are absent.
///
/// # Errors
///
/// Returns `ArithmeticOverflow` if a date's sum leaves the decimal range.
pub fn aggregate(pages: &[PageResult]) -> Result<DailyTotals, TotalsError> {
    let mut totals = DailyTotals::new();

    for transaction in pages.iter().flat_map(|page| &page.transactions) {
        let entry = totals
            .entry(transaction.date.clone())
            .or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(transaction.amount)
            .ok_or_else(|| TotalsError::arithmetic_overflow(&transaction.date))?;
    }

    Ok(totals)
}
