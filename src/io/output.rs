//! Output serialization for daily totals
//!
//! Rows are sorted by date so that repeated runs print identical output even
//! though the underlying map has no order.

use crate::types::{DailyTotals, TotalsError};
use clap::ValueEnum;
use rust_decimal::Decimal;
use std::io::Write;

/// Output format for the totals report
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `date total` pair per line
    #[default]
    Text,
    /// CSV with a `date,total` header
    Csv,
}

/// Totals as `(date, total)` rows in ascending date order
pub fn sorted_rows(totals: &DailyTotals) -> Vec<(&str, Decimal)> {
    let mut rows: Vec<(&str, Decimal)> = totals
        .iter()
        .map(|(date, total)| (date.as_str(), *total))
        .collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    rows
}

/// Write daily totals in the requested format
///
/// # Errors
///
/// Returns `TotalsError::Output` if the writer fails.
pub fn write_totals(
    totals: &DailyTotals,
    format: OutputFormat,
    output: &mut dyn Write,
) -> Result<(), TotalsError> {
    let rows = sorted_rows(totals);

    match format {
        OutputFormat::Text => {
            for (date, total) in rows {
                writeln!(output, "{} {}", date, total)?;
            }
            output.flush()?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(output);
            writer.write_record(["date", "total"])?;
            for (date, total) in rows {
                writer.write_record([date, total.to_string().as_str()])?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}
