//! I/O module
//!
//! Handles the API wire format and the totals report.
//!
//! # Components
//!
//! - `page_format` - JSON page decoding and conversion to domain types
//! - `output` - Totals serialization (text or CSV)

pub mod output;
pub mod page_format;

pub use output::{write_totals, OutputFormat};
pub use page_format::{decode_page, PageRecord, TransactionWire};
