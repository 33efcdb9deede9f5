//! Transaction Totals CLI
//!
//! Fetches every page of the transactions API and prints the total amount
//! per date.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --format csv > totals.csv
//! cargo run -- --base-url http://127.0.0.1:8080 --max-concurrent 4 --timeout-secs 10
//! ```
//!
//! Totals go to stdout, one `date total` pair per line sorted by date.
//! Logs and errors go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success, every page contributed to the totals
//! - 1: Fatal error (first page unavailable, invalid arguments, output failure, etc.)
//! - 2: Partial result, totals were printed but some pages could not be fetched

use std::process;
use transaction_totals::cli;
use transaction_totals::pipeline::run_pipeline;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(&args.log_level);

    let config = args.to_pipeline_config();

    let mut output = std::io::stdout().lock();
    match run_pipeline(&config, args.format, &mut output) {
        Ok(summary) if summary.is_degraded() => {
            for error in &summary.errors {
                eprintln!("Error: {}", error);
            }
            eprintln!(
                "Warning: totals cover {} of {} pages",
                summary.pages_fetched, summary.total_pages
            );
            process::exit(2);
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
