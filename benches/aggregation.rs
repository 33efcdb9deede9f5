//! Benchmark suite for the running-sum aggregator
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! Pages are generated in memory: 10 transactions per page spread over 30
//! dates, with cent-precision amounts.

use rust_decimal::Decimal;
use transaction_totals::{aggregate, PageResult, Transaction};

fn main() {
    divan::main();
}

fn synthetic_pages(pages: u32) -> Vec<PageResult> {
    let page_size = 10;
    let total_count = pages as u64 * page_size as u64;
    (1..=pages)
        .map(|page| PageResult {
            total_count,
            page,
            transactions: (0..page_size)
                .map(|i| {
                    let n = page as i64 * page_size as i64 + i;
                    Transaction::new(
                        format!("2021-11-{:02}", n % 30 + 1),
                        Decimal::new(n % 20_000 - 10_000, 2),
                    )
                })
                .collect(),
        })
        .collect()
}

/// Aggregate 100, 10,000 and 100,000 pages (1k, 100k and 1M transactions)
#[divan::bench(args = [100, 10_000, 100_000])]
fn aggregate_pages(bencher: divan::Bencher, pages: u32) {
    let input = synthetic_pages(pages);
    bencher.bench_local(|| aggregate(divan::black_box(&input)).expect("Aggregation failed"));
}
