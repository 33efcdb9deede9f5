use crate::core::DEFAULT_BASE_URL;
use crate::io::OutputFormat;
use crate::pipeline::PipelineConfig;
use clap::Parser;
use std::time::Duration;

/// Fetch paginated transactions and print the total amount per date
#[derive(Parser, Debug)]
#[command(name = "transaction-totals")]
#[command(about = "Fetch paginated transactions and print the total amount per date", long_about = None)]
pub struct CliArgs {
    /// Base URL of the transactions API
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL,
        help = "Base URL of the transactions API; pages are read from {base}/transactions/{page}.json"
    )]
    pub base_url: String,

    /// Maximum number of page requests in flight
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of page requests in flight (default: one per page)"
    )]
    pub max_concurrent_requests: Option<usize>,

    /// Number of runtime worker threads
    #[arg(
        long = "worker-threads",
        value_name = "COUNT",
        help = "Number of runtime worker threads (default: CPU cores)"
    )]
    pub worker_threads: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(
        long = "timeout-secs",
        value_name = "SECS",
        help = "Per-request timeout in seconds (default: none)"
    )]
    pub timeout_secs: Option<u64>,

    /// Output format for the totals
    #[arg(long = "format", value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Log filter directive
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log filter for stderr output, e.g. 'info' or 'transaction_totals=debug'"
    )]
    pub log_level: String,
}

impl CliArgs {
    /// Create a PipelineConfig from CLI arguments
    ///
    /// Values not given on the command line fall back to the defaults. Zero
    /// values are replaced by defaults with a warning.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let default = PipelineConfig::default();
        PipelineConfig::new(
            self.base_url.clone(),
            self.max_concurrent_requests,
            self.worker_threads.unwrap_or(default.worker_threads),
            self.timeout_secs.map(Duration::from_secs),
        )
    }
}
