//! CLI for the subprobe liveness checker.

pub(crate) mod scan;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use subprobe_core::config::{self, SubprobeConfig};
use subprobe_core::probe::ProbeOptions;
use subprobe_core::scan::ScanOptions;

use scan::run_scan;

/// Check which subdomains answer HTTP(S) HEAD requests.
#[derive(Debug, Parser)]
#[command(name = "subprobe")]
#[command(about = "subprobe: find live subdomains with HTTP/HTTPS HEAD probes", long_about = None)]
pub struct Cli {
    /// File containing one hostname per line. Ignored when data is piped to stdin.
    #[arg(short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Request timeout in milliseconds [default: 5000, or `timeout_ms` from config].
    #[arg(short = 't', value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Print active and inactive URLs with status codes, errors, and CPU info.
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Probe at most N hostnames at once (default and ceiling: the open-files budget).
    #[arg(short = 'c', long = "concurrency", value_name = "N")]
    pub concurrency: Option<usize>,
}

impl Cli {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_default()?;
        tracing::debug!("loaded config: {:?}", cfg);
        run_scan(&cli, &cfg).await
    }

    /// Merge flags over config: a flag wins, otherwise the config value (or its default).
    pub fn scan_options(&self, cfg: &SubprobeConfig) -> ScanOptions {
        let mut probe = ProbeOptions::from(cfg);
        if let Some(ms) = self.timeout_ms {
            probe.timeout = Duration::from_millis(ms);
        }
        ScanOptions {
            probe,
            max_concurrency: self.concurrency.or(cfg.max_concurrency),
        }
    }
}
