//! Default action: read hostnames, probe them all, print live ones.

use anyhow::Result;
use std::io::{self, IsTerminal};
use subprobe_core::config::SubprobeConfig;
use subprobe_core::input::InputSource;
use subprobe_core::{report, scan};

use super::Cli;

pub async fn run_scan(cli: &Cli, cfg: &SubprobeConfig) -> Result<()> {
    run_scan_with_stdin(cli, cfg, io::stdin().is_terminal()).await
}

/// `run_scan` with the stdin check supplied by the caller.
pub(crate) async fn run_scan_with_stdin(
    cli: &Cli,
    cfg: &SubprobeConfig,
    stdin_is_terminal: bool,
) -> Result<()> {
    if cli.verbose {
        for line in parallelism_lines() {
            println!("{}", line);
        }
    }

    let source = InputSource::resolve(stdin_is_terminal, cli.input.as_deref())?;
    let hosts = source.read_hostnames()?;
    tracing::info!(source = ?source, hosts = hosts.len(), "read hostnames");

    let opts = cli.scan_options(cfg);
    let verbose = cli.verbose;
    let summary = scan::run_scan(hosts, &opts, move |result| report::print(result, verbose)).await;
    tracing::debug!(probes = summary.probes(), "all probes finished");
    Ok(())
}

/// Startup diagnostics printed in verbose mode. Must run inside a tokio runtime.
pub(crate) fn parallelism_lines() -> [String; 2] {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    let workers = tokio::runtime::Handle::current().metrics().num_workers();
    [
        format!("Logical CPUs: {}", cpus),
        format!("Runtime worker threads: {}", workers),
    ]
}
