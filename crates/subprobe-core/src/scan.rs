//! Concurrent scan driver.
//!
//! Spawns one task per hostname into a `JoinSet` and waits for all of them.
//! Tasks wait on a semaphore before probing, sized by the descriptor budget in
//! [`crate::limits`] or a smaller requested limit. There is no global timeout:
//! each request's own timeout bounds its task.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::limits;
use crate::probe::{self, Outcome, ProbeFailure, ProbeOptions, ProbeResult};

/// Settings for one scan run.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub probe: ProbeOptions,
    /// Maximum hostnames probed at once. `None` = the descriptor budget; larger
    /// values are clamped to it and 0 is treated as 1.
    pub max_concurrency: Option<usize>,
}

/// Outcome counts for a finished scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Hostnames whose task ran to completion.
    pub hosts: usize,
    pub active: usize,
    pub inactive: usize,
    pub timed_out: usize,
    pub errored: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Active(_) => self.active += 1,
            Outcome::Inactive(_) => self.inactive += 1,
            Outcome::Failed(ProbeFailure::Timeout) => self.timed_out += 1,
            Outcome::Failed(ProbeFailure::Transport(_)) => self.errored += 1,
        }
    }

    /// Total probes (two per completed hostname).
    pub fn probes(&self) -> usize {
        self.active + self.inactive + self.timed_out + self.errored
    }
}

/// Probes every hostname over http and https and hands each result to `sink`
/// as soon as it is known. Returns once every task has finished.
///
/// `sink` is called from many threads at once; results arrive in no particular order.
pub async fn run_scan<F>(hosts: Vec<String>, opts: &ScanOptions, sink: F) -> ScanSummary
where
    F: Fn(&ProbeResult) + Send + Sync + 'static,
{
    let sink = Arc::new(sink);
    let probe_opts = Arc::new(opts.probe.clone());
    let in_flight = limits::effective_concurrency(opts.max_concurrency);
    let gate = Arc::new(Semaphore::new(in_flight));

    tracing::debug!(
        hosts = hosts.len(),
        in_flight,
        timeout_ms = opts.probe.timeout.as_millis() as u64,
        "starting scan"
    );

    let mut join_set = JoinSet::new();
    for host in hosts {
        let sink = Arc::clone(&sink);
        let probe_opts = Arc::clone(&probe_opts);
        let gate = Arc::clone(&gate);
        join_set.spawn(probe_task(host, probe_opts, gate, sink));
    }

    let mut summary = ScanSummary::default();
    while let Some(res) = join_set.join_next().await {
        match res {
            Ok(Ok(results)) => {
                summary.hosts += 1;
                for r in &results {
                    summary.record(&r.outcome);
                }
            }
            Ok(Err(e)) => tracing::warn!("probe task failed: {:#}", e),
            Err(e) => tracing::warn!("scan task join: {}", e),
        }
    }

    tracing::info!(
        hosts = summary.hosts,
        active = summary.active,
        inactive = summary.inactive,
        timed_out = summary.timed_out,
        errored = summary.errored,
        "scan finished"
    );
    summary
}

/// One hostname: wait for a permit, then run both blocking probes.
async fn probe_task<F>(
    host: String,
    probe_opts: Arc<ProbeOptions>,
    gate: Arc<Semaphore>,
    sink: Arc<F>,
) -> Result<Vec<ProbeResult>>
where
    F: Fn(&ProbeResult) + Send + Sync + 'static,
{
    let _permit = gate
        .acquire_owned()
        .await
        .context("concurrency gate closed")?;
    tokio::task::spawn_blocking(move || probe::probe_host(&host, &probe_opts, |r| (*sink)(r)))
        .await
        .context("probe task join")
}

/// Like [`run_scan`] but returns results for `hosts` instead of streaming them.
/// Used by callers that need every result before acting, e.g. tests.
pub async fn collect_scan(hosts: Vec<String>, opts: &ScanOptions) -> (Vec<ProbeResult>, ScanSummary) {
    let results = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink_results = Arc::clone(&results);
    let summary = run_scan(hosts, opts, move |r| {
        if let Ok(mut v) = sink_results.lock() {
            v.push(r.clone());
        }
    })
    .await;
    let results = match Arc::try_unwrap(results) {
        Ok(m) => m.into_inner().unwrap_or_default(),
        Err(arc) => arc.lock().map(|v| v.clone()).unwrap_or_default(),
    };
    (results, summary)
}
