//! HTTP HEAD liveness probing.
//!
//! Uses the curl crate (libcurl). Every probe gets a fresh `Easy` handle, so no
//! connection is reused between requests. Calls block; run them from
//! `spawn_blocking` when driven from async code.

mod classify;

use std::time::Duration;

use thiserror::Error;

use crate::config::SubprobeConfig;

pub use classify::{classify_status, classify_transport_error};

/// Upper bound on redirect hops when redirects are followed.
pub const MAX_REDIRECTS: u32 = 10;

/// URL scheme a hostname is probed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Probe order for every hostname.
    pub const ALL: [Scheme; 2] = [Scheme::Http, Scheme::Https];

    pub fn prefix(self) -> &'static str {
        match self {
            Scheme::Http => "http://",
            Scheme::Https => "https://",
        }
    }

    /// `scheme://host`, verbatim: no path, no port handling, no encoding.
    pub fn url_for(self, host: &str) -> String {
        format!("{}{}", self.prefix(), host)
    }
}

/// Why a probe produced no HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeFailure {
    /// The request did not finish within the configured timeout.
    #[error("timed out")]
    Timeout,
    /// Any other transport failure: DNS, connection refused, TLS, malformed URL.
    #[error("{0}")]
    Transport(String),
}

/// Classified result of one HEAD request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Status code below 400.
    Active(u32),
    /// Status code 400 or above.
    Inactive(u32),
    Failed(ProbeFailure),
}

/// One probed URL and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub url: String,
    pub outcome: Outcome,
}

/// Request settings shared read-only by every probe in a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Applies to the whole request (connect + response). Zero means no timeout.
    pub timeout: Duration,
    pub follow_redirects: bool,
    /// Sent as `User-Agent`; `None` or empty sends no header.
    pub user_agent: Option<String>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self::from(&SubprobeConfig::default())
    }
}

impl From<&SubprobeConfig> for ProbeOptions {
    fn from(cfg: &SubprobeConfig) -> Self {
        Self {
            timeout: cfg.timeout(),
            follow_redirects: cfg.follow_redirects,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Performs a HEAD request against `url` and classifies the response.
///
/// Never returns an error: transport failures become `Outcome::Failed`.
pub fn probe_url(url: &str, opts: &ProbeOptions) -> Outcome {
    match head_status(url, opts) {
        Ok(code) => classify_status(code),
        Err(e) => Outcome::Failed(classify_transport_error(&e)),
    }
}

/// Probes `host` over http, then https, handing each result to `on_result`
/// as soon as it is known. Both results are kept; neither suppresses the other.
pub fn probe_host<F>(host: &str, opts: &ProbeOptions, mut on_result: F) -> Vec<ProbeResult>
where
    F: FnMut(&ProbeResult),
{
    let mut results = Vec::with_capacity(Scheme::ALL.len());
    for scheme in Scheme::ALL {
        let url = scheme.url_for(host);
        let outcome = probe_url(&url, opts);
        tracing::debug!(url = %url, outcome = ?outcome, "probe done");
        let result = ProbeResult { url, outcome };
        on_result(&result);
        results.push(result);
    }
    results
}

fn head_status(url: &str, opts: &ProbeOptions) -> Result<u32, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(opts.follow_redirects)?;
    if opts.follow_redirects {
        easy.max_redirections(MAX_REDIRECTS)?;
    }
    easy.timeout(opts.timeout)?;
    if let Some(ua) = opts.user_agent.as_deref().filter(|ua| !ua.is_empty()) {
        easy.useragent(ua)?;
    }
    easy.perform()?;
    easy.response_code()
}
