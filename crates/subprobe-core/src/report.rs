//! Render probe results as output lines.
//!
//! Quiet mode prints only live URLs; inactive and failed probes are dropped.

use crate::probe::{Outcome, ProbeFailure, ProbeResult};

/// Line to print for `result`, or `None` when the mode suppresses it.
pub fn render(result: &ProbeResult, verbose: bool) -> Option<String> {
    let url = &result.url;
    match (&result.outcome, verbose) {
        (Outcome::Active(code), true) => Some(format!("Active: {}\tStatus Code: {}", url, code)),
        (Outcome::Active(_), false) => Some(url.clone()),
        (Outcome::Inactive(code), true) => {
            Some(format!("Inactive: {}\tStatus Code: {}", url, code))
        }
        (Outcome::Failed(ProbeFailure::Timeout), true) => {
            Some(format!("Timeout occurred while checking {}", url))
        }
        (Outcome::Failed(ProbeFailure::Transport(reason)), true) => {
            Some(format!("Error occurred while checking {}: {}", url, reason))
        }
        (Outcome::Inactive(_), false) | (Outcome::Failed(_), false) => None,
    }
}

/// Print `result` to stdout as a single line, if the mode shows it.
pub fn print(result: &ProbeResult, verbose: bool) {
    if let Some(line) = render(result, verbose) {
        println!("{}", line);
    }
}
