//! Map HTTP status codes and curl errors onto probe outcomes.

use super::{Outcome, ProbeFailure};

/// Anything below 400 counts as live, redirects included.
pub fn classify_status(code: u32) -> Outcome {
    if code < 400 {
        Outcome::Active(code)
    } else {
        Outcome::Inactive(code)
    }
}

/// Only timeouts get their own class; every other curl failure is `Transport`.
pub fn classify_transport_error(e: &curl::Error) -> ProbeFailure {
    if e.is_operation_timedout() {
        ProbeFailure::Timeout
    } else {
        ProbeFailure::Transport(e.to_string())
    }
}
