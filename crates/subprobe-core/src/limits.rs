//! File descriptor budget for in-flight probes.
//!
//! A blocking libcurl transfer may wait on its socket with `select()`, which
//! rejects descriptors numbered `FD_SETSIZE` (1024) or higher with
//! CURLE_BAD_FUNCTION_ARGUMENT. Each in-flight probe also holds a socket plus
//! resolver descriptors. Concurrency is capped so the process stays under both
//! the soft `RLIMIT_NOFILE` and `FD_SETSIZE`.

/// Highest descriptor count a `select()`-based wait can handle.
pub const SELECT_FD_LIMIT: u64 = 1024;
/// Descriptors left for stdio, logging, the runtime and the CA bundle.
pub const RESERVED_FDS: u64 = 64;
/// Upper estimate of descriptors one in-flight probe holds (socket + resolver pair + slack).
pub const FDS_PER_PROBE: u64 = 4;

/// Hostnames that may be in flight at once for a given open-files limit. Never 0.
pub fn concurrency_for_fd_limit(limit: u64) -> usize {
    let usable = limit.min(SELECT_FD_LIMIT).saturating_sub(RESERVED_FDS);
    ((usable / FDS_PER_PROBE) as usize).max(1)
}

/// Raise the soft open-files limit toward `SELECT_FD_LIMIT` (never past the hard
/// limit) and return the resulting soft limit. `None` if it cannot be queried.
#[cfg(unix)]
pub fn raise_open_files_limit() -> Option<u64> {
    let mut rl = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut rl) } != 0 {
        tracing::debug!("getrlimit(RLIMIT_NOFILE) failed");
        return None;
    }
    let wanted = (SELECT_FD_LIMIT as libc::rlim_t).min(rl.rlim_max);
    if rl.rlim_cur < wanted {
        let raised = libc::rlimit {
            rlim_cur: wanted,
            rlim_max: rl.rlim_max,
        };
        if unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &raised) } == 0 {
            tracing::debug!(from = rl.rlim_cur as u64, to = wanted as u64, "raised open files limit");
            rl.rlim_cur = wanted;
        }
    }
    Some(rl.rlim_cur as u64)
}

#[cfg(not(unix))]
pub fn raise_open_files_limit() -> Option<u64> {
    None
}

/// Resolve the concurrency cap for a scan: the descriptor budget, or the
/// requested value if it is smaller. A larger request is clamped with a warning.
pub fn effective_concurrency(requested: Option<usize>) -> usize {
    let fd_limit = raise_open_files_limit().unwrap_or(SELECT_FD_LIMIT);
    clamp_concurrency(requested, concurrency_for_fd_limit(fd_limit))
}

fn clamp_concurrency(requested: Option<usize>, budget: usize) -> usize {
    match requested {
        None => budget,
        Some(n) if n.max(1) > budget => {
            tracing::warn!(requested = n, budget, "concurrency exceeds descriptor budget, clamping");
            budget
        }
        Some(n) => n.max(1),
    }
}
