use subprobe_core::logging;

mod cli;

use crate::cli::Cli;

/// Print a fatal error and map the run result to the process exit code.
fn exit_code(result: &anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("subprobe error: {:#}", err);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let code = exit_code(&Cli::run_from_args().await);
    if code != 0 {
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_exits_zero() {
        assert_eq!(exit_code(&Ok(())), 0);
    }

    #[test]
    fn fatal_error_exits_one() {
        let err = anyhow::Error::new(subprobe_core::error::InputError::NotSpecified);
        assert_eq!(exit_code(&Err(err)), 1);
    }
}
