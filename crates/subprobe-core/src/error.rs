//! Typed errors for input collection and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce the hostname list. All variants are fatal for a run.
#[derive(Debug, Error)]
pub enum InputError {
    /// Stdin is a terminal and no `-i` path was given.
    #[error("input file not specified")]
    NotSpecified,
    /// The input file could not be opened.
    #[error("file not found: {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A line could not be read (I/O error or invalid UTF-8).
    #[error("failed to read input: {0}")]
    Read(#[source] std::io::Error),
}

/// Failure to load `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
