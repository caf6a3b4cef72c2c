use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Per-request timeout used when neither the CLI nor the config sets one.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// `subprobe/<version>`; some WAFs reject requests without a User-Agent.
pub fn default_user_agent() -> String {
    format!("subprobe/{}", env!("CARGO_PKG_VERSION"))
}

/// Global configuration loaded from `~/.config/subprobe/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubprobeConfig {
    /// Timeout for one HEAD request (connect + response), in milliseconds.
    /// 0 disables the timeout.
    pub timeout_ms: u64,
    /// Maximum hostnames probed at once. Unset means the open-files budget (see `limits`).
    pub max_concurrency: Option<usize>,
    /// Follow 3xx redirects and classify the final response.
    pub follow_redirects: bool,
    /// User-Agent header to send. Defaults to `subprobe/<version>`; an empty
    /// string sends none.
    pub user_agent: Option<String>,
}

impl Default for SubprobeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_concurrency: None,
            follow_redirects: true,
            user_agent: Some(default_user_agent()),
        }
    }
}

impl SubprobeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("subprobe")?;
    Ok(xdg_dirs.get_config_home().join("subprobe").join("config.toml"))
}

/// Load configuration from disk. A missing file yields defaults; nothing is written.
pub fn load_or_default() -> Result<SubprobeConfig> {
    let path = config_path()?;
    Ok(load_from(&path)?)
}

/// Load configuration from an explicit path, falling back to defaults if absent.
pub fn load_from(path: &Path) -> Result<SubprobeConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(SubprobeConfig::default());
    }

    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
