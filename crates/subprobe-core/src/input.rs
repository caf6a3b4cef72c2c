//! Hostname input: pick one source at startup, then read non-blank lines from it.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::InputError;

/// Where hostnames are read from. Resolved once, before any probing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Data piped into standard input.
    Stdin,
    /// File given with `-i`.
    File(PathBuf),
}

impl InputSource {
    /// Choose the input source. Piped stdin wins over a file path, so `-i` is
    /// ignored whenever stdin is not a terminal.
    pub fn resolve(stdin_is_terminal: bool, path: Option<&Path>) -> Result<Self, InputError> {
        if !stdin_is_terminal {
            return Ok(InputSource::Stdin);
        }
        match path {
            Some(p) => Ok(InputSource::File(p.to_path_buf())),
            None => Err(InputError::NotSpecified),
        }
    }

    /// Read every non-blank, trimmed line from this source.
    pub fn read_hostnames(&self) -> Result<Vec<String>, InputError> {
        match self {
            InputSource::Stdin => read_hostnames_from(io::stdin().lock()),
            InputSource::File(path) => {
                let file = File::open(path).map_err(|source| InputError::Open {
                    path: path.clone(),
                    source,
                })?;
                read_hostnames_from(BufReader::new(file))
            }
        }
    }
}

/// Collect trimmed hostnames from `reader`, skipping blank lines.
/// Duplicates are kept; each occurrence is probed.
pub fn read_hostnames_from<R: BufRead>(reader: R) -> Result<Vec<String>, InputError> {
    let mut hosts = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(InputError::Read)?;
        let host = line.trim();
        if !host.is_empty() {
            hosts.push(host.to_string());
        }
    }
    Ok(hosts)
}
