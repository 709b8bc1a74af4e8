//! Error types for config loading, hosts-file transactions and network probing.

use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cannot {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Probe(#[from] ProbeError),
}

impl Error {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

/// Why the current network identifier could not be determined.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("network detection not supported: {0}")]
    Unsupported(String),

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("not associated with a wireless network")]
    NotAssociated,
}

/// Managed-region markers that do not form exactly one well-ordered pair.
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkerInconsistency {
    #[error("start marker on line {start} has no end marker")]
    MissingEnd { start: usize },

    #[error("end marker on line {end} has no start marker")]
    MissingStart { end: usize },

    #[error("start marker appears more than once (lines {lines:?})")]
    DuplicateStart { lines: Vec<usize> },

    #[error("end marker appears more than once (lines {lines:?})")]
    DuplicateEnd { lines: Vec<usize> },

    #[error("end marker on line {end} precedes start marker on line {start}")]
    EndBeforeStart { start: usize, end: usize },
}
