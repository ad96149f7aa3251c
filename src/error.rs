//! Error taxonomy for dupe-d.
//!
//! Every variant is fatal: the pipeline stops at the first one and the CLI
//! prints it as `Error: <message>`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which step of the per-entry scan failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFailureKind {
    /// The directory walk itself (readdir, metadata of an entry).
    Walk,
    /// Opening or reading a file while hashing it.
    Hash,
    /// Re-reading file metadata after a successful hash.
    Stat,
}

impl std::fmt::Display for ScanFailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanFailureKind::Walk => write!(f, "failed to walk"),
            ScanFailureKind::Hash => write!(f, "failed to hash file"),
            ScanFailureKind::Stat => write!(f, "failed to get file stats for"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("directory not accessible: {}: {source}", path.display())]
    PathNotAccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("current directory unavailable: {0}")]
    WorkingDirectoryUnavailable(#[source] io::Error),

    #[error("{kind} {}: {source}", path.display())]
    ScanFailure {
        kind: ScanFailureKind,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report {}: {source}", path.display())]
    ReportWriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn scan(kind: ScanFailureKind, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::ScanFailure {
            kind,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn report(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::ReportWriteFailure {
            path: path.into(),
            source,
        }
    }
}
