//! Scan target resolution.
//!
//! Either the user-supplied path, validated as an existing directory, or the
//! process's current working directory. The resolved path is used verbatim as
//! the walk root: no canonicalization, no trailing-slash cleanup.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Resolve the directory to scan.
///
/// # Errors
/// - `PathNotAccessible` if the explicit path cannot be stat'ed.
/// - `NotADirectory` if it exists but is not a directory.
/// - `WorkingDirectoryUnavailable` if no path was given and the CWD is unknown.
pub fn resolve_target(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_target_from(explicit, env::current_dir)
}

/// Resolve the directory to scan, with the working-directory lookup injected.
///
/// `current_dir` is only called when no path was given.
///
/// # Errors
/// Same as [`resolve_target`].
pub fn resolve_target_from<F>(explicit: Option<&Path>, current_dir: F) -> Result<PathBuf>
where
    F: FnOnce() -> io::Result<PathBuf>,
{
    match explicit {
        Some(path) => validate_directory(path),
        None => current_dir().map_err(Error::WorkingDirectoryUnavailable),
    }
}

/// Check that `path` exists and is a directory.
///
/// Follows symlinks, so a link to a directory is accepted.
pub fn validate_directory(path: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(path).map_err(|source| Error::PathNotAccessible {
        path: path.to_path_buf(),
        source,
    })?;

    if !metadata.is_dir() {
        return Err(Error::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(path.to_path_buf())
}

// ============================================================================
// TESTS
// ============================================================================
