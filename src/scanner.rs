//! Directory scanning and per-file hashing.
//!
//! Walks the tree in sorted, depth-first, pre-order, filters non-directory
//! entries by extension, and hashes each match. One file is open at a time.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result, ScanFailureKind};
use crate::hash::hash_file;
use crate::types::{ErrorPolicy, FileRecord, ScanConfig, ScanOutcome};

/// Scan `root` and hash every file matching the configured filter.
///
/// # Errors
/// Under `ErrorPolicy::Abort`, the first walk, hash or stat failure.
pub fn scan(root: &Path, config: &ScanConfig) -> Result<ScanOutcome> {
    scan_with_progress(root, config, |_| {})
}

/// Scan with a callback invoked for each matched file, just before hashing it.
///
/// # Errors
/// Under `ErrorPolicy::Abort`, the first walk, hash or stat failure. Nothing
/// collected so far is returned in that case.
pub fn scan_with_progress<F>(root: &Path, config: &ScanConfig, mut on_match: F) -> Result<ScanOutcome>
where
    F: FnMut(&Path),
{
    let mut outcome = ScanOutcome::default();

    for entry in build_walker(root, config) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                let source = io::Error::from(e);
                handle_failure(&mut outcome, config.error_policy, ScanFailureKind::Walk, &path, source)?;
                continue;
            }
        };

        // Directories are traversed, never recorded
        if !is_candidate(&entry) {
            continue;
        }

        if !config.filter.matches(entry.path()) {
            continue;
        }

        on_match(entry.path());

        match hash_entry(&entry, config) {
            Ok(record) => {
                debug!(path = %record.path.display(), size = record.size, hash = %record.hash, "hashed");
                outcome.records.push(record);
            }
            Err((kind, source)) => {
                handle_failure(&mut outcome, config.error_policy, kind, entry.path(), source)?;
            }
        }
    }

    Ok(outcome)
}

// ============================================================================
// INTERNAL
// ============================================================================

fn build_walker(root: &Path, config: &ScanConfig) -> walkdir::IntoIter {
    let mut walker = WalkDir::new(root)
        .follow_links(config.follow_symlinks)
        .sort_by_file_name();

    if let Some(max_depth) = config.max_depth {
        walker = walker.max_depth(max_depth);
    }

    walker.into_iter()
}

/// Regular files, plus unfollowed symlinks, which are hashed through their
/// target. A link to a directory or a dangling link then fails like any
/// unreadable file. Fifos, sockets and devices are never opened.
fn is_candidate(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || file_type.is_symlink()
}

/// Hash, then re-stat for the size, so the record reflects a fully read file.
fn hash_entry(
    entry: &DirEntry,
    config: &ScanConfig,
) -> std::result::Result<FileRecord, (ScanFailureKind, io::Error)> {
    let path = entry.path();

    let hash = hash_file(path, config.algorithm).map_err(|e| (ScanFailureKind::Hash, e))?;
    let metadata = fs::metadata(path).map_err(|e| (ScanFailureKind::Stat, e))?;

    Ok(FileRecord {
        name: entry.file_name().to_string_lossy().into_owned(),
        path: path.to_path_buf(),
        size: metadata.len(),
        hash,
    })
}

fn handle_failure(
    outcome: &mut ScanOutcome,
    policy: ErrorPolicy,
    kind: ScanFailureKind,
    path: &Path,
    source: io::Error,
) -> Result<()> {
    match policy {
        ErrorPolicy::Abort => Err(Error::scan(kind, path, source)),
        ErrorPolicy::Skip => {
            warn!(path = %path.display(), error = %source, "skipping: {}", kind);
            outcome.skipped.push((path.to_path_buf(), source.to_string()));
            Ok(())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
