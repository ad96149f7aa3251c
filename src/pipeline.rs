//! One full run: resolve → normalize → scan → report.
//!
//! Configuration arrives as a single `RunConfig` value. Progress lines go to
//! the `out` sink (stdout in the binary) so tests can capture them.

use std::io::Write;
use std::path::PathBuf;

use humansize::{format_size, BINARY};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::extension::normalize_extensions;
use crate::report::{display_path, write_report};
use crate::scanner::scan_with_progress;
use crate::target::resolve_target;
use crate::types::{RunConfig, ScanConfig, ScanOutcome};

/// What a successful run produced.
#[derive(Debug)]
pub struct RunSummary {
    /// Path of the CSV report, absolute when it could be computed.
    pub report_path: PathBuf,
    pub outcome: ScanOutcome,
}

/// Execute the whole pipeline.
///
/// Nothing is written to disk unless the scan succeeds.
///
/// # Errors
/// The first error from resolution, scanning or report writing.
pub fn run<W: Write>(config: &RunConfig, out: &mut W) -> Result<RunSummary> {
    let mut out = Progress::new(out);
    let root = resolve_target(config.target.as_deref())?;

    let scan_config = ScanConfig {
        filter: normalize_extensions(&config.raw_extensions[..]),
        ..config.scan.clone()
    };

    out.line(format_args!("Scanning folder: {}", root.display()));
    if scan_config.filter.is_empty() {
        out.line(format_args!("Processing all file types"));
    } else {
        out.line(format_args!("Filtering by extensions: {}", scan_config.filter.summary()));
    }
    info!(algorithm = %scan_config.algorithm, policy = ?scan_config.error_policy, "starting scan");

    let outcome = scan_with_progress(&root, &scan_config, |path| {
        out.line(format_args!("Processing: {}", path.display()));
    })?;

    out.line(format_args!(
        "Hashed {} files ({})",
        outcome.records.len(),
        format_size(outcome.total_bytes(), BINARY)
    ));

    let written = write_report(&outcome.records, &config.report)?;
    let report_path = display_path(&written);
    out.line(format_args!("Output written to: {}", report_path.display()));

    Ok(RunSummary {
        report_path,
        outcome,
    })
}

/// Reject more than one positional path.
///
/// # Errors
/// `InvalidArguments` when `paths` has two or more entries.
pub fn single_target(mut paths: Vec<PathBuf>) -> Result<Option<PathBuf>> {
    if paths.len() > 1 {
        return Err(Error::InvalidArguments(format!(
            "accepts at most 1 directory, received {}",
            paths.len()
        )));
    }
    Ok(paths.pop())
}

/// Progress lines on a best-effort sink: a closed stdout does not fail the
/// run, but the first lost line is logged.
struct Progress<'a, W: Write> {
    out: &'a mut W,
    broken: bool,
}

impl<'a, W: Write> Progress<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self { out, broken: false }
    }

    fn line(&mut self, line: std::fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", line) {
            if !self.broken {
                warn!(error = %e, "progress output failed; further lines are dropped silently");
                self.broken = true;
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
