//! dupe-d CLI
//!
//! Hash every file under a directory and write a CSV report for spotting duplicates.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use dupe_d::error::Error;
use dupe_d::pipeline::{run, single_target};
use dupe_d::types::{ErrorPolicy, HashAlgorithm, ReportConfig, RunConfig, ScanConfig};

#[derive(Parser)]
#[command(name = "dupe-d")]
#[command(about = "Identify duplicate files by hashing them into a CSV report")]
#[command(
    long_about = "Hash every file under a directory (default: the current one) and write \
                  hash_results_<YYYYMMDD>_<HHMMSS>.csv. Sort the report on the Hash column \
                  to spot duplicates."
)]
#[command(after_help = "Examples:\n  dupe-d\n  dupe-d /path/to/directory\n  \
                        dupe-d --ext jpg --ext png /path/to/directory\n  dupe-d --ext=jpg,png,pdf")]
#[command(version)]
struct Cli {
    /// Directory to scan (default: current directory)
    #[arg(value_name = "DIRECTORY")]
    paths: Vec<PathBuf>,

    /// File extensions to process (can be specified multiple times or comma-separated)
    #[arg(short, long = "ext", value_name = "EXT", action = ArgAction::Append)]
    ext: Vec<String>,

    /// Hash algorithm
    #[arg(long, value_enum, default_value = "sha256")]
    algorithm: AlgorithmArg,

    /// Maximum directory depth
    #[arg(long)]
    max_depth: Option<usize>,

    /// Follow symbolic links while walking
    #[arg(long)]
    follow_symlinks: bool,

    /// Skip unreadable files instead of aborting the whole scan
    #[arg(long)]
    skip_unreadable: bool,

    /// Directory to write the CSV report into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Increase log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum AlgorithmArg {
    Sha256,
    Blake3,
}

impl From<AlgorithmArg> for HashAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sha256 => HashAlgorithm::Sha256,
            AlgorithmArg::Blake3 => HashAlgorithm::Blake3,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cmd_scan(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ============================================================================
// COMMAND HANDLER
// ============================================================================

fn cmd_scan(cli: Cli) -> Result<(), Error> {
    let config = RunConfig {
        target: single_target(cli.paths)?,
        raw_extensions: cli.ext,
        scan: ScanConfig {
            algorithm: cli.algorithm.into(),
            max_depth: cli.max_depth,
            follow_symlinks: cli.follow_symlinks,
            error_policy: if cli.skip_unreadable {
                ErrorPolicy::Skip
            } else {
                ErrorPolicy::Abort
            },
            ..Default::default()
        },
        report: ReportConfig {
            output_dir: cli.output_dir,
        },
    };

    let summary = run(&config, &mut io::stdout().lock())?;

    if !summary.outcome.skipped.is_empty() {
        eprintln!("Skipped {} unreadable entries:", summary.outcome.skipped.len());
        for (path, error) in &summary.outcome.skipped {
            eprintln!("  {} - {}", path.display(), error);
        }
    }

    Ok(())
}
