//! CSV report writing.
//!
//! One header row, then one row per record in walk order. Sizes are shown in
//! megabytes (bytes / 1,048,576) with two decimals.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{FileRecord, ReportConfig};

/// Filename prefix; the local timestamp and `.csv` follow.
pub const REPORT_PREFIX: &str = "hash_results_";

/// Column header, in output order.
pub const REPORT_HEADER: [&str; 4] = ["Name", "Path", "Size (MB)", "Hash"];

const BYTES_PER_MB: f64 = 1_048_576.0;

/// `hash_results_YYYYMMDD_HHMMSS.csv` for the given local time.
///
/// Second resolution: two runs in the same second produce the same name.
pub fn report_filename(now: &DateTime<Local>) -> String {
    format!("{}{}.csv", REPORT_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MB
}

/// Size column text, e.g. 1,048,576 bytes → "1.00".
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2}", bytes_to_mb(bytes))
}

#[derive(Serialize)]
struct CsvRow<'a> {
    name: &'a str,
    path: String,
    size_mb: String,
    hash: String,
}

impl<'a> From<&'a FileRecord> for CsvRow<'a> {
    fn from(record: &'a FileRecord) -> Self {
        Self {
            name: &record.name,
            path: record.path.to_string_lossy().into_owned(),
            size_mb: format_size_mb(record.size),
            hash: record.hash.to_hex(),
        }
    }
}

/// Write header and rows as CSV to any sink.
///
/// Fields containing commas, quotes or newlines are quoted.
///
/// # Errors
/// Returns the first write error.
pub fn write_records<W: Write>(sink: W, records: &[FileRecord]) -> io::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);

    writer.write_record(REPORT_HEADER)?;
    for record in records {
        writer.serialize(CsvRow::from(record))?;
    }
    writer.flush()?;

    Ok(())
}

/// Create the timestamped report in `config.output_dir` and fill it.
///
/// An existing file with the same name is overwritten. On a write error the
/// half-written file is removed.
///
/// # Errors
/// `ReportWriteFailure` if the file cannot be created or written.
pub fn write_report(records: &[FileRecord], config: &ReportConfig) -> Result<PathBuf> {
    write_report_at(records, config, &Local::now())
}

/// Same as [`write_report`] with an explicit timestamp.
///
/// # Errors
/// `ReportWriteFailure` if the file cannot be created or written.
pub fn write_report_at(
    records: &[FileRecord],
    config: &ReportConfig,
    now: &DateTime<Local>,
) -> Result<PathBuf> {
    let path = config.output_dir.join(report_filename(now));

    let file = File::create(&path).map_err(|e| Error::report(&path, e))?;
    if let Err(e) = write_records(file, records) {
        let _ = fs::remove_file(&path);
        return Err(Error::report(&path, e));
    }

    info!(path = %path.display(), rows = records.len(), "report written");
    Ok(path)
}

/// Absolute form of `path` for display, or `path` itself if that fails.
pub fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContentHash;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn record(name: &str, path: &str, size: u64) -> FileRecord {
        FileRecord {
            name: name.to_string(),
            path: PathBuf::from(path),
            size,
            hash: ContentHash([0xab; 32]),
        }
    }

    fn render(records: &[FileRecord]) -> String {
        let mut out = Vec::new();
        write_records(&mut out, records).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 1, 1, 12, 5, 30).unwrap()
    }

    // --- naming and sizes ---

    #[test]
    fn test_report_filename_format() {
        assert_eq!(report_filename(&fixed_time()), "hash_results_20250101_120530.csv");
    }

    #[test]
    fn test_size_in_mb_two_decimals() {
        assert_eq!(format_size_mb(1_048_576), "1.00");
        assert_eq!(format_size_mb(0), "0.00");
        assert_eq!(format_size_mb(1_572_864), "1.50");
        assert_eq!(format_size_mb(5), "0.00");
        assert_eq!(format_size_mb(10 * 1_048_576), "10.00");
    }

    // --- CSV layout ---

    #[test]
    fn test_header_only_for_no_records() {
        assert_eq!(render(&[]), "Name,Path,Size (MB),Hash\n");
    }

    #[test]
    fn test_rows_follow_header_in_order() {
        let out = render(&[
            record("b.txt", "/data/b.txt", 1_048_576),
            record("a.txt", "/data/a.txt", 0),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        let hex = "ab".repeat(32);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Name,Path,Size (MB),Hash");
        assert_eq!(lines[1], format!("b.txt,/data/b.txt,1.00,{}", hex));
        assert_eq!(lines[2], format!("a.txt,/data/a.txt,0.00,{}", hex));
    }

    #[test]
    fn test_fields_with_commas_and_quotes_are_escaped() {
        let out = render(&[record("a,b \"x\".txt", "dir/a,b \"x\".txt", 0)]);
        let row = out.lines().nth(1).unwrap();

        assert!(row.starts_with("\"a,b \"\"x\"\".txt\",\"dir/a,b \"\"x\"\".txt\",0.00,"));
    }

    #[test]
    fn test_newline_in_name_is_quoted() {
        let out = render(&[record("line\nbreak", "line\nbreak", 0)]);
        assert!(out.contains("\"line\nbreak\",\"line\nbreak\""));
    }

    // --- file output ---

    #[test]
    fn test_write_report_creates_named_file() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig {
            output_dir: dir.path().to_path_buf(),
        };

        let path = write_report_at(&[record("a", "a", 3)], &config, &fixed_time()).unwrap();

        assert_eq!(path, dir.path().join("hash_results_20250101_120530.csv"));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Name,Path,Size (MB),Hash\n"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_same_second_overwrites() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig {
            output_dir: dir.path().to_path_buf(),
        };

        write_report_at(&[record("a", "a", 3), record("b", "b", 3)], &config, &fixed_time()).unwrap();
        let path = write_report_at(&[record("c", "c", 3)], &config, &fixed_time()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\nc,c,"));
    }

    #[test]
    fn test_missing_output_dir_fails() {
        let dir = TempDir::new().unwrap();
        let config = ReportConfig {
            output_dir: dir.path().join("nope"),
        };

        let err = write_report(&[], &config).unwrap_err();
        assert!(matches!(err, Error::ReportWriteFailure { .. }));
    }

    #[test]
    fn test_display_path_is_absolute() {
        let shown = display_path(Path::new("hash_results_20250101_120530.csv"));
        assert!(shown.is_absolute());
        assert!(shown.ends_with("hash_results_20250101_120530.csv"));
    }
}
