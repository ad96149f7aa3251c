//! Domain types for dupe-d.

use std::path::PathBuf;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Content identity: digest of a file's bytes.
///
/// Wraps a 32-byte hash (SHA-256 or BLAKE3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Returns the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ContentHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Canonical, dot-prefixed, case-sensitive extensions (".jpg").
///
/// Empty means every file matches. Duplicates are kept; they do not change matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionFilter(pub Vec<String>);

// ============================================================================
// ENUMS
// ============================================================================

/// Digest function used for file content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashAlgorithm::Sha256 => write!(f, "SHA-256"),
            HashAlgorithm::Blake3 => write!(f, "BLAKE3"),
        }
    }
}

/// What to do when a single file cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the whole scan; no report is written.
    #[default]
    Abort,
    /// Record the failure, keep going, write the report for what was readable.
    Skip,
}

// ============================================================================
// STRUCTS
// ============================================================================

/// One matched regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Base filename.
    pub name: String,
    /// Full path as walked (relative or absolute, like the root).
    pub path: PathBuf,
    /// Size in bytes.
    pub size: u64,
    /// Content digest.
    pub hash: ContentHash,
}

/// Result of a scan: records in walk order plus anything skipped.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub records: Vec<FileRecord>,
    /// Entries that failed under `ErrorPolicy::Skip` (path, error message).
    pub skipped: Vec<(PathBuf, String)>,
}

impl ScanOutcome {
    /// Sum of all record sizes in bytes.
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Configuration for scanning operations.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Extensions to include (empty = all).
    pub filter: ExtensionFilter,
    /// Digest function.
    pub algorithm: HashAlgorithm,
    /// Maximum directory depth (None = unlimited).
    pub max_depth: Option<usize>,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
    /// Abort on the first unreadable file, or skip it.
    pub error_policy: ErrorPolicy,
}

/// Where the CSV report goes.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Directory the timestamped file is created in.
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

/// Everything one invocation needs, built once from the command line.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Directory to scan (None = current directory).
    pub target: Option<PathBuf>,
    /// Raw `--ext` tokens, possibly comma-joined, dot optional.
    pub raw_extensions: Vec<String>,
    /// Scan knobs. `filter` is overwritten from `raw_extensions` by the pipeline.
    pub scan: ScanConfig,
    pub report: ReportConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_hex_is_lowercase_64_chars() {
        let hash = ContentHash([0xAB; 32]);
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c == 'a' || c == 'b'));
        assert_eq!(hash.to_string(), hex);
    }

    #[test]
    fn test_total_bytes() {
        let outcome = ScanOutcome {
            records: vec![
                FileRecord {
                    name: "a".into(),
                    path: PathBuf::from("a"),
                    size: 3,
                    hash: ContentHash([0; 32]),
                },
                FileRecord {
                    name: "b".into(),
                    path: PathBuf::from("b"),
                    size: 4,
                    hash: ContentHash([1; 32]),
                },
            ],
            skipped: Vec::new(),
        };
        assert_eq!(outcome.total_bytes(), 7);
    }
}
